//! Changelog cleanup applied after real (non-dev) bumps.
//!
//! Each rule is a pure `(text) -> text` transformation so it can be tested
//! against literal before/after fixtures independently of file I/O.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::Result;

/// Name of the changelog file in the working-tree root.
pub const CHANGELOG_FILE: &str = "HISTORY.md";

/// Placeholder token replaced by the latest released version.
const VERSION_PLACEHOLDER: &str = "vXXX";

/// Deletes every line whose entire content is a single `-` character.
pub fn strip_empty_bullets(text: &str) -> String {
    // Unwrap is safe: the pattern is a literal known at compile time.
    let re = Regex::new(r"(?m)^-$").unwrap();
    re.replace_all(text, "").into_owned()
}

/// Strips the leading `- ` from lines beginning with `- ##`, turning them
/// into `##`-level heading lines.
pub fn promote_release_headings(text: &str) -> String {
    let re = Regex::new(r"(?m)^- ##").unwrap();
    re.replace_all(text, "##").into_owned()
}

/// Replaces every `vXXX` placeholder with `v<version>`.
pub fn fill_release_placeholder(text: &str, version: &str) -> String {
    text.replace(VERSION_PLACEHOLDER, &format!("v{}", version))
}

/// Applies the three cleanup rules in order over the whole content.
///
/// None of the rules is conditional on match count; content already free of
/// placeholders and marked lines passes through unchanged.
pub fn clean(text: &str, latest_version: &str) -> String {
    let text = strip_empty_bullets(text);
    let text = promote_release_headings(&text);
    fill_release_placeholder(&text, latest_version)
}

/// Rewrites the changelog file in place with the cleaned content.
///
/// # Arguments
/// * `path` - Path to the changelog file
/// * `latest_version` - Latest released (non-dev) version, without `v` prefix
pub fn patch_file(path: impl AsRef<Path>, latest_version: &str) -> Result<()> {
    let content = fs::read_to_string(path.as_ref())?;
    fs::write(path.as_ref(), clean(&content, latest_version))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_empty_bullets() {
        let before = "## 1.2.0\n-\n- kept a fix\n-\n";
        assert_eq!(strip_empty_bullets(before), "## 1.2.0\n\n- kept a fix\n\n");
    }

    #[test]
    fn test_strip_empty_bullets_keeps_dashes_inside_lines() {
        let before = "- a - b\n--\n - \n";
        assert_eq!(strip_empty_bullets(before), before);
    }

    #[test]
    fn test_promote_release_headings() {
        let before = "- ## vXXX\n- feature entry\n";
        assert_eq!(promote_release_headings(before), "## vXXX\n- feature entry\n");
    }

    #[test]
    fn test_fill_release_placeholder() {
        let before = "## vXXX\nrelease vXXX is out\n";
        assert_eq!(
            fill_release_placeholder(before, "1.3.0"),
            "## v1.3.0\nrelease v1.3.0 is out\n"
        );
    }

    #[test]
    fn test_clean_applies_rules_in_order() {
        let before = "- ## vXXX\n-\n- fixed a bug\n";
        assert_eq!(clean(before, "2.0.0"), "## v2.0.0\n\n- fixed a bug\n");
    }

    #[test]
    fn test_clean_is_idempotent_on_clean_input() {
        let once = clean("- ## vXXX\n-\n- entry\n", "1.3.0");
        let twice = clean(&once, "1.3.0");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_clean_leaves_plain_content_unchanged() {
        let content = "## v1.2.0\n\n- older entry\n";
        assert_eq!(clean(content, "1.3.0"), content);
    }

    #[test]
    fn test_patch_file_overwrites_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CHANGELOG_FILE);
        std::fs::write(&path, "- ## vXXX\n- entry\n").unwrap();

        patch_file(&path, "1.3.0").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "## v1.3.0\n- entry\n");
    }
}
