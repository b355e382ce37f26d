use std::fs;
use std::path::Path;

use crate::error::{BumpError, Result};

/// Name of the configuration file read from the working-tree root.
pub const CONFIG_FILE: &str = ".bumpversion.cfg";

/// Prefix of the sections that register a version-bearing file.
const FILE_SECTION_PREFIX: &str = "bumpversion:file:";

/// Configuration loaded from `.bumpversion.cfg`.
///
/// The file is the single source of truth for the current version: it is read
/// fresh at process start and re-read after the external bump tool mutates it,
/// never cached or mutated in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpConfig {
    /// The canonical current version string.
    pub current_version: String,

    /// Regular expression with named groups `major`, `minor`, `patch`, `dev`
    /// used to parse (and, by the external tool, serialize) versions.
    pub parse: String,

    /// Registered files containing embedded version strings, in the order
    /// their `[bumpversion:file:<path>]` sections appear.
    pub files: Vec<String>,
}

impl BumpConfig {
    /// Loads the configuration from an INI-style file.
    ///
    /// Recognizes the `[bumpversion]` section with `current_version` and
    /// `parse` keys, plus `[bumpversion:file:<path>]` sections that register
    /// each `<path>` for version substitution. Unknown sections and keys are
    /// ignored, as are blank lines and `#`/`;` comment lines.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(BumpConfig)` - Parsed configuration
    /// * `Err` - If the file cannot be read or a required key is missing
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            BumpError::config(format!(
                "cannot read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_ini(&content)
    }

    /// Parses configuration from INI text.
    pub fn from_ini(content: &str) -> Result<Self> {
        let mut current_section = String::new();
        let mut current_version = None;
        let mut parse = None;
        let mut files = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                current_section = section.trim().to_string();
                if let Some(path) = current_section.strip_prefix(FILE_SECTION_PREFIX) {
                    files.push(path.to_string());
                }
                continue;
            }

            if current_section != "bumpversion" {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                match key.trim() {
                    "current_version" => current_version = Some(value.trim().to_string()),
                    "parse" => parse = Some(value.trim().to_string()),
                    _ => {}
                }
            }
        }

        let current_version = current_version
            .ok_or_else(|| BumpError::config("missing `current_version` in [bumpversion]"))?;
        let parse =
            parse.ok_or_else(|| BumpError::config("missing `parse` in [bumpversion]"))?;

        Ok(BumpConfig {
            current_version,
            parse,
            files,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r"
[bumpversion]
current_version = 1.2.0
parse = (?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)(\.dev(?P<dev>\d+))?

[bumpversion:file:Cargo.toml]

[bumpversion:file:HISTORY.md]
";

    #[test]
    fn test_parse_sample_config() {
        let config = BumpConfig::from_ini(SAMPLE).unwrap();
        assert_eq!(config.current_version, "1.2.0");
        assert!(config.parse.contains("(?P<major>"));
        assert_eq!(config.files, vec!["Cargo.toml", "HISTORY.md"]);
    }

    #[test]
    fn test_file_sections_keep_order() {
        let config = BumpConfig::from_ini(
            "[bumpversion]\ncurrent_version = 0.1.0\nparse = x\n\
             [bumpversion:file:b.txt]\n[bumpversion:file:a.txt]\n",
        )
        .unwrap();
        assert_eq!(config.files, vec!["b.txt", "a.txt"]);
    }

    #[test]
    fn test_missing_current_version_fails() {
        let result = BumpConfig::from_ini("[bumpversion]\nparse = x\n");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("current_version"));
    }

    #[test]
    fn test_missing_parse_fails() {
        let result = BumpConfig::from_ini("[bumpversion]\ncurrent_version = 1.0.0\n");
        assert!(result.unwrap_err().to_string().contains("parse"));
    }

    #[test]
    fn test_comments_and_unknown_keys_ignored() {
        let config = BumpConfig::from_ini(
            "# comment\n[bumpversion]\n; another comment\ncurrent_version = 1.0.0\n\
             parse = x\ntag = True\n[other]\ncurrent_version = 9.9.9\n",
        )
        .unwrap();
        assert_eq!(config.current_version, "1.0.0");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = BumpConfig::load("/nonexistent/.bumpversion.cfg");
        assert!(result.unwrap_err().to_string().contains("cannot read"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, SAMPLE).unwrap();

        let config = BumpConfig::load(&path).unwrap();
        assert_eq!(config.current_version, "1.2.0");
    }
}
