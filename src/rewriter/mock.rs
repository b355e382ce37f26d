use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{BumpConfig, CONFIG_FILE};
use crate::error::Result;
use crate::rewriter::{RewriteRequest, VersionRewriter};
use crate::version::{Target, VersionSpec};

/// Mock rewriter that simulates the external tool against a scratch
/// working tree, recording every invocation for assertions.
///
/// The simulation mirrors the tool's contract: the next version is either the
/// explicit override or computed from the current one by standard increment
/// rules, then substituted into the configuration file and every covered file.
pub struct MockRewriter {
    root: PathBuf,
    recorded: RefCell<Vec<RewriteRequest>>,
}

impl MockRewriter {
    /// Create a mock operating on the given working-tree root
    pub fn new(root: impl AsRef<Path>) -> Self {
        MockRewriter {
            root: root.as_ref().to_path_buf(),
            recorded: RefCell::new(Vec::new()),
        }
    }

    /// The requests applied through this mock, oldest first
    pub fn recorded_requests(&self) -> Vec<RewriteRequest> {
        self.recorded.borrow().clone()
    }

    /// Standard increment rules, using the `.devN` prerelease scheme.
    fn next_version(spec: &VersionSpec, kind: Target) -> String {
        match kind {
            Target::Major => format!("{}.0.0", spec.major + 1),
            Target::Minor => format!("{}.{}.0", spec.major, spec.minor + 1),
            Target::Patch => format!("{}.{}.{}", spec.major, spec.minor, spec.patch + 1),
            Target::Dev => format!(
                "{}.{}.{}.dev{}",
                spec.major,
                spec.minor,
                spec.patch,
                spec.dev.map_or(0, |n| n + 1)
            ),
        }
    }

    /// Substitute `old` with `new` in a file, if it exists.
    fn rewrite_file(&self, file: &str, old: &str, new: &str) -> Result<()> {
        let path = self.root.join(file);
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            fs::write(&path, content.replace(old, new))?;
        }
        Ok(())
    }
}

impl VersionRewriter for MockRewriter {
    fn apply(&self, request: &RewriteRequest) -> Result<()> {
        let config_path = self.root.join(CONFIG_FILE);
        let config = BumpConfig::load(&config_path)?;

        let old = config.current_version.clone();
        let new = match &request.new_version {
            Some(version) => version.clone(),
            None => {
                let spec = VersionSpec::parse(&old, &config.parse)?;
                Self::next_version(&spec, request.kind)
            }
        };

        let covered = if request.no_configured_files {
            &request.files
        } else {
            &config.files
        };
        for file in covered {
            self.rewrite_file(file, &old, &new)?;
        }

        // Only the current_version line is updated; the version text may
        // coincidentally appear elsewhere in the config (e.g. in `parse`).
        let content = fs::read_to_string(&config_path)?;
        let updated: Vec<String> = content
            .lines()
            .map(|line| {
                if line.trim_start().starts_with("current_version") && line.contains('=') {
                    format!("current_version = {}", new)
                } else {
                    line.to_string()
                }
            })
            .collect();
        fs::write(&config_path, updated.join("\n") + "\n")?;

        self.recorded.borrow_mut().push(request.clone());
        Ok(())
    }
}
