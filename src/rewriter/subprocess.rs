use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{BumpError, Result};
use crate::rewriter::{RewriteRequest, VersionRewriter};

/// [VersionRewriter] implementation shelling out to the `bumpversion` binary.
///
/// The tool reads `.bumpversion.cfg` from its working directory, computes the
/// next version, and rewrites it in every covered file plus the configuration
/// file itself. A non-zero exit is surfaced as a fatal [BumpError::Command]
/// with the captured stderr.
pub struct BumpversionTool {
    program: String,
    root: PathBuf,
}

impl BumpversionTool {
    /// Creates a tool invoking `bumpversion` from the given working-tree root.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_program(root, "bumpversion")
    }

    /// Creates a tool invoking a custom program (used by tests).
    pub fn with_program(root: impl AsRef<Path>, program: impl Into<String>) -> Self {
        BumpversionTool {
            program: program.into(),
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The argument vector for a request, without the program name.
    fn arguments(request: &RewriteRequest) -> Vec<String> {
        let mut args = Vec::new();
        if request.no_configured_files {
            args.push("--no-configured-files".to_string());
        }
        if request.allow_dirty {
            args.push("--allow-dirty".to_string());
        }
        if let Some(version) = &request.new_version {
            args.push("--new-version".to_string());
            args.push(version.clone());
        }
        args.push(request.kind.as_str().to_string());
        args.extend(request.files.iter().cloned());
        args
    }

    /// Human-readable command line for error messages.
    fn render(&self, args: &[String]) -> String {
        let mut line = self.program.clone();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl VersionRewriter for BumpversionTool {
    fn apply(&self, request: &RewriteRequest) -> Result<()> {
        let args = Self::arguments(request);

        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| {
                BumpError::command(self.render(&args), -1, format!("failed to execute: {}", e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BumpError::command(
                self.render(&args),
                output.status.code().unwrap_or(-1),
                stderr.trim(),
            ));
        }

        Ok(())
    }
}
