use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{BumpError, Result};

/// Build-consistency check that refreshes the dependency lockfile.
///
/// The lockfile is deliberately not a registered file for version
/// substitution: pattern matching against it could hit a dependency's version
/// instead of the project's own, so the build tool regenerates it instead.
pub trait LockfileRefresher {
    /// Run the check; the lockfile update is a side effect.
    fn refresh(&self) -> Result<()>;
}

/// [LockfileRefresher] implementation running `cargo check`.
pub struct CargoCheck {
    root: PathBuf,
}

impl CargoCheck {
    /// Creates a refresher running in the given working-tree root.
    pub fn new(root: impl AsRef<Path>) -> Self {
        CargoCheck {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl LockfileRefresher for CargoCheck {
    fn refresh(&self) -> Result<()> {
        let output = Command::new("cargo")
            .arg("check")
            .current_dir(&self.root)
            .output()
            .map_err(|e| {
                BumpError::command("cargo check", -1, format!("failed to execute: {}", e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BumpError::command(
                "cargo check",
                output.status.code().unwrap_or(-1),
                stderr.trim(),
            ));
        }

        Ok(())
    }
}

/// Recording mock for tests
pub struct MockLockfileRefresher {
    calls: Cell<usize>,
}

impl MockLockfileRefresher {
    /// Create a new mock with no recorded calls
    pub fn new() -> Self {
        MockLockfileRefresher {
            calls: Cell::new(0),
        }
    }

    /// Number of times `refresh` was called
    pub fn call_count(&self) -> usize {
        self.calls.get()
    }
}

impl Default for MockLockfileRefresher {
    fn default() -> Self {
        Self::new()
    }
}

impl LockfileRefresher for MockLockfileRefresher {
    fn refresh(&self) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        Ok(())
    }
}
