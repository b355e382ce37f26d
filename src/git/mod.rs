//! Source-control abstraction layer
//!
//! This module provides a trait-based abstraction over the two source-control
//! operations the bump workflow needs: enumerating release tags and creating
//! the final version-bump commit. The concrete implementations are:
//!
//! - [repository::Git2SourceControl]: a real implementation using the `git2` crate
//! - [mock::MockSourceControl]: an in-memory implementation for testing
//!
//! Orchestration code depends on the [SourceControl] trait rather than a
//! concrete implementation so the workflow stays unit-testable without a
//! working tree.

pub mod mock;
pub mod repository;

pub use mock::MockSourceControl;
pub use repository::Git2SourceControl;

use crate::error::Result;

/// Source-control operations used by the bump workflow.
pub trait SourceControl {
    /// Find the most recently created tag that does not contain `dev`.
    ///
    /// Tags are ordered by tag-creation time descending (tagger date for
    /// annotated tags, commit time for lightweight ones); any tag whose name
    /// contains the substring `dev` is excluded.
    ///
    /// # Returns
    /// * `Ok(Some(name))` - Name of the latest non-dev tag
    /// * `Ok(None)` - If no such tag exists
    /// * `Err` - If tag enumeration fails
    fn latest_non_dev_tag(&self) -> Result<Option<String>>;

    /// Create a single signed commit including all tracked working-tree changes.
    ///
    /// The equivalent of `git commit -a -s -m <message>`: every modified or
    /// deleted tracked file is staged, and a `Signed-off-by` trailer for the
    /// committer is appended to the message.
    ///
    /// # Arguments
    /// * `message` - The commit message (without the sign-off trailer)
    ///
    /// # Returns
    /// * `Ok(())` - Commit created
    /// * `Err` - If staging or committing fails
    fn commit_all_signed(&self, message: &str) -> Result<()>;
}
