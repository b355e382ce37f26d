//! Version-rewrite abstraction layer
//!
//! All version-string mutation of registered files is delegated to an
//! external versioning tool. This module models that tool as a narrow
//! [VersionRewriter] capability so the orchestration logic stays decoupled
//! from process invocation:
//!
//! - [subprocess::BumpversionTool]: a real implementation shelling out to
//!   the `bumpversion` binary
//! - [mock::MockRewriter]: an in-memory simulation for testing

pub mod mock;
pub mod subprocess;

pub use mock::MockRewriter;
pub use subprocess::BumpversionTool;

use crate::error::Result;
use crate::version::Target;

/// One invocation of the external version-bump tool.
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteRequest {
    /// The part to bump, passed to the tool by name.
    pub kind: Target,

    /// Explicit next version overriding the tool's own computation.
    pub new_version: Option<String>,

    /// When set, the tool is told to ignore its configured files and operate
    /// on exactly `files` — which may be empty, in which case only the
    /// configuration file itself is rewritten.
    pub no_configured_files: bool,

    /// Explicit file list to rewrite; only consulted when
    /// `no_configured_files` is set.
    pub files: Vec<String>,

    /// Whether the tool may run against a dirty working tree.
    pub allow_dirty: bool,
}

impl RewriteRequest {
    /// A plain bump of `kind` against the configured files.
    pub fn standard(kind: Target) -> Self {
        RewriteRequest {
            kind,
            new_version: None,
            no_configured_files: false,
            files: Vec::new(),
            allow_dirty: false,
        }
    }

    /// A bump of `kind` to an explicitly computed version.
    pub fn explicit(kind: Target, new_version: impl Into<String>) -> Self {
        RewriteRequest {
            kind,
            new_version: Some(new_version.into()),
            no_configured_files: false,
            files: Vec::new(),
            allow_dirty: false,
        }
    }

    /// A bump of `kind` restricted to exactly the given files, which may be
    /// an empty list.
    pub fn restricted(kind: Target, files: Vec<String>, allow_dirty: bool) -> Self {
        RewriteRequest {
            kind,
            new_version: None,
            no_configured_files: true,
            files,
            allow_dirty,
        }
    }
}

/// Capability interface over the external version-bump tool.
///
/// A single failed invocation aborts the whole bump; implementations signal
/// failure through the returned `Result`, never by partial rollback.
pub trait VersionRewriter {
    /// Apply one bump step, rewriting the version in the configuration file
    /// and in every file covered by the request.
    fn apply(&self, request: &RewriteRequest) -> Result<()>;
}
