//! Sequential bump workflow
//!
//! Reads the configuration once at start, drives the external rewriter per
//! the bump plan, patches the changelog after real bumps, refreshes the
//! lockfile, re-reads the configuration to capture the version the rewriter
//! wrote, and creates the final signed commit. Every step blocks until
//! completion and every failure is fatal: no rollback, no retry.

use std::path::{Path, PathBuf};

use crate::changelog::{self, CHANGELOG_FILE};
use crate::config::{BumpConfig, CONFIG_FILE};
use crate::error::{BumpError, Result};
use crate::git::SourceControl;
use crate::lockfile::LockfileRefresher;
use crate::rewriter::{RewriteRequest, VersionRewriter};
use crate::version::{plan_bump, BumpPlan, Target, VersionSpec};

/// Result of a completed bump.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpOutcome {
    /// Version before the bump, as read from the configuration.
    pub old_version: String,

    /// Version after the bump, re-read from the configuration.
    pub new_version: String,

    /// Message of the created commit.
    pub commit_message: String,
}

/// Drives one version bump over injected collaborators.
pub struct Orchestrator<'a> {
    root: PathBuf,
    rewriter: &'a dyn VersionRewriter,
    source_control: &'a dyn SourceControl,
    lockfile: &'a dyn LockfileRefresher,
}

impl<'a> Orchestrator<'a> {
    /// Creates an orchestrator rooted at the given working tree.
    pub fn new(
        root: impl AsRef<Path>,
        rewriter: &'a dyn VersionRewriter,
        source_control: &'a dyn SourceControl,
        lockfile: &'a dyn LockfileRefresher,
    ) -> Self {
        Orchestrator {
            root: root.as_ref().to_path_buf(),
            rewriter,
            source_control,
            lockfile,
        }
    }

    /// Runs the whole bump for the requested target.
    ///
    /// # Arguments
    /// * `target` - The requested kind of version increment
    ///
    /// # Returns
    /// * `Ok(BumpOutcome)` - Old and new version plus the commit message
    /// * `Err` - On the first failing step; earlier steps are not rolled back
    pub fn run(&self, target: Target) -> Result<BumpOutcome> {
        let config = BumpConfig::load(self.config_path())?;
        let spec = VersionSpec::parse(&config.current_version, &config.parse)?;

        match plan_bump(&spec, target)? {
            BumpPlan::StartDevCycle => {
                let files = files_without_changelog(&config);
                self.rewriter
                    .apply(&RewriteRequest::restricted(Target::Minor, files.clone(), false))?;
                // The minor bump just dirtied the tree, so the dev-marker
                // invocation must be allowed to run on top of it.
                self.rewriter
                    .apply(&RewriteRequest::restricted(Target::Dev, files, true))?;
            }
            BumpPlan::ContinueDevCycle => {
                let files = files_without_changelog(&config);
                self.rewriter
                    .apply(&RewriteRequest::restricted(Target::Dev, files, false))?;
            }
            BumpPlan::Finalize { kind, new_version } => {
                self.rewriter
                    .apply(&RewriteRequest::explicit(kind, new_version))?;
                self.patch_changelog()?;
            }
            BumpPlan::Standard { kind } => {
                self.rewriter.apply(&RewriteRequest::standard(kind))?;
                self.patch_changelog()?;
            }
        }

        self.lockfile.refresh()?;

        // Re-read to capture the version the external tool just wrote.
        let old_version = config.current_version;
        let new_version = BumpConfig::load(self.config_path())?.current_version;

        let commit_message = format!("Bump version: {} → {}", old_version, new_version);
        self.source_control.commit_all_signed(&commit_message)?;

        Ok(BumpOutcome {
            old_version,
            new_version,
            commit_message,
        })
    }

    fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Rewrites the changelog against the latest released version from tags.
    fn patch_changelog(&self) -> Result<()> {
        let tag = self.source_control.latest_non_dev_tag()?.ok_or_else(|| {
            BumpError::version("no non-dev release tag found for changelog patching")
        })?;
        let version = tag.strip_prefix('v').unwrap_or(&tag);
        semver::Version::parse(version).map_err(|e| {
            BumpError::version(format!(
                "latest release tag '{}' is not a semantic version: {}",
                tag, e
            ))
        })?;

        changelog::patch_file(self.root.join(CHANGELOG_FILE), version)
    }
}

/// The registered files minus the changelog, preserving registration order.
///
/// Dev bumps never touch the changelog; its placeholder is only resolved when
/// a release is finalized.
fn files_without_changelog(config: &BumpConfig) -> Vec<String> {
    config
        .files
        .iter()
        .filter(|file| file.as_str() != CHANGELOG_FILE)
        .cloned()
        .collect()
}
