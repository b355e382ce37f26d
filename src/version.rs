use clap::ValueEnum;
use regex::Regex;

use crate::error::{BumpError, Result};

/// The requested kind of version increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    Major,
    Minor,
    Patch,
    Dev,
}

impl Target {
    /// The name of the bump part as passed to the external tool.
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Major => "major",
            Target::Minor => "minor",
            Target::Patch => "patch",
            Target::Dev => "dev",
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A version string parsed against the configured pattern.
///
/// `major`, `minor` and `patch` are always present; `dev` is present if and
/// only if the version is a prerelease.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionSpec {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub dev: Option<u64>,
}

impl VersionSpec {
    /// Parses a version string using a regular expression with named capture
    /// groups `major`, `minor`, `patch` and an optional `dev`.
    ///
    /// # Arguments
    /// * `version` - The version string (e.g., "1.2.0" or "1.3.0.dev2")
    /// * `pattern` - The configured parse pattern
    ///
    /// # Returns
    /// * `Ok(VersionSpec)` - Successfully parsed version
    /// * `Err` - If the pattern is invalid or the version does not match it
    pub fn parse(version: &str, pattern: &str) -> Result<Self> {
        let re = Regex::new(pattern)
            .map_err(|e| BumpError::config(format!("invalid parse pattern: {}", e)))?;
        let captures = re.captures(version).ok_or_else(|| {
            BumpError::version(format!(
                "version '{}' does not match configured pattern '{}'",
                version, pattern
            ))
        })?;

        let part = |name: &str| -> Result<u64> {
            let text = captures
                .name(name)
                .ok_or_else(|| {
                    BumpError::version(format!("pattern matched without a `{}` group", name))
                })?
                .as_str();
            text.parse().map_err(|_| {
                BumpError::version(format!("component `{}` is not a number: {}", name, text))
            })
        };

        let dev = match captures.name("dev") {
            Some(m) => Some(m.as_str().parse().map_err(|_| {
                BumpError::version(format!("component `dev` is not a number: {}", m.as_str()))
            })?),
            None => None,
        };

        Ok(VersionSpec {
            major: part("major")?,
            minor: part("minor")?,
            patch: part("patch")?,
            dev,
        })
    }

    /// Whether the version carries a prerelease marker.
    pub fn is_prerelease(&self) -> bool {
        self.dev.is_some()
    }

    /// The finalized release version for a prerelease bumped to `minor`:
    /// the already-bumped minor version with the prerelease marker dropped.
    pub fn finalized_minor(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// The finalized release version for a prerelease bumped to `major`:
    /// the previous planned minor release raised to the next major line.
    ///
    /// Computed with signed arithmetic and returned verbatim; a prerelease
    /// with `minor == 0` yields a negative minor component, which is left for
    /// the external tool to reject (assumed never to occur in practice).
    pub fn finalized_major(&self) -> String {
        format!("{}.{}.{}", self.major + 1, self.minor as i64 - 1, self.patch)
    }
}

/// The action selected by the bump branch table.
#[derive(Debug, Clone, PartialEq)]
pub enum BumpPlan {
    /// Non-prerelease + `dev`: minor bump followed by dev-marker addition,
    /// both restricted to the registered files minus the changelog.
    StartDevCycle,

    /// Prerelease + `dev`: increment the dev counter in place, restricted to
    /// the registered files minus the changelog.
    ContinueDevCycle,

    /// Prerelease + `major`/`minor`: finalize with an explicitly computed
    /// version, then patch the changelog.
    Finalize { kind: Target, new_version: String },

    /// Non-prerelease + real target: let the external tool compute the next
    /// version, then patch the changelog.
    Standard { kind: Target },
}

/// Selects the bump action for the current version state and requested target.
///
/// This is the whole state-transition table; it performs no I/O. The one
/// rejected combination is `patch` from a prerelease: prerelease versions
/// already represent a pending minor/major bump, so a patch from that state
/// is ambiguous.
pub fn plan_bump(spec: &VersionSpec, target: Target) -> Result<BumpPlan> {
    match (spec.is_prerelease(), target) {
        (false, Target::Dev) => Ok(BumpPlan::StartDevCycle),
        (true, Target::Dev) => Ok(BumpPlan::ContinueDevCycle),
        (true, Target::Major) => Ok(BumpPlan::Finalize {
            kind: Target::Major,
            new_version: spec.finalized_major(),
        }),
        (true, Target::Minor) => Ok(BumpPlan::Finalize {
            kind: Target::Minor,
            new_version: spec.finalized_minor(),
        }),
        (true, Target::Patch) => Err(BumpError::request(
            "cannot bump from `dev` to `patch`, rebase on top of the latest non-dev release",
        )),
        (false, kind) => Ok(BumpPlan::Standard { kind }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATTERN: &str = r"(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)(\.dev(?P<dev>\d+))?";

    #[test]
    fn test_parse_release_version() {
        let spec = VersionSpec::parse("1.2.0", PATTERN).unwrap();
        assert_eq!(
            spec,
            VersionSpec {
                major: 1,
                minor: 2,
                patch: 0,
                dev: None
            }
        );
        assert!(!spec.is_prerelease());
    }

    #[test]
    fn test_parse_prerelease_version() {
        let spec = VersionSpec::parse("1.3.0.dev2", PATTERN).unwrap();
        assert_eq!(spec.dev, Some(2));
        assert!(spec.is_prerelease());
    }

    #[test]
    fn test_parse_rejects_non_matching_version() {
        let err = VersionSpec::parse("not-a-version", PATTERN).unwrap_err();
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn test_parse_rejects_invalid_pattern() {
        let err = VersionSpec::parse("1.2.0", "(?P<major>").unwrap_err();
        assert!(err.to_string().contains("invalid parse pattern"));
    }

    #[test]
    fn test_plan_dev_from_release_starts_cycle() {
        let spec = VersionSpec::parse("1.2.0", PATTERN).unwrap();
        assert_eq!(plan_bump(&spec, Target::Dev).unwrap(), BumpPlan::StartDevCycle);
    }

    #[test]
    fn test_plan_dev_from_prerelease_continues_cycle() {
        let spec = VersionSpec::parse("1.3.0.dev0", PATTERN).unwrap();
        assert_eq!(
            plan_bump(&spec, Target::Dev).unwrap(),
            BumpPlan::ContinueDevCycle
        );
    }

    #[test]
    fn test_plan_minor_from_prerelease_finalizes() {
        let spec = VersionSpec::parse("1.3.0.dev2", PATTERN).unwrap();
        assert_eq!(
            plan_bump(&spec, Target::Minor).unwrap(),
            BumpPlan::Finalize {
                kind: Target::Minor,
                new_version: "1.3.0".to_string()
            }
        );
    }

    #[test]
    fn test_plan_major_from_prerelease_rolls_back_minor() {
        let spec = VersionSpec::parse("2.4.1.dev3", PATTERN).unwrap();
        assert_eq!(
            plan_bump(&spec, Target::Major).unwrap(),
            BumpPlan::Finalize {
                kind: Target::Major,
                new_version: "3.3.1".to_string()
            }
        );
    }

    #[test]
    fn test_plan_major_from_minor_zero_prerelease_goes_negative() {
        // Documented latent edge: minor == 0 yields a negative component,
        // passed verbatim for the external tool to reject.
        let spec = VersionSpec::parse("2.0.0.dev3", PATTERN).unwrap();
        assert_eq!(
            plan_bump(&spec, Target::Major).unwrap(),
            BumpPlan::Finalize {
                kind: Target::Major,
                new_version: "3.-1.0".to_string()
            }
        );
    }

    #[test]
    fn test_plan_patch_from_prerelease_is_rejected() {
        let spec = VersionSpec::parse("1.3.0.dev0", PATTERN).unwrap();
        let err = plan_bump(&spec, Target::Patch).unwrap_err();
        assert!(matches!(err, BumpError::Request(_)));
        assert!(err.to_string().contains("rebase"));
    }

    #[test]
    fn test_plan_standard_targets_from_release() {
        let spec = VersionSpec::parse("1.2.3", PATTERN).unwrap();
        for kind in [Target::Major, Target::Minor, Target::Patch] {
            assert_eq!(
                plan_bump(&spec, kind).unwrap(),
                BumpPlan::Standard { kind }
            );
        }
    }

    #[test]
    fn test_target_display_matches_tool_arguments() {
        assert_eq!(Target::Major.to_string(), "major");
        assert_eq!(Target::Dev.to_string(), "dev");
    }
}
