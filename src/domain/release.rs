//! Release classification and next-version planning
//!
//! A batch of merged changes either warrants a patch release (the default)
//! or a minor release (any change that names a feature). The planner bumps
//! the corresponding component of the last release tag.

use super::change::ChangeRecord;
use super::version::{parse_tolerant, VersionParseError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder used where a next version could not be computed
pub const NEXT_VERSION_PLACEHOLDER: &str = "next";

/// Kind of release a change batch warrants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseKind {
    /// Bug fixes only: bump the patch component
    Patch,
    /// At least one feature change: bump the minor component
    Minor,
}

impl fmt::Display for ReleaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseKind::Patch => write!(f, "next patch"),
            ReleaseKind::Minor => write!(f, "next minor"),
        }
    }
}

/// Classify a batch of changes into a release kind.
///
/// Only merged records are considered. The first feature mention wins and
/// ends the scan; an empty batch is a patch release.
pub fn classify(changes: &[ChangeRecord]) -> ReleaseKind {
    for change in changes.iter().filter(|c| c.is_merged()) {
        if change.mentions_feature() {
            return ReleaseKind::Minor;
        }
    }
    ReleaseKind::Patch
}

/// Compute the next version string from the current release tag.
///
/// Patch keeps major/minor and bumps patch; minor bumps minor and resets
/// patch. Pre-release and build components of the tag are dropped. An
/// unparseable tag is an error; callers substitute
/// [`NEXT_VERSION_PLACEHOLDER`] rather than propagating an empty version.
pub fn next_version(current_tag: &str, kind: ReleaseKind) -> Result<String, VersionParseError> {
    let mut version = parse_tolerant(current_tag)?;
    match kind {
        ReleaseKind::Patch => {
            version.patch += 1;
        }
        ReleaseKind::Minor => {
            version.minor += 1;
            version.patch = 0;
        }
    }
    version.pre = semver::Prerelease::EMPTY;
    version.build = semver::BuildMetadata::EMPTY;
    Ok(version.to_string())
}

/// Next version, falling back to the placeholder on an unparseable tag
pub fn next_version_or_placeholder(current_tag: &str, kind: ReleaseKind) -> String {
    next_version(current_tag, kind).unwrap_or_else(|_| NEXT_VERSION_PLACEHOLDER.to_string())
}
