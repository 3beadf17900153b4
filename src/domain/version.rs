//! Tolerant semantic version parsing and comparison
//!
//! Registry and tag data arrives with a leading `v` marker and sometimes
//! with minor/patch components missing, so parsing pads the numeric core
//! to a full `major.minor.patch` triple before handing it to semver.
//! Ordering follows semver precedence; build metadata never participates.

use semver::Version;
use std::cmp::Ordering;
use thiserror::Error;

/// A version string that could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid version '{input}': {message}")]
pub struct VersionParseError {
    /// The offending input
    pub input: String,
    /// What went wrong
    pub message: String,
}

impl VersionParseError {
    fn new(input: &str, message: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            message: message.into(),
        }
    }
}

/// Parse a version string, tolerating a leading non-digit marker (`v1.2.3`)
/// and a shortened numeric core (`1.2` becomes `1.2.0`).
///
/// Pre-release and build suffixes are preserved. A string whose numeric
/// core is not digits-and-dots fails to parse.
pub fn parse_tolerant(input: &str) -> Result<Version, VersionParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(VersionParseError::new(input, "empty version string"));
    }

    // Strip the optional leading marker: any run of non-digit characters
    // before the first digit ("v", "V", "ver").
    let start = trimmed
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| VersionParseError::new(input, "no numeric component"))?;
    let stripped = &trimmed[start..];

    // Split the numeric core from the pre-release/build suffix.
    let suffix_at = stripped.find(['-', '+']);
    let (core, suffix) = match suffix_at {
        Some(idx) => (&stripped[..idx], &stripped[idx..]),
        None => (stripped, ""),
    };

    // Pad a shortened core up to major.minor.patch.
    let dots = core.chars().filter(|&c| c == '.').count();
    let padded = match dots {
        0 => format!("{}.0.0{}", core, suffix),
        1 => format!("{}.0{}", core, suffix),
        _ => format!("{}{}", core, suffix),
    };

    Version::parse(&padded).map_err(|e| VersionParseError::new(input, e.to_string()))
}

/// Compare two version strings under semver precedence.
///
/// Build metadata is ignored for ordering, so `1.0.0+a` equals `1.0.0+b`.
pub fn compare(a: &str, b: &str) -> Result<Ordering, VersionParseError> {
    let va = parse_tolerant(a)?;
    let vb = parse_tolerant(b)?;
    Ok(va.cmp_precedence(&vb))
}

/// Returns true if `latest` is strictly newer than `current`.
///
/// Returns false when either input fails to parse: malformed registry or
/// manifest data must never trigger an update.
pub fn is_newer(current: &str, latest: &str) -> bool {
    matches!(compare(current, latest), Ok(Ordering::Less))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let v = parse_tolerant("1.2.3").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (1, 2, 3));
    }

    #[test]
    fn test_parse_with_v_marker() {
        let v = parse_tolerant("v1.2.3").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (1, 2, 3));
    }

    #[test]
    fn test_parse_pads_short_core() {
        let v = parse_tolerant("1.2").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (1, 2, 0));

        let v = parse_tolerant("2").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (2, 0, 0));
    }

    #[test]
    fn test_parse_preserves_prerelease() {
        let v = parse_tolerant("v1.2.3-beta.1").unwrap();
        assert_eq!(v.pre.as_str(), "beta.1");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_tolerant("").is_err());
        assert!(parse_tolerant("latest").is_err());
        assert!(parse_tolerant("v").is_err());
        assert!(parse_tolerant("1.x.3").is_err());
    }

    #[test]
    fn test_compare_orders_numerically() {
        assert_eq!(compare("1.2.3", "1.2.4").unwrap(), Ordering::Less);
        assert_eq!(compare("1.3.0", "1.2.9").unwrap(), Ordering::Greater);
        assert_eq!(compare("1.9.0", "1.10.0").unwrap(), Ordering::Less);
        assert_eq!(compare("1.2.3", "1.2.3").unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_compare_marker_only_difference_is_equal() {
        assert_eq!(compare("v1.2.3", "1.2.3").unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_compare_ignores_build_metadata() {
        assert_eq!(
            compare("1.2.3+build.7", "1.2.3+build.9").unwrap(),
            Ordering::Equal
        );
    }

    #[test]
    fn test_compare_prerelease_before_release() {
        assert_eq!(compare("1.2.3-rc.1", "1.2.3").unwrap(), Ordering::Less);
        assert_eq!(compare("1.2.3", "1.2.3-rc.1").unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_compare_antisymmetric() {
        let pairs = [("1.0.0", "2.0.0"), ("1.2.3", "1.2.4"), ("0.9.0", "0.10.0")];
        for (a, b) in pairs {
            assert_eq!(compare(a, b).unwrap(), compare(b, a).unwrap().reverse());
        }
    }

    #[test]
    fn test_compare_transitive() {
        // a < b and b < c implies a < c
        let (a, b, c) = ("1.0.0", "1.5.0", "2.0.0");
        assert_eq!(compare(a, b).unwrap(), Ordering::Less);
        assert_eq!(compare(b, c).unwrap(), Ordering::Less);
        assert_eq!(compare(a, c).unwrap(), Ordering::Less);
    }

    #[test]
    fn test_is_newer_basic() {
        assert!(is_newer("1.2.3", "1.2.4"));
        assert!(!is_newer("1.2.3", "1.2.3"));
        assert!(!is_newer("1.3.0", "1.2.9"));
    }

    #[test]
    fn test_is_newer_identity_is_false() {
        for v in ["0.0.1", "1.2.3", "v10.20.30", "2.0.0-alpha"] {
            assert!(!is_newer(v, v));
        }
    }

    #[test]
    fn test_is_newer_fail_safe_on_parse_error() {
        assert!(!is_newer("garbage", "1.2.3"));
        assert!(!is_newer("1.2.3", "garbage"));
        assert!(!is_newer("", ""));
    }

    #[test]
    fn test_is_newer_with_v_markers() {
        assert!(is_newer("v1.2.3", "v1.2.4"));
        assert!(!is_newer("v1.2.3", "1.2.3"));
    }
}
