//! go.mod reader
//!
//! Handles:
//! - require statements (single and block)
//! - replace directives (skipped; local overrides are not updatable)
//! - duplicate module paths (last write wins)

use crate::error::ManifestError;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

/// Conventional manifest filename for Go projects
pub const GO_MOD_FILE: &str = "go.mod";

// Single require: require module/path v1.2.3
static SINGLE_REQUIRE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*require\s+(\S+)\s+(v[\d]+\.[\d]+\.[\d]+[^\s]*)\s*(//.*)?$").unwrap()
});

// Require block entry: module/path v1.2.3
static BLOCK_ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\S+)\s+(v[\d]+\.[\d]+\.[\d]+[^\s]*)\s*(//.*)?$").unwrap()
});

/// Read `go.mod` from `dir` and return declared module → version.
pub fn read_dependencies(dir: &Path) -> Result<BTreeMap<String, String>, ManifestError> {
    let path = dir.join(GO_MOD_FILE);
    if !path.exists() {
        return Err(ManifestError::not_found(path));
    }
    let content =
        std::fs::read_to_string(&path).map_err(|e| ManifestError::read_error(&path, e))?;
    parse_go_mod(&path, &content)
}

/// Parse go.mod content into a module → version map.
///
/// The map is ordered by module path so downstream output is stable
/// regardless of require-block ordering.
pub fn parse_go_mod(
    path: &Path,
    content: &str,
) -> Result<BTreeMap<String, String>, ManifestError> {
    let mut dependencies = BTreeMap::new();
    let mut in_require_block = false;
    let mut in_replace_block = false;
    let mut saw_module = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }

        if trimmed.starts_with("module ") {
            saw_module = true;
            continue;
        }

        if trimmed.starts_with("require (") || trimmed == "require (" {
            in_require_block = true;
            continue;
        }

        if trimmed.starts_with("replace (") || trimmed == "replace (" {
            in_replace_block = true;
            continue;
        }

        if trimmed == ")" {
            in_require_block = false;
            in_replace_block = false;
            continue;
        }

        // Replace directives are local overrides, not registry dependencies
        if in_replace_block || trimmed.starts_with("replace ") {
            continue;
        }

        if let Some(caps) = SINGLE_REQUIRE_RE.captures(trimmed) {
            let module = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let version = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            dependencies.insert(module.to_string(), version.to_string());
            continue;
        }

        if in_require_block {
            if let Some(caps) = BLOCK_ENTRY_RE.captures(trimmed) {
                let module = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                let version = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
                dependencies.insert(module.to_string(), version.to_string());
            }
        }
    }

    if !saw_module {
        return Err(ManifestError::parse_error(path, "missing module directive"));
    }

    Ok(dependencies)
}
