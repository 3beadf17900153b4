//! Allow-list policy for automated updates

use std::collections::BTreeSet;

/// Set of dependency identifiers eligible for automated update proposals.
///
/// Dependencies outside the set still appear in reports but are never
/// proposed for update and are never looked up in the registry. An empty
/// `--allow` list means every declared dependency is eligible.
#[derive(Debug, Clone, Default)]
pub struct AllowPolicy {
    allowed: Option<BTreeSet<String>>,
}

impl AllowPolicy {
    /// Policy that allows every declared dependency
    pub fn allow_all() -> Self {
        Self { allowed: None }
    }

    /// Policy restricted to the given identifiers
    pub fn from_modules<I, S>(modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: Some(modules.into_iter().map(Into::into).collect()),
        }
    }

    /// Build a policy from CLI `--allow` values (empty means allow all)
    pub fn from_cli(allow: &[String]) -> Self {
        if allow.is_empty() {
            Self::allow_all()
        } else {
            Self::from_modules(allow.iter().cloned())
        }
    }

    /// Returns true if the identifier is eligible for automated update
    pub fn is_allowed(&self, module: &str) -> bool {
        match &self.allowed {
            None => true,
            Some(set) => set.contains(module),
        }
    }

    /// Returns true if the policy restricts to an explicit set
    pub fn is_restricted(&self) -> bool {
        self.allowed.is_some()
    }
}
