//! Core domain models for relup
//!
//! This module contains the fundamental types used throughout the application:
//! - Tolerant version parsing and ordering
//! - Merged change records
//! - Release classification and next-version planning
//! - Allow-list policy
//! - Per-dependency update decisions

mod candidate;
mod change;
mod policy;
mod release;
mod version;

pub use candidate::{CandidateStatus, UpdateCandidate};
pub use change::ChangeRecord;
pub use policy::AllowPolicy;
pub use release::{
    classify, next_version, next_version_or_placeholder, ReleaseKind, NEXT_VERSION_PLACEHOLDER,
};
pub use version::{compare, is_newer, parse_tolerant, VersionParseError};
