//! Manifest reading
//!
//! The manifest is the file declaring the project's direct dependencies
//! and their pinned versions. Only go.mod is supported; a manifest that
//! cannot be read or parsed aborts the whole run, since no meaningful
//! plan can be built without it.

mod go_mod;

pub use go_mod::{parse_go_mod, read_dependencies, GO_MOD_FILE};
