//! relup - Dependency update and release readiness manager
//!
//! This library provides the core functionality for keeping a Go module
//! repository releasable:
//! - version comparison and update planning against the module registry
//! - release classification from merged changes and next-version planning
//! - deterministic dependency/release reports
//! - pull-request automation on top of git and the hosting API

pub mod cli;
pub mod domain;
pub mod error;
pub mod hosting;
pub mod manifest;
pub mod orchestrator;
pub mod plan;
pub mod progress;
pub mod registry;
pub mod report;
pub mod retry;
pub mod vcs;
