//! spm-updates - Swift Package Manager update checker library
//!
//! This library provides the core functionality for checking the Swift
//! packages of an Xcode project for newer versions:
//! - Reading package declarations from `project.pbxproj`
//! - Reading pinned versions from Package.resolved (v1 and v2)
//! - Listing published tags and branch heads with git
//! - Deciding which updates and notices to report

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod remote;
pub mod update;
