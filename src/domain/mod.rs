//! Core domain models for spm-updates
//!
//! This module contains the fundamental types used throughout the application:
//! - Semantic versions with SemVer precedence ordering
//! - Normalized repository URLs
//! - Requirement kinds declared by the project
//! - Report records and per-dependency outcomes

mod dependency;
mod outcome;
mod report;
mod repository;
mod requirement;
mod version;

pub use dependency::Dependency;
pub use outcome::{CheckOutcome, CheckSummary, SkipReason};
pub use report::{Bound, Report};
pub use repository::RepositoryUrl;
pub use requirement::{BoundField, Requirement};
pub use version::SemanticVersion;
