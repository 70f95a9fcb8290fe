//! Compliance and risk scoring for cyber assurance assessments
//!
//! This crate provides:
//! - Outcome scoring of yes / no / unanswered questionnaires against a
//!   profile-dependent required level, with negative indicators that force
//!   a failing outcome
//! - Aggregation of outcome scores to principle, objective and overall level
//! - Risk rating from a fixed likelihood x impact matrix
//! - Risk tolerance classification against a per-category appetite
//! - CSV and Markdown export of the results
//!
//! All scoring is pure: the engine reads the framework tables and the
//! project records it is given and never mutates them.

#![warn(missing_docs)]

pub mod config;
pub mod engine;
pub mod error;
#[allow(missing_docs)]
pub mod export;
pub mod framework;
pub mod profile;
pub mod project;
pub mod report;
pub mod response;
pub mod risk;
pub mod scoring;

pub use config::AssessmentConfig;
pub use engine::AssessmentEngine;
pub use error::{AssessmentError, AssessmentResult};
pub use profile::{AchievementLevel, Profile};
pub use report::ComplianceReport;
pub use response::{Response, ResponseSet};
pub use scoring::ScoreStatus;

#[cfg(test)]
mod tests;
