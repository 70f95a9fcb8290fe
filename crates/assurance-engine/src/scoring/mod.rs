//! Compliance scoring: per-outcome results and hierarchical aggregation

pub mod aggregate;
pub mod outcome;

pub use aggregate::{
    AggregateScore, AggregationEngine, ObjectiveResult, OverallResult, PrincipleResult,
};
pub use outcome::{OutcomeAssessment, OutcomeScore, OutcomeScorer, ScoreStatus};
