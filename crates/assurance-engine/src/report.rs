//! Compliance report shared by on-screen views and exporters

use crate::profile::Profile;
use crate::scoring::{AggregateScore, ObjectiveResult, OutcomeAssessment, OverallResult, ScoreStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scored framework for one project under one profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Project assessed
    pub project_id: String,
    /// Profile scored against
    pub profile: Profile,
    /// When the report was produced
    pub generated_at: DateTime<Utc>,
    /// Framework-wide aggregate
    pub overall: AggregateScore,
    /// Per-objective breakdown
    pub objectives: Vec<ObjectiveResult>,
}

impl ComplianceReport {
    /// Assemble a report from an overall result
    pub fn new(project_id: impl Into<String>, profile: Profile, result: OverallResult) -> Self {
        Self {
            project_id: project_id.into(),
            profile,
            generated_at: Utc::now(),
            overall: result.score,
            objectives: result.objectives,
        }
    }

    /// Tagged overall status
    pub fn status(&self) -> ScoreStatus {
        self.overall.status()
    }

    /// Every outcome result in framework order
    pub fn outcomes(&self) -> impl Iterator<Item = &OutcomeAssessment> {
        self.objectives.iter().flat_map(|o| o.outcomes())
    }

    /// Outcomes failed by a negative indicator
    pub fn failed_outcomes(&self) -> Vec<&str> {
        self.outcomes()
            .filter_map(OutcomeAssessment::score)
            .filter(|s| s.has_failed)
            .map(|s| s.outcome_id.as_str())
            .collect()
    }

    /// Applicable outcomes with no answers yet
    pub fn incomplete_outcomes(&self) -> Vec<&str> {
        self.outcomes()
            .filter(|o| o.status() == ScoreStatus::NotComplete)
            .map(OutcomeAssessment::outcome_id)
            .collect()
    }
}
