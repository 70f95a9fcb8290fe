//! Risk records and their base / modified assessments

use super::rating::{Impact, Likelihood, RiskRating, RiskRatingCalculator};
use super::statement::{rewrite_phrases, RiskScenario};
use crate::error::{AssessmentError, AssessmentResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single identified risk
///
/// The base assessment is set on creation. Tuning adds a modified assessment
/// alongside it; the base values are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskRecord {
    /// Risk identifier
    pub id: String,
    /// Impact category, keyed into the risk appetite
    pub impact_type: String,
    /// Prose description of the risk
    pub statement: String,
    /// Structured form of the statement, when available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<RiskScenario>,
    /// Likelihood as originally assessed
    #[serde(default)]
    pub base_likelihood: Option<Likelihood>,
    /// Impact as originally assessed
    #[serde(default)]
    pub base_impact: Option<Impact>,
    /// Likelihood after tuning
    #[serde(default)]
    pub modified_likelihood: Option<Likelihood>,
    /// Impact after tuning
    #[serde(default)]
    pub modified_impact: Option<Impact>,
    /// Rationale for the likelihood
    #[serde(default)]
    pub likelihood_justification: String,
    /// Rationale for the impact
    #[serde(default)]
    pub impact_justification: String,
    /// Planned treatment
    #[serde(default)]
    pub remediation_plan: String,
    /// Creation time
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Last change
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl RiskRecord {
    /// New risk whose statement is rendered from a scenario
    pub fn new(
        impact_type: impl Into<String>,
        scenario: RiskScenario,
        likelihood: Likelihood,
        impact: Impact,
    ) -> Self {
        let statement = scenario.render(likelihood, impact);
        let mut record = Self::with_statement(impact_type, statement, likelihood, impact);
        record.scenario = Some(scenario);
        record
    }

    /// New risk with a free-text statement
    pub fn with_statement(
        impact_type: impl Into<String>,
        statement: impl Into<String>,
        likelihood: Likelihood,
        impact: Impact,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            impact_type: impact_type.into(),
            statement: statement.into(),
            scenario: None,
            base_likelihood: Some(likelihood),
            base_impact: Some(impact),
            modified_likelihood: None,
            modified_impact: None,
            likelihood_justification: String::new(),
            impact_justification: String::new(),
            remediation_plan: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Modified likelihood if present, else base
    pub fn effective_likelihood(&self) -> Option<Likelihood> {
        self.modified_likelihood.or(self.base_likelihood)
    }

    /// Modified impact if present, else base
    pub fn effective_impact(&self) -> Option<Impact> {
        self.modified_impact.or(self.base_impact)
    }

    /// Whether any modified value is set
    pub fn is_modified(&self) -> bool {
        self.modified_likelihood.is_some() || self.modified_impact.is_some()
    }

    /// Rating of the base assessment
    pub fn base_rating(&self) -> RiskRating {
        RiskRatingCalculator::rate_optional(self.base_likelihood, self.base_impact)
    }

    /// Rating of the effective assessment when tuned, `None` otherwise
    pub fn modified_rating(&self) -> Option<RiskRating> {
        self.is_modified().then(|| self.effective_rating())
    }

    /// Rating of the effective assessment
    pub fn effective_rating(&self) -> RiskRating {
        RiskRatingCalculator::rate_optional(self.effective_likelihood(), self.effective_impact())
    }

    /// Record a tuned assessment, keeping the base values
    pub fn tune(&mut self, likelihood: Likelihood, impact: Impact) {
        self.modified_likelihood = Some(likelihood);
        self.modified_impact = Some(impact);
        self.updated_at = Utc::now();
    }

    /// Drop the tuned assessment
    pub fn clear_tuning(&mut self) {
        self.modified_likelihood = None;
        self.modified_impact = None;
        self.updated_at = Utc::now();
    }

    /// Change the base assessment and regenerate the statement
    ///
    /// A statement still equal to its scenario's rendering is rendered again.
    /// Any other statement has only its likelihood and impact phrases
    /// replaced. Either everything changes or nothing does: when the
    /// statement cannot be regenerated the record is left as it was.
    pub fn edit_base(&mut self, likelihood: Likelihood, impact: Impact) -> AssessmentResult<()> {
        let old = self
            .base_likelihood
            .zip(self.base_impact)
            .ok_or_else(|| self.edit_error("no base assessment to replace".to_string()))?;

        let statement = match &self.scenario {
            Some(scenario) if self.statement == scenario.render(old.0, old.1) => {
                scenario.render(likelihood, impact)
            }
            _ => rewrite_phrases(&self.statement, old, (likelihood, impact))
                .map_err(|e| self.edit_error(e.to_string()))?,
        };

        self.statement = statement;
        self.base_likelihood = Some(likelihood);
        self.base_impact = Some(impact);
        self.updated_at = Utc::now();
        Ok(())
    }

    fn edit_error(&self, reason: String) -> AssessmentError {
        AssessmentError::StatementEdit {
            risk_id: self.id.clone(),
            reason,
        }
    }
}
