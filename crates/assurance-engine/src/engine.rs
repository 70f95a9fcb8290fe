//! Assessment engine facade
//!
//! Owns the frozen framework and requirement tables behind `Arc`s. Cloning
//! is cheap and every method takes `&self`, so one engine can serve many
//! concurrent callers.

use crate::config::AssessmentConfig;
use crate::error::{AssessmentError, AssessmentResult};
use crate::framework::AssessmentFramework;
use crate::profile::{Profile, ProfileRequirementResolver};
use crate::report::ComplianceReport;
use crate::response::ResponseSet;
use crate::risk::{RiskAppetite, RiskClassification, RiskRecord, RiskToleranceEvaluator};
use crate::scoring::{
    AggregationEngine, ObjectiveResult, OutcomeAssessment, OutcomeScorer, OverallResult,
    PrincipleResult,
};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Compliance and risk scoring engine
#[derive(Debug, Clone)]
pub struct AssessmentEngine {
    framework: Arc<AssessmentFramework>,
    resolver: Arc<ProfileRequirementResolver>,
}

impl AssessmentEngine {
    /// Create an engine from validated configuration
    pub fn new(config: AssessmentConfig) -> AssessmentResult<Self> {
        let (framework, resolver) = config.build()?;
        info!(
            objectives = framework.objectives().len(),
            outcomes = framework.outcome_ids().len(),
            questions = framework.question_count(),
            "assessment engine initialised"
        );
        Ok(Self {
            framework: Arc::new(framework),
            resolver: Arc::new(resolver),
        })
    }

    /// Create an engine from a TOML or JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> AssessmentResult<Self> {
        Self::new(AssessmentConfig::load_from_file(path)?)
    }

    /// Framework the engine scores against
    pub fn framework(&self) -> &AssessmentFramework {
        &self.framework
    }

    /// Requirement table the engine scores against
    pub fn resolver(&self) -> &ProfileRequirementResolver {
        &self.resolver
    }

    /// Outcome scorer bound to this engine's tables
    pub fn scorer(&self) -> OutcomeScorer<'_> {
        OutcomeScorer::new(&self.framework, &self.resolver)
    }

    /// Aggregation engine bound to this engine's tables
    pub fn aggregator(&self) -> AggregationEngine<'_> {
        AggregationEngine::new(&self.framework, self.scorer())
    }

    /// Score one outcome
    pub fn score_outcome(
        &self,
        outcome_id: &str,
        profile: Profile,
        responses: &ResponseSet,
    ) -> AssessmentResult<OutcomeAssessment> {
        if !self.framework.contains_outcome(outcome_id) {
            return Err(AssessmentError::UnknownOutcome(outcome_id.to_string()));
        }
        Ok(self.scorer().score(outcome_id, profile, responses))
    }

    /// Score one principle
    pub fn score_principle(
        &self,
        principle_id: &str,
        profile: Profile,
        responses: &ResponseSet,
    ) -> AssessmentResult<PrincipleResult> {
        self.aggregator().principle(principle_id, profile, responses)
    }

    /// Score one objective
    pub fn score_objective(
        &self,
        objective_id: &str,
        profile: Profile,
        responses: &ResponseSet,
    ) -> AssessmentResult<ObjectiveResult> {
        self.aggregator().objective(objective_id, profile, responses)
    }

    /// Score the whole framework
    pub fn score_overall(&self, profile: Profile, responses: &ResponseSet) -> OverallResult {
        self.aggregator().overall(profile, responses)
    }

    /// Full compliance report for a project
    pub fn report(
        &self,
        project_id: &str,
        profile: Profile,
        responses: &ResponseSet,
    ) -> ComplianceReport {
        ComplianceReport::new(project_id, profile, self.score_overall(profile, responses))
    }

    /// Classify risks against an appetite
    pub fn classify_risks<'r>(
        &self,
        risks: &'r [RiskRecord],
        appetite: &RiskAppetite,
    ) -> Vec<RiskClassification<'r>> {
        RiskToleranceEvaluator::new(appetite).classify_all(risks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_engine_is_shareable() {
        assert_send_sync::<AssessmentEngine>();
    }

    #[test]
    fn test_empty_engine() {
        let engine = AssessmentEngine::new(AssessmentConfig::default()).unwrap();
        let overall = engine.score_overall(Profile::Baseline, &ResponseSet::new());
        assert!(overall.objectives.is_empty());
        assert_eq!(overall.score.total, 0);
        assert!(matches!(
            engine.score_outcome("A1.a", Profile::Baseline, &ResponseSet::new()),
            Err(AssessmentError::UnknownOutcome(_))
        ));
    }
}
