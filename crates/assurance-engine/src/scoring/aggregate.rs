//! Roll-up of outcome scores to principle, objective and overall level
//!
//! Every level uses the same rule: sum the counts of the applicable outcomes
//! and take `compliant / total` of the sums. Child percentages are never
//! averaged.

use super::outcome::{percentage, OutcomeAssessment, OutcomeScorer, ScoreStatus};
use crate::error::{AssessmentError, AssessmentResult};
use crate::framework::{AssessmentFramework, Objective, Principle};
use crate::profile::Profile;
use crate::response::ResponseSet;
use serde::{Deserialize, Serialize};

/// Summed compliance over a set of outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateScore {
    /// Sum of question totals
    pub total: usize,
    /// Sum of answered questions
    pub answered: usize,
    /// Sum of compliant answers
    pub compliant: usize,
    /// Rounded compliant / total of the sums
    pub percentage: u8,
    /// Any constituent outcome failed on a negative indicator
    pub has_failed: bool,
    /// Outcomes that contributed
    pub scored_outcomes: usize,
    /// Outcomes excluded as not applicable
    pub not_applicable: usize,
}

impl AggregateScore {
    /// Fold a set of outcome results, skipping the not-applicable ones
    pub fn from_assessments<'a, I>(assessments: I) -> Self
    where
        I: IntoIterator<Item = &'a OutcomeAssessment>,
    {
        let mut agg = AggregateScore::default();
        for assessment in assessments {
            match assessment.score() {
                Some(score) => {
                    agg.total += score.total;
                    agg.answered += score.answered;
                    agg.compliant += score.compliant;
                    agg.has_failed |= score.has_failed;
                    agg.scored_outcomes += 1;
                }
                None => agg.not_applicable += 1,
            }
        }
        agg.percentage = percentage(agg.compliant, agg.total);
        agg
    }

    /// Tagged status of the aggregate
    pub fn status(&self) -> ScoreStatus {
        if self.scored_outcomes == 0 {
            ScoreStatus::NotApplicable
        } else if self.answered == 0 {
            ScoreStatus::NotComplete
        } else {
            ScoreStatus::Scored(self.percentage)
        }
    }
}

/// Principle-level result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipleResult {
    /// Principle id
    pub principle_id: String,
    /// Principle name
    pub name: String,
    /// Aggregate over the principle's outcomes
    pub score: AggregateScore,
    /// Individual outcome results, in framework order
    pub outcomes: Vec<OutcomeAssessment>,
}

/// Objective-level result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveResult {
    /// Objective id
    pub objective_id: String,
    /// Objective title
    pub title: String,
    /// Aggregate over every outcome under the objective
    pub score: AggregateScore,
    /// Principle results, in framework order
    pub principles: Vec<PrincipleResult>,
}

impl ObjectiveResult {
    /// Every outcome result under this objective
    pub fn outcomes(&self) -> impl Iterator<Item = &OutcomeAssessment> {
        self.principles.iter().flat_map(|p| p.outcomes.iter())
    }
}

/// Framework-wide result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallResult {
    /// Aggregate over every outcome in the framework
    pub score: AggregateScore,
    /// Objective results, in framework order
    pub objectives: Vec<ObjectiveResult>,
}

impl OverallResult {
    /// Every outcome result in the framework
    pub fn outcomes(&self) -> impl Iterator<Item = &OutcomeAssessment> {
        self.objectives.iter().flat_map(|o| o.outcomes())
    }
}

/// Rolls outcome scores up the framework hierarchy
#[derive(Debug, Clone, Copy)]
pub struct AggregationEngine<'a> {
    framework: &'a AssessmentFramework,
    scorer: OutcomeScorer<'a>,
}

impl<'a> AggregationEngine<'a> {
    /// Create an aggregation engine
    pub fn new(framework: &'a AssessmentFramework, scorer: OutcomeScorer<'a>) -> Self {
        Self { framework, scorer }
    }

    /// Aggregate an arbitrary set of outcomes
    pub fn aggregate(
        &self,
        outcome_ids: &[&str],
        profile: Profile,
        responses: &ResponseSet,
    ) -> AggregateScore {
        let assessments: Vec<_> = outcome_ids
            .iter()
            .map(|id| self.scorer.score(id, profile, responses))
            .collect();
        AggregateScore::from_assessments(&assessments)
    }

    /// Score one principle
    pub fn principle(
        &self,
        principle_id: &str,
        profile: Profile,
        responses: &ResponseSet,
    ) -> AssessmentResult<PrincipleResult> {
        let principle = self
            .framework
            .principle(principle_id)
            .ok_or_else(|| AssessmentError::UnknownPrinciple(principle_id.to_string()))?;
        Ok(self.score_principle(principle, profile, responses))
    }

    /// Score one objective
    pub fn objective(
        &self,
        objective_id: &str,
        profile: Profile,
        responses: &ResponseSet,
    ) -> AssessmentResult<ObjectiveResult> {
        let objective = self
            .framework
            .objective(objective_id)
            .ok_or_else(|| AssessmentError::UnknownObjective(objective_id.to_string()))?;
        Ok(self.score_objective(objective, profile, responses))
    }

    /// Score the whole framework
    pub fn overall(&self, profile: Profile, responses: &ResponseSet) -> OverallResult {
        let objectives: Vec<_> = self
            .framework
            .objectives()
            .iter()
            .map(|objective| self.score_objective(objective, profile, responses))
            .collect();
        let score = AggregateScore::from_assessments(objectives.iter().flat_map(|o| o.outcomes()));
        OverallResult { score, objectives }
    }

    fn score_principle(
        &self,
        principle: &Principle,
        profile: Profile,
        responses: &ResponseSet,
    ) -> PrincipleResult {
        let outcomes: Vec<_> = principle
            .outcomes
            .iter()
            .map(|outcome| self.scorer.score(&outcome.id, profile, responses))
            .collect();
        PrincipleResult {
            principle_id: principle.id.clone(),
            name: principle.name.clone(),
            score: AggregateScore::from_assessments(&outcomes),
            outcomes,
        }
    }

    fn score_objective(
        &self,
        objective: &Objective,
        profile: Profile,
        responses: &ResponseSet,
    ) -> ObjectiveResult {
        let principles: Vec<_> = objective
            .principles
            .iter()
            .map(|principle| self.score_principle(principle, profile, responses))
            .collect();
        let score =
            AggregateScore::from_assessments(principles.iter().flat_map(|p| p.outcomes.iter()));
        ObjectiveResult {
            objective_id: objective.id.clone(),
            title: objective.title.clone(),
            score,
            principles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::AchievementLevel;
    use crate::scoring::outcome::OutcomeScore;

    fn scored(id: &str, total: usize, answered: usize, compliant: usize, failed: bool) -> OutcomeAssessment {
        OutcomeAssessment::Scored(OutcomeScore {
            outcome_id: id.to_string(),
            total,
            answered,
            compliant,
            percentage: percentage(compliant, total),
            required_level: AchievementLevel::Achieved,
            has_failed: failed,
        })
    }

    #[test]
    fn test_weighted_by_question_count_not_averaged() {
        let results = vec![scored("a", 1, 1, 1, false), scored("b", 9, 9, 1, false)];
        let agg = AggregateScore::from_assessments(&results);
        assert_eq!(agg.total, 10);
        assert_eq!(agg.compliant, 2);
        assert_eq!(agg.percentage, 20);
        assert_eq!(agg.status(), ScoreStatus::Scored(20));
    }

    #[test]
    fn test_not_applicable_excluded() {
        let results = vec![
            scored("a", 2, 2, 2, false),
            OutcomeAssessment::NotApplicable {
                outcome_id: "b".to_string(),
            },
        ];
        let agg = AggregateScore::from_assessments(&results);
        assert_eq!(agg.total, 2);
        assert_eq!(agg.percentage, 100);
        assert_eq!(agg.scored_outcomes, 1);
        assert_eq!(agg.not_applicable, 1);
    }

    #[test]
    fn test_failure_propagates() {
        let results = vec![scored("a", 3, 3, 3, false), scored("b", 2, 1, 0, true)];
        let agg = AggregateScore::from_assessments(&results);
        assert!(agg.has_failed);
        assert_eq!(agg.percentage, 60);
    }

    #[test]
    fn test_empty_and_unanswered_statuses() {
        let none: Vec<OutcomeAssessment> = vec![];
        assert_eq!(
            AggregateScore::from_assessments(&none).status(),
            ScoreStatus::NotApplicable
        );

        let unanswered = vec![scored("a", 4, 0, 0, false)];
        assert_eq!(
            AggregateScore::from_assessments(&unanswered).status(),
            ScoreStatus::NotComplete
        );
    }
}
