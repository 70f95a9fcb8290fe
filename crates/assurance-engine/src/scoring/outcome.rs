//! Per-outcome compliance scoring

use crate::framework::{AssessmentFramework, QuestionSection};
use crate::profile::{AchievementLevel, Profile, ProfileRequirementResolver};
use crate::response::ResponseSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Tagged view of a score so that "no data" is never read as 0%
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "percentage", rename_all = "snake_case")]
pub enum ScoreStatus {
    /// Excluded from scoring under the chosen profile
    NotApplicable,
    /// Applicable but nothing answered yet
    NotComplete,
    /// Scored with the given percentage
    Scored(u8),
}

impl ScoreStatus {
    /// Percentage when scored
    pub fn percentage(&self) -> Option<u8> {
        match self {
            ScoreStatus::Scored(p) => Some(*p),
            _ => None,
        }
    }
}

impl fmt::Display for ScoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreStatus::NotApplicable => f.write_str("Not applicable"),
            ScoreStatus::NotComplete => f.write_str("Not complete"),
            ScoreStatus::Scored(p) => write!(f, "{p}%"),
        }
    }
}

/// Compliance result of one applicable outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeScore {
    /// Outcome scored
    pub outcome_id: String,
    /// Negative plus primary questions
    pub total: usize,
    /// Questions with a yes/no answer
    pub answered: usize,
    /// Compliant answers, forced to 0 on failure
    pub compliant: usize,
    /// Rounded compliant / total
    pub percentage: u8,
    /// Level the profile requires
    pub required_level: AchievementLevel,
    /// A negative indicator was answered "yes"
    pub has_failed: bool,
}

impl OutcomeScore {
    /// Tagged status of this score
    pub fn status(&self) -> ScoreStatus {
        if self.answered == 0 {
            ScoreStatus::NotComplete
        } else {
            ScoreStatus::Scored(self.percentage)
        }
    }

    /// Whether every question has been answered
    pub fn is_fully_answered(&self) -> bool {
        self.answered == self.total
    }
}

/// Result of scoring one outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutcomeAssessment {
    /// Outcome has no requirement entry or is "Not Achieved" for the profile
    NotApplicable {
        /// Outcome excluded
        outcome_id: String,
    },
    /// Outcome was scored
    Scored(OutcomeScore),
}

impl OutcomeAssessment {
    /// Outcome this result belongs to
    pub fn outcome_id(&self) -> &str {
        match self {
            OutcomeAssessment::NotApplicable { outcome_id } => outcome_id,
            OutcomeAssessment::Scored(score) => &score.outcome_id,
        }
    }

    /// Score, if applicable
    pub fn score(&self) -> Option<&OutcomeScore> {
        match self {
            OutcomeAssessment::NotApplicable { .. } => None,
            OutcomeAssessment::Scored(score) => Some(score),
        }
    }

    /// Tagged status
    pub fn status(&self) -> ScoreStatus {
        self.score()
            .map(OutcomeScore::status)
            .unwrap_or(ScoreStatus::NotApplicable)
    }
}

/// Rounded `compliant / total * 100`, half rounding up; 0 when `total` is 0
pub(crate) fn percentage(compliant: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let compliant = compliant.min(total) as u64;
    let total = total as u64;
    ((compliant * 200 + total) / (total * 2)) as u8
}

/// Scores a single outcome against a response set
#[derive(Debug, Clone, Copy)]
pub struct OutcomeScorer<'a> {
    framework: &'a AssessmentFramework,
    resolver: &'a ProfileRequirementResolver,
}

impl<'a> OutcomeScorer<'a> {
    /// Create a scorer over read-only tables
    pub fn new(framework: &'a AssessmentFramework, resolver: &'a ProfileRequirementResolver) -> Self {
        Self {
            framework,
            resolver,
        }
    }

    /// Score one outcome
    pub fn score(
        &self,
        outcome_id: &str,
        profile: Profile,
        responses: &ResponseSet,
    ) -> OutcomeAssessment {
        let required_level = match self.resolver.required_level(outcome_id, profile) {
            Some(level) if level.is_scored() => level,
            _ => {
                debug!(outcome_id, %profile, "outcome not applicable");
                return OutcomeAssessment::NotApplicable {
                    outcome_id: outcome_id.to_string(),
                };
            }
        };

        let primary_section = if required_level == AchievementLevel::Achieved {
            QuestionSection::Achieved
        } else {
            QuestionSection::Partial
        };

        let mut total = 0;
        let mut answered = 0;
        let mut compliant = 0;
        let mut has_failed = false;

        for question in self
            .framework
            .questions_for(outcome_id, QuestionSection::Negative)
        {
            total += 1;
            match responses.answer(&question.id) {
                Some(true) => {
                    answered += 1;
                    has_failed = true;
                }
                Some(false) => {
                    answered += 1;
                    compliant += 1;
                }
                None => {}
            }
        }

        for question in self.framework.questions_for(outcome_id, primary_section) {
            total += 1;
            match responses.answer(&question.id) {
                Some(true) => {
                    answered += 1;
                    compliant += 1;
                }
                Some(false) => answered += 1,
                None => {}
            }
        }

        if has_failed {
            debug!(outcome_id, "negative indicator answered yes");
            compliant = 0;
        }

        OutcomeAssessment::Scored(OutcomeScore {
            outcome_id: outcome_id.to_string(),
            total,
            answered,
            compliant,
            percentage: percentage(compliant, total),
            required_level,
            has_failed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13); // 12.5 rounds up
        assert_eq!(percentage(1, 200), 1); // 0.5 rounds up
        assert_eq!(percentage(5, 5), 100);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ScoreStatus::Scored(42).to_string(), "42%");
        assert_eq!(ScoreStatus::NotComplete.to_string(), "Not complete");
        assert_eq!(ScoreStatus::NotApplicable.percentage(), None);
    }

    #[test]
    fn test_unanswered_outcome_is_not_complete() {
        let score = OutcomeScore {
            outcome_id: "A1.a".to_string(),
            total: 4,
            answered: 0,
            compliant: 0,
            percentage: 0,
            required_level: AchievementLevel::Achieved,
            has_failed: false,
        };
        assert_eq!(score.status(), ScoreStatus::NotComplete);
        assert!(!score.is_fully_answered());
    }
}
