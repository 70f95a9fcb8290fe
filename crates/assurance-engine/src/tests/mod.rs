//! Engine-level test suite


use crate::config::AssessmentConfig;
use crate::engine::AssessmentEngine;
use crate::framework::{FrameworkDefinition, Objective, Outcome, Principle, Question, QuestionSection};
use crate::profile::{AchievementLevel, ProfileRequirement};

fn outcome(id: &str, name: &str) -> Outcome {
    Outcome {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        evidence: vec![],
    }
}

fn questions(outcome_id: &str, section: QuestionSection, count: usize) -> Vec<Question> {
    let tag = match section {
        QuestionSection::Achieved => "a",
        QuestionSection::Partial => "p",
        QuestionSection::Negative => "n",
    };
    (1..=count)
        .map(|n| Question {
            id: format!("{outcome_id}-{tag}{n}"),
            outcome_id: outcome_id.to_string(),
            section,
            text: format!("{outcome_id} {tag}{n}?"),
            is_negative: section == QuestionSection::Negative,
        })
        .collect()
}

fn requirement(outcome_id: &str, baseline: AchievementLevel, enhanced: AchievementLevel) -> ProfileRequirement {
    ProfileRequirement {
        outcome_id: outcome_id.to_string(),
        baseline_level: baseline,
        enhanced_level: enhanced,
    }
}

/// Two objectives, three principles, five outcomes.
///
/// | outcome | baseline | enhanced | achieved | partial | negative |
/// |---------|----------|----------|----------|---------|----------|
/// | A1.a    | A        | A        | 2        | 1       | 1        |
/// | A1.b    | PA       | A        | 3        | 2       | 1        |
/// | A2.a    | NA       | PA       | 1        | 1       | 0        |
/// | B1.a    | A        | A        | 8        | 0       | 1        |
/// | B1.b    | -        | -        | 1        | 0       | 0        |
pub(crate) fn sample_config() -> AssessmentConfig {
    use AchievementLevel::{Achieved, NotAchieved, PartiallyAchieved};
    use QuestionSection::{Achieved as Ach, Negative, Partial};

    let framework = FrameworkDefinition {
        objectives: vec![
            Objective {
                id: "A".to_string(),
                title: "Managing security risk".to_string(),
                principles: vec![
                    Principle {
                        id: "A1".to_string(),
                        name: "Governance".to_string(),
                        outcomes: vec![
                            outcome("A1.a", "Board direction"),
                            outcome("A1.b", "Roles and responsibilities"),
                        ],
                    },
                    Principle {
                        id: "A2".to_string(),
                        name: "Risk management".to_string(),
                        outcomes: vec![outcome("A2.a", "Risk management process")],
                    },
                ],
            },
            Objective {
                id: "B".to_string(),
                title: "Protecting against cyber attack".to_string(),
                principles: vec![Principle {
                    id: "B1".to_string(),
                    name: "Identity and access control".to_string(),
                    outcomes: vec![
                        outcome("B1.a", "Identity verification"),
                        outcome("B1.b", "Device management"),
                    ],
                }],
            },
        ],
    };

    let questions = [
        questions("A1.a", Ach, 2),
        questions("A1.a", Partial, 1),
        questions("A1.a", Negative, 1),
        questions("A1.b", Ach, 3),
        questions("A1.b", Partial, 2),
        questions("A1.b", Negative, 1),
        questions("A2.a", Ach, 1),
        questions("A2.a", Partial, 1),
        questions("B1.a", Ach, 8),
        questions("B1.a", Negative, 1),
        questions("B1.b", Ach, 1),
    ]
    .concat();

    AssessmentConfig {
        framework,
        requirements: vec![
            requirement("A1.a", Achieved, Achieved),
            requirement("A1.b", PartiallyAchieved, Achieved),
            requirement("A2.a", NotAchieved, PartiallyAchieved),
            requirement("B1.a", Achieved, Achieved),
        ],
        questions,
    }
}

pub(crate) fn sample_engine() -> AssessmentEngine {
    AssessmentEngine::new(sample_config()).expect("sample config is valid")
}
