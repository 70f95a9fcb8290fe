//! Assessment framework: objectives, principles, outcomes and questions
//!
//! The framework is static reference data. It is built once from an
//! [`AssessmentConfig`](crate::config::AssessmentConfig) and only read
//! afterwards.

use crate::error::{AssessmentError, AssessmentResult};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Section a question belongs to within its outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSection {
    /// Asked when the outcome must be fully achieved
    Achieved,
    /// Asked when the outcome must be partially achieved
    Partial,
    /// Negative indicator, always asked
    Negative,
}

/// Questionnaire item attached to one outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "QuestionRecord")]
pub struct Question {
    /// Question identifier
    pub id: String,
    /// Outcome this question assesses
    pub outcome_id: String,
    /// Section within the outcome
    pub section: QuestionSection,
    /// Question text
    pub text: String,
    /// Whether a "yes" answer signals failure
    pub is_negative: bool,
}

// Stored form of a question; `is_negative` defaults from the section
#[derive(Deserialize)]
struct QuestionRecord {
    id: String,
    outcome_id: String,
    section: QuestionSection,
    text: String,
    is_negative: Option<bool>,
}

impl From<QuestionRecord> for Question {
    fn from(record: QuestionRecord) -> Self {
        Self {
            is_negative: record
                .is_negative
                .unwrap_or(record.section == QuestionSection::Negative),
            id: record.id,
            outcome_id: record.outcome_id,
            section: record.section,
            text: record.text,
        }
    }
}

/// Leaf-level security outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Outcome identifier
    pub id: String,
    /// Outcome name
    pub name: String,
    /// Outcome description
    #[serde(default)]
    pub description: String,
    /// Example evidence for the outcome
    #[serde(default)]
    pub evidence: Vec<String>,
}

/// Grouping of outcomes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principle {
    /// Principle identifier
    pub id: String,
    /// Principle name
    pub name: String,
    /// Outcomes under this principle
    #[serde(default)]
    pub outcomes: Vec<Outcome>,
}

impl Principle {
    /// Ids of every outcome under this principle
    pub fn outcome_ids(&self) -> Vec<&str> {
        self.outcomes.iter().map(|o| o.id.as_str()).collect()
    }
}

/// Top-level grouping of principles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    /// Objective identifier
    pub id: String,
    /// Objective title
    pub title: String,
    /// Principles under this objective
    #[serde(default)]
    pub principles: Vec<Principle>,
}

impl Objective {
    /// Ids of every outcome under this objective, across all principles
    pub fn outcome_ids(&self) -> Vec<&str> {
        self.principles
            .iter()
            .flat_map(|p| p.outcomes.iter().map(|o| o.id.as_str()))
            .collect()
    }
}

/// Serialized shape of the framework hierarchy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkDefinition {
    /// Objectives in presentation order
    #[serde(default)]
    pub objectives: Vec<Objective>,
}

/// Indexed, read-only framework
#[derive(Debug, Clone)]
pub struct AssessmentFramework {
    objectives: Vec<Objective>,
    // outcome id -> (objective index, principle index, outcome index)
    outcome_index: HashMap<String, (usize, usize, usize)>,
    principle_index: HashMap<String, (usize, usize)>,
    objective_index: HashMap<String, usize>,
    questions: HashMap<String, Vec<Question>>,
}

impl AssessmentFramework {
    /// Build the framework, rejecting inconsistent definitions
    pub fn new(
        definition: FrameworkDefinition,
        questions: Vec<Question>,
    ) -> AssessmentResult<Self> {
        let mut outcome_index = HashMap::new();
        let mut principle_index = HashMap::new();
        let mut objective_index = HashMap::new();

        for (oi, objective) in definition.objectives.iter().enumerate() {
            if objective_index.insert(objective.id.clone(), oi).is_some() {
                return Err(duplicate("objective", &objective.id));
            }
            for (pi, principle) in objective.principles.iter().enumerate() {
                if principle_index
                    .insert(principle.id.clone(), (oi, pi))
                    .is_some()
                {
                    return Err(duplicate("principle", &principle.id));
                }
                for (ci, outcome) in principle.outcomes.iter().enumerate() {
                    if outcome_index
                        .insert(outcome.id.clone(), (oi, pi, ci))
                        .is_some()
                    {
                        return Err(duplicate("outcome", &outcome.id));
                    }
                }
            }
        }

        let mut seen = HashSet::new();
        let mut by_outcome: HashMap<String, Vec<Question>> = HashMap::new();
        for question in questions {
            if !seen.insert(question.id.clone()) {
                return Err(duplicate("question", &question.id));
            }
            if !outcome_index.contains_key(&question.outcome_id) {
                return Err(AssessmentError::ConfigurationError(format!(
                    "Question {} references unknown outcome {}",
                    question.id, question.outcome_id
                )));
            }
            if question.is_negative != (question.section == QuestionSection::Negative) {
                return Err(AssessmentError::ConfigurationError(format!(
                    "Question {} has is_negative={} but section {:?}",
                    question.id, question.is_negative, question.section
                )));
            }
            by_outcome
                .entry(question.outcome_id.clone())
                .or_default()
                .push(question);
        }

        Ok(Self {
            objectives: definition.objectives,
            outcome_index,
            principle_index,
            objective_index,
            questions: by_outcome,
        })
    }

    /// Objectives in presentation order
    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    /// Look up an objective
    pub fn objective(&self, objective_id: &str) -> Option<&Objective> {
        self.objective_index
            .get(objective_id)
            .map(|&oi| &self.objectives[oi])
    }

    /// Look up a principle
    pub fn principle(&self, principle_id: &str) -> Option<&Principle> {
        self.principle_index
            .get(principle_id)
            .map(|&(oi, pi)| &self.objectives[oi].principles[pi])
    }

    /// Look up an outcome
    pub fn outcome(&self, outcome_id: &str) -> Option<&Outcome> {
        self.outcome_index
            .get(outcome_id)
            .map(|&(oi, pi, ci)| &self.objectives[oi].principles[pi].outcomes[ci])
    }

    /// Whether the outcome exists in the framework
    pub fn contains_outcome(&self, outcome_id: &str) -> bool {
        self.outcome_index.contains_key(outcome_id)
    }

    /// Every outcome id in framework order
    pub fn outcome_ids(&self) -> Vec<&str> {
        self.objectives
            .iter()
            .flat_map(|objective| objective.outcome_ids())
            .collect()
    }

    /// Questions of one section for an outcome, in declaration order
    pub fn questions_for<'a>(
        &'a self,
        outcome_id: &str,
        section: QuestionSection,
    ) -> impl Iterator<Item = &'a Question> + 'a {
        self.questions
            .get(outcome_id)
            .map(|qs| qs.as_slice())
            .unwrap_or_default()
            .iter()
            .filter(move |q| q.section == section)
    }

    /// Total number of questions across all outcomes
    pub fn question_count(&self) -> usize {
        self.questions.values().map(Vec::len).sum()
    }
}

fn duplicate(kind: &str, id: &str) -> AssessmentError {
    AssessmentError::ConfigurationError(format!("Duplicate {kind} id: {id}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(id: &str) -> Outcome {
        Outcome {
            id: id.to_string(),
            name: format!("Outcome {id}"),
            description: String::new(),
            evidence: vec![],
        }
    }

    fn question(id: &str, outcome_id: &str, section: QuestionSection) -> Question {
        Question {
            id: id.to_string(),
            outcome_id: outcome_id.to_string(),
            section,
            text: format!("Question {id}?"),
            is_negative: section == QuestionSection::Negative,
        }
    }

    fn definition() -> FrameworkDefinition {
        FrameworkDefinition {
            objectives: vec![Objective {
                id: "A".to_string(),
                title: "Managing security risk".to_string(),
                principles: vec![
                    Principle {
                        id: "A1".to_string(),
                        name: "Governance".to_string(),
                        outcomes: vec![outcome("A1.a"), outcome("A1.b")],
                    },
                    Principle {
                        id: "A2".to_string(),
                        name: "Risk management".to_string(),
                        outcomes: vec![outcome("A2.a")],
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_lookup_by_level() {
        let framework = AssessmentFramework::new(
            definition(),
            vec![question("q1", "A1.a", QuestionSection::Achieved)],
        )
        .unwrap();

        assert_eq!(framework.objective("A").unwrap().title, "Managing security risk");
        assert_eq!(framework.principle("A2").unwrap().name, "Risk management");
        assert_eq!(framework.outcome("A1.b").unwrap().name, "Outcome A1.b");
        assert!(framework.outcome("Z9.z").is_none());
        assert_eq!(framework.outcome_ids(), vec!["A1.a", "A1.b", "A2.a"]);
        assert_eq!(framework.objective("A").unwrap().outcome_ids().len(), 3);
    }

    #[test]
    fn test_questions_filtered_by_section() {
        let framework = AssessmentFramework::new(
            definition(),
            vec![
                question("q1", "A1.a", QuestionSection::Achieved),
                question("q2", "A1.a", QuestionSection::Partial),
                question("q3", "A1.a", QuestionSection::Negative),
                question("q4", "A1.a", QuestionSection::Achieved),
            ],
        )
        .unwrap();

        let achieved: Vec<_> = framework
            .questions_for("A1.a", QuestionSection::Achieved)
            .map(|q| q.id.as_str())
            .collect();
        assert_eq!(achieved, vec!["q1", "q4"]);
        assert_eq!(
            framework
                .questions_for("A1.b", QuestionSection::Achieved)
                .count(),
            0
        );
        assert_eq!(framework.question_count(), 4);
    }

    #[test]
    fn test_rejects_duplicate_outcome() {
        let mut def = definition();
        def.objectives[0].principles[1].outcomes.push(outcome("A1.a"));
        let err = AssessmentFramework::new(def, vec![]).unwrap_err();
        assert_eq!(
            err,
            AssessmentError::ConfigurationError("Duplicate outcome id: A1.a".to_string())
        );
    }

    #[test]
    fn test_rejects_orphan_question() {
        let err = AssessmentFramework::new(
            definition(),
            vec![question("q1", "B1.a", QuestionSection::Achieved)],
        )
        .unwrap_err();
        assert!(matches!(err, AssessmentError::ConfigurationError(_)));
    }

    #[test]
    fn test_negative_flag_defaults_from_section() {
        let questions: Vec<Question> = serde_json::from_str(
            r#"[
                {"id": "q1", "outcome_id": "A1.a", "section": "negative", "text": "Shared admin accounts?"},
                {"id": "q2", "outcome_id": "A1.a", "section": "achieved", "text": "MFA enforced?"}
            ]"#,
        )
        .unwrap();
        assert!(questions[0].is_negative);
        assert!(!questions[1].is_negative);
        assert!(AssessmentFramework::new(definition(), questions).is_ok());
    }

    #[test]
    fn test_explicit_negative_flag_is_still_checked() {
        let questions: Vec<Question> = serde_json::from_str(
            r#"[{"id": "q1", "outcome_id": "A1.a", "section": "negative", "text": "?", "is_negative": false}]"#,
        )
        .unwrap();
        assert!(!questions[0].is_negative);
        assert!(AssessmentFramework::new(definition(), questions).is_err());
    }

    #[test]
    fn test_rejects_inconsistent_negative_flag() {
        let mut q = question("q1", "A1.a", QuestionSection::Partial);
        q.is_negative = true;
        assert!(AssessmentFramework::new(definition(), vec![q]).is_err());
    }
}
