//! Per-project input records supplied by the surrounding application

use crate::error::{AssessmentError, AssessmentResult};
use crate::response::{Response, ResponseSet};
use crate::risk::{RiskAppetite, RiskRecord};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Raw records of one project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecords {
    /// Project identifier
    pub project_id: String,
    /// Questionnaire answers
    #[serde(default)]
    pub responses: Vec<Response>,
    /// Identified risks
    #[serde(default)]
    pub risks: Vec<RiskRecord>,
    /// Appetite per impact type
    #[serde(default)]
    pub appetite: RiskAppetite,
}

impl ProjectRecords {
    /// Load project records from a JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> AssessmentResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AssessmentError::ConfigurationError(format!(
                "Failed to read {}: {e}",
                path.display()
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| AssessmentError::ParseError(e.to_string()))
    }

    /// Responses indexed by question
    pub fn response_set(&self) -> ResponseSet {
        self.responses.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::AppetiteLevel;

    #[test]
    fn test_parse_project_json() {
        let json = r#"{
            "project_id": "payments-api",
            "responses": [
                {"question_id": "q1", "value": true},
                {"question_id": "q2", "value": null}
            ],
            "risks": [{
                "id": "r1",
                "impact_type": "Financial",
                "statement": "Fraud (possible likelihood), with major impact on revenue.",
                "base_likelihood": "Possible",
                "base_impact": "Major"
            }],
            "appetite": {"Financial": "Cautious"}
        }"#;
        let project: ProjectRecords = serde_json::from_str(json).unwrap();
        assert_eq!(project.project_id, "payments-api");
        assert_eq!(project.response_set().answer("q1"), Some(true));
        assert_eq!(project.risks.len(), 1);
        assert_eq!(
            project.appetite.level_for("Financial"),
            Some(AppetiteLevel::Cautious)
        );
    }
}
