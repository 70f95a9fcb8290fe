//! Engine configuration: framework, profile requirements and questions
//!
//! Configuration is loaded once and handed to
//! [`AssessmentEngine::new`](crate::engine::AssessmentEngine::new). Files are
//! parsed by extension: `.toml` or `.json`.

use crate::error::{AssessmentError, AssessmentResult};
use crate::framework::{AssessmentFramework, FrameworkDefinition, Question};
use crate::profile::{ProfileRequirement, ProfileRequirementResolver};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read-only tables the engine scores against
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Objective / principle / outcome hierarchy
    #[serde(default)]
    pub framework: FrameworkDefinition,
    /// Required level per outcome and profile
    #[serde(default)]
    pub requirements: Vec<ProfileRequirement>,
    /// Question pool for every outcome
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl AssessmentConfig {
    /// Load configuration from a TOML or JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> AssessmentResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AssessmentError::ConfigurationError(format!(
                "Failed to read {}: {e}",
                path.display()
            ))
        })?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            other => {
                return Err(AssessmentError::ConfigurationError(format!(
                    "Unsupported config format: {}",
                    other.unwrap_or("<none>")
                )))
            }
        };

        debug!(
            path = %path.display(),
            objectives = config.framework.objectives.len(),
            questions = config.questions.len(),
            "loaded assessment config"
        );
        Ok(config)
    }

    /// Parse TOML configuration
    pub fn from_toml_str(content: &str) -> AssessmentResult<Self> {
        toml::from_str(content).map_err(|e| AssessmentError::ParseError(e.to_string()))
    }

    /// Parse JSON configuration
    pub fn from_json_str(content: &str) -> AssessmentResult<Self> {
        serde_json::from_str(content).map_err(|e| AssessmentError::ParseError(e.to_string()))
    }

    /// Check the configuration without building an engine
    pub fn validate(&self) -> AssessmentResult<()> {
        self.clone().build().map(|_| ())
    }

    /// Index the tables, checking cross references between them
    pub(crate) fn build(self) -> AssessmentResult<(AssessmentFramework, ProfileRequirementResolver)> {
        let framework = AssessmentFramework::new(self.framework, self.questions)?;

        if let Some(orphan) = self
            .requirements
            .iter()
            .find(|req| !framework.contains_outcome(&req.outcome_id))
        {
            return Err(AssessmentError::ConfigurationError(format!(
                "Profile requirement references unknown outcome {}",
                orphan.outcome_id
            )));
        }

        let resolver = ProfileRequirementResolver::new(self.requirements)?;
        Ok((framework, resolver))
    }
}
