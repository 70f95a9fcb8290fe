//! Error types for the assurance engine

use thiserror::Error;

/// Result type for assurance operations
pub type AssessmentResult<T> = Result<T, AssessmentError>;

/// Assurance engine errors
///
/// Scoring and risk classification never return these for data-shaped gaps
/// (unscoreable outcomes, unknown rating pairs, missing appetite). Those are
/// reported through the result types instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Configuration file could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Outcome id not present in the framework
    #[error("Unknown outcome: {0}")]
    UnknownOutcome(String),

    /// Principle id not present in the framework
    #[error("Unknown principle: {0}")]
    UnknownPrinciple(String),

    /// Objective id not present in the framework
    #[error("Unknown objective: {0}")]
    UnknownObjective(String),

    /// Risk id not present in the register
    #[error("Risk not found: {0}")]
    RiskNotFound(String),

    /// Risk statement could not be regenerated
    #[error("Statement edit rejected for risk {risk_id}: {reason}")]
    StatementEdit {
        /// Risk whose statement was being edited
        risk_id: String,
        /// Why the substitution failed
        reason: String,
    },

    /// Export failure
    #[error("Export error: {0}")]
    ExportError(String),
}

impl From<csv::Error> for AssessmentError {
    fn from(err: csv::Error) -> Self {
        AssessmentError::ExportError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AssessmentError::StatementEdit {
            risk_id: "r-1".to_string(),
            reason: "likelihood phrase not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Statement edit rejected for risk r-1: likelihood phrase not found"
        );
    }

    #[test]
    fn test_error_types() {
        let config_err = AssessmentError::ConfigurationError("duplicate id".to_string());
        assert!(matches!(config_err, AssessmentError::ConfigurationError(_)));

        let lookup_err = AssessmentError::UnknownOutcome("A1.z".to_string());
        assert_eq!(lookup_err.to_string(), "Unknown outcome: A1.z");
    }
}
