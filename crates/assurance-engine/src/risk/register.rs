//! In-memory risk register for one project

use super::appetite::RiskAppetite;
use super::rating::{Impact, Likelihood};
use super::record::RiskRecord;
use super::statement::RiskScenario;
use super::tolerance::{RiskClassification, RiskToleranceEvaluator};
use crate::error::{AssessmentError, AssessmentResult};
use chrono::Utc;
use tracing::{info, warn};

/// Ordered collection of risk records
#[derive(Debug, Clone, Default)]
pub struct RiskRegister {
    risks: Vec<RiskRecord>,
}

impl RiskRegister {
    /// Empty register
    pub fn new() -> Self {
        Self::default()
    }

    /// Register seeded with existing records
    pub fn from_records(records: Vec<RiskRecord>) -> AssessmentResult<Self> {
        let mut register = Self::new();
        for record in records {
            register.insert(record)?;
        }
        Ok(register)
    }

    /// Create a risk from a scenario with its base assessment, returning its id
    pub fn create(
        &mut self,
        impact_type: impl Into<String>,
        scenario: RiskScenario,
        likelihood: Likelihood,
        impact: Impact,
    ) -> String {
        let record = RiskRecord::new(impact_type, scenario, likelihood, impact);
        let id = record.id.clone();
        info!(risk_id = %id, impact_type = %record.impact_type, "risk created");
        self.risks.push(record);
        id
    }

    /// Add an existing record
    pub fn insert(&mut self, record: RiskRecord) -> AssessmentResult<()> {
        if self.get(&record.id).is_some() {
            return Err(AssessmentError::ConfigurationError(format!(
                "Duplicate risk id: {}",
                record.id
            )));
        }
        self.risks.push(record);
        Ok(())
    }

    /// Look up a risk
    pub fn get(&self, risk_id: &str) -> Option<&RiskRecord> {
        self.risks.iter().find(|r| r.id == risk_id)
    }

    /// All risks in insertion order
    pub fn list(&self) -> &[RiskRecord] {
        &self.risks
    }

    /// Number of risks
    pub fn len(&self) -> usize {
        self.risks.len()
    }

    /// Whether the register is empty
    pub fn is_empty(&self) -> bool {
        self.risks.is_empty()
    }

    /// Add a tuned assessment to a risk
    pub fn tune(
        &mut self,
        risk_id: &str,
        likelihood: Likelihood,
        impact: Impact,
    ) -> AssessmentResult<()> {
        self.get_mut(risk_id)?.tune(likelihood, impact);
        Ok(())
    }

    /// Remove the tuned assessment from a risk
    pub fn clear_tuning(&mut self, risk_id: &str) -> AssessmentResult<()> {
        self.get_mut(risk_id)?.clear_tuning();
        Ok(())
    }

    /// Change a risk's base assessment, regenerating its statement
    pub fn edit_base(
        &mut self,
        risk_id: &str,
        likelihood: Likelihood,
        impact: Impact,
    ) -> AssessmentResult<()> {
        let result = self.get_mut(risk_id)?.edit_base(likelihood, impact);
        if let Err(e) = &result {
            warn!(risk_id, error = %e, "base assessment edit rejected");
        }
        result
    }

    /// Set the free-text justification and remediation fields
    pub fn annotate(
        &mut self,
        risk_id: &str,
        likelihood_justification: impl Into<String>,
        impact_justification: impl Into<String>,
        remediation_plan: impl Into<String>,
    ) -> AssessmentResult<()> {
        let record = self.get_mut(risk_id)?;
        record.likelihood_justification = likelihood_justification.into();
        record.impact_justification = impact_justification.into();
        record.remediation_plan = remediation_plan.into();
        record.updated_at = Utc::now();
        Ok(())
    }

    /// Delete a risk entirely
    pub fn remove(&mut self, risk_id: &str) -> AssessmentResult<RiskRecord> {
        let index = self
            .risks
            .iter()
            .position(|r| r.id == risk_id)
            .ok_or_else(|| AssessmentError::RiskNotFound(risk_id.to_string()))?;
        info!(risk_id, "risk removed");
        Ok(self.risks.remove(index))
    }

    /// Classify every risk against an appetite
    pub fn classify<'a>(&'a self, appetite: &RiskAppetite) -> Vec<RiskClassification<'a>> {
        RiskToleranceEvaluator::new(appetite).classify_all(&self.risks)
    }

    fn get_mut(&mut self, risk_id: &str) -> AssessmentResult<&mut RiskRecord> {
        self.risks
            .iter_mut()
            .find(|r| r.id == risk_id)
            .ok_or_else(|| AssessmentError::RiskNotFound(risk_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::appetite::AppetiteLevel;

    fn scenario() -> RiskScenario {
        RiskScenario::new("Supplier breach exposes customer data", "customer trust")
    }

    #[test]
    fn test_lifecycle() {
        let mut register = RiskRegister::new();
        let id = register.create("Reputational", scenario(), Likelihood::Likely, Impact::Major);
        assert_eq!(register.len(), 1);

        register.tune(&id, Likelihood::Unlikely, Impact::Major).unwrap();
        let risk = register.get(&id).unwrap();
        assert_eq!(risk.base_likelihood, Some(Likelihood::Likely));
        assert_eq!(risk.modified_likelihood, Some(Likelihood::Unlikely));

        register
            .edit_base(&id, Likelihood::Possible, Impact::Significant)
            .unwrap();
        let risk = register.get(&id).unwrap();
        assert!(risk.statement.contains("possible likelihood"));
        assert!(risk.statement.contains("significant impact"));
        assert_eq!(risk.modified_likelihood, Some(Likelihood::Unlikely));

        let removed = register.remove(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(register.get(&id).is_none());
        assert!(register.is_empty());
    }

    #[test]
    fn test_unknown_risk_errors() {
        let mut register = RiskRegister::new();
        assert_eq!(
            register.remove("missing").unwrap_err(),
            AssessmentError::RiskNotFound("missing".to_string())
        );
        assert!(register
            .tune("missing", Likelihood::Remote, Impact::Minor)
            .is_err());
        assert!(register.annotate("missing", "", "", "").is_err());
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let record = RiskRecord::new("Legal", scenario(), Likelihood::Remote, Impact::Minor);
        let result = RiskRegister::from_records(vec![record.clone(), record]);
        assert!(matches!(
            result.unwrap_err(),
            AssessmentError::ConfigurationError(_)
        ));
    }

    #[test]
    fn test_classify_register() {
        let mut register = RiskRegister::new();
        register.create("Legal", scenario(), Likelihood::Remote, Impact::Minor);
        register.create("Legal", scenario(), Likelihood::VeryLikely, Impact::Critical);
        let appetite = RiskAppetite::new().with("Legal", AppetiteLevel::Minimal);
        let verdicts: Vec<bool> = register
            .classify(&appetite)
            .iter()
            .map(|c| c.in_tolerance)
            .collect();
        assert_eq!(verdicts, vec![true, false]);
    }

    #[test]
    fn test_annotate() {
        let mut register = RiskRegister::new();
        let id = register.create("Legal", scenario(), Likelihood::Remote, Impact::Minor);
        register
            .annotate(&id, "No prior incidents", "Limited data held", "Annual audit")
            .unwrap();
        assert_eq!(register.get(&id).unwrap().remediation_plan, "Annual audit");
    }
}
