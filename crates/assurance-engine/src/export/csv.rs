use crate::error::{AssessmentError, AssessmentResult};
use crate::risk::RiskClassification;
use csv::{QuoteStyle, WriterBuilder};

/// Column order consumed by downstream tooling; do not reorder
pub const RISK_CSV_HEADER: [&str; 12] = [
    "Status",
    "Impact Type",
    "Likelihood",
    "Impact",
    "Risk Rating",
    "Risk Statement",
    "Modified Likelihood",
    "Modified Impact",
    "Modified Risk Rating",
    "Likelihood Justification",
    "Impact Justification",
    "Remediation Plan",
];

pub struct RiskCsvExporter;

impl RiskCsvExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn export(&self, classifications: &[RiskClassification<'_>]) -> AssessmentResult<String> {
        let mut wtr = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .from_writer(vec![]);

        wtr.write_record(RISK_CSV_HEADER)?;

        for c in classifications {
            let risk = c.risk;
            wtr.write_record([
                c.status().label(),
                risk.impact_type.as_str(),
                risk.base_likelihood.map(|l| l.label()).unwrap_or_default(),
                risk.base_impact.map(|i| i.label()).unwrap_or_default(),
                c.base_rating.label(),
                risk.statement.as_str(),
                risk.modified_likelihood.map(|l| l.label()).unwrap_or_default(),
                risk.modified_impact.map(|i| i.label()).unwrap_or_default(),
                c.modified_rating.map(|r| r.label()).unwrap_or_default(),
                risk.likelihood_justification.as_str(),
                risk.impact_justification.as_str(),
                risk.remediation_plan.as_str(),
            ])?;
        }

        let data = wtr
            .into_inner()
            .map_err(|e| AssessmentError::ExportError(format!("CSV writer error: {e}")))?;
        String::from_utf8(data)
            .map_err(|e| AssessmentError::ExportError(format!("UTF-8 conversion error: {e}")))
    }
}

impl Default for RiskCsvExporter {
    fn default() -> Self {
        Self::new()
    }
}
