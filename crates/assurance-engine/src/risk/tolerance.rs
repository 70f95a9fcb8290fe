//! Classification of risks against the risk appetite

use super::appetite::{AppetiteLevel, RiskAppetite};
use super::rating::{RiskRating, RiskRatingCalculator};
use super::record::RiskRecord;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// Whether a risk sits within appetite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ToleranceStatus {
    /// Rating at or below appetite
    #[serde(rename = "In Tolerance")]
    InTolerance,
    /// Rating above appetite, or not assessable
    #[serde(rename = "Out of Tolerance")]
    OutOfTolerance,
}

impl ToleranceStatus {
    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            ToleranceStatus::InTolerance => "In Tolerance",
            ToleranceStatus::OutOfTolerance => "Out of Tolerance",
        }
    }
}

impl fmt::Display for ToleranceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a classification was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToleranceBasis {
    /// Rating compared against appetite and fits
    WithinAppetite,
    /// Rating compared against appetite and exceeds it
    ExceedsAppetite,
    /// Effective likelihood or impact missing
    MissingAssessment,
    /// No appetite defined for the impact type
    NoAppetite,
}

/// Outcome of classifying one risk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskClassification<'a> {
    /// Risk classified
    pub risk: &'a RiskRecord,
    /// Rating of the effective assessment
    pub rating: RiskRating,
    /// Rating of the base assessment
    pub base_rating: RiskRating,
    /// Rating of the tuned assessment, if any
    pub modified_rating: Option<RiskRating>,
    /// Appetite of the risk's impact type
    pub appetite: Option<AppetiteLevel>,
    /// Final verdict
    pub in_tolerance: bool,
    /// Why the verdict was reached
    pub basis: ToleranceBasis,
}

impl RiskClassification<'_> {
    /// Verdict as a status
    pub fn status(&self) -> ToleranceStatus {
        if self.in_tolerance {
            ToleranceStatus::InTolerance
        } else {
            ToleranceStatus::OutOfTolerance
        }
    }
}

/// Compares effective risk ratings against a risk appetite
#[derive(Debug, Clone, Copy)]
pub struct RiskToleranceEvaluator<'a> {
    appetite: &'a RiskAppetite,
}

impl<'a> RiskToleranceEvaluator<'a> {
    /// Evaluator over an appetite
    pub fn new(appetite: &'a RiskAppetite) -> Self {
        Self { appetite }
    }

    /// Classify one risk
    ///
    /// Missing likelihood or impact, or a missing appetite category, yields
    /// out of tolerance. Otherwise the risk is in tolerance when its rating
    /// value is at most the appetite value.
    pub fn classify<'r>(&self, risk: &'r RiskRecord) -> RiskClassification<'r> {
        let base_rating = risk.base_rating();
        let modified_rating = risk.modified_rating();
        let appetite = self.appetite.level_for(&risk.impact_type);

        let (rating, basis) = match (risk.effective_likelihood(), risk.effective_impact()) {
            (Some(likelihood), Some(impact)) => {
                let rating = RiskRatingCalculator::rate(likelihood, impact);
                let basis = match (rating.value(), appetite) {
                    (_, None) => ToleranceBasis::NoAppetite,
                    (Some(value), Some(level)) if value <= level.value() => {
                        ToleranceBasis::WithinAppetite
                    }
                    _ => ToleranceBasis::ExceedsAppetite,
                };
                (rating, basis)
            }
            _ => (RiskRating::Unknown, ToleranceBasis::MissingAssessment),
        };

        match basis {
            ToleranceBasis::MissingAssessment | ToleranceBasis::NoAppetite => warn!(
                risk_id = %risk.id,
                impact_type = %risk.impact_type,
                ?basis,
                "risk defaulted to out of tolerance"
            ),
            _ => debug!(risk_id = %risk.id, %rating, ?appetite, ?basis, "risk classified"),
        }

        RiskClassification {
            risk,
            rating,
            base_rating,
            modified_rating,
            appetite,
            in_tolerance: basis == ToleranceBasis::WithinAppetite,
            basis,
        }
    }

    /// Classify every risk, preserving order
    pub fn classify_all<'r, I>(&self, risks: I) -> Vec<RiskClassification<'r>>
    where
        I: IntoIterator<Item = &'r RiskRecord>,
    {
        risks.into_iter().map(|risk| self.classify(risk)).collect()
    }
}

/// In / out counts for one impact type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ToleranceCounts {
    /// Risks in tolerance
    pub in_tolerance: usize,
    /// Risks out of tolerance
    pub out_of_tolerance: usize,
}

/// Tallies over a set of classifications
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RiskSummary {
    /// Risks classified
    pub total: usize,
    /// Overall in / out counts
    pub counts: ToleranceCounts,
    /// Risks per effective rating label
    pub by_rating: BTreeMap<String, usize>,
    /// In / out counts per impact type
    pub by_impact_type: BTreeMap<String, ToleranceCounts>,
}

impl RiskSummary {
    /// Summarise classifications
    pub fn from_classifications(classifications: &[RiskClassification<'_>]) -> Self {
        let mut summary = RiskSummary {
            total: classifications.len(),
            ..Default::default()
        };
        for c in classifications {
            *summary.by_rating.entry(c.rating.label().to_string()).or_default() += 1;
            let per_type = summary
                .by_impact_type
                .entry(c.risk.impact_type.clone())
                .or_default();
            if c.in_tolerance {
                summary.counts.in_tolerance += 1;
                per_type.in_tolerance += 1;
            } else {
                summary.counts.out_of_tolerance += 1;
                per_type.out_of_tolerance += 1;
            }
        }
        summary
    }
}
