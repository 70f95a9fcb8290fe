//! Likelihood and impact scales and the risk rating matrix

use crate::error::AssessmentError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How likely a risk is to materialise, ordered 1..5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Likelihood {
    /// 1
    Remote,
    /// 2
    Unlikely,
    /// 3
    Possible,
    /// 4
    Likely,
    /// 5
    #[serde(rename = "Very Likely")]
    VeryLikely,
}

impl Likelihood {
    /// Every level in ascending order
    pub const ALL: [Likelihood; 5] = [
        Likelihood::Remote,
        Likelihood::Unlikely,
        Likelihood::Possible,
        Likelihood::Likely,
        Likelihood::VeryLikely,
    ];

    /// Ordinal value 1..5
    pub fn value(self) -> u8 {
        self as u8 + 1
    }

    /// Level for an ordinal value
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value).checked_sub(1)?).copied()
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Likelihood::Remote => "Remote",
            Likelihood::Unlikely => "Unlikely",
            Likelihood::Possible => "Possible",
            Likelihood::Likely => "Likely",
            Likelihood::VeryLikely => "Very Likely",
        }
    }
}

/// Severity of a risk's consequences, ordered 1..5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Impact {
    /// 1
    Minor,
    /// 2
    Moderate,
    /// 3
    Major,
    /// 4
    Significant,
    /// 5
    Critical,
}

impl Impact {
    /// Every level in ascending order
    pub const ALL: [Impact; 5] = [
        Impact::Minor,
        Impact::Moderate,
        Impact::Major,
        Impact::Significant,
        Impact::Critical,
    ];

    /// Ordinal value 1..5
    pub fn value(self) -> u8 {
        self as u8 + 1
    }

    /// Level for an ordinal value
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value).checked_sub(1)?).copied()
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Impact::Minor => "Minor",
            Impact::Moderate => "Moderate",
            Impact::Major => "Major",
            Impact::Significant => "Significant",
            Impact::Critical => "Critical",
        }
    }
}

/// Output of the rating matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskRating {
    /// 1
    #[serde(rename = "Very Low Risk")]
    VeryLow,
    /// 2
    #[serde(rename = "Low Risk")]
    Low,
    /// 3
    #[serde(rename = "Medium Risk")]
    Medium,
    /// 4
    #[serde(rename = "High Risk")]
    High,
    /// 5
    #[serde(rename = "Very High Risk")]
    VeryHigh,
    /// Inputs were not a recognised likelihood / impact pair
    Unknown,
}

impl RiskRating {
    /// Ordinal value 1..5; `None` for [`RiskRating::Unknown`]
    pub fn value(self) -> Option<u8> {
        match self {
            RiskRating::VeryLow => Some(1),
            RiskRating::Low => Some(2),
            RiskRating::Medium => Some(3),
            RiskRating::High => Some(4),
            RiskRating::VeryHigh => Some(5),
            RiskRating::Unknown => None,
        }
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            RiskRating::VeryLow => "Very Low Risk",
            RiskRating::Low => "Low Risk",
            RiskRating::Medium => "Medium Risk",
            RiskRating::High => "High Risk",
            RiskRating::VeryHigh => "Very High Risk",
            RiskRating::Unknown => "Unknown",
        }
    }
}

macro_rules! impl_label_traits {
    ($($ty:ty => $what:literal),* $(,)?) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = AssessmentError;

            /// Accepts the label in any case, with spaces, dashes or
            /// underscores between words, or the ordinal 1..5.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = normalize(s);
                if let Ok(n) = wanted.parse::<u8>() {
                    if let Some(level) = Self::from_value(n) {
                        return Ok(level);
                    }
                }
                Self::ALL
                    .into_iter()
                    .find(|level| normalize(level.label()) == wanted)
                    .ok_or_else(|| {
                        AssessmentError::ParseError(format!("Unknown {}: {s}", $what))
                    })
            }
        }
    )*};
}

impl_label_traits!(Likelihood => "likelihood", Impact => "impact");

impl fmt::Display for RiskRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

use RiskRating::{High as H, Low as L, Medium as M, VeryHigh as VH, VeryLow as VL};

/// Rows: likelihood Remote..Very Likely. Columns: impact Minor..Critical.
const MATRIX: [[RiskRating; 5]; 5] = [
    [VL, VL, L, L, M],
    [VL, L, L, M, H],
    [VL, L, M, H, H],
    [L, L, M, H, VH],
    [L, M, H, VH, VH],
];

/// Looks up ratings in the fixed 5x5 matrix
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskRatingCalculator;

impl RiskRatingCalculator {
    /// Rate a typed pair; total over all 25 combinations
    pub fn rate(likelihood: Likelihood, impact: Impact) -> RiskRating {
        MATRIX[likelihood as usize][impact as usize]
    }

    /// Rate ordinal values; anything outside 1..5 is [`RiskRating::Unknown`]
    pub fn rate_values(likelihood: u8, impact: u8) -> RiskRating {
        match (Likelihood::from_value(likelihood), Impact::from_value(impact)) {
            (Some(l), Some(i)) => Self::rate(l, i),
            _ => RiskRating::Unknown,
        }
    }

    /// Rate textual labels; unrecognised text is [`RiskRating::Unknown`]
    pub fn rate_labels(likelihood: &str, impact: &str) -> RiskRating {
        match (likelihood.parse::<Likelihood>(), impact.parse::<Impact>()) {
            (Ok(l), Ok(i)) => Self::rate(l, i),
            _ => RiskRating::Unknown,
        }
    }

    /// Rate optional inputs, as held on a risk record
    pub fn rate_optional(likelihood: Option<Likelihood>, impact: Option<Impact>) -> RiskRating {
        match (likelihood, impact) {
            (Some(l), Some(i)) => Self::rate(l, i),
            _ => RiskRating::Unknown,
        }
    }
}
