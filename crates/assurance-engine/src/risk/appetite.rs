//! Risk appetite per impact category

use crate::error::AssessmentError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Maximum tolerable rating, ordered 1..5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AppetiteLevel {
    /// Tolerates only very low risk
    Averse,
    /// Tolerates low risk
    Minimal,
    /// Tolerates medium risk
    Cautious,
    /// Tolerates high risk
    Open,
    /// Tolerates any rated risk
    Eager,
}

impl AppetiteLevel {
    /// Every level in ascending order
    pub const ALL: [AppetiteLevel; 5] = [
        AppetiteLevel::Averse,
        AppetiteLevel::Minimal,
        AppetiteLevel::Cautious,
        AppetiteLevel::Open,
        AppetiteLevel::Eager,
    ];

    /// Ordinal value 1..5
    pub fn value(self) -> u8 {
        self as u8 + 1
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            AppetiteLevel::Averse => "Averse",
            AppetiteLevel::Minimal => "Minimal",
            AppetiteLevel::Cautious => "Cautious",
            AppetiteLevel::Open => "Open",
            AppetiteLevel::Eager => "Eager",
        }
    }
}

impl fmt::Display for AppetiteLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AppetiteLevel {
    type Err = AssessmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AssessmentError::ParseError(format!("Unknown appetite level: {s}")))
    }
}

/// Appetite level per impact type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskAppetite {
    levels: BTreeMap<String, AppetiteLevel>,
}

impl RiskAppetite {
    /// Empty appetite; every risk is out of tolerance until categories are set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the appetite for an impact type
    pub fn set(&mut self, impact_type: impl Into<String>, level: AppetiteLevel) {
        self.levels.insert(impact_type.into(), level);
    }

    /// Builder form of [`RiskAppetite::set`]
    pub fn with(mut self, impact_type: impl Into<String>, level: AppetiteLevel) -> Self {
        self.set(impact_type, level);
        self
    }

    /// Appetite for an impact type
    pub fn level_for(&self, impact_type: &str) -> Option<AppetiteLevel> {
        self.levels.get(impact_type).copied()
    }

    /// Defined categories and levels, sorted by impact type
    pub fn iter(&self) -> impl Iterator<Item = (&str, AppetiteLevel)> {
        self.levels.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Whether no category is defined
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, AppetiteLevel)> for RiskAppetite {
    fn from_iter<I: IntoIterator<Item = (K, AppetiteLevel)>>(iter: I) -> Self {
        Self {
            levels: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_ordered() {
        assert_eq!(AppetiteLevel::Averse.value(), 1);
        assert_eq!(AppetiteLevel::Cautious.value(), 3);
        assert_eq!(AppetiteLevel::Eager.value(), 5);
        assert!(AppetiteLevel::Minimal < AppetiteLevel::Open);
    }

    #[test]
    fn test_lookup_by_impact_type() {
        let appetite = RiskAppetite::new()
            .with("Financial", AppetiteLevel::Cautious)
            .with("Reputational", AppetiteLevel::Averse);
        assert_eq!(appetite.level_for("Financial"), Some(AppetiteLevel::Cautious));
        assert_eq!(appetite.level_for("Legal"), None);
        assert_eq!(appetite.iter().count(), 2);
    }

    #[test]
    fn test_deserialize_map() {
        let appetite: RiskAppetite =
            serde_json::from_str(r#"{"Operational":"Open","Safety":"Averse"}"#).unwrap();
        assert_eq!(appetite.level_for("Operational"), Some(AppetiteLevel::Open));
        assert_eq!(appetite.level_for("Safety"), Some(AppetiteLevel::Averse));
    }

    #[test]
    fn test_parse_level() {
        assert_eq!("eager".parse::<AppetiteLevel>().unwrap(), AppetiteLevel::Eager);
        assert!("reckless".parse::<AppetiteLevel>().is_err());
    }
}
