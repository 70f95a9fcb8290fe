//! Assurance profiles and per-outcome required achievement levels

use crate::error::{AssessmentError, AssessmentResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Named preset selecting the required level of every outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Profile {
    /// Baseline profile
    Baseline,
    /// Enhanced profile
    Enhanced,
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Baseline => write!(f, "Baseline"),
            Profile::Enhanced => write!(f, "Enhanced"),
        }
    }
}

impl FromStr for Profile {
    type Err = AssessmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "baseline" => Ok(Profile::Baseline),
            "enhanced" => Ok(Profile::Enhanced),
            other => Err(AssessmentError::ParseError(format!(
                "Unknown profile: {other}"
            ))),
        }
    }
}

/// Achievement level an outcome is required to reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementLevel {
    /// Fully achieved
    #[serde(rename = "Achieved")]
    Achieved,
    /// Partially achieved
    #[serde(rename = "Partially Achieved")]
    PartiallyAchieved,
    /// Not required; the outcome is not scored
    #[serde(rename = "Not Achieved")]
    NotAchieved,
}

impl AchievementLevel {
    /// Whether an outcome required at this level contributes to scoring
    pub fn is_scored(self) -> bool {
        !matches!(self, AchievementLevel::NotAchieved)
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            AchievementLevel::Achieved => "Achieved",
            AchievementLevel::PartiallyAchieved => "Partially Achieved",
            AchievementLevel::NotAchieved => "Not Achieved",
        }
    }
}

impl fmt::Display for AchievementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Required level of one outcome under each profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRequirement {
    /// Outcome the requirement applies to
    pub outcome_id: String,
    /// Level required by the Baseline profile
    pub baseline_level: AchievementLevel,
    /// Level required by the Enhanced profile
    pub enhanced_level: AchievementLevel,
}

impl ProfileRequirement {
    /// Level required under the given profile
    pub fn level_for(&self, profile: Profile) -> AchievementLevel {
        match profile {
            Profile::Baseline => self.baseline_level,
            Profile::Enhanced => self.enhanced_level,
        }
    }
}

/// Resolves the required level of an outcome for a profile
#[derive(Debug, Clone, Default)]
pub struct ProfileRequirementResolver {
    requirements: HashMap<String, ProfileRequirement>,
}

impl ProfileRequirementResolver {
    /// Build a resolver, rejecting duplicate outcome entries
    pub fn new(requirements: Vec<ProfileRequirement>) -> AssessmentResult<Self> {
        let mut by_outcome = HashMap::with_capacity(requirements.len());
        for requirement in requirements {
            let outcome_id = requirement.outcome_id.clone();
            if by_outcome.insert(outcome_id.clone(), requirement).is_some() {
                return Err(AssessmentError::ConfigurationError(format!(
                    "Duplicate profile requirement for outcome {outcome_id}"
                )));
            }
        }
        Ok(Self {
            requirements: by_outcome,
        })
    }

    /// Required level, or `None` when the outcome has no requirement entry
    pub fn required_level(&self, outcome_id: &str, profile: Profile) -> Option<AchievementLevel> {
        self.requirements
            .get(outcome_id)
            .map(|req| req.level_for(profile))
    }
}
