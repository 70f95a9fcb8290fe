//! Risk rating, appetite and tolerance classification
//!
//! Ratings come from a fixed likelihood x impact matrix. A risk is in
//! tolerance when its effective rating does not exceed the appetite set for
//! its impact type.

pub mod appetite;
pub mod rating;
pub mod record;
pub mod register;
pub mod statement;
pub mod tolerance;

pub use appetite::{AppetiteLevel, RiskAppetite};
pub use rating::{Impact, Likelihood, RiskRating, RiskRatingCalculator};
pub use record::RiskRecord;
pub use register::RiskRegister;
pub use statement::{PhraseMismatch, RiskScenario};
pub use tolerance::{
    RiskClassification, RiskSummary, RiskToleranceEvaluator, ToleranceBasis, ToleranceCounts,
    ToleranceStatus,
};
