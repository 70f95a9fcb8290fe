//! Export of compliance reports and risk registers

pub mod csv;
pub mod markdown;

pub use self::csv::{RiskCsvExporter, RISK_CSV_HEADER};
pub use self::markdown::MarkdownExporter;
