//! Natural-language risk statements
//!
//! New risks carry a [`RiskScenario`] and their prose is rendered from the
//! likelihood and impact data. Free-text statements are still supported:
//! editing them rewrites the likelihood and impact phrases in place and
//! leaves every other byte untouched.

use super::rating::{Impact, Likelihood};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured form of a risk statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScenario {
    /// What could happen
    pub threat: String,
    /// What would be affected
    pub consequence: String,
}

impl RiskScenario {
    /// Create a scenario
    pub fn new(threat: impl Into<String>, consequence: impl Into<String>) -> Self {
        Self {
            threat: threat.into(),
            consequence: consequence.into(),
        }
    }

    /// Render prose for the given assessment
    pub fn render(&self, likelihood: Likelihood, impact: Impact) -> String {
        format!(
            "{} ({}), with {} on {}.",
            self.threat.trim_end_matches('.'),
            likelihood_phrase(likelihood),
            impact_phrase(impact),
            self.consequence.trim_end_matches('.'),
        )
    }
}

/// Phrase naming a likelihood inside a statement, e.g. `"possible likelihood"`
pub fn likelihood_phrase(likelihood: Likelihood) -> String {
    format!("{} likelihood", likelihood.label().to_ascii_lowercase())
}

/// Phrase naming an impact inside a statement, e.g. `"major impact"`
pub fn impact_phrase(impact: Impact) -> String {
    format!("{} impact", impact.label().to_ascii_lowercase())
}

/// Why a statement could not be rewritten
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhraseMismatch {
    /// Expected phrase does not occur
    #[error("phrase \"{0}\" not found in statement")]
    Missing(String),
    /// Expected phrase occurs more than once
    #[error("phrase \"{phrase}\" occurs {count} times in statement")]
    Ambiguous {
        /// Phrase searched for
        phrase: String,
        /// Number of occurrences
        count: usize,
    },
}

/// Replace the old likelihood and impact phrases with the new ones
///
/// Matching ignores ASCII case and requires word boundaries on both sides.
/// Each old phrase must occur exactly once, not counting occurrences that
/// are the tail of another level's phrase.
pub fn rewrite_phrases(
    statement: &str,
    old: (Likelihood, Impact),
    new: (Likelihood, Impact),
) -> Result<String, PhraseMismatch> {
    let old_l = likelihood_phrase(old.0);
    let old_i = impact_phrase(old.1);
    let longer_l = longer_phrases(&old_l, Likelihood::ALL.into_iter().map(likelihood_phrase));
    let longer_i = longer_phrases(&old_i, Impact::ALL.into_iter().map(impact_phrase));
    let at_l = locate_once(statement, &old_l, &longer_l)?;
    let at_i = locate_once(statement, &old_i, &longer_i)?;

    let mut edits = [
        (at_l, old_l.len(), match_case(&statement[at_l..], likelihood_phrase(new.0))),
        (at_i, old_i.len(), match_case(&statement[at_i..], impact_phrase(new.1))),
    ];
    // apply back to front so earlier offsets stay valid
    edits.sort_by(|a, b| b.0.cmp(&a.0));

    let mut out = statement.to_string();
    for (start, len, replacement) in edits {
        out.replace_range(start..start + len, &replacement);
    }
    Ok(out)
}

fn locate_once(haystack: &str, phrase: &str, longer: &[String]) -> Result<usize, PhraseMismatch> {
    let lowered = haystack.to_ascii_lowercase();
    let bytes = lowered.as_bytes();
    let hits: Vec<usize> = lowered
        .match_indices(phrase)
        .map(|(start, _)| start)
        .filter(|&start| {
            let end = start + phrase.len();
            let before_ok = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
            let after_ok = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
            // "likely likelihood" inside "very likely likelihood" names another level
            let shadowed = longer.iter().any(|l| lowered[..end].ends_with(l.as_str()));
            before_ok && after_ok && !shadowed
        })
        .collect();

    match hits.as_slice() {
        [] => Err(PhraseMismatch::Missing(phrase.to_string())),
        [start] => Ok(*start),
        _ => Err(PhraseMismatch::Ambiguous {
            phrase: phrase.to_string(),
            count: hits.len(),
        }),
    }
}

/// Capitalise `replacement` when the text it replaces starts with a capital
fn match_case(replaced: &str, replacement: String) -> String {
    if !replaced.starts_with(|c: char| c.is_ascii_uppercase()) {
        return replacement;
    }
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => replacement,
    }
}

/// Phrases of other levels that end with `phrase`
fn longer_phrases(phrase: &str, all: impl Iterator<Item = String>) -> Vec<String> {
    all.filter(|p| p.len() > phrase.len() && p.ends_with(phrase))
        .collect()
}
