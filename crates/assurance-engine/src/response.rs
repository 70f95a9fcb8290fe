//! Questionnaire responses for a project

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Answer to a single question; `None` means unanswered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Question answered
    pub question_id: String,
    /// Yes / no / unanswered
    #[serde(default)]
    pub value: Option<bool>,
}

impl Response {
    /// Convenience constructor
    pub fn new(question_id: impl Into<String>, value: Option<bool>) -> Self {
        Self {
            question_id: question_id.into(),
            value,
        }
    }
}

/// All responses recorded for one project, keyed by question id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseSet {
    values: HashMap<String, Option<bool>>,
}

impl ResponseSet {
    /// Empty response set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or overwrite an answer
    pub fn record(&mut self, question_id: impl Into<String>, value: Option<bool>) {
        self.values.insert(question_id.into(), value);
    }

    /// Answer for a question; absent and explicit `null` are both unanswered
    pub fn answer(&self, question_id: &str) -> Option<bool> {
        self.values.get(question_id).copied().flatten()
    }

    /// Number of stored entries, answered or not
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no entries are stored
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<Response> for ResponseSet {
    fn from_iter<I: IntoIterator<Item = Response>>(iter: I) -> Self {
        let mut set = ResponseSet::new();
        for response in iter {
            set.record(response.question_id, response.value);
        }
        set
    }
}

impl<'a> FromIterator<&'a Response> for ResponseSet {
    fn from_iter<I: IntoIterator<Item = &'a Response>>(iter: I) -> Self {
        iter.into_iter().cloned().collect()
    }
}
