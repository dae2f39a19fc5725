use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{answer_key::AnswerKey, response::is_affirmative};

/// Answers collected during one check-in, keyed by slot.
///
/// Serialises to a flat JSON object (`{"patient_name": "Alice", ...}`), which is what the
/// web surface carries between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers(BTreeMap<AnswerKey, String>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: AnswerKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    /// Returns the answer, or `default` when the slot is missing or blank.
    pub fn get_or<'a>(&'a self, key: AnswerKey, default: &'a str) -> &'a str {
        match self.get(key) {
            Some(value) if !value.is_empty() => value,
            _ => default,
        }
    }

    pub fn set<S: Into<String>>(&mut self, key: AnswerKey, value: S) {
        self.0.insert(key, value.into());
    }

    pub fn is_affirmative(&self, key: AnswerKey) -> bool {
        self.get(key).map_or(false, is_affirmative)
    }

    /// Case-insensitive substring test on the stored answer.
    pub fn mentions(&self, key: AnswerKey, needle: &str) -> bool {
        self.get(key)
            .map_or(false, |value| value.to_lowercase().contains(needle))
    }

    /// Numeric rating stored under `key`, 0 when absent or not a number.
    pub fn score(&self, key: AnswerKey) -> u8 {
        self.get(key)
            .and_then(|value| value.trim().parse::<u8>().ok())
            .unwrap_or(0)
    }

    pub fn answered_count(&self) -> usize {
        self.0.values().filter(|value| !value.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnswerKey, &str)> {
        self.0.iter().map(|(key, value)| (*key, value.as_str()))
    }
}

impl FromIterator<(AnswerKey, String)> for Answers {
    fn from_iter<I: IntoIterator<Item = (AnswerKey, String)>>(iter: I) -> Self {
        Answers(iter.into_iter().collect())
    }
}
