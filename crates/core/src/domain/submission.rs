use chrono::{DateTime, Local};
use strum::{Display, IntoEnumIterator};

use super::questionnaire::{AnswerKey, Answers};
use super::report::{clinical_alerts, AlertPriority};

/// Which surface produced a submission; each kind is appended to its own range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum SubmissionKind {
    CheckIn,
    Form,
}

/// One row worth of values, in column order. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    kind: SubmissionKind,
    values: Vec<String>,
}

impl Submission {
    pub fn new(kind: SubmissionKind, values: Vec<String>) -> Self {
        Self { kind, values }
    }

    pub fn kind(&self) -> SubmissionKind {
        self.kind
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Header row matching [`Submission::from_check_in`].
    pub fn check_in_columns() -> Vec<String> {
        std::iter::once("submitted_at".to_string())
            .chain(AnswerKey::iter().map(|key| key.to_string()))
            .chain(["high_priority_alerts".to_string(), "monitor_alerts".to_string()])
            .collect()
    }

    /// Flattens a finished check-in: timestamp, one cell per answer slot (blank when the
    /// question was skipped), then the alert summaries.
    pub fn from_check_in(answers: &Answers, submitted_at: DateTime<Local>) -> Self {
        let alerts = clinical_alerts(answers);
        let joined = |priority: AlertPriority| {
            alerts
                .iter()
                .filter(|alert| alert.priority == priority)
                .map(|alert| alert.message.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        };

        let values = std::iter::once(submitted_at.format("%Y-%m-%d %H:%M:%S").to_string())
            .chain(AnswerKey::iter().map(|key| answers.get_or(key, "").to_string()))
            .chain([joined(AlertPriority::High), joined(AlertPriority::Monitor)])
            .collect();

        Self::new(SubmissionKind::CheckIn, values)
    }
}
