use thiserror::Error;

use super::{answer_key::AnswerKey, answers::Answers, body_region::BodyRegion};

/// Highest point of the 0-10 rating scale.
pub const SCALE_MAX: u8 = 10;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnswerError {
    #[error("An answer is required")]
    Empty,
    #[error("Please pick a number between 0 and {SCALE_MAX}")]
    NotOnScale(String),
    #[error("'{0}' is not one of the offered answers")]
    UnknownChoice(String),
    #[error("'{0}' is not a body region on the diagram")]
    UnknownRegion(String),
    #[error("The check-in is already finished")]
    Finished,
}

/// Visibility rule of a follow-up question.
pub type Condition = fn(&Answers) -> bool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Bot message only, no input.
    Info,
    Text,
    /// Integer rating from 0 to [`SCALE_MAX`].
    Scale,
    /// Quick-reply buttons.
    Choice(&'static [&'static str]),
    /// Multi-select on the body diagram.
    BodyMap,
}

#[derive(Debug, Clone)]
pub struct Step {
    pub id: &'static str,
    pub kind: StepKind,
    pub message: &'static str,
    pub answer_key: Option<AnswerKey>,
    pub condition: Option<Condition>,
}

impl Step {
    pub fn info(id: &'static str, message: &'static str) -> Self {
        Self {
            id,
            kind: StepKind::Info,
            message,
            answer_key: None,
            condition: None,
        }
    }

    pub fn ask(id: &'static str, kind: StepKind, key: AnswerKey, message: &'static str) -> Self {
        Self {
            id,
            kind,
            message,
            answer_key: Some(key),
            condition: None,
        }
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn is_visible(&self, answers: &Answers) -> bool {
        self.condition.map_or(true, |condition| condition(answers))
    }

    pub fn expects_answer(&self) -> bool {
        !matches!(self.kind, StepKind::Info)
    }

    /// Bot message with `{name}` replaced by the patient's first name.
    pub fn personalized_message(&self, answers: &Answers) -> String {
        self.message
            .replace("{name}", answers.get_or(AnswerKey::PatientName, ""))
    }

    /// Validates raw input the way the matching widget would and returns the value to store.
    pub fn normalize_answer(&self, raw: &str) -> Result<String, AnswerError> {
        let raw = raw.trim();
        match self.kind {
            StepKind::Info => Ok(String::new()),
            StepKind::Text => {
                if raw.is_empty() {
                    Err(AnswerError::Empty)
                } else {
                    Ok(raw.to_string())
                }
            }
            StepKind::Scale => match raw.parse::<u8>() {
                Ok(score) if score <= SCALE_MAX => Ok(score.to_string()),
                _ => Err(AnswerError::NotOnScale(raw.to_string())),
            },
            StepKind::Choice(options) => options
                .iter()
                .find(|option| option.eq_ignore_ascii_case(raw))
                .map(|option| option.to_string())
                .ok_or_else(|| AnswerError::UnknownChoice(raw.to_string())),
            StepKind::BodyMap => {
                let regions = BodyRegion::parse_selection(raw)?;
                Ok(BodyRegion::describe(&regions))
            }
        }
    }
}
