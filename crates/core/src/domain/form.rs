//! Operator-configured web form.
//!
//! Validation stays at the level a browser form gives for free: required fields, e-mail
//! shape, integer coercion with bounds and choice membership.

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use super::submission::{Submission, SubmissionKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(String),
    #[error("{0} must be an e-mail address")]
    InvalidEmail(String),
    #[error("{0} must be a whole number")]
    NotANumber(String),
    #[error("{label} must be between {min} and {max}")]
    OutOfRange { label: String, min: i64, max: i64 },
    #[error("{0} must be one of the listed options")]
    InvalidChoice(String),
    #[error("Invalid form definition: {0}")]
    InvalidDefinition(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    LongText,
    Email,
    Number {
        #[serde(default)]
        min: Option<i64>,
        #[serde(default)]
        max: Option<i64>,
    },
    Choice {
        options: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormField {
    /// Form control name; also the column header.
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
}

impl FormField {
    fn coerce(&self, raw: &str) -> Result<String, FormError> {
        let value = raw.trim();
        if value.is_empty() {
            return if self.required {
                Err(FormError::MissingField(self.label.clone()))
            } else {
                Ok(String::new())
            };
        }

        match &self.kind {
            FieldKind::Text | FieldKind::LongText => Ok(value.to_string()),
            FieldKind::Email => {
                let valid = value
                    .split_once('@')
                    .map_or(false, |(local, domain)| {
                        !local.is_empty() && !domain.is_empty() && !domain.contains('@')
                    })
                    && !value.chars().any(char::is_whitespace);
                if valid {
                    Ok(value.to_string())
                } else {
                    Err(FormError::InvalidEmail(self.label.clone()))
                }
            }
            FieldKind::Number { min, max } => {
                let number = value
                    .parse::<i64>()
                    .map_err(|_| FormError::NotANumber(self.label.clone()))?;
                let (low, high) = (min.unwrap_or(i64::MIN), max.unwrap_or(i64::MAX));
                if number < low || number > high {
                    return Err(FormError::OutOfRange {
                        label: self.label.clone(),
                        min: low,
                        max: high,
                    });
                }
                Ok(number.to_string())
            }
            FieldKind::Choice { options } => options
                .iter()
                .find(|option| option.as_str() == value)
                .cloned()
                .ok_or_else(|| FormError::InvalidChoice(self.label.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormDefinition {
    #[serde(default = "default_title")]
    pub title: String,
    pub fields: Vec<FormField>,
}

fn default_title() -> String {
    "Survey".to_string()
}

impl FormDefinition {
    /// Checks what the config format cannot express.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.fields.is_empty() {
            return Err(FormError::InvalidDefinition("form has no fields".into()));
        }
        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(FormError::InvalidDefinition("field without a name".into()));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(FormError::InvalidDefinition(format!(
                    "duplicate field '{}'",
                    field.name
                )));
            }
            if let FieldKind::Choice { options } = &field.kind {
                if options.is_empty() {
                    return Err(FormError::InvalidDefinition(format!(
                        "choice field '{}' has no options",
                        field.name
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn columns(&self) -> Vec<String> {
        self.fields.iter().map(|field| field.name.clone()).collect()
    }

    /// Builds a submission from posted name/value pairs, in field order.
    ///
    /// Unknown names are ignored. When a name is posted more than once the first value wins.
    pub fn collect(&self, input: &[(String, String)]) -> Result<Submission, FormError> {
        let values = self
            .fields
            .iter()
            .map(|field| {
                let raw = input
                    .iter()
                    .find(|(name, _)| *name == field.name)
                    .map_or("", |(_, value)| value.as_str());
                field.coerce(raw)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Submission::new(SubmissionKind::Form, values))
    }
}
