pub mod conversation;
pub mod form;
pub mod questionnaire;
pub mod report;
pub mod submission;

// Re-export commonly used types
pub use conversation::*;
pub use submission::*;

#[cfg(test)]
pub(crate) mod test_support;
