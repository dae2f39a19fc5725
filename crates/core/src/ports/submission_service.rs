use thiserror::Error;

use crate::domain::questionnaire::Answers;
use crate::domain::submission::Submission;

use super::submission_repository::AppendReceipt;

/// The only failure users ever see. The cause stays in the report for the logs.
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("Submission failed")]
    Failed,
}

#[async_trait::async_trait]
pub trait SubmissionService: Send + Sync {
    async fn submit(
        &self,
        submission: Submission,
    ) -> error_stack::Result<AppendReceipt, SubmissionError>;

    /// Flattens a finished check-in and submits it.
    async fn submit_check_in(
        &self,
        answers: &Answers,
    ) -> error_stack::Result<AppendReceipt, SubmissionError>;

    async fn health_check(&self) -> String;
}
