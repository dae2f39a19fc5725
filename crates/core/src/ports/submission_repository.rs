use thiserror::Error;

use crate::domain::submission::Submission;

#[derive(Error, Debug)]
pub enum SubmissionRepositoryError {
    #[error("Service account credential is unavailable")]
    CredentialUnavailable,
    #[error("Failed to append row")]
    AppendFailed,
}

/// What the remote store reported for a successful append.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppendReceipt {
    pub updated_range: Option<String>,
}

#[async_trait::async_trait]
pub trait SubmissionRepository: Send + Sync {
    fn name(&self) -> &str;

    /// Appends the submission as one new row. There is no idempotency key: appending the
    /// same submission twice produces two rows.
    async fn append(
        &self,
        submission: &Submission,
    ) -> error_stack::Result<AppendReceipt, SubmissionRepositoryError>;
}
