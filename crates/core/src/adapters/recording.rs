use tokio::sync::RwLock;

use crate::domain::submission::Submission;
use crate::ports::submission_repository::{
    AppendReceipt, SubmissionRepository, SubmissionRepositoryError,
};

/// Test double that keeps every appended row so assertions can inspect them.
#[derive(Debug, Default)]
pub struct RecordingSubmissionRepository {
    rows: RwLock<Vec<Submission>>,
}

impl RecordingSubmissionRepository {
    pub async fn rows(&self) -> Vec<Submission> {
        self.rows.read().await.clone()
    }
}

#[async_trait::async_trait]
impl SubmissionRepository for RecordingSubmissionRepository {
    fn name(&self) -> &str {
        "recording"
    }

    async fn append(
        &self,
        submission: &Submission,
    ) -> error_stack::Result<AppendReceipt, SubmissionRepositoryError> {
        let mut guard = self.rows.write().await;
        guard.push(submission.clone());

        Ok(AppendReceipt {
            updated_range: Some(format!("recording!A{}", guard.len())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::submission::SubmissionKind;

    #[tokio::test]
    async fn test_rows_are_kept_in_append_order() {
        let repository = RecordingSubmissionRepository::default();
        let first = Submission::new(SubmissionKind::Form, vec!["1".into()]);
        let second = Submission::new(SubmissionKind::Form, vec!["2".into()]);

        let receipt = repository.append(&first).await.unwrap();
        assert_eq!(receipt.updated_range.as_deref(), Some("recording!A1"));
        repository.append(&second).await.unwrap();

        assert_eq!(repository.rows().await, vec![first, second]);
    }
}
