use std::sync::Arc;

use chrono::Local;
use error_stack::{Report, ResultExt};
use tracing::{error, info, instrument};

use crate::domain::questionnaire::Answers;
use crate::domain::submission::Submission;
use crate::ports::submission_repository::{AppendReceipt, SubmissionRepository};
use crate::ports::submission_service::{SubmissionError, SubmissionService};

pub struct ChatReportApplicationService {
    repository: Arc<dyn SubmissionRepository>,
}

impl std::fmt::Debug for ChatReportApplicationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatReportApplicationService")
            .field("repository", &self.repository.name())
            .finish()
    }
}

impl ChatReportApplicationService {
    pub fn new(repository: Arc<dyn SubmissionRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl SubmissionService for ChatReportApplicationService {
    #[instrument(
        skip(self, submission),
        fields(kind = %submission.kind(), columns = submission.len())
    )]
    async fn submit(
        &self,
        submission: Submission,
    ) -> error_stack::Result<AppendReceipt, SubmissionError> {
        match self.repository.append(&submission).await {
            Ok(receipt) => {
                info!(
                    "✅ {} row appended to {}",
                    submission.kind(),
                    receipt.updated_range.as_deref().unwrap_or("<unknown range>")
                );
                Ok(receipt)
            }
            Err(report) => {
                error!("❌ {} submission failed: {:?}", submission.kind(), report);
                Err(report.change_context(SubmissionError::Failed))
            }
        }
    }

    #[instrument(skip(self, answers))]
    async fn submit_check_in(
        &self,
        answers: &Answers,
    ) -> error_stack::Result<AppendReceipt, SubmissionError> {
        if answers.is_empty() {
            return Err(Report::new(SubmissionError::Failed))
                .attach_printable("Check-in has no answers");
        }
        self.submit(Submission::from_check_in(answers, Local::now()))
            .await
    }

    async fn health_check(&self) -> String {
        format!(
            "🟢 ChatReport - Healthy\nSubmission target: {}",
            self.repository.name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::dry_run::DryRunSubmissionRepository;
    use crate::adapters::recording::RecordingSubmissionRepository;
    use crate::domain::submission::SubmissionKind;
    use crate::domain::test_support::{answers_for, QUIET_PATH};
    use crate::ports::submission_repository::SubmissionRepositoryError;

    struct RevokedKeyRepository;

    #[async_trait::async_trait]
    impl SubmissionRepository for RevokedKeyRepository {
        fn name(&self) -> &str {
            "revoked"
        }

        async fn append(
            &self,
            _submission: &Submission,
        ) -> error_stack::Result<AppendReceipt, SubmissionRepositoryError> {
            Err(Report::new(SubmissionRepositoryError::CredentialUnavailable))
        }
    }

    fn alice() -> Submission {
        Submission::new(
            SubmissionKind::Form,
            vec!["Alice".to_string(), "a@x.com".to_string()],
        )
    }

    #[tokio::test]
    async fn test_submit_appends_exactly_one_row() {
        let repository = Arc::new(RecordingSubmissionRepository::default());
        let service = ChatReportApplicationService::new(repository.clone());

        service.submit(alice()).await.unwrap();

        let rows = repository.rows().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].values(), ["Alice", "a@x.com"]);
    }

    #[tokio::test]
    async fn test_submit_is_not_idempotent() {
        let repository = Arc::new(RecordingSubmissionRepository::default());
        let service = ChatReportApplicationService::new(repository.clone());

        service.submit(alice()).await.unwrap();
        service.submit(alice()).await.unwrap();

        let rows = repository.rows().await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], rows[1]);
    }

    #[tokio::test]
    async fn test_credential_failure_is_generic() {
        let service = ChatReportApplicationService::new(Arc::new(RevokedKeyRepository));

        for _ in 0..2 {
            let report = service.submit(alice()).await.unwrap_err();
            assert_eq!(report.current_context().to_string(), "Submission failed");
            assert!(report
                .downcast_ref::<SubmissionRepositoryError>()
                .is_some());
        }
    }

    #[tokio::test]
    async fn test_submit_check_in() {
        let repository = Arc::new(RecordingSubmissionRepository::default());
        let service = ChatReportApplicationService::new(repository.clone());

        service
            .submit_check_in(&answers_for(&QUIET_PATH))
            .await
            .unwrap();

        let rows = repository.rows().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind(), SubmissionKind::CheckIn);
        assert_eq!(rows[0].values()[1], "Alice");
    }

    #[tokio::test]
    async fn test_empty_check_in_is_rejected_without_append() {
        let repository = Arc::new(RecordingSubmissionRepository::default());
        let service = ChatReportApplicationService::new(repository.clone());

        assert!(service.submit_check_in(&Answers::new()).await.is_err());
        assert!(repository.rows().await.is_empty());
    }

    #[tokio::test]
    async fn test_health_check_names_target() {
        let service =
            ChatReportApplicationService::new(Arc::new(DryRunSubmissionRepository::default()));
        assert!(service.health_check().await.contains("dry run"));
    }
}
