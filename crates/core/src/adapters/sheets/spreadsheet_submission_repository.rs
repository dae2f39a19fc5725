use error_stack::ResultExt;
use google_sheets4::api::ValueRange;
use tokio::sync::OnceCell;
use tracing::{info, instrument};

use crate::adapters::config::sheets_config::SpreadsheetConfig;
use crate::domain::submission::Submission;
use crate::ports::submission_repository::{
    AppendReceipt, SubmissionRepository, SubmissionRepositoryError,
};

use super::spreadsheet_manager::SpreadsheetManager;
use super::value_range_factory::ValueRangeFactory;

/// Appends submissions to a Google Sheet.
///
/// The sheets hub is built on the first append and then shared by every request. If the
/// credential cannot be loaded, that append fails without touching the sheet and the next
/// one tries again.
pub struct SpreadsheetSubmissionRepository {
    config: SpreadsheetConfig,
    manager: OnceCell<SpreadsheetManager>,
}

impl std::fmt::Debug for SpreadsheetSubmissionRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpreadsheetSubmissionRepository")
            .field("config", &self.config)
            .field("connected", &self.manager.initialized())
            .finish()
    }
}

impl SpreadsheetSubmissionRepository {
    pub fn new(config: SpreadsheetConfig) -> Self {
        Self {
            config,
            manager: OnceCell::new(),
        }
    }

    async fn manager(
        &self,
    ) -> error_stack::Result<&SpreadsheetManager, SubmissionRepositoryError> {
        self.manager
            .get_or_try_init(|| SpreadsheetManager::new(self.config.clone()))
            .await
            .change_context(SubmissionRepositoryError::CredentialUnavailable)
    }
}

#[async_trait::async_trait]
impl SubmissionRepository for SpreadsheetSubmissionRepository {
    fn name(&self) -> &str {
        "google-sheets"
    }

    #[instrument(
        skip(self, submission),
        fields(kind = %submission.kind(), cells = submission.len())
    )]
    async fn append(
        &self,
        submission: &Submission,
    ) -> error_stack::Result<AppendReceipt, SubmissionRepositoryError> {
        let manager = self.manager().await?;
        let range = self.config.range_for(submission.kind());

        let response = manager
            .append_range(range, ValueRange::from_row(submission.values()))
            .await
            .change_context(SubmissionRepositoryError::AppendFailed)?;

        let updated_range = response.updates.and_then(|updates| updates.updated_range);
        info!("Appended row at {:?}", updated_range);

        Ok(AppendReceipt { updated_range })
    }
}
