use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{info, instrument};

use crate::domain::submission::Submission;
use crate::ports::submission_repository::{
    AppendReceipt, SubmissionRepository, SubmissionRepositoryError,
};

/// Logs each row instead of sending it anywhere. Rows are dropped after logging;
/// only the running count is kept, to number the receipts.
#[derive(Debug, Default)]
pub struct DryRunSubmissionRepository {
    appended: AtomicUsize,
}

impl DryRunSubmissionRepository {
    pub fn appended(&self) -> usize {
        self.appended.load(Ordering::Relaxed)
    }
}

#[async_trait::async_trait]
impl SubmissionRepository for DryRunSubmissionRepository {
    fn name(&self) -> &str {
        "dry run (rows are logged, not stored)"
    }

    #[instrument(skip(self, submission), fields(kind = %submission.kind()))]
    async fn append(
        &self,
        submission: &Submission,
    ) -> error_stack::Result<AppendReceipt, SubmissionRepositoryError> {
        let row = self.appended.fetch_add(1, Ordering::Relaxed) + 1;
        info!("dry run, row {row}: {:?}", submission.values());

        Ok(AppendReceipt {
            updated_range: Some(format!("dry-run!A{row}")),
        })
    }
}
