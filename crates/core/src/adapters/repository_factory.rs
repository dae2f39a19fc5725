use std::sync::Arc;

use tracing::{info, warn};

use crate::ports::submission_repository::SubmissionRepository;

use super::config::app_config::AppConfig;
use super::dry_run::DryRunSubmissionRepository;
use super::sheets::spreadsheet_submission_repository::SpreadsheetSubmissionRepository;

/// Picks where submissions go. Config validation guarantees a `[sheets]` section
/// whenever `dry_run` is off; without one, rows are only logged.
pub fn submission_repository(config: &AppConfig) -> Arc<dyn SubmissionRepository> {
    match (&config.sheets, config.dry_run) {
        (Some(sheets), false) => {
            info!(
                "Appending submissions to spreadsheet {}",
                sheets.spreadsheet_id
            );
            Arc::new(SpreadsheetSubmissionRepository::new(sheets.clone()))
        }
        (_, true) => {
            info!("Dry run: submissions are logged and dropped");
            Arc::new(DryRunSubmissionRepository::default())
        }
        (None, false) => {
            warn!("No spreadsheet configured, falling back to dry run");
            Arc::new(DryRunSubmissionRepository::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::config::server_config::ServerConfig;
    use crate::adapters::config::sheets_config::SpreadsheetConfig;

    fn config(dry_run: bool) -> AppConfig {
        AppConfig {
            sheets: Some(
                serde_json::from_value::<SpreadsheetConfig>(
                    serde_json::json!({ "spreadsheet_id": "abc", "priv_key": "key.json" }),
                )
                .unwrap(),
            ),
            server: ServerConfig::default(),
            form: None,
            dry_run,
        }
    }

    #[test]
    fn test_dry_run_only_logs() {
        let repository = submission_repository(&config(true));
        assert_eq!(repository.name(), "dry run (rows are logged, not stored)");
    }

    #[test]
    fn test_sheets_when_configured() {
        let repository = submission_repository(&config(false));
        assert_eq!(repository.name(), "google-sheets");
    }
}
