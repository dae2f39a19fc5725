use error_stack::ResultExt;
use google_sheets4::{
    api::{AppendValuesResponse, ValueRange},
    Sheets,
};
use std::fmt::Debug;
use thiserror::Error;
use tracing::instrument;

use crate::adapters::config::sheets_config::SpreadsheetConfig;

use super::{
    auth,
    http_client::{self, HttpsConnector},
};

/// Cells are stored exactly as typed; a leading `=` stays text.
const VALUE_INPUT_OPTION: &str = "RAW";
const INSERT_DATA_OPTION: &str = "INSERT_ROWS";

pub struct SpreadsheetManager {
    pub config: SpreadsheetConfig,
    hub: Sheets<HttpsConnector>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetManager {{ config: {:?} }}", self.config)
    }
}

#[derive(Error, Debug)]
pub enum SpreadsheetManagerError {
    #[error("Failed to authenticate with the service account")]
    Authentication,
    #[error("Failed to append row")]
    FailedToAppendRow,
}

impl SpreadsheetManager {
    #[instrument(name = "SpreadsheetManager::new")]
    pub async fn new(
        config: SpreadsheetConfig,
    ) -> error_stack::Result<Self, SpreadsheetManagerError> {
        let secret = auth::service_account_key(&config)
            .await
            .change_context(SpreadsheetManagerError::Authentication)?;
        let client = http_client::http_client();
        let auth = auth::auth(secret, client.clone())
            .await
            .change_context(SpreadsheetManagerError::Authentication)?;
        let hub: Sheets<HttpsConnector> = Sheets::new(client, auth);

        Ok(SpreadsheetManager { config, hub })
    }

    /// Appends after the last row of the table found at `range`.
    #[instrument(skip(value_range))]
    pub async fn append_range(
        &self,
        range: &str,
        value_range: ValueRange,
    ) -> error_stack::Result<AppendValuesResponse, SpreadsheetManagerError> {
        self.hub
            .spreadsheets()
            .values_append(value_range, &self.config.spreadsheet_id, range)
            .value_input_option(VALUE_INPUT_OPTION)
            .insert_data_option(INSERT_DATA_OPTION)
            .doit()
            .await
            .map(|(_, response)| response)
            .change_context(SpreadsheetManagerError::FailedToAppendRow)
            .attach_printable_lazy(|| format!("Failed to append to range {} ", range))
    }
}
