use crate::domain::submission::SubmissionKind;

#[derive(serde::Deserialize, Clone)]
pub struct SpreadsheetConfig {
    pub spreadsheet_id: Box<str>,
    /// Path to the service account JSON key.
    #[serde(default)]
    pub priv_key: Option<Box<str>>,
    /// The service account JSON key itself, for platforms that inject secrets as env vars.
    /// Takes precedence over `priv_key`.
    #[serde(default)]
    pub service_account_json: Option<Box<str>>,
    #[serde(default = "default_check_in_range")]
    pub check_in_range: Box<str>,
    #[serde(default = "default_form_range")]
    pub form_range: Box<str>,
}

fn default_check_in_range() -> Box<str> {
    "CheckIns".into()
}

fn default_form_range() -> Box<str> {
    "Form".into()
}

impl SpreadsheetConfig {
    pub fn range_for(&self, kind: SubmissionKind) -> &str {
        match kind {
            SubmissionKind::CheckIn => &self.check_in_range,
            SubmissionKind::Form => &self.form_range,
        }
    }
}

impl std::fmt::Debug for SpreadsheetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpreadsheetConfig")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("priv_key", &self.priv_key)
            .field(
                "service_account_json",
                &self.service_account_json.as_ref().map(|_| "<redacted>"),
            )
            .field("check_in_range", &self.check_in_range)
            .field("form_range", &self.form_range)
            .finish()
    }
}
