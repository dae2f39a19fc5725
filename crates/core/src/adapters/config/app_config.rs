use config::{builder::DefaultState, Config, ConfigBuilder, Environment};
use error_stack::{report, Report, ResultExt};
use serde::de::IntoDeserializer;
use serde::Deserialize;
use serde_path_to_error::{Deserializer as PathDeserializer, Segment, Track};
use thiserror::Error;

use crate::domain::form::FormDefinition;

use super::lenient::native_or_text;
use super::{server_config::ServerConfig, sheets_config::SpreadsheetConfig};

/// Prefix of environment overrides, e.g. `CHATREPORT_SHEETS__SPREADSHEET_ID`.
pub const ENV_PREFIX: &str = "CHATREPORT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration")]
    Read,
    #[error("Invalid configuration at field '{0}'")]
    Invalid(String),
    #[error("Missing [sheets] section; set dry_run = true to run without a spreadsheet")]
    MissingSheets,
    #[error("Invalid [form] section")]
    InvalidForm,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub sheets: Option<SpreadsheetConfig>,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub form: Option<FormDefinition>,
    /// Log rows instead of appending them to the spreadsheet.
    #[serde(default, deserialize_with = "native_or_text")]
    pub dry_run: bool,
}

impl AppConfig {
    /// Reads the `Config` file (or `CONFIG_PATH`) and then environment overrides.
    pub fn load() -> error_stack::Result<Self, ConfigError> {
        let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "Config".to_string());
        let builder = Config::builder()
            .add_source(config::File::with_name(&config_path).required(false))
            .add_source(Self::environment());

        Self::from_builder(builder)
            .attach_printable_lazy(|| format!("Config file: {config_path}"))
    }

    /// Environment overrides such as `CHATREPORT_SHEETS__SERVICE_ACCOUNT_JSON` or
    /// `CHATREPORT_DRY_RUN`. Values are kept as strings, so an all-digit spreadsheet id
    /// or key path survives unchanged.
    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(false)
    }

    pub fn from_builder(
        builder: ConfigBuilder<DefaultState>,
    ) -> error_stack::Result<Self, ConfigError> {
        let value = builder
            .build()
            .change_context(ConfigError::Read)?
            .try_deserialize::<serde_json::Value>()
            .change_context(ConfigError::Read)?;

        let mut track = Track::new();
        let path_de = PathDeserializer::new(value.into_deserializer(), &mut track);
        let app_config = AppConfig::deserialize(path_de).map_err(|e| {
            let path_str = track
                .path()
                .iter()
                .map(|seg| match seg {
                    Segment::Seq { index } => format!("[{}]", index),
                    Segment::Map { key } => format!(".{}", key),
                    Segment::Enum { variant } => format!("::{}", variant),
                    Segment::Unknown => String::from("<?>"),
                })
                .collect::<String>();
            Report::new(ConfigError::Invalid(
                path_str.trim_start_matches('.').to_string(),
            ))
            .attach_printable(e.to_string())
        })?;

        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> error_stack::Result<(), ConfigError> {
        if !self.dry_run && self.sheets.is_none() {
            return Err(report!(ConfigError::MissingSheets));
        }
        if let Some(form) = &self.form {
            form.validate().change_context(ConfigError::InvalidForm)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn from_toml(toml: &str) -> error_stack::Result<AppConfig, ConfigError> {
        AppConfig::from_builder(
            Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        )
    }

    #[test]
    fn test_full_config() {
        let config = from_toml(
            r#"
            [sheets]
            spreadsheet_id = "1AbC"
            priv_key = "key.json"
            form_range = "Contacts!A1"

            [server]
            port = 8080

            [form]
            title = "Contact"

            [[form.fields]]
            name = "name"
            label = "Name"
            kind = "text"
            required = true

            [[form.fields]]
            name = "email"
            label = "Email"
            kind = "email"
            required = true
            "#,
        )
        .unwrap();

        let sheets = config.sheets.unwrap();
        assert_eq!(&*sheets.spreadsheet_id, "1AbC");
        assert_eq!(sheets.priv_key.as_deref(), Some("key.json"));
        assert_eq!(&*sheets.form_range, "Contacts!A1");
        assert_eq!(&*sheets.check_in_range, "CheckIns");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.form.unwrap().columns(), ["name", "email"]);
        assert!(!config.dry_run);
    }

    #[test]
    fn test_dry_run_without_sheets() {
        let config = from_toml("dry_run = true").unwrap();
        assert!(config.sheets.is_none());
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_missing_sheets_is_an_error() {
        let report = from_toml("").unwrap_err();
        assert!(matches!(
            report.current_context(),
            ConfigError::MissingSheets
        ));
    }

    #[test]
    fn test_error_names_field_path() {
        let report = from_toml(
            r#"
            [sheets]
            spreadsheet_id = "1AbC"

            [server]
            port = "not a port"
            "#,
        )
        .unwrap_err();

        match report.current_context() {
            ConfigError::Invalid(path) => assert_eq!(path, "server.port"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    fn from_env(
        toml: &str,
        vars: &[(&str, &str)],
    ) -> error_stack::Result<AppConfig, ConfigError> {
        let vars = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_builder(
            Config::builder()
                .add_source(File::from_str(toml, FileFormat::Toml))
                .add_source(AppConfig::environment().source(Some(vars))),
        )
    }

    #[test]
    fn test_environment_overrides() {
        let config = from_env(
            "",
            &[
                ("CHATREPORT_SHEETS__SPREADSHEET_ID", "1AbC"),
                (
                    "CHATREPORT_SHEETS__SERVICE_ACCOUNT_JSON",
                    r#"{"type":"service_account"}"#,
                ),
                ("CHATREPORT_SHEETS__FORM_RANGE", "Contacts!A1"),
                ("CHATREPORT_SERVER__PORT", "9000"),
                ("CHATREPORT_DRY_RUN", "true"),
                ("OTHER_DRY_RUN", "false"),
            ],
        )
        .unwrap();

        let sheets = config.sheets.unwrap();
        assert_eq!(&*sheets.spreadsheet_id, "1AbC");
        assert_eq!(
            sheets.service_account_json.as_deref(),
            Some(r#"{"type":"service_account"}"#)
        );
        assert_eq!(&*sheets.form_range, "Contacts!A1");
        assert_eq!(sheets.priv_key, None);
        assert_eq!(config.server.port, 9000);
        assert!(config.dry_run);
    }

    #[test]
    fn test_environment_wins_over_file() {
        let config = from_env(
            r#"
            dry_run = true

            [sheets]
            spreadsheet_id = "from-file"
            priv_key = "key.json"
            "#,
            &[
                ("CHATREPORT_SHEETS__SPREADSHEET_ID", "from-env"),
                ("CHATREPORT_DRY_RUN", "false"),
            ],
        )
        .unwrap();

        let sheets = config.sheets.unwrap();
        assert_eq!(&*sheets.spreadsheet_id, "from-env");
        assert_eq!(sheets.priv_key.as_deref(), Some("key.json"));
        assert!(!config.dry_run);
    }

    #[test]
    fn test_all_digit_values_stay_strings() {
        let config = from_env(
            "",
            &[
                ("CHATREPORT_SHEETS__SPREADSHEET_ID", "0012345"),
                ("CHATREPORT_SHEETS__PRIV_KEY", "12345"),
            ],
        )
        .unwrap();

        let sheets = config.sheets.unwrap();
        assert_eq!(&*sheets.spreadsheet_id, "0012345");
        assert_eq!(sheets.priv_key.as_deref(), Some("12345"));
    }

    #[test]
    fn test_unparsable_env_port_names_field() {
        let report = from_env(
            "dry_run = true",
            &[("CHATREPORT_SERVER__PORT", "http")],
        )
        .unwrap_err();

        match report.current_context() {
            ConfigError::Invalid(path) => assert_eq!(path, "server.port"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_form_is_rejected() {
        let report = from_toml(
            r#"
            dry_run = true

            [form]
            fields = []
            "#,
        )
        .unwrap_err();
        assert!(matches!(report.current_context(), ConfigError::InvalidForm));
    }
}
