use chatreport_core::domain::form::FormDefinition;
use chatreport_core::domain::questionnaire::CHATREPORT;
use chatreport_core::domain::submission::Submission;
use chatreport_core::ports::command_handler::{Command, CommandError, CommandHandler};
use chatreport_core::ports::submission_service::SubmissionService;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{error, info, instrument};

use crate::terminal_chat::TerminalChat;

const USAGE: &str = "usage: chatreport-cli [chat | submit name=value... | columns | health]";

pub struct CliAdapter {
    application_service: Arc<dyn SubmissionService>,
    form: Option<FormDefinition>,
}

impl std::fmt::Debug for CliAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliAdapter")
            .field("application_service", &"<SubmissionService>")
            .field("form", &self.form.as_ref().map(|form| &form.title))
            .finish()
    }
}

impl CliAdapter {
    pub fn new(
        application_service: Arc<dyn SubmissionService>,
        form: Option<FormDefinition>,
    ) -> Self {
        Self {
            application_service,
            form,
        }
    }

    #[instrument]
    pub async fn run(&self, args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
        let command = parse_args(&args)?;

        match self.handle(command).await {
            Ok(result) => {
                println!("{}", result);
                Ok(())
            }
            Err(report) => {
                error!("Command failed: {:?}", report);
                Err(report.current_context().to_string().into())
            }
        }
    }

    async fn chat(&self) -> error_stack::Result<String, CommandError> {
        let stdin = BufReader::new(tokio::io::stdin());
        let answers = TerminalChat::new(&CHATREPORT, stdin, std::io::stdout())
            .run()
            .await
            .map_err(|e| CommandError::ExecutionFailed {
                details: format!("Terminal unavailable: {e}"),
            })?;

        let Some(answers) = answers else {
            return Ok("Check-in not submitted".to_string());
        };

        self.application_service
            .submit_check_in(&answers)
            .await
            .map_err(|e| CommandError::ExecutionFailed {
                details: e.current_context().to_string(),
            })?;

        Ok("✅ Your check-in was sent to your care team".to_string())
    }

    fn form(&self) -> Result<&FormDefinition, CommandError> {
        self.form.as_ref().ok_or_else(|| CommandError::InvalidCommand {
            details: "No [form] section configured".to_string(),
        })
    }
}

fn parse_args(args: &[String]) -> Result<Command, CommandError> {
    match args.get(1).map(|s| s.as_str()) {
        None | Some("chat") => Ok(Command::Chat),
        Some("submit") => {
            let fields = args[2..]
                .iter()
                .map(|pair| {
                    pair.split_once('=')
                        .map(|(name, value)| (name.to_string(), value.to_string()))
                        .ok_or_else(|| CommandError::InvalidCommand {
                            details: format!("Expected name=value, got '{}'", pair),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Command::Submit { fields })
        }
        Some("columns") => Ok(Command::Columns),
        Some("health") => Ok(Command::HealthCheck),
        Some(other) => Err(CommandError::InvalidCommand {
            details: format!("Unknown command '{}'\n{}", other, USAGE),
        }),
    }
}

#[async_trait::async_trait]
impl CommandHandler for CliAdapter {
    #[instrument]
    async fn handle(&self, command: Command) -> error_stack::Result<String, CommandError> {
        match command {
            Command::Chat => self.chat().await,
            Command::Submit { fields } => {
                let submission = self.form()?.collect(&fields).map_err(|e| {
                    CommandError::InvalidCommand {
                        details: e.to_string(),
                    }
                })?;

                let receipt = self
                    .application_service
                    .submit(submission)
                    .await
                    .map_err(|e| CommandError::ExecutionFailed {
                        details: e.current_context().to_string(),
                    })?;

                info!("Submitted to {:?}", receipt.updated_range);
                Ok("✅ Submitted".to_string())
            }
            Command::Columns => {
                let mut output = format!(
                    "Check-in columns:\n{}",
                    Submission::check_in_columns().join("\t")
                );
                if let Some(form) = &self.form {
                    output.push_str(&format!(
                        "\n\n{} columns:\n{}",
                        form.title,
                        form.columns().join("\t")
                    ));
                }
                Ok(output)
            }
            Command::HealthCheck => Ok(self.application_service.health_check().await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatreport_core::adapters::recording::RecordingSubmissionRepository;
    use chatreport_core::application::service::ChatReportApplicationService;
    use chatreport_core::domain::form::{FieldKind, FormField};
    use chatreport_core::ports::submission_repository::{
        AppendReceipt, SubmissionRepository, SubmissionRepositoryError,
    };

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
            Err(error_stack::report!(
                SubmissionRepositoryError::CredentialUnavailable
            ))
        }
    }

    fn contact_form() -> FormDefinition {
        FormDefinition {
            title: "Contact".into(),
            fields: vec![
                FormField {
                    name: "name".into(),
                    label: "Name".into(),
                    kind: FieldKind::Text,
                    required: true,
                },
                FormField {
                    name: "email".into(),
                    label: "Email".into(),
                    kind: FieldKind::Email,
                    required: true,
                },
            ],
        }
    }

    fn args(items: &[&str]) -> Vec<String> {
        std::iter::once("chatreport-cli")
            .chain(items.iter().copied())
            .map(String::from)
            .collect()
    }

    fn adapter(repository: Arc<dyn SubmissionRepository>) -> CliAdapter {
        CliAdapter::new(
            Arc::new(ChatReportApplicationService::new(repository)),
            Some(contact_form()),
        )
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(&args(&[])).unwrap(), Command::Chat);
        assert_eq!(parse_args(&args(&["columns"])).unwrap(), Command::Columns);
        assert_eq!(
            parse_args(&args(&["submit", "name=Alice", "note=a=b"])).unwrap(),
            Command::Submit {
                fields: vec![
                    ("name".to_string(), "Alice".to_string()),
                    ("note".to_string(), "a=b".to_string()),
                ]
            }
        );
        assert!(parse_args(&args(&["submit", "Alice"])).is_err());
        assert!(parse_args(&args(&["run"])).is_err());
    }

    #[tokio::test]
    async fn test_submit_appends_row_in_field_order() {
        let repository = Arc::new(RecordingSubmissionRepository::default());
        let adapter = adapter(repository.clone());

        let command = parse_args(&args(&["submit", "email=a@x.com", "name=Alice"])).unwrap();
        let output = adapter.handle(command).await.unwrap();

        assert!(output.starts_with("✅"));
        let rows = repository.rows().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].values(), ["Alice", "a@x.com"]);
    }

    #[tokio::test]
    async fn test_invalid_input_is_not_submitted() {
        let repository = Arc::new(RecordingSubmissionRepository::default());
        let adapter = adapter(repository.clone());

        let command = parse_args(&args(&["submit", "name=Alice", "email=nope"])).unwrap();
        let report = adapter.handle(command).await.unwrap_err();

        assert!(matches!(
            report.current_context(),
            CommandError::InvalidCommand { .. }
        ));
        assert!(repository.rows().await.is_empty());
    }

    #[tokio::test]
    async fn test_submit_without_form_is_rejected() {
        let service = Arc::new(ChatReportApplicationService::new(Arc::new(
            RecordingSubmissionRepository::default(),
        )));
        let adapter = CliAdapter::new(service, None);

        let report = adapter
            .handle(Command::Submit { fields: vec![] })
            .await
            .unwrap_err();
        assert!(report.to_string().contains("No [form] section configured"));
    }

    #[tokio::test]
    async fn test_revoked_key_reports_generic_failure() {
        let adapter = adapter(Arc::new(RevokedKeyRepository));

        let command = parse_args(&args(&["submit", "name=Alice", "email=a@x.com"])).unwrap();
        let report = adapter.handle(command).await.unwrap_err();

        match report.current_context() {
            CommandError::ExecutionFailed { details } => assert_eq!(details, "Submission failed"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_columns_lists_both_layouts() {
        let adapter = adapter(Arc::new(RecordingSubmissionRepository::default()));
        let output = adapter.handle(Command::Columns).await.unwrap();

        assert!(output.contains("submitted_at\tpatient_name"));
        assert!(output.contains("Contact columns:\nname\temail"));
    }

    #[tokio::test]
    async fn test_health() {
        let adapter = adapter(Arc::new(RecordingSubmissionRepository::default()));
        let output = adapter.handle(Command::HealthCheck).await.unwrap();
        assert!(output.contains("Healthy"));
    }
}
