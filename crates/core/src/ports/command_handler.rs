use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid command: {details}")]
    InvalidCommand { details: String },
    #[error("Command execution failed: {details}")]
    ExecutionFailed { details: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the check-in in the terminal.
    Chat,
    /// Submit the configured form from `name=value` pairs.
    Submit { fields: Vec<(String, String)> },
    /// Print the header rows the operator should create in the sheet.
    Columns,
    HealthCheck,
}

#[async_trait::async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, command: Command) -> error_stack::Result<String, CommandError>;
}
