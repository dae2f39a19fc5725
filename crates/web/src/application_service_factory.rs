use chatreport_core::{
    adapters::{config::app_config::AppConfig, repository_factory::submission_repository},
    application::service::ChatReportApplicationService,
    ports::submission_service::SubmissionService,
};

use std::sync::Arc;

pub struct ApplicationServiceFactory;

impl ApplicationServiceFactory {
    pub fn create(config: &AppConfig) -> Arc<dyn SubmissionService> {
        let repository = submission_repository(config);
        Arc::new(ChatReportApplicationService::new(repository))
    }
}
