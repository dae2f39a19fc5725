use chatreport_core::{adapters::config::app_config::AppConfig, prettyprint::PrettyFormatter};
use std::env;
use std::sync::Arc;
use tracing::{error, info, instrument};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

mod application_service_factory;
mod cli_adapter;
mod terminal_chat;

use application_service_factory::ApplicationServiceFactory;
use cli_adapter::CliAdapter;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing()?;
    setup_panic_hook();

    let args: Vec<String> = env::args().collect();

    info!("Starting ChatReport CLI");

    let config = AppConfig::load().map_err(|report| {
        error!("Invalid configuration: {:?}", report);
        format!("{report}")
    })?;

    let app_service = ApplicationServiceFactory::create(&config);
    let cli_adapter = Arc::new(CliAdapter::new(app_service, config.form.clone()));

    match cli_adapter.run(args).await {
        Ok(_) => {
            info!("CLI execution completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("CLI execution failed: {:?}", e);
            Err(e)
        }
    }
}

fn setup_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let indicatif_layer = IndicatifLayer::new();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(indicatif_layer.get_stderr_writer());

    let log_file_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(false))
        .with_writer(std::fs::File::create("chatreport.log")?)
        .with_ansi(false);

    Registry::default()
        .with(
            tracing_subscriber::filter::Targets::new()
                .with_target("chatreport_cli", tracing::Level::INFO)
                .with_target("chatreport_core", tracing::Level::DEBUG),
        )
        .with(indicatif_layer)
        .with(log_file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}
