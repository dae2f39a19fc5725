use chatreport_core::{adapters::config::app_config::AppConfig, prettyprint::PrettyFormatter};
use tokio::{net::TcpListener, signal};
use tracing::{error, info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

mod application_service_factory;
mod render;
mod web_adapter;

use application_service_factory::ApplicationServiceFactory;
use web_adapter::{create_router, WebState};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing()?;
    setup_panic_hook();

    info!("Starting ChatReport web server");

    let config = AppConfig::load().map_err(|report| {
        error!("Invalid configuration: {:?}", report);
        format!("{report}")
    })?;

    let app_service = ApplicationServiceFactory::create(&config);
    let router = create_router(WebState::new(app_service, config.form.clone()));

    let addr = config.server.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Graceful shutdown completed");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal, stopping web server..."),
        Err(e) => error!("Failed to listen for ctrl-c: {}", e),
    }
}

fn setup_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(std::io::stderr);

    let log_file_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(false))
        .with_writer(std::fs::File::create("chatreport_web.log")?)
        .with_ansi(false);

    Registry::default()
        .with(
            tracing_subscriber::filter::Targets::new()
                .with_target("chatreport_web", tracing::Level::INFO)
                .with_target("chatreport_core", tracing::Level::DEBUG),
        )
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
