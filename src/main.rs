use silene::config::Config;
use silene::control::ControlService;
use silene::handoff::ProcessConsumer;
use silene::import::{Importer, RfdPicker};
use silene::ui;
use std::sync::Arc;
use tracing::{error, info};

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    // Default to info level if RUST_LOG not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn main() {
    configure_logging();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };
    let runtime_handle = runtime.handle().clone();

    info!("Building dependencies...");
    let importer = Importer::new(config.artifact_path());
    let picker = Arc::new(RfdPicker::new("Select application package"));
    let consumer = Arc::new(ProcessConsumer::new(&config.runtime_program));

    let control = ControlService::start(
        runtime_handle,
        importer,
        picker,
        consumer,
        config.mime_filter.clone(),
    );

    info!("Starting UI");
    ui::launch_app(control);
    info!("UI quit");
}
