use silene::config::Config;
use silene::control::{AttemptReport, ControlService};
use silene::handoff::ProcessConsumer;
use silene::import::{Importer, PathPicker};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

enum Mode {
    Import(PathBuf),
    Reuse,
}

fn main() {
    // Use RUST_LOG env var if set, otherwise default to info level
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt().with_env_filter(log_filter).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("silene-import");

    let mode = match parse_args(args.get(1..).unwrap_or_default()) {
        Some(mode) => mode,
        None => {
            print_usage(program);
            std::process::exit(2);
        }
    };

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

    let code = runtime.block_on(run(mode, config));
    std::process::exit(code);
}

fn parse_args(args: &[String]) -> Option<Mode> {
    match args {
        [flag] if flag == "--reuse" => Some(Mode::Reuse),
        [flag] if flag.starts_with("--") => None,
        [path] => Some(Mode::Import(PathBuf::from(path))),
        _ => None,
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage:");
    eprintln!("  {} <package-file>   Import the file and launch the runtime", program);
    eprintln!("  {} --reuse          Launch the runtime with the last imported file", program);
}

async fn run(mode: Mode, config: Config) -> i32 {
    let picker = match &mode {
        Mode::Import(path) => PathPicker::new(path),
        Mode::Reuse => PathPicker::cancelled(),
    };

    let control = ControlService::start(
        tokio::runtime::Handle::current(),
        Importer::new(config.artifact_path()),
        Arc::new(picker),
        Arc::new(ProcessConsumer::new(&config.runtime_program)),
        config.mime_filter.clone(),
    );
    let mut reports = control.subscribe();

    match mode {
        Mode::Import(_) => control.select_new(),
        Mode::Reuse => {
            if !control.view().reuse_available {
                error!(
                    "No previously imported artifact at {}",
                    config.artifact_path().display()
                );
                return 1;
            }
            control.use_last();
        }
    }

    match reports.recv().await {
        Some(AttemptReport::HandedOff { artifact }) => {
            info!("Runtime started with {}", artifact.display());
            0
        }
        Some(AttemptReport::Cancelled) => {
            error!("Nothing was selected");
            1
        }
        Some(AttemptReport::Failed { reason }) => {
            error!("Import failed: {}", reason);
            1
        }
        Some(AttemptReport::MissingArtifact { artifact }) => {
            error!("Imported artifact is missing: {}", artifact.display());
            1
        }
        Some(AttemptReport::LaunchFailed { reason }) => {
            error!("{}", reason);
            1
        }
        None => {
            error!("Control task stopped unexpectedly");
            1
        }
    }
}
