//! Radio Recorder CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use radio_recorder::cli::{
    app::{load_merged_config, run_record, run_scheduler, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    RecordOptions, SchedulerOptions,
};
use radio_recorder::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let presenter = Presenter::new();
    let store = XdgConfigStore::new();
    let cli_config = cli.to_config();

    // Config subcommands never touch the merged config
    let record_duration = match cli.command {
        Some(Commands::Config { action }) => {
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Record { duration }) => Some(duration),
        None => None,
    };

    let config = load_merged_config(&store, cli_config).await;

    match record_duration {
        Some(duration) => match RecordOptions::from_config(&config, duration.as_deref()) {
            Ok(options) => run_record(options).await,
            Err(e) => {
                presenter.error(&e.to_string());
                ExitCode::from(EXIT_USAGE_ERROR)
            }
        },
        None => match SchedulerOptions::from_config(&config) {
            Ok(options) => run_scheduler(options).await,
            Err(e) => {
                presenter.error(&e.to_string());
                ExitCode::from(EXIT_USAGE_ERROR)
            }
        },
    }
}
