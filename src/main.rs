//! NotesToNotion CLI entry point

use std::process::ExitCode;

use clap::Parser;

use notes_to_notion::cli::{
    app::{
        load_merged_config, run_format, run_open_last, run_process, run_usage, EXIT_ERROR,
        EXIT_USAGE_ERROR,
    },
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    watch_app::run_watch,
    WatchOptions,
};
use notes_to_notion::domain::config::AppConfig;
use notes_to_notion::domain::transcription::Provider;
use notes_to_notion::infrastructure::{init_logging, paths, XdgConfigStore};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Commands that need no merged config
    let command = match cli.command {
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Commands::Format {
            input,
            filename,
            attachment,
            now,
        } => return run_format(input, filename, attachment, now).await,
        other => other,
    };

    // Build CLI config from args
    let cli_config = AppConfig {
        provider: cli
            .provider
            .map(|p| Provider::from(p).as_str().to_string()),
        model: cli.model.clone(),
        ..Default::default()
    };

    // Merge config
    let config = match load_merged_config(cli_config).await {
        Ok(config) => config,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    init_logging(&paths::log_dir(), config.log_level_or_default(), cli.verbose);

    // Route to appropriate handler
    match command {
        Commands::Watch { folder, no_notify } => {
            let Some(folder) = folder.or_else(|| config.watch_folder_path()) else {
                presenter.error(
                    "No watch folder. Pass --folder or run 'notes-to-notion config set watch_folder <dir>'",
                );
                return ExitCode::from(EXIT_USAGE_ERROR);
            };

            let options = WatchOptions {
                folder,
                notify: config.notify_or_default() && !no_notify,
            };

            run_watch(options, config).await
        }
        Commands::Process { files, no_notify } => {
            let notify = config.notify_or_default() && !no_notify;
            run_process(files, config, notify).await
        }
        Commands::Usage => run_usage().await,
        Commands::OpenLast => run_open_last().await,
        Commands::Config { .. } | Commands::Format { .. } => ExitCode::SUCCESS,
    }
}
