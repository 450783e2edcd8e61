//! App runners for the one-shot commands

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{DateTime, FixedOffset, Local, Utc};
use indicatif::ProgressBar;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::{error, info};

use crate::application::ports::{
    parse_model_output, ConfigStore, Notifier, ProcessedStore, Transcriber, UsageLog,
};
use crate::application::{FailureNotices, ProcessCallbacks, ProcessImageUseCase, ProcessOutcome};
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::notes::{build_blocks, AttachmentId};
use crate::domain::transcription::Provider;
use crate::domain::usage::UsageSummary;
use crate::infrastructure::notion::to_notion_array;
use crate::infrastructure::{
    create_notifier, create_transcriber, JpegImageSource, JsonStateStore, JsonUsageLog,
    NotionClient, XdgConfigStore,
};

use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable holding the Notion integration token
pub const NOTION_TOKEN_ENV: &str = "NOTION_TOKEN";

/// Source name used by `format` when reading stdin
const STDIN_FILENAME: &str = "stdin";

/// The use case wired with the production adapters
pub type AppUseCase = ProcessImageUseCase<
    JpegImageSource,
    Box<dyn Transcriber>,
    NotionClient,
    JsonStateStore,
    JsonUsageLog,
    Box<dyn Notifier>,
>;

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> Result<AppConfig, ConfigError> {
    let store = XdgConfigStore::new();
    let file_config = store.load().await?;

    // The provider decides which API key variable applies
    let provider = AppConfig::defaults()
        .merge(file_config.clone())
        .merge(cli_config.clone())
        .provider_or_default();

    // Merge: defaults < file < env < cli
    Ok(AppConfig::defaults()
        .merge(file_config)
        .merge(env_config(provider))
        .merge(cli_config))
}

fn env_config(provider: Provider) -> AppConfig {
    AppConfig {
        api_key: non_empty_env(provider.api_key_env()),
        notion_token: non_empty_env(NOTION_TOKEN_ENV),
        ..Default::default()
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

/// Build the process use case from a merged config.
///
/// Fails with a user-facing message when a required setting is missing.
pub fn build_use_case(config: &AppConfig, notify: bool) -> Result<AppUseCase, String> {
    let provider = match config.provider.as_deref() {
        Some(name) => name.parse::<Provider>().map_err(|e| e.to_string())?,
        None => Provider::default(),
    };

    let api_key = config
        .api_key
        .clone()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| {
            format!(
                "Missing API key. Set {} environment variable or run 'notes-to-notion config set api_key <key>'",
                provider.api_key_env()
            )
        })?;

    let notion_token = config
        .notion_token
        .clone()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| {
            format!(
                "Missing Notion token. Set {} environment variable or run 'notes-to-notion config set notion_token <token>'",
                NOTION_TOKEN_ENV
            )
        })?;

    let page = config.page_id().ok_or_else(|| {
        "Missing or invalid Notion page. Run 'notes-to-notion config set notion_page <url>'"
            .to_string()
    })?;

    let model = config.model_or_default();
    info!(provider = %provider, model = %model, page = %page, "configured");

    Ok(ProcessImageUseCase::new(
        JpegImageSource::new(),
        create_transcriber(provider, api_key, model.clone()),
        NotionClient::new(notion_token),
        JsonStateStore::new(),
        JsonUsageLog::new(),
        create_notifier(notify),
        page,
        model,
    ))
}

/// Stage callbacks that drive a running spinner
pub fn spinner_callbacks(spinner: Option<ProgressBar>) -> ProcessCallbacks {
    let Some(spinner) = spinner else {
        return ProcessCallbacks::default();
    };
    let transcribing = spinner.clone();
    let uploading = spinner.clone();

    ProcessCallbacks {
        on_transcribing_start: Some(Box::new(move |file: &str| {
            transcribing.set_message(format!("Transcribing {}...", file));
        })),
        on_uploading_start: Some(Box::new(move |file: &str| {
            uploading.set_message(format!("Uploading {}...", file));
        })),
        on_appending_start: Some(Box::new(move |file: &str, count: usize| {
            spinner.set_message(format!("Appending {} blocks from {}...", count, file));
        })),
    }
}

/// Display name of a path
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Process the given files once
pub async fn run_process(files: Vec<PathBuf>, config: AppConfig, notify: bool) -> ExitCode {
    let mut presenter = Presenter::new();

    let use_case = match build_use_case(&config, notify) {
        Ok(use_case) => use_case,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let notices = FailureNotices::new();
    let mut failed = 0usize;

    for path in &files {
        let name = display_name(path);
        presenter.start_spinner(&format!("Processing {}...", name));
        let callbacks = spinner_callbacks(presenter.spinner());

        match use_case.process(path, &callbacks).await {
            Ok(ProcessOutcome::Appended(output)) => {
                presenter.spinner_success(&format!(
                    "{} → {} ({} blocks)",
                    output.filename,
                    if output.title.is_empty() { "note" } else { output.title.as_str() },
                    output.block_count
                ));
                if !output.image_attached {
                    presenter.warn("Image upload failed; the entry names the file instead");
                }
                if let Some(url) = output.url {
                    presenter.output(&url);
                }
            }
            Ok(ProcessOutcome::AlreadyProcessed) => {
                presenter.stop_spinner();
                presenter.info(&format!("Already processed: {}", name));
            }
            Ok(ProcessOutcome::InFlight) => {
                presenter.stop_spinner();
                presenter.info(&format!("Already in progress: {}", name));
            }
            Err(e) => {
                error!(file = %name, error = %e, "processing failed");
                presenter.spinner_fail(&format!("{}: {}", name, e));
                notices.notify(use_case.notifier(), path, &e.to_string()).await;
                failed += 1;
            }
        }
    }

    if failed > 0 {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

/// Print the Notion blocks for a transcription without touching the network
pub async fn run_format(
    input: String,
    filename: Option<String>,
    attachment: Option<String>,
    now: Option<String>,
) -> ExitCode {
    let presenter = Presenter::new();

    let now = match parse_now(now.as_deref()) {
        Ok(now) => now,
        Err(e) => {
            presenter.error(&format!("Invalid --now value: {}", e));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let raw = match read_input(&input).await {
        Ok(raw) => raw,
        Err(e) => {
            presenter.error(&format!("Failed to read {}: {}", input, e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let notes = match parse_model_output(&raw) {
        Ok(notes) => notes,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let filename = filename.unwrap_or_else(|| default_filename(&input));
    let attachment = attachment.map(AttachmentId::new);
    let blocks = build_blocks(&notes, &filename, attachment.as_ref(), now);

    match serde_json::to_string_pretty(&to_notion_array(&blocks)) {
        Ok(json) => {
            presenter.output(&json);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn parse_now(value: Option<&str>) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    match value {
        Some(s) => DateTime::parse_from_rfc3339(s),
        None => Ok(Local::now().fixed_offset()),
    }
}

async fn read_input(input: &str) -> io::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        Ok(buf)
    } else {
        tokio::fs::read_to_string(input).await
    }
}

fn default_filename(input: &str) -> String {
    if input == "-" {
        STDIN_FILENAME.to_string()
    } else {
        display_name(Path::new(input))
    }
}

/// Print the usage summary
pub async fn run_usage() -> ExitCode {
    let presenter = Presenter::new();

    match JsonUsageLog::new().load().await {
        Ok(events) => {
            let summary = UsageSummary::aggregate(&events, unix_now());
            presenter.usage_summary(&summary);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Open the most recently added note
pub async fn run_open_last() -> ExitCode {
    let presenter = Presenter::new();

    let note = match JsonStateStore::new().last_note().await {
        Ok(Some(note)) => note,
        Ok(None) => {
            presenter.info("No note yet");
            return ExitCode::from(EXIT_SUCCESS);
        }
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if !note.title.is_empty() {
        presenter.info(&format!("Opening {}", note.title));
    }
    presenter.output(&note.url);

    match open_url(&note.url).await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&format!("Failed to open {}: {}", note.url, e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn open_url(url: &str) -> io::Result<()> {
    let status = opener_command(url).status().await?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("opener exited with {}", status)))
    }
}

/// Platform URL opener
fn opener_command(url: &str) -> Command {
    #[cfg(target_os = "macos")]
    let command = {
        let mut command = Command::new("open");
        command.arg(url);
        command
    };

    #[cfg(target_os = "windows")]
    let command = {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "", url]);
        command
    };

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let command = {
        let mut command = Command::new("xdg-open");
        command.arg(url);
        command
    };

    command
}

fn unix_now() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}
