//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::transcription::Provider;

/// NotesToNotion - handwritten notes to Notion
#[derive(Parser, Debug)]
#[command(name = "notes-to-notion")]
#[command(version)]
#[command(about = "Transcribe photos of handwritten notes and append them to a Notion page")]
#[command(long_about = None)]
pub struct Cli {
    /// Vision model provider
    #[arg(short = 'p', long, value_name = "PROVIDER", global = true)]
    pub provider: Option<ProviderArg>,

    /// Model name (defaults per provider)
    #[arg(short = 'm', long, value_name = "MODEL", global = true)]
    pub model: Option<String>,

    /// Mirror log events to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process photos already in the folder, then watch it for new ones
    Watch {
        /// Folder to watch (overrides watch_folder from config)
        #[arg(short = 'f', long, value_name = "DIR")]
        folder: Option<PathBuf>,

        /// Do not show desktop notifications
        #[arg(long)]
        no_notify: bool,
    },
    /// Process the given photos once
    Process {
        /// Photos to transcribe and append
        #[arg(required = true, value_name = "FILES")]
        files: Vec<PathBuf>,

        /// Do not show desktop notifications
        #[arg(long)]
        no_notify: bool,
    },
    /// Print the Notion blocks for a transcription JSON file, without any network call
    Format {
        /// Transcription JSON file, or '-' for stdin
        #[arg(value_name = "JSON")]
        input: String,

        /// Source filename shown in the entry
        #[arg(long, value_name = "NAME")]
        filename: Option<String>,

        /// Uploaded image id to reference instead of a source line
        #[arg(long, value_name = "ID")]
        attachment: Option<String>,

        /// Entry timestamp (RFC 3339), defaults to now
        #[arg(long, value_name = "RFC3339")]
        now: Option<String>,
    },
    /// Show token usage and estimated cost
    Usage,
    /// Open the most recently added note
    OpenLast,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Provider argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    Openai,
    Gemini,
}

impl From<ProviderArg> for Provider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Openai => Provider::OpenAi,
            ProviderArg::Gemini => Provider::Gemini,
        }
    }
}

/// Parsed watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub folder: PathBuf,
    pub notify: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "provider",
    "model",
    "api_key",
    "notion_token",
    "notion_page",
    "watch_folder",
    "notify",
    "log_level",
];

/// Keys whose values are masked on display
pub const SECRET_CONFIG_KEYS: &[&str] = &["api_key", "notion_token"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
