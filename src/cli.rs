use crate::config::{Config, DEFAULT_CONFIG_PATH};
use crate::error::ConfigError;
use crate::theme::Theme;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;

// Display order for endpoint option (placed at top of help text)
const ENDPOINT_DISPLAY_ORDER: usize = 0;
// Display order for log level option (placed at end of help text)
const LOG_LEVEL_DISPLAY_ORDER: usize = 100;

/// CLI arguments
#[derive(Parser)]
#[command(name = "stylecheck", version, about = "Check Java source against a style-checking service", long_about = None)]
pub struct Cli {
    /// Log level (see https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
    /// [env: STYLECHECK_LOG=] [default: info]
    #[arg(
        long,
        env = "STYLECHECK_LOG",
        default_value = "info",
        global = true,
        hide_default_value = true,
        hide_env = true,
        display_order = LOG_LEVEL_DISPLAY_ORDER,
        verbatim_doc_comment
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a default stylecheck.toml config file
    Init(InitArgs),
    /// Submit a source file once and print the violations
    Check(CheckArgs),
    /// Start an interactive editing session
    Edit(EditArgs),
    /// Print the instructions and disclaimer
    Guide,
}

/// Arguments for the init command
#[derive(Parser)]
pub struct InitArgs {
    /// Path to config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Override existing config file
    #[arg(long)]
    pub r#override: bool,
}

/// Options shared by every command that talks to the checking service
#[derive(Args, Debug, Clone)]
pub struct ServiceArgs {
    /// Path to config file (initialize with `stylecheck init`)
    /// [default: stylecheck.toml if it exists]
    #[arg(long, verbatim_doc_comment)]
    pub config: Option<String>,

    /// Override config values using dot notation (e.g. endpoint.timeout_secs=5)
    #[arg(long = "config-override")]
    pub config_overrides: Vec<String>,

    /// Checking service URL
    #[arg(long, env = "STYLECHECK_ENDPOINT", display_order = ENDPOINT_DISPLAY_ORDER)]
    pub endpoint: Option<String>,

    /// Highlight theme
    #[arg(long)]
    pub theme: Option<Theme>,

    /// Tab size sent with wrapped requests
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=16))]
    pub tab_size: Option<u8>,

    /// When to colour output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

impl ServiceArgs {
    /// Load the config file and apply command line options on top of it
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = Config::load(self.config.as_deref(), &self.config_overrides)?;
        if let Some(url) = &self.endpoint {
            config.endpoint.url = url.clone();
        }
        if let Some(theme) = self.theme {
            config.editor.theme = theme;
        }
        if let Some(tab_size) = self.tab_size {
            config.editor.tab_size = tab_size;
        }
        Ok(config)
    }
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Java source file, `-` or omitted for stdin
    pub file: Option<String>,

    #[command(flatten)]
    pub service: ServiceArgs,

    /// Output file path (.md or .json)
    #[arg(long)]
    pub output: Option<String>,

    /// Exit with status 2 when any violation is reported
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the edit command
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Java source file to start from
    pub file: Option<String>,

    #[command(flatten)]
    pub service: ServiceArgs,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => std::io::stdout().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}
