//! Arguments and setup shared between the generate and check commands.

use super::config::Config;
use crate::Result;
use crate::generation::{OutputModel, generate};
use crate::syntax::load_units;
use camino::Utf8PathBuf;
use clap::{Args, ValueEnum};

const LOG_TARGET: &str = "  commands";

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    #[default]
    Auto,
}

impl ColorMode {
    /// Whether console output should carry ANSI colors.
    pub fn use_colors(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => {
                use std::io::{IsTerminal, stdout};
                stdout().is_terminal()
            }
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    #[default]
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Common arguments shared between the generate and check commands
#[derive(Args, Debug, Default)]
pub struct CommonArgs {
    /// Path to configuration file (default is `dashgen.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Source file or directory to scan; repeat to scan several (overrides `sources`)
    #[arg(long = "source", short = 's', value_name = "PATH")]
    pub sources: Vec<Utf8PathBuf>,

    /// Metric prefix used when the code never sets one (overrides `default_prefix`)
    #[arg(long, value_name = "PREFIX")]
    pub default_prefix: Option<String>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

impl CommonArgs {
    /// Load the configuration file and apply command-line overrides on top of it.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read, parsed, or is invalid
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(&Utf8PathBuf::from("."), self.config.as_ref())?;

        if !self.sources.is_empty() {
            config.sources.clone_from(&self.sources);
        }

        if let Some(prefix) = &self.default_prefix {
            config.default_prefix = Some(prefix.clone());
        }

        Ok(config)
    }
}

/// Scan the configured sources and run discovery and rule validation over them.
///
/// # Errors
///
/// Returns an error if a source cannot be read or if generation fails
pub fn build_model(config: &Config) -> Result<OutputModel> {
    let units = load_units(&config.sources)?;
    log::info!(target: LOG_TARGET, "Loaded {} compilation unit(s)", units.len());

    let model = generate(&units, &config.generation_options())?;
    Ok(model)
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // try_init: tests may run several commands in one process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}
