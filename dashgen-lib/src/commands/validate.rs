use super::Host;
use super::config::{CONFIG_FILE_NAME, Config};
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug, Default)]
pub struct ValidateArgs {
    /// Path to configuration file (default is `dashgen.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

/// Loads a configuration file and checks that the configured source roots exist
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded or parsed, or names a missing source
fn validate_config_inner(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Config> {
    let config = Config::load(base_dir, config_path)?;

    if let Some(missing) = config.sources.iter().find(|source| !source.exists()) {
        return Err(ohno::app_err!("source '{missing}' does not exist"));
    }

    Ok(config)
}

pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    let base_dir = Utf8PathBuf::from(".");
    let config_path = args.config.as_ref();

    match validate_config_inner(&base_dir, config_path) {
        Ok(config) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            if let Some(path) = config_path {
                let _ = writeln!(host.output(), "Config file: {path}");
            } else if base_dir.join(CONFIG_FILE_NAME).exists() {
                let _ = writeln!(host.output(), "Config file: {CONFIG_FILE_NAME}");
            } else {
                let _ = writeln!(host.output(), "Using default configuration (no config file found)");
            }

            let sources: Vec<_> = config.sources.iter().map(|p| p.as_str()).collect();
            let _ = writeln!(host.output(), "Sources: {}", sources.join(", "));
            let _ = writeln!(host.output(), "Output directory: {}", config.output_dir);
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
