//! Command dispatch logic for dashgen

use super::{CheckArgs, GenerateArgs, InitArgs, ValidateArgs, check_sources, generate_artifacts, init_config, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "dashgen", author, version, long_about = None)]
#[command(about = "Generate Grafana dashboards and Prometheus alert rules from instrumented source code")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: DashgenSubcommand,
}

#[derive(Subcommand, Debug)]
enum DashgenSubcommand {
    /// Scan sources and write the dashboard, alert rules and run summary
    Generate(Box<GenerateArgs>),
    /// Scan sources and validate alert rules without writing anything
    Check(Box<CheckArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        DashgenSubcommand::Generate(generate_args) => generate_artifacts(host, generate_args),
        DashgenSubcommand::Check(check_args) => check_sources(host, check_args),
        DashgenSubcommand::Init(init_args) => init_config(host, init_args),
        DashgenSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}
