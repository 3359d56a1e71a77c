//! Command-line interface and orchestration for dashgen
//!
//! This module implements the CLI commands and drives the rest of the library
//! end to end: it loads configuration, feeds the source tree to the generation
//! pipeline and writes the rendered artifacts.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **generate**: Scan the configured sources, discover metrics and alert directives,
//!   validate the rules and write `alert_rules.yaml`, `grafana_dashboard.json` and
//!   `run_summary.yaml` into the output directory
//! - **check**: Run the same discovery and validation, print the summary, write nothing
//! - **init**: Generate a default configuration file
//! - **validate**: Check configuration file syntax and that the configured sources exist
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes
//! to the appropriate command handler. Generation follows these steps:
//!
//! 1. Load `dashgen.toml` (or defaults) and apply command-line overrides
//! 2. Parse every source file into a compilation unit
//! 3. Run discovery, finalization and rule validation
//! 4. Render and write the artifacts, then print the console summary
//!
//! Every command reports failures on the host's error stream and exits with status 1.
//! All output goes through the [`Host`] trait so commands can be tested in memory.

mod check;
mod common;
mod config;
mod generate;
mod host;
mod init;
mod run;
mod validate;

#[cfg(debug_assertions)]
pub use config::Config;

pub use check::{CheckArgs, check_sources};
pub use generate::{GenerateArgs, generate_artifacts};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
