use super::Host;
use super::common::{CommonArgs, build_model, init_logging};
use super::config::Config;
use crate::Result;
use crate::generation::OutputModel;
use crate::reports::{RuleFormat, generate_alert_rules, generate_console, generate_dashboard, generate_run_summary};
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

pub const ALERT_RULES_FILE: &str = "alert_rules.yaml";
pub const DASHBOARD_FILE: &str = "grafana_dashboard.json";
pub const RUN_SUMMARY_FILE: &str = "run_summary.yaml";

const LOG_TARGET: &str = "  generate";

const STAGING_SUFFIX: &str = ".partial";

#[derive(Parser, Debug, Default)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Directory receiving the generated files (overrides `output_dir`)
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output_dir: Option<Utf8PathBuf>,

    /// Layout of the alert rules file (overrides `rule_format`)
    #[arg(long, value_name = "FORMAT")]
    pub rule_format: Option<RuleFormat>,
}

/// Scan the sources and write the dashboard, alert rules and run summary.
///
/// # Errors
///
/// Returns an error if configuration, discovery, validation or writing fails
pub fn generate_artifacts<H: Host>(host: &mut H, args: &GenerateArgs) -> Result<()> {
    init_logging(args.common.log_level);

    match generate_artifacts_inner(host, args) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Generation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}

fn generate_artifacts_inner<H: Host>(host: &mut H, args: &GenerateArgs) -> Result<()> {
    let mut config = args.common.load_config()?;

    if let Some(dir) = &args.output_dir {
        config.output_dir.clone_from(dir);
    }

    if let Some(format) = args.rule_format {
        config.rule_format = format;
    }

    let model = build_model(&config)?;
    write_artifacts(host, &model, &config)?;

    let mut console_output = String::new();
    generate_console(&model, args.common.color.use_colors(), &mut console_output)?;
    let _ = write!(host.output(), "\n{console_output}");

    Ok(())
}

fn write_artifacts<H: Host>(host: &mut H, model: &OutputModel, config: &Config) -> Result<()> {
    let dir = &config.output_dir;
    fs::create_dir_all(dir).into_app_err_with(|| format!("creating output directory '{dir}'"))?;

    let mut alert_rules = String::new();
    generate_alert_rules(&model.rules, config.rule_format, &mut alert_rules)?;

    let mut dashboard = String::new();
    generate_dashboard(model, &config.dashboard_settings(), &mut dashboard)?;

    let mut run_summary = String::new();
    generate_run_summary(&model.summary, &mut run_summary)?;

    // Artifacts are staged next to their targets and only moved into place once all of them
    // have been written, so a failed write leaves the previous outputs untouched.
    let mut staged: Vec<(&str, Utf8PathBuf, Utf8PathBuf)> = Vec::with_capacity(3);
    for (what, file, content) in [
        ("alert rules", ALERT_RULES_FILE, alert_rules),
        ("dashboard", DASHBOARD_FILE, dashboard),
        ("run summary", RUN_SUMMARY_FILE, run_summary),
    ] {
        let staging = dir.join(format!("{file}{STAGING_SUFFIX}"));
        if let Err(e) = fs::write(&staging, content).into_app_err_with(|| format!("writing {what} to '{staging}'")) {
            discard_staged(staged.iter().map(|(_, staging, _)| staging).chain([&staging]));
            return Err(e);
        }

        staged.push((what, staging, dir.join(file)));
    }

    for (what, staging, path) in &staged {
        let _ = writeln!(host.output(), "Writing {what} to {path}");
        fs::rename(staging, path).into_app_err_with(|| format!("moving {what} into '{path}'"))?;
    }

    Ok(())
}

fn discard_staged<'a>(paths: impl IntoIterator<Item = &'a Utf8PathBuf>) {
    for path in paths {
        if path.is_file()
            && let Err(e) = fs::remove_file(path)
        {
            log::debug!(target: LOG_TARGET, "Could not remove staged file '{path}': {e}");
        }
    }
}
