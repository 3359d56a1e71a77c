use crate::Result;
use crate::discovery::DiscoveryOptions;
use crate::generation::{ExtraSeriesOptions, GenerationOptions};
use crate::reports::{DashboardSettings, RuleFormat};
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

const LOG_TARGET: &str = "    config";

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up when none is given.
pub const CONFIG_FILE_NAME: &str = "dashgen.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Source roots scanned in order
    #[serde(default = "default_sources")]
    pub sources: Vec<Utf8PathBuf>,

    /// Directory for generated artifacts
    #[serde(default = "default_output_dir")]
    pub output_dir: Utf8PathBuf,

    /// Prefix used when the code never sets one
    #[serde(default)]
    pub default_prefix: Option<String>,

    /// Layout of the alert rules file
    #[serde(default)]
    pub rule_format: RuleFormat,

    #[serde(default)]
    pub dashboard_title: Option<String>,

    #[serde(default)]
    pub dashboard_uid: Option<String>,

    #[serde(default)]
    pub dashboard_tags: Vec<String>,

    /// Type of the object whose methods create metrics
    #[serde(default = "default_metrics_type")]
    pub metrics_type: String,

    /// Type of the struct literal that configures a metrics namespace
    #[serde(default = "default_options_type")]
    pub options_type: String,

    /// Use an alert's description when its summary is missing
    #[serde(default = "default_true")]
    pub summary_falls_back_to_description: bool,

    /// Values of the externally recorded timer series
    #[serde(default)]
    pub external_timers: Vec<String>,

    #[serde(default = "default_external_timer_metric")]
    pub external_timer_metric: String,

    #[serde(default = "default_external_timer_label")]
    pub external_timer_label: String,

    #[serde(default = "default_external_timer_title")]
    pub external_timer_title: String,
}

fn default_sources() -> Vec<Utf8PathBuf> {
    vec![Utf8PathBuf::from("src")]
}

fn default_output_dir() -> Utf8PathBuf {
    Utf8PathBuf::from("generated")
}

fn default_metrics_type() -> String {
    DiscoveryOptions::default().metrics_type
}

fn default_options_type() -> String {
    DiscoveryOptions::default().options_type
}

const fn default_true() -> bool {
    true
}

fn default_external_timer_metric() -> String {
    ExtraSeriesOptions::default().metric
}

fn default_external_timer_label() -> String {
    ExtraSeriesOptions::default().label
}

fn default_external_timer_title() -> String {
    ExtraSeriesOptions::default().title_prefix
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading dashgen configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!(target: LOG_TARGET, "no '{path}' found, using default configuration");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading dashgen configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        log::info!(target: LOG_TARGET, "loaded configuration from '{final_path}'");
        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a required value is empty
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(app_err!("sources must name at least one file or directory"));
        }

        if self.output_dir.as_str().is_empty() {
            return Err(app_err!("output_dir must not be empty"));
        }

        if self.metrics_type.trim().is_empty() {
            return Err(app_err!("metrics_type must not be empty"));
        }

        if self.options_type.trim().is_empty() {
            return Err(app_err!("options_type must not be empty"));
        }

        if let Some(prefix) = &self.default_prefix
            && prefix.trim().is_empty()
        {
            return Err(app_err!("default_prefix must not be blank when set"));
        }

        if !self.external_timers.is_empty() && self.external_timer_metric.trim().is_empty() {
            return Err(app_err!(
                "external_timer_metric must be set when external_timers lists {} value(s)",
                self.external_timers.len()
            ));
        }

        if let Some(value) = self.external_timers.iter().find(|v| v.trim().is_empty()) {
            return Err(app_err!("external_timers contains a blank value '{value}'"));
        }

        Ok(())
    }

    /// The options driving discovery, validation and extra series.
    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            discovery: DiscoveryOptions {
                default_prefix: self.default_prefix.clone(),
                options_type: self.options_type.clone(),
                metrics_type: self.metrics_type.clone(),
            },
            summary_falls_back_to_description: self.summary_falls_back_to_description,
            extra_series: ExtraSeriesOptions {
                metric: self.external_timer_metric.clone(),
                label: self.external_timer_label.clone(),
                title_prefix: self.external_timer_title.clone(),
                values: self.external_timers.clone(),
            },
        }
    }

    pub fn dashboard_settings(&self) -> DashboardSettings {
        DashboardSettings {
            title: self.dashboard_title.clone(),
            uid: self.dashboard_uid.clone(),
            tags: self.dashboard_tags.clone(),
            default_prefix: self.default_prefix.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
