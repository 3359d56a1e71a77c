//! Rendering of generation results
//!
//! Each renderer takes the [`OutputModel`](crate::generation::OutputModel) (or part of it)
//! and writes text to any `core::fmt::Write`:
//! - **Dashboard**: Grafana dashboard JSON, one panel per metric plus extra series
//! - **Alert rules**: Prometheus alert rule YAML, in Alertmanager or Prometheus-Operator layout
//! - **Run summary**: YAML counters for the run
//! - **Console**: a human-readable summary with optional ANSI colors
//!
//! Renderers never fail on content; errors only come from serialization or the writer.

mod alert_rules;
mod console;
mod dashboard;
mod run_summary;

pub use alert_rules::{RuleFormat, generate as generate_alert_rules};
pub use console::generate as generate_console;
pub use dashboard::{DashboardSettings, generate as generate_dashboard};
pub use run_summary::generate as generate_run_summary;
