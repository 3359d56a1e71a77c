use crate::alerts::ValidatedRules;
use crate::discovery::Metric;
use serde::Serialize;

/// A timer series that is not created by the analyzed code but is worth a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraSeries {
    pub fully_qualified_name: String,
    pub grouping: String,

    /// Label matcher, e.g. `method="getBlock"`.
    pub label_filter: String,
    pub title: String,
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    #[serde(rename = "dashgen-alert-rules")]
    pub alert_rules: usize,

    #[serde(rename = "dashgen-unique-metrics")]
    pub unique_metrics: usize,
}

/// The result of a generation run, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputModel {
    /// Deduplicated metrics in first-seen order.
    pub metrics: Vec<Metric>,
    pub extra_series: Vec<ExtraSeries>,
    pub rules: ValidatedRules,

    /// Normalized prefix active at the end of discovery, separator included.
    pub active_prefix: String,

    /// The prefix as written in the code, or the default prefix.
    pub raw_prefix: String,
    pub summary: RunSummary,
}
