use serde::Serialize;
use strum::{Display, EnumIter};

/// The kind of series an instrumentation call creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Counter,
    Gauge,
    Histogram,
    Summary,
    Timer,
    Errors,
}

/// Call-name prefixes, checked in order.
const CALL_PREFIXES: [(&str, MetricKind); 6] = [
    ("Counter", MetricKind::Counter),
    ("Error", MetricKind::Errors),
    ("Gauge", MetricKind::Gauge),
    ("Histo", MetricKind::Histogram),
    ("Timer", MetricKind::Timer),
    ("Summary", MetricKind::Summary),
];

impl MetricKind {
    /// Classify an instrumentation method by its name, or `None` if it does not create a metric.
    #[must_use]
    pub fn from_call_name(call_name: &str) -> Option<Self> {
        CALL_PREFIXES
            .iter()
            .find(|(prefix, _)| call_name.starts_with(prefix))
            .map(|(_, kind)| *kind)
    }

    /// Whether panels and alerts for this kind always group by `quantile`.
    #[must_use]
    pub const fn has_quantiles(self) -> bool {
        matches!(self, Self::Summary | Self::Timer)
    }
}
