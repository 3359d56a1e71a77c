use super::MetricKind;
use crate::syntax::SourceLocation;

/// A metric as found at its call site, before deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredMetric {
    pub kind: MetricKind,

    /// The instrumentation method that created it, e.g. `CounterWithLabel`.
    pub call_name: String,

    /// The name passed to the call, as written.
    pub raw_name: String,

    /// `raw_name` after normalization with the owning namespace's case sensitivity.
    pub normalized_name: String,

    /// Label-grouping clause, e.g. ` by (city)`, or empty.
    pub grouping: String,

    /// The namespace prefix active when the call was encountered.
    pub namespace_prefix: String,

    pub location: SourceLocation,
}

/// A deduplicated metric with its fully-qualified name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub kind: MetricKind,
    pub call_name: String,
    pub raw_name: String,
    pub normalized_name: String,
    pub grouping: String,
    pub namespace_prefix: String,
    pub fully_qualified_name: String,
    pub location: SourceLocation,
}

impl From<DiscoveredMetric> for Metric {
    fn from(metric: DiscoveredMetric) -> Self {
        let fully_qualified_name = format!("{}{}", metric.namespace_prefix, metric.normalized_name);

        Self {
            kind: metric.kind,
            call_name: metric.call_name,
            raw_name: metric.raw_name,
            normalized_name: metric.normalized_name,
            grouping: metric.grouping,
            namespace_prefix: metric.namespace_prefix,
            fully_qualified_name,
            location: metric.location,
        }
    }
}
