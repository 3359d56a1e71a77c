use crate::discovery::DiscoveryOptions;

/// Shape of the externally injected timer series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraSeriesOptions {
    /// Metric name, appended to the active prefix.
    pub metric: String,

    /// Label each value filters on.
    pub label: String,

    /// Panel title prefix, followed by the value.
    pub title_prefix: String,

    /// One series per value, in order.
    pub values: Vec<String>,
}

impl Default for ExtraSeriesOptions {
    fn default() -> Self {
        Self {
            metric: "jsonrpc2_server".to_string(),
            label: "method".to_string(),
            title_prefix: "JRPC: ".to_string(),
            values: Vec::new(),
        }
    }
}

/// Everything [`generate`](super::generate) needs besides the compilation units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    pub discovery: DiscoveryOptions,

    /// Use the description as an alert's summary when it has none.
    pub summary_falls_back_to_description: bool,
    pub extra_series: ExtraSeriesOptions,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            discovery: DiscoveryOptions::default(),
            summary_falls_back_to_description: true,
            extra_series: ExtraSeriesOptions::default(),
        }
    }
}
