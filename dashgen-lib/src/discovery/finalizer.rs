use super::{DiscoveredMetric, DiscoveryOptions, Metric};
use crate::HashMap;
use crate::error::GenerationError;

const LOG_TARGET: &str = "  finalize";

/// The deduplicated metric list, in first-seen order, with a lookup by fully-qualified name.
#[derive(Debug, Clone, Default)]
pub struct FinalizedMetrics {
    metrics: Vec<Metric>,
    index: HashMap<String, usize>,
}

impl FinalizedMetrics {
    #[must_use]
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    #[must_use]
    pub fn into_metrics(self) -> Vec<Metric> {
        self.metrics
    }

    #[must_use]
    pub fn get(&self, fully_qualified_name: &str) -> Option<&Metric> {
        self.index.get(fully_qualified_name).map(|&i| &self.metrics[i])
    }

    #[must_use]
    pub fn contains(&self, fully_qualified_name: &str) -> bool {
        self.index.contains_key(fully_qualified_name)
    }

    /// Iterate over the fully-qualified names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.metrics.iter().map(|m| m.fully_qualified_name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

/// Stamp fully-qualified names and drop duplicates, keeping the first occurrence of each name.
///
/// Fails when no metrics configuration was seen at all, or when one was seen but no metrics
/// were found.
pub fn finalize(
    raw: Vec<DiscoveredMetric>,
    found_configuration: bool,
    options: &DiscoveryOptions,
) -> Result<FinalizedMetrics, GenerationError> {
    if !found_configuration {
        return Err(GenerationError::NoInstrumentation {
            options_type: options.options_type.clone(),
        });
    }

    let mut finalized = FinalizedMetrics::default();

    for discovered in raw {
        let metric = Metric::from(discovered);

        if let Some(&first) = finalized.index.get(&metric.fully_qualified_name) {
            log::debug!(
                target: LOG_TARGET,
                "Dropping duplicate metric '{}' at {}, first seen at {}",
                metric.fully_qualified_name,
                metric.location,
                finalized.metrics[first].location
            );
            continue;
        }

        let _ = finalized.index.insert(metric.fully_qualified_name.clone(), finalized.metrics.len());
        finalized.metrics.push(metric);
    }

    if finalized.is_empty() {
        return Err(GenerationError::NothingInstrumented {
            metrics_type: options.metrics_type.clone(),
        });
    }

    log::info!(target: LOG_TARGET, "Found {} unique metric(s)", finalized.len());
    Ok(finalized)
}
