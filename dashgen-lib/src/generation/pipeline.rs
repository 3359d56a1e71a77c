use super::{ExtraSeries, GenerationOptions, OutputModel, RunSummary};
use crate::alerts::RuleCrossValidator;
use crate::discovery::{DiscoveryEngine, finalize};
use crate::error::GenerationError;
use crate::syntax::CompilationUnit;

const LOG_TARGET: &str = "generation";

/// Discover, deduplicate and validate, producing the model the renderers consume.
///
/// Units are traversed in the order given. Any error aborts the whole run.
pub fn generate<U: CompilationUnit>(units: &[U], options: &GenerationOptions) -> Result<OutputModel, GenerationError> {
    let discovery = DiscoveryEngine::new(options.discovery.clone()).run(units)?;
    let finalized = finalize(discovery.metrics, discovery.found_configuration, &options.discovery)?;

    if discovery.active_prefix.is_empty() {
        log::warn!(target: LOG_TARGET, "Using a blank metrics prefix");
    } else {
        log::info!(target: LOG_TARGET, "Using metrics prefix '{}'", discovery.active_prefix);
    }

    let validator = RuleCrossValidator {
        metrics: &finalized,
        active_prefix: &discovery.active_prefix,
        distinct_prefixes: discovery.distinct_prefixes,
        case_sensitive: discovery.case_sensitive,
        summary_falls_back_to_description: options.summary_falls_back_to_description,
    };
    let rules = validator.resolve(discovery.requests, discovery.defaults.as_ref())?;

    let extra = &options.extra_series;
    let extra_series = extra
        .values
        .iter()
        .map(|value| ExtraSeries {
            fully_qualified_name: format!("{}{}", discovery.active_prefix, extra.metric),
            grouping: " by (quantile)".to_string(),
            label_filter: format!("{}=\"{value}\"", extra.label),
            title: format!("{}{value}", extra.title_prefix),
        })
        .collect();

    let summary = RunSummary {
        alert_rules: rules.rules.len(),
        unique_metrics: finalized.len(),
    };

    Ok(OutputModel {
        metrics: finalized.into_metrics(),
        extra_series,
        rules,
        active_prefix: discovery.active_prefix,
        raw_prefix: discovery.raw_prefix,
        summary,
    })
}
