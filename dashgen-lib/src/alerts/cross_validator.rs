use super::{AlertDefaults, AlertRuleRequest, ValidatedAlertRule, ValidatedRules};
use crate::discovery::FinalizedMetrics;
use crate::discovery::naming::{compact_display_prefix, normalize_name, title_case};
use crate::error::GenerationError;
use std::collections::BTreeMap;

const LOG_TARGET: &str = "  validate";

/// Display prefix used when neither the defaults directive nor the namespace provide one.
pub const FALLBACK_DISPLAY_PREFIX: &str = "Application";

/// Resolves alert requests against the metrics a run discovered.
#[derive(Debug, Clone)]
pub struct RuleCrossValidator<'a> {
    pub metrics: &'a FinalizedMetrics,

    /// The prefix active at the end of discovery.
    pub active_prefix: &'a str,
    pub distinct_prefixes: usize,

    /// Case sensitivity used to normalize `errorLabel`.
    pub case_sensitive: bool,

    /// Use the description as the summary when a rule has none.
    pub summary_falls_back_to_description: bool,
}

impl RuleCrossValidator<'_> {
    /// The alert name prefix for this run.
    #[must_use]
    pub fn display_prefix(&self, defaults: Option<&AlertDefaults>) -> String {
        let chosen = defaults
            .and_then(|d| d.display_prefix.clone())
            .unwrap_or_else(|| title_case(self.active_prefix));

        let compacted = compact_display_prefix(&chosen);
        if compacted.is_empty() {
            FALLBACK_DISPLAY_PREFIX.to_string()
        } else {
            compacted
        }
    }

    /// Validate every request. The first failure aborts the whole batch.
    pub fn resolve(&self, requests: Vec<AlertRuleRequest>, defaults: Option<&AlertDefaults>) -> Result<ValidatedRules, GenerationError> {
        let display_prefix = self.display_prefix(defaults);
        let rules = requests
            .into_iter()
            .map(|request| self.resolve_one(request, defaults, &display_prefix))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(target: LOG_TARGET, "Validated {} alert rule(s)", rules.len());

        Ok(ValidatedRules {
            group_name: format!("{display_prefix} auto-generated alerts"),
            display_prefix,
            rules,
        })
    }

    fn resolve_one(
        &self,
        mut request: AlertRuleRequest,
        defaults: Option<&AlertDefaults>,
        display_prefix: &str,
    ) -> Result<ValidatedAlertRule, GenerationError> {
        if let Some(defaults) = defaults {
            apply_default(&mut request, "team", defaults.team.as_deref());
            apply_default(&mut request, "severity", defaults.severity.as_deref());
        }

        let error_label = request.property("errorLabel").unwrap_or_default();
        let normalized = normalize_name(error_label, self.case_sensitive);
        let multiple_namespaces = self.distinct_prefixes > 1;

        let target = if multiple_namespaces {
            normalized
        } else {
            format!("{}{normalized}", self.active_prefix)
        };

        let Some(metric) = self.metrics.get(&target) else {
            return Err(GenerationError::MissingMetric {
                location: request.location().clone(),
                metric: target,
            });
        };

        let name = format!("{display_prefix}{}", title_case(request.property("name").unwrap_or_default()));

        // With several namespaces the label names the metric fully; the series lives under its owner.
        let expression = if multiple_namespaces {
            request.expression(&metric.namespace_prefix, &metric.raw_name)?
        } else {
            request.expression(self.active_prefix, error_label)?
        };

        let mut labels = BTreeMap::new();
        for key in ["severity", "team"] {
            if let Some(value) = request.property(key).filter(|v| !v.is_empty()) {
                let _ = labels.insert(key.to_string(), value.to_string());
            }
        }

        let description = request.property("description").filter(|v| !v.is_empty());
        let summary = request.property("summary").filter(|v| !v.is_empty());

        let summary = match (summary, description) {
            (Some(summary), _) => summary,
            (None, Some(description)) if self.summary_falls_back_to_description => description,
            (None, Some(_)) => {
                return Err(GenerationError::SummaryRequired {
                    location: request.location().clone(),
                    alert: name,
                });
            }
            (None, None) => {
                return Err(GenerationError::MissingSummary {
                    location: request.location().clone(),
                    alert: name,
                });
            }
        };

        let mut annotations = BTreeMap::new();
        if let Some(description) = description {
            let _ = annotations.insert("description".to_string(), description.to_string());
        }
        let _ = annotations.insert("summary".to_string(), summary.to_string());

        log::debug!(target: LOG_TARGET, "Alert '{name}' targets '{}'", metric.fully_qualified_name);

        Ok(ValidatedAlertRule {
            duration: request.property("duration").unwrap_or_default().to_string(),
            name,
            expression,
            labels,
            annotations,
        })
    }
}

fn apply_default(request: &mut AlertRuleRequest, key: &str, value: Option<&str>) {
    let properties = match request {
        AlertRuleRequest::ZeroTolerance { properties, .. } | AlertRuleRequest::ElevatedRate { properties, .. } => properties,
    };

    if let Some(value) = value {
        let _ = properties.entry(key.to_string()).or_insert_with(|| value.to_string());
    }
}
