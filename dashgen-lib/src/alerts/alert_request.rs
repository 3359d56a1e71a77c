use crate::error::GenerationError;
use crate::syntax::SourceLocation;
use std::collections::BTreeMap;

/// Directive properties, keyed by name.
pub type Properties = BTreeMap<String, String>;

/// An alert rule as requested by a directive, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertRuleRequest {
    /// Fires on any error of the given type.
    ZeroTolerance { properties: Properties, location: SourceLocation },

    /// Fires when errors of the given type exceed a per-second rate.
    ElevatedRate { properties: Properties, location: SourceLocation },
}

impl AlertRuleRequest {
    /// A zero-tolerance request; `timeRange` defaults to `1m` and `duration` to `10s`.
    #[must_use]
    pub fn zero_tolerance(explicit: impl IntoIterator<Item = (String, String)>, location: SourceLocation) -> Self {
        Self::ZeroTolerance {
            properties: with_implicit(&[("timeRange", "1m"), ("duration", "10s")], explicit),
            location,
        }
    }

    /// An elevated-rate request; `timeRange` and `duration` default to `5m`.
    #[must_use]
    pub fn elevated_rate(explicit: impl IntoIterator<Item = (String, String)>, location: SourceLocation) -> Self {
        Self::ElevatedRate {
            properties: with_implicit(&[("timeRange", "5m"), ("duration", "5m")], explicit),
            location,
        }
    }

    #[must_use]
    pub const fn properties(&self) -> &Properties {
        match self {
            Self::ZeroTolerance { properties, .. } | Self::ElevatedRate { properties, .. } => properties,
        }
    }

    #[must_use]
    pub const fn location(&self) -> &SourceLocation {
        match self {
            Self::ZeroTolerance { location, .. } | Self::ElevatedRate { location, .. } => location,
        }
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties().get(name).map(String::as_str)
    }

    /// The PromQL expression for this rule over `<prefix>errors` filtered to `error_type`.
    pub fn expression(&self, prefix: &str, error_type: &str) -> Result<String, GenerationError> {
        let time_range = self.property("timeRange").unwrap_or_default();
        let rate = format!("sum(rate({prefix}errors{{error_type='{error_type}'}}[{time_range}]))");

        match self {
            Self::ZeroTolerance { .. } => Ok(format!("{rate} > 0")),
            Self::ElevatedRate { location, .. } => {
                let threshold = self.property("ratePerSecondThreshold").unwrap_or_default();
                if !threshold.parse::<f64>().is_ok_and(f64::is_finite) {
                    return Err(GenerationError::InvalidRateThreshold {
                        location: location.clone(),
                        value: threshold.to_string(),
                    });
                }

                Ok(format!("{rate} > {threshold}"))
            }
        }
    }
}

fn with_implicit(implicit: &[(&str, &str)], explicit: impl IntoIterator<Item = (String, String)>) -> Properties {
    let mut properties: Properties = implicit.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    properties.extend(explicit);
    properties
}
