//! Error taxonomy for discovery, directive parsing and rule validation.
//!
//! Every failure is fatal to the current generation run. Each variant carries enough
//! context (the offending value and where it came from) to fix the source.

use crate::syntax::SourceLocation;
use strum::Display;

/// Broad classification of a [`GenerationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// Malformed directive syntax or an instrumentation argument that cannot be understood.
    Structural,

    /// Conflicting configuration, such as a second defaults directive.
    Configuration,

    /// An alert references a metric that was never discovered.
    CrossReference,

    /// A directive value is present but unusable.
    Validation,

    /// Nothing to generate from.
    Discovery,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("malformed directive at {location}: {reason} in `{line}`")]
    MalformedDirective {
        location: SourceLocation,
        line: String,
        reason: &'static str,
    },

    #[error("could not resolve label argument of {call} at {location}: is the value a constant?")]
    UnresolvedLabel { location: SourceLocation, call: String },

    #[error("only one @AlertDefaults allowed per project (first at {first}, again at {second})")]
    DuplicateDefaults { first: SourceLocation, second: SourceLocation },

    #[error("alert refers to missing metric {metric} (directive at {location})")]
    MissingMetric { location: SourceLocation, metric: String },

    #[error("bad ratePerSecondThreshold: \"{value}\" is not a number (directive at {location})")]
    InvalidRateThreshold { location: SourceLocation, value: String },

    #[error("no summary or description for alert {alert} (directive at {location})")]
    MissingSummary { location: SourceLocation, alert: String },

    #[error("no summary for alert {alert} (directive at {location}) and falling back to the description is disabled")]
    SummaryRequired { location: SourceLocation, alert: String },

    #[error("no instrumentation in use: no metrics configuration of type {options_type} was found")]
    NoInstrumentation { options_type: String },

    #[error("metrics configuration present but nothing instrumented: no calls on {metrics_type} were found")]
    NothingInstrumented { metrics_type: String },
}

impl GenerationError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedDirective { .. } | Self::UnresolvedLabel { .. } => ErrorKind::Structural,
            Self::DuplicateDefaults { .. } => ErrorKind::Configuration,
            Self::MissingMetric { .. } => ErrorKind::CrossReference,
            Self::InvalidRateThreshold { .. } | Self::MissingSummary { .. } | Self::SummaryRequired { .. } => ErrorKind::Validation,
            Self::NoInstrumentation { .. } | Self::NothingInstrumented { .. } => ErrorKind::Discovery,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> SourceLocation {
        SourceLocation::new("src/lib.rs", 12)
    }

    #[test]
    fn test_missing_metric_message_names_metric() {
        let err = GenerationError::MissingMetric {
            location: location(),
            metric: "prefix_e".into(),
        };

        assert!(err.to_string().contains("alert refers to missing metric prefix_e"));
        assert_eq!(err.kind(), ErrorKind::CrossReference);
    }

    #[test]
    fn test_invalid_threshold_quotes_empty_literal() {
        let err = GenerationError::InvalidRateThreshold {
            location: location(),
            value: String::new(),
        };

        assert!(err.to_string().contains("bad ratePerSecondThreshold: \"\""));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_discovery_errors_are_distinct() {
        let none = GenerationError::NoInstrumentation {
            options_type: "MetricOpts".into(),
        };
        let empty = GenerationError::NothingInstrumented {
            metrics_type: "PrometheusMetrics".into(),
        };

        assert_eq!(none.kind(), ErrorKind::Discovery);
        assert_eq!(empty.kind(), ErrorKind::Discovery);
        assert_ne!(none.to_string(), empty.to_string());
    }

    #[test]
    fn test_duplicate_defaults_names_both_locations() {
        let err = GenerationError::DuplicateDefaults {
            first: SourceLocation::new("a.rs", 3),
            second: SourceLocation::new("b.rs", 40),
        };

        let msg = err.to_string();
        assert!(msg.contains("only one @AlertDefaults allowed per project"));
        assert!(msg.contains("a.rs:3"));
        assert!(msg.contains("b.rs:40"));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
