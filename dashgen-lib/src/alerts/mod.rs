//! Alert directives and rule validation
//!
//! Alert rules are requested from source comments:
//!
//! ```text
//! // @AlertDefaults(displayPrefix=Application, severity=warning, team=myTeam)
//! // @ZeroToleranceErrorAlertRule(name=calcError, errorLabel=e, description="A calculation failed")
//! // @ElevatedErrorRateAlertRule(name=calcProblems, errorLabel=e, timeRange=10m, ratePerSecondThreshold=1)
//! ```
//!
//! [`AnnotationParser`] turns these into [`AlertRuleRequest`]s during discovery, and
//! [`RuleCrossValidator`] checks each request against the finalized metrics and builds the
//! [`ValidatedAlertRule`]s that get rendered.

mod alert_defaults;
mod alert_request;
mod annotation_parser;
mod cross_validator;
mod directive;
mod validated_rule;

pub use alert_defaults::AlertDefaults;
pub use alert_request::{AlertRuleRequest, Properties};
pub use annotation_parser::AnnotationParser;
pub use cross_validator::{FALLBACK_DISPLAY_PREFIX, RuleCrossValidator};
pub use directive::{Directive, DirectiveKind, parse_directive};
pub use validated_rule::{ValidatedAlertRule, ValidatedRules};
