use std::collections::BTreeMap;

/// An alert rule ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAlertRule {
    /// Display name, e.g. `ApplicationCalcError`.
    pub name: String,
    pub expression: String,

    /// How long the condition must hold before firing.
    pub duration: String,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
}

/// The validated rules of one run, named as a group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidatedRules {
    pub group_name: String,
    pub display_prefix: String,
    pub rules: Vec<ValidatedAlertRule>,
}
