use crate::Result;
use crate::alerts::{ValidatedAlertRule, ValidatedRules};
use clap::ValueEnum;
use core::fmt::Write;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::Display;

/// Which alert rule file layout to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RuleFormat {
    /// A single rule group with a `duration` per rule.
    #[default]
    Alertmanager,

    /// A `PrometheusRule` spec: `groups` of rule groups with a `for` per rule.
    PrometheusOperator,
}

#[derive(Serialize)]
struct RuleGroup<'a, R> {
    name: &'a str,
    rules: Vec<R>,
}

#[derive(Serialize)]
struct AlertmanagerRule<'a> {
    alert: &'a str,
    expr: &'a str,
    duration: &'a str,
    labels: &'a BTreeMap<String, String>,
    annotations: &'a BTreeMap<String, String>,
}

#[derive(Serialize)]
struct OperatorRule<'a> {
    alert: &'a str,
    expr: &'a str,
    #[serde(rename = "for")]
    for_duration: &'a str,
    labels: &'a BTreeMap<String, String>,
    annotations: &'a BTreeMap<String, String>,
}

#[derive(Serialize)]
struct OperatorSpec<'a> {
    groups: Vec<RuleGroup<'a, OperatorRule<'a>>>,
}

impl<'a> From<&'a ValidatedAlertRule> for AlertmanagerRule<'a> {
    fn from(rule: &'a ValidatedAlertRule) -> Self {
        Self {
            alert: &rule.name,
            expr: &rule.expression,
            duration: &rule.duration,
            labels: &rule.labels,
            annotations: &rule.annotations,
        }
    }
}

impl<'a> From<&'a ValidatedAlertRule> for OperatorRule<'a> {
    fn from(rule: &'a ValidatedAlertRule) -> Self {
        Self {
            alert: &rule.name,
            expr: &rule.expression,
            for_duration: &rule.duration,
            labels: &rule.labels,
            annotations: &rule.annotations,
        }
    }
}

/// Render the validated rules as YAML in the requested layout.
pub fn generate<W: Write>(rules: &ValidatedRules, format: RuleFormat, writer: &mut W) -> Result<()> {
    let yaml = match format {
        RuleFormat::Alertmanager => serde_yaml::to_string(&RuleGroup {
            name: &rules.group_name,
            rules: rules.rules.iter().map(AlertmanagerRule::from).collect(),
        })?,

        RuleFormat::PrometheusOperator => serde_yaml::to_string(&OperatorSpec {
            groups: vec![RuleGroup {
                name: &rules.group_name,
                rules: rules.rules.iter().map(OperatorRule::from).collect(),
            }],
        })?,
    };

    write!(writer, "{yaml}")?;
    Ok(())
}
