use super::naming::normalize_name;
use super::{DiscoveredMetric, MetricKind, PrefixResolver};
use crate::error::GenerationError;
use crate::syntax::{CompilationUnit, Expr, SourceLocation, resolve_text};

/// Grouping key appended for timers and summaries.
const QUANTILE_LABEL: &str = "quantile";

/// How an instrumentation call passes its labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelForm {
    None,
    Single,
    Multiple,
}

impl LabelForm {
    fn of(kind: MetricKind, call_name: &str) -> Self {
        if matches!(kind, MetricKind::Errors | MetricKind::Gauge | MetricKind::Histogram) {
            return Self::None;
        }

        if call_name.ends_with("WithLabels") {
            Self::Multiple
        } else if call_name.ends_with("WithLabel") {
            Self::Single
        } else {
            Self::None
        }
    }
}

/// Classify an instrumentation call and turn it into a metric record.
///
/// Returns `Ok(None)` for calls that do not create metrics. The metric is normalized with the
/// case sensitivity of the active namespace and stamped with its prefix.
pub fn extract<U: CompilationUnit + ?Sized>(
    call_name: &str,
    declared_name: &str,
    args: &[Expr],
    unit: &U,
    namespace: &PrefixResolver,
    location: &SourceLocation,
) -> Result<Option<DiscoveredMetric>, GenerationError> {
    let Some(kind) = MetricKind::from_call_name(call_name) else {
        return Ok(None);
    };

    let unresolved = || GenerationError::UnresolvedLabel {
        location: location.clone(),
        call: call_name.to_string(),
    };

    let mut labels = match LabelForm::of(kind, call_name) {
        LabelForm::None => Vec::new(),
        LabelForm::Single => {
            let label = args.get(1).and_then(|arg| resolve_text(arg, unit)).ok_or_else(unresolved)?;
            vec![label]
        }
        LabelForm::Multiple => args.get(1).and_then(|arg| resolve_list(arg, unit)).ok_or_else(unresolved)?,
    };

    if kind.has_quantiles() {
        labels.push(QUANTILE_LABEL.to_string());
    }

    let grouping = if labels.is_empty() {
        String::new()
    } else {
        format!(" by ({})", labels.join(","))
    };

    Ok(Some(DiscoveredMetric {
        kind,
        call_name: call_name.to_string(),
        raw_name: declared_name.to_string(),
        normalized_name: normalize_name(declared_name, namespace.case_sensitive()),
        grouping,
        namespace_prefix: namespace.active_prefix().to_string(),
        location: location.clone(),
    }))
}

/// Resolve a list of labels, either written inline or held in a constant.
fn resolve_list<U: CompilationUnit + ?Sized>(expr: &Expr, unit: &U) -> Option<Vec<String>> {
    let items = match expr {
        Expr::List(items) => items,
        Expr::Ident(name) => match unit.constant_value(name)? {
            Expr::List(items) => items,
            _ => return None,
        },
        _ => return None,
    };

    items.iter().map(|item| resolve_text(item, unit)).collect()
}
