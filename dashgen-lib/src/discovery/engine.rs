use super::metric_extractor::extract;
use super::prefix_resolver::DEFAULT_SEPARATOR;
use super::{DiscoveredMetric, NamespaceConfig, PrefixResolver};
use crate::alerts::{AlertDefaults, AlertRuleRequest, AnnotationParser};
use crate::error::GenerationError;
use crate::syntax::{CallSite, CompilationUnit, Node, SourceLocation, StructLiteral, resolve_bool, resolve_text};

const LOG_TARGET: &str = " discovery";

const PREFIX_FIELDS: &[&str] = &["MetricNamePrefix", "metric_name_prefix"];
const SEPARATOR_FIELDS: &[&str] = &["PrefixSeparator", "prefix_separator"];
const CASE_SENSITIVE_FIELDS: &[&str] = &["CaseSensitiveMetricNames", "case_sensitive_metric_names"];

/// What the engine looks for and how it fills gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Prefix used by configurations that do not set one.
    pub default_prefix: Option<String>,

    /// Type of the struct literal that configures a metrics namespace.
    pub options_type: String,

    /// Type of the object whose methods create metrics.
    pub metrics_type: String,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            default_prefix: None,
            options_type: "MetricOpts".to_string(),
            metrics_type: "PrometheusMetrics".to_string(),
        }
    }
}

/// Everything one traversal accumulates.
#[derive(Debug)]
pub struct RunState {
    pub resolver: PrefixResolver,
    pub metrics: Vec<DiscoveredMetric>,
    pub annotations: AnnotationParser,
}

impl RunState {
    fn new(options: &DiscoveryOptions) -> Self {
        Self {
            resolver: PrefixResolver::new(options.default_prefix.clone()),
            metrics: Vec::new(),
            annotations: AnnotationParser::new(),
        }
    }
}

/// The raw outcome of a traversal, before deduplication and validation.
#[derive(Debug, Clone)]
pub struct Discovery {
    pub metrics: Vec<DiscoveredMetric>,
    pub requests: Vec<AlertRuleRequest>,
    pub defaults: Option<AlertDefaults>,
    pub found_configuration: bool,

    /// The prefix active at the end of the traversal.
    pub active_prefix: String,

    /// The last prefix as written, or the default prefix.
    pub raw_prefix: String,
    pub distinct_prefixes: usize,

    /// Case sensitivity of the namespace active at the end of the traversal.
    pub case_sensitive: bool,
}

/// Walks compilation units and dispatches the nodes it understands.
///
/// An engine processes exactly one run: [`DiscoveryEngine::run`] consumes it.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryEngine {
    options: DiscoveryOptions,
}

impl DiscoveryEngine {
    #[must_use]
    pub const fn new(options: DiscoveryOptions) -> Self {
        Self { options }
    }

    /// Traverse `units` in the order given.
    pub fn run<U: CompilationUnit>(self, units: &[U]) -> Result<Discovery, GenerationError> {
        let mut state = RunState::new(&self.options);

        for unit in units {
            log::debug!(target: LOG_TARGET, "Visiting '{}'", unit.path());
            self.visit_unit(unit, &mut state)?;
        }

        let (requests, defaults) = state.annotations.finish();

        log::info!(
            target: LOG_TARGET,
            "Discovered {} metric call(s) and {} alert directive(s) across {} unit(s)",
            state.metrics.len(),
            requests.len(),
            units.len()
        );

        Ok(Discovery {
            metrics: state.metrics,
            requests,
            defaults,
            found_configuration: state.resolver.found_configuration(),
            active_prefix: state.resolver.active_prefix().to_string(),
            raw_prefix: state.resolver.raw_prefix().to_string(),
            distinct_prefixes: state.resolver.distinct_prefixes(),
            case_sensitive: state.resolver.case_sensitive(),
        })
    }

    fn visit_unit<U: CompilationUnit>(&self, unit: &U, state: &mut RunState) -> Result<(), GenerationError> {
        for node in unit.nodes() {
            match node {
                Node::Comment(comment) => {
                    state
                        .annotations
                        .parse(&comment.text, &SourceLocation::new(unit.path(), comment.line))?;
                }

                Node::StructLiteral(literal) if type_matches(literal.resolved_type.as_deref(), &self.options.options_type) => {
                    let config = namespace_config(literal, unit);
                    let _ = state.resolver.configure(&config);
                }

                Node::Call(call) if type_matches(call.receiver_type.as_deref(), &self.options.metrics_type) => {
                    self.visit_call(call, unit, state)?;
                }

                Node::StructLiteral(_) | Node::Call(_) => {}
            }
        }

        Ok(())
    }

    fn visit_call<U: CompilationUnit>(&self, call: &CallSite, unit: &U, state: &mut RunState) -> Result<(), GenerationError> {
        let location = SourceLocation::new(unit.path(), call.line);

        let Some(declared_name) = call.args.first().and_then(|arg| resolve_text(arg, unit)) else {
            log::debug!(target: LOG_TARGET, "Skipping {} at {location}: first argument is not a constant name", call.method);
            return Ok(());
        };

        if let Some(metric) = extract(&call.method, &declared_name, &call.args, unit, &state.resolver, &location)? {
            log::debug!(target: LOG_TARGET, "Found {} '{}' at {location}", metric.kind, metric.raw_name);
            state.metrics.push(metric);
        } else {
            log::trace!(target: LOG_TARGET, "Ignoring {} at {location}", call.method);
        }

        Ok(())
    }
}

fn namespace_config<U: CompilationUnit>(literal: &StructLiteral, unit: &U) -> NamespaceConfig {
    let mut config = NamespaceConfig::default();

    if let Some(expr) = literal.field(PREFIX_FIELDS) {
        if let Some(prefix) = resolve_text(expr, unit) {
            config.raw_prefix = prefix;
            config.explicitly_set = true;
        } else {
            log::warn!(
                target: LOG_TARGET,
                "Could not resolve metrics prefix at {}:{}, falling back to the default prefix",
                unit.path(),
                literal.line
            );
        }
    }

    config.separator = literal
        .field(SEPARATOR_FIELDS)
        .and_then(|expr| resolve_text(expr, unit))
        .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string());

    config.case_sensitive = literal
        .field(CASE_SENSITIVE_FIELDS)
        .and_then(|expr| resolve_bool(expr, unit))
        .unwrap_or(false);

    config
}

/// Compare a resolved type against a configured type name.
///
/// Reference and pointer sigils, lifetimes and generic arguments are ignored, and `Arc`-like
/// wrappers are seen through. Paths are compared in full
/// when both sides are qualified, otherwise by their last segment.
fn type_matches(actual: Option<&str>, expected: &str) -> bool {
    let Some(actual) = actual else {
        return false;
    };

    let actual = bare_type(actual);
    let expected = bare_type(expected);

    if actual.contains("::") && expected.contains("::") {
        return actual == expected;
    }

    last_segment(actual) == last_segment(expected)
}

/// Single-argument wrappers whose method calls reach the wrapped value through `Deref`.
const TRANSPARENT_WRAPPERS: &[&str] = &["Arc", "Rc", "Box", "LazyLock", "Lazy"];

fn bare_type(ty: &str) -> &str {
    let mut ty = ty.trim();

    loop {
        let stripped = ty
            .strip_prefix('&')
            .or_else(|| ty.strip_prefix("*const "))
            .or_else(|| ty.strip_prefix("*mut "))
            .or_else(|| ty.strip_prefix("mut "))
            .or_else(|| ty.strip_prefix('*'))
            .or_else(|| strip_lifetime(ty));

        match stripped {
            Some(rest) => ty = rest.trim_start(),
            None => break,
        }
    }

    if let Some((outer, rest)) = ty.split_once('<')
        && TRANSPARENT_WRAPPERS.contains(&last_segment(outer.trim()))
        && let Some(inner) = rest.trim_end().strip_suffix('>')
    {
        return bare_type(inner);
    }

    ty.split('<').next().unwrap_or(ty).trim()
}

/// `'a Foo` becomes `Foo`.
fn strip_lifetime(ty: &str) -> Option<&str> {
    let rest = ty.strip_prefix('\'')?;
    rest.split_once(char::is_whitespace).map(|(_, ty)| ty)
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::MetricKind;
    use crate::error::ErrorKind;
    use crate::syntax::{Expr, ParsedUnit};

    const OPTS: &str = "MetricOpts";
    const METRICS: &str = "PrometheusMetrics";

    fn s(v: &str) -> Expr {
        Expr::Str(v.into())
    }

    fn configured(prefix: &str) -> ParsedUnit {
        ParsedUnit::new("main.rs").with_struct_literal(1, OPTS, vec![("MetricNamePrefix", s(prefix))])
    }

    fn run(units: &[ParsedUnit]) -> Result<Discovery, GenerationError> {
        DiscoveryEngine::new(DiscoveryOptions::default()).run(units)
    }

    #[test]
    fn test_type_matches() {
        assert!(type_matches(Some("PrometheusMetrics"), METRICS));
        assert!(type_matches(Some("&mut promenade::PrometheusMetrics"), METRICS));
        assert!(type_matches(Some("*PrometheusMetrics"), METRICS));
        assert!(type_matches(Some("promenade::PrometheusMetrics"), "promenade::PrometheusMetrics"));
        assert!(!type_matches(Some("other::PrometheusMetrics"), "promenade::PrometheusMetrics"));
        assert!(!type_matches(Some("Metrics"), METRICS));
        assert!(!type_matches(None, METRICS));

        assert!(type_matches(Some("&'a PrometheusMetrics"), METRICS));
        assert!(type_matches(Some("&'static mut PrometheusMetrics"), METRICS));
        assert!(type_matches(Some("LazyLock<PrometheusMetrics>"), METRICS));
        assert!(type_matches(Some("std::sync::Arc<promenade::PrometheusMetrics>"), "promenade::PrometheusMetrics"));
        assert!(type_matches(Some("&Box<PrometheusMetrics>"), METRICS));
        assert!(!type_matches(Some("Vec<PrometheusMetrics>"), METRICS));
        assert!(!type_matches(Some("Arc<Mutex<PrometheusMetrics>>"), METRICS));
    }

    #[test]
    fn test_mixed_kinds_keep_order_and_groupings() {
        let unit = configured("prefix")
            .with_call(2, METRICS, "Counter", vec![s("c")])
            .with_call(3, METRICS, "CounterWithLabel", vec![s("places"), s("city")])
            .with_call(4, METRICS, "CounterWithLabels", vec![s("animals"), Expr::List(vec![s("type"), s("breed")])])
            .with_call(5, METRICS, "Error", vec![s("e")])
            .with_call(6, METRICS, "Gauge", vec![s("g")])
            .with_call(7, METRICS, "Histogram", vec![s("h")])
            .with_call(8, METRICS, "Summary", vec![s("s")])
            .with_call(9, METRICS, "Timer", vec![s("t")]);

        let discovery = run(&[unit]).unwrap();
        let names: Vec<_> = discovery
            .metrics
            .iter()
            .map(|m| format!("{}{}", m.namespace_prefix, m.normalized_name))
            .collect();
        let groupings: Vec<_> = discovery.metrics.iter().map(|m| m.grouping.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "prefix_c",
                "prefix_places",
                "prefix_animals",
                "prefix_e",
                "prefix_g",
                "prefix_h",
                "prefix_s",
                "prefix_t"
            ]
        );
        assert_eq!(groupings, vec!["", " by (city)", " by (type,breed)", "", "", "", " by (quantile)", " by (quantile)"]);
        assert_eq!(discovery.metrics[3].kind, MetricKind::Errors);
    }

    #[test]
    fn test_calls_on_other_types_are_ignored() {
        let unit = configured("p")
            .with_call(2, "Logger", "Counter", vec![s("not_a_metric")])
            .with_call(3, METRICS, "Counter", vec![s("real")]);

        let discovery = run(&[unit]).unwrap();
        assert_eq!(discovery.metrics.len(), 1);
        assert_eq!(discovery.metrics[0].raw_name, "real");
    }

    #[test]
    fn test_unresolvable_name_is_skipped() {
        let unit = configured("p")
            .with_call(2, METRICS, "Counter", vec![Expr::Ident("runtime_name".into())])
            .with_call(3, METRICS, "Counter", vec![Expr::Ident("NAME".into())])
            .with_constant("NAME", s("named"));

        let discovery = run(&[unit]).unwrap();
        assert_eq!(discovery.metrics.len(), 1);
        assert_eq!(discovery.metrics[0].raw_name, "named");
    }

    #[test]
    fn test_prefix_captured_at_call_time() {
        let first = configured("one").with_call(2, METRICS, "Counter", vec![s("a")]);
        let second = ParsedUnit::new("other.rs")
            .with_struct_literal(1, OPTS, vec![("MetricNamePrefix", s("two"))])
            .with_call(2, METRICS, "Counter", vec![s("b")]);

        let discovery = run(&[first, second]).unwrap();

        assert_eq!(discovery.metrics[0].namespace_prefix, "one_");
        assert_eq!(discovery.metrics[1].namespace_prefix, "two_");
        assert_eq!(discovery.distinct_prefixes, 2);
        assert_eq!(discovery.active_prefix, "two_");
    }

    #[test]
    fn test_separator_and_case_fields() {
        let unit = ParsedUnit::new("main.rs")
            .with_struct_literal(
                1,
                OPTS,
                vec![
                    ("metric_name_prefix", s("Svc")),
                    ("prefix_separator", s(":")),
                    ("case_sensitive_metric_names", Expr::Ident("SENSITIVE".into())),
                ],
            )
            .with_constant("SENSITIVE", Expr::Bool(true))
            .with_call(2, METRICS, "Counter", vec![s("Hits")]);

        let discovery = run(&[unit]).unwrap();
        assert_eq!(discovery.metrics[0].namespace_prefix, "Svc:");
        assert_eq!(discovery.metrics[0].normalized_name, "Hits");
    }

    #[test]
    fn test_default_prefix_when_unset() {
        let unit = ParsedUnit::new("main.rs")
            .with_struct_literal(1, OPTS, vec![("MetricNamePrefix", Expr::Ident("runtime".into()))])
            .with_call(2, METRICS, "Counter", vec![s("c")]);

        let options = DiscoveryOptions {
            default_prefix: Some("fallback".into()),
            ..DiscoveryOptions::default()
        };
        let discovery = DiscoveryEngine::new(options).run(&[unit]).unwrap();

        assert_eq!(discovery.metrics[0].namespace_prefix, "fallback_");
        assert_eq!(discovery.raw_prefix, "fallback");
    }

    #[test]
    fn test_directives_are_collected() {
        let unit = configured("prefix")
            .with_comment(2, "// @AlertDefaults(displayPrefix=App, team=core)")
            .with_comment(3, "// @ZeroToleranceErrorAlertRule(name=calcError, errorLabel=e, description=d)")
            .with_call(4, METRICS, "Error", vec![s("e")]);

        let discovery = run(&[unit]).unwrap();
        assert_eq!(discovery.requests.len(), 1);
        assert_eq!(discovery.defaults.unwrap().team.as_deref(), Some("core"));
    }

    #[test]
    fn test_second_defaults_in_another_file_is_rejected() {
        let first = configured("p").with_comment(2, "// @AlertDefaults(team=a)");
        let second = ParsedUnit::new("far/away.rs").with_comment(300, "// @AlertDefaults(team=b)");

        let err = run(&[first, second]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("far/away.rs:300"));
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let unit = configured("prefix")
            .with_call(2, METRICS, "Counter", vec![s("c")])
            .with_call(3, METRICS, "Gauge", vec![s("g")]);
        let units = vec![unit];

        let first = run(&units).unwrap();
        let second = run(&units).unwrap();
        assert_eq!(first.metrics, second.metrics);
    }
}
