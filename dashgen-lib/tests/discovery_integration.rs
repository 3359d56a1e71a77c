//! End-to-end discovery and validation over real Rust source trees in `tests/fixtures`.

use camino::Utf8PathBuf;
use dashgen_lib::error::ErrorKind;
use dashgen_lib::generation::{ExtraSeriesOptions, GenerationOptions, OutputModel, generate};
use dashgen_lib::syntax::load_units;

fn fixture(name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("tests/fixtures/{name}/src"))
}

fn generate_fixture(name: &str, options: &GenerationOptions) -> Result<OutputModel, dashgen_lib::error::GenerationError> {
    let units = load_units(&[fixture(name)]).unwrap();
    generate(&units, options)
}

#[test]
#[cfg_attr(miri, ignore = "Miri detects UB in external rowan crate")]
fn test_metrics_in_discovery_order() {
    let model = generate_fixture("calculator", &GenerationOptions::default()).unwrap();

    let names: Vec<_> = model.metrics.iter().map(|m| m.fully_qualified_name.as_str()).collect();
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
            "prefix_t",
            "prefix_hb"
        ]
    );

    let groupings: Vec<_> = model.metrics.iter().map(|m| m.grouping.as_str()).collect();
    assert_eq!(
        groupings,
        vec!["", " by (city)", " by (type,breed)", "", "", "", " by (quantile)", " by (quantile)", ""]
    );

    // The duplicate counter in reporting.rs keeps the first location.
    assert!(model.metrics[0].location.unit.ends_with("lib.rs"));
    assert_eq!(model.summary.unique_metrics, 9);
}

#[test]
#[cfg_attr(miri, ignore = "Miri detects UB in external rowan crate")]
fn test_alert_rules_from_comments() {
    let model = generate_fixture("calculator", &GenerationOptions::default()).unwrap();
    let rules = &model.rules;

    assert_eq!(rules.group_name, "Application auto-generated alerts");
    assert_eq!(rules.rules.len(), 2);

    let calc_error = &rules.rules[0];
    assert_eq!(calc_error.name, "ApplicationCalcError");
    assert_eq!(calc_error.expression, "sum(rate(prefix_errors{error_type='e'}[1m])) > 0");
    assert_eq!(calc_error.duration, "10s");
    assert_eq!(calc_error.labels["severity"], "pager");
    assert_eq!(calc_error.labels["team"], "myTeam");
    assert_eq!(calc_error.annotations["description"], "A calculation failed unexpectedly");

    let calc_problems = &rules.rules[1];
    assert_eq!(calc_problems.name, "ApplicationCalcProblems");
    assert_eq!(calc_problems.expression, "sum(rate(prefix_errors{error_type='e'}[10m])) > 1");
    assert_eq!(calc_problems.duration, "5m");
    assert_eq!(calc_problems.labels["severity"], "warning");
}

#[test]
#[cfg_attr(miri, ignore = "Miri detects UB in external rowan crate")]
fn test_runs_are_repeatable() {
    let first = generate_fixture("calculator", &GenerationOptions::default()).unwrap();
    let second = generate_fixture("calculator", &GenerationOptions::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
#[cfg_attr(miri, ignore = "Miri detects UB in external rowan crate")]
fn test_custom_separator() {
    let model = generate_fixture("separator", &GenerationOptions::default()).unwrap();

    let names: Vec<_> = model.metrics.iter().map(|m| m.fully_qualified_name.as_str()).collect();
    assert_eq!(names, vec!["prefix:c", "prefix:queue_depth", "prefix:disk_full"]);
    assert_eq!(model.active_prefix, "prefix:");
    assert_eq!(
        model.rules.rules[0].expression,
        "sum(rate(prefix:errors{error_type='disk_full'}[1m])) > 0"
    );
}

#[test]
#[cfg_attr(miri, ignore = "Miri detects UB in external rowan crate")]
fn test_two_namespaces() {
    let model = generate_fixture("two_namespaces", &GenerationOptions::default()).unwrap();

    let owners: Vec<_> = model
        .metrics
        .iter()
        .map(|m| (m.fully_qualified_name.as_str(), m.namespace_prefix.as_str()))
        .collect();
    assert_eq!(
        owners,
        vec![
            ("ingest_records", "ingest_"),
            ("ingest_failed", "ingest_"),
            ("query_latency", "query_"),
            ("query_failed", "query_"),
        ]
    );

    let expressions: Vec<_> = model.rules.rules.iter().map(|r| r.expression.as_str()).collect();
    assert_eq!(
        expressions,
        vec![
            "sum(rate(ingest_errors{error_type='failed'}[5m])) > 0.5",
            "sum(rate(query_errors{error_type='failed'}[1m])) > 0",
        ]
    );

    // Falls back to the description when the summary is missing.
    assert_eq!(model.rules.rules[1].annotations["summary"], "A query failed");
}

#[test]
#[cfg_attr(miri, ignore = "Miri detects UB in external rowan crate")]
fn test_summary_fallback_can_be_disabled() {
    let options = GenerationOptions {
        summary_falls_back_to_description: false,
        ..GenerationOptions::default()
    };

    let err = generate_fixture("two_namespaces", &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("QueryQueryFailures"));
}

#[test]
#[cfg_attr(miri, ignore = "Miri detects UB in external rowan crate")]
fn test_second_defaults_directive_is_rejected() {
    let err = generate_fixture("duplicate_defaults", &GenerationOptions::default()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    let message = err.to_string();
    assert!(message.contains("a.rs:3"), "{message}");
    assert!(message.contains("nested/far/b.rs:10"), "{message}");
}

#[test]
#[cfg_attr(miri, ignore = "Miri detects UB in external rowan crate")]
fn test_empty_rate_threshold_is_rejected() {
    let err = generate_fixture("bad_threshold", &GenerationOptions::default()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    let message = err.to_string();
    assert!(message.contains(r#""" is not a number"#), "{message}");
    assert!(message.contains("bad_threshold/src/lib.rs:3"), "{message}");
}

#[test]
#[cfg_attr(miri, ignore = "Miri detects UB in external rowan crate")]
fn test_default_prefix_fills_unresolved_prefix() {
    let model = generate_fixture("unset_prefix", &GenerationOptions::default()).unwrap();
    assert_eq!(model.metrics[0].fully_qualified_name, "requests");

    let mut options = GenerationOptions::default();
    options.discovery.default_prefix = Some("svc".into());

    let model = generate_fixture("unset_prefix", &options).unwrap();
    assert_eq!(model.metrics[0].fully_qualified_name, "svc_requests");
    assert_eq!(model.raw_prefix, "svc");
}

#[test]
#[cfg_attr(miri, ignore = "Miri detects UB in external rowan crate")]
fn test_extra_series() {
    let options = GenerationOptions {
        extra_series: ExtraSeriesOptions {
            values: vec!["getBlock".into(), "getBalance".into()],
            ..ExtraSeriesOptions::default()
        },
        ..GenerationOptions::default()
    };

    let model = generate_fixture("calculator", &options).unwrap();
    let titles: Vec<_> = model.extra_series.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["JRPC: getBlock", "JRPC: getBalance"]);
    assert_eq!(model.extra_series[0].fully_qualified_name, "prefix_jsonrpc2_server");
    assert_eq!(model.extra_series[0].label_filter, r#"method="getBlock""#);
}

#[test]
#[cfg_attr(miri, ignore = "Miri detects UB in external rowan crate")]
fn test_other_metrics_type_finds_nothing() {
    let mut options = GenerationOptions::default();
    options.discovery.metrics_type = "StatsdClient".into();

    let err = generate_fixture("calculator", &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Discovery);
    assert!(err.to_string().contains("StatsdClient"));
}

#[test]
#[cfg_attr(miri, ignore = "Miri detects UB in external rowan crate")]
fn test_static_and_lifetime_bound_receivers() {
    let model = generate_fixture("global_metrics", &GenerationOptions::default()).unwrap();

    let names: Vec<_> = model.metrics.iter().map(|m| m.fully_qualified_name.as_str()).collect();
    assert_eq!(names, vec!["svc_hits", "svc_depth", "svc_latency"]);
}
