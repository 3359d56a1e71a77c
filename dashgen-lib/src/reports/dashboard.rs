use crate::discovery::naming::{normalize_name, truncate_at_word};
use crate::discovery::{Metric, MetricKind};
use crate::generation::{ExtraSeries, OutputModel};
use crate::{HashSet, Result};
use core::fmt::Write;
use serde_json::{Value, json};

const PANEL_WIDTH: u32 = 12;
const PANEL_HEIGHT: u32 = 9;
const PANELS_PER_ROW: u32 = 2;
const MAX_UID_LEN: usize = 40;
const QUANTILES: &str = r#"quantile=~"0.5|0.75|0.9|0.99""#;

/// Dashboard-level settings that do not come from the analyzed code.
#[derive(Debug, Clone, Default)]
pub struct DashboardSettings {
    pub title: Option<String>,
    pub uid: Option<String>,
    pub tags: Vec<String>,

    /// Used for the title and uid when the code sets no prefix.
    pub default_prefix: Option<String>,
}

/// Render a Grafana dashboard with one panel per metric and extra series.
pub fn generate<W: Write>(model: &OutputModel, settings: &DashboardSettings, writer: &mut W) -> Result<()> {
    let default_prefix = settings.default_prefix.as_deref().unwrap_or_default();

    let title = settings.title.clone().unwrap_or_else(|| {
        let raw = or_default(&model.raw_prefix, default_prefix);
        format!("{} Visualised Metrics", normalize_name(raw, false))
    });

    let uid = settings
        .uid
        .clone()
        .unwrap_or_else(|| format!("{}generated", or_default(&model.active_prefix, default_prefix)));
    let uid = truncate_at_word(&uid, MAX_UID_LEN);

    let mut panels = Vec::new();
    let mut error_namespaces = HashSet::default();

    for metric in &model.metrics {
        if metric.kind == MetricKind::Errors && !error_namespaces.insert(metric.namespace_prefix.as_str()) {
            continue;
        }

        let (expr, format) = metric_target(metric);
        let title = if metric.kind == MetricKind::Errors {
            "Errors by type"
        } else {
            metric.raw_name.as_str()
        };

        panels.push(panel(panels.len(), title, &expr, format));
    }

    for series in &model.extra_series {
        panels.push(panel(panels.len(), &series.title, &extra_series_target(series), "dtdurations"));
    }

    let dashboard = json!({
        "annotations": {
            "list": [{
                "builtIn": 1,
                "datasource": "-- Grafana --",
                "enable": true,
                "hide": true,
                "iconColor": "rgba(0, 211, 255, 1)",
                "name": "Annotations & Alerts",
                "type": "dashboard",
            }],
        },
        "editable": true,
        "graphTooltip": 0,
        "links": [],
        "panels": panels,
        "refresh": false,
        "schemaVersion": 16,
        "style": "dark",
        "tags": settings.tags,
        "templating": {"list": []},
        "time": {"from": "now/d", "to": "now"},
        "timepicker": {
            "refresh_intervals": ["5s", "10s", "30s", "1m", "5m", "15m", "30m", "1h", "2h", "1d"],
            "time_options": ["5m", "15m", "1h", "6h", "12h", "24h", "2d", "7d", "30d"],
        },
        "timezone": "",
        "title": title,
        "uid": uid,
        "version": 1,
    });

    writeln!(writer, "{}", serde_json::to_string_pretty(&dashboard)?)?;
    Ok(())
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() { default } else { value }
}

/// The query and y-axis format for a metric's panel.
fn metric_target(metric: &Metric) -> (String, &'static str) {
    let fqn = &metric.fully_qualified_name;
    let grouping = &metric.grouping;

    match metric.kind {
        MetricKind::Counter => (format!("sum(rate({fqn}[15m])){grouping}"), "short"),
        MetricKind::Gauge => (format!("sum({fqn}){grouping}"), "short"),
        MetricKind::Histogram => (format!("histogram_quantile(0.95, sum(rate({fqn}_bucket[5m])) by (le))"), "short"),
        MetricKind::Summary | MetricKind::Timer => (format!("avg({fqn}{{{QUANTILES}}}){grouping}"), "dtdurations"),
        MetricKind::Errors => (format!("sum({}errors) by (error_type)", metric.namespace_prefix), "short"),
    }
}

fn extra_series_target(series: &ExtraSeries) -> String {
    format!(
        "avg({}{{{},{QUANTILES}}}){}",
        series.fully_qualified_name, series.label_filter, series.grouping
    )
}

fn panel(index: usize, title: &str, expr: &str, format: &str) -> Value {
    let index = u32::try_from(index).unwrap_or(u32::MAX);
    let axis = json!({"format": format, "logBase": 1, "show": true});

    json!({
        "datasource": "prometheus",
        "fill": 1,
        "gridPos": {
            "h": PANEL_HEIGHT,
            "w": PANEL_WIDTH,
            "x": (index % PANELS_PER_ROW) * PANEL_WIDTH,
            "y": (index / PANELS_PER_ROW) * PANEL_HEIGHT,
        },
        "id": index.saturating_add(1),
        "legend": {"show": true},
        "lines": true,
        "linewidth": 1,
        "targets": [{"expr": expr, "intervalFactor": 1, "refId": "A"}],
        "title": title,
        "tooltip": {"shared": true, "sort": 0, "value_type": "individual"},
        "type": "graph",
        "yaxes": [axis.clone(), axis],
    })
}
