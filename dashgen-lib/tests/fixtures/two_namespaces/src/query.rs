use promenade::{MetricOpts, PrometheusMetrics};

// @ZeroToleranceErrorAlertRule(name = queryFailures, errorLabel = query_failed, description = A query failed)

pub fn query() {
    let metrics = PrometheusMetrics::new(MetricOpts { metric_name_prefix: "query" });
    metrics.timer("latency");
    metrics.error("failed").inc();
}
