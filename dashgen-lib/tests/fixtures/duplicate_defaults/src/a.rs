use promenade::{MetricOpts, PrometheusMetrics};

// @AlertDefaults(team = storage)

pub fn store() {
    let metrics = PrometheusMetrics::new(MetricOpts { metric_name_prefix: "store" });
    metrics.counter("writes").inc();
}
