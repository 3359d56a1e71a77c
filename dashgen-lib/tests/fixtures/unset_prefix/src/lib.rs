use promenade::{MetricOpts, PrometheusMetrics};

pub fn serve(prefix: &'static str) {
    let metrics = PrometheusMetrics::new(MetricOpts { metric_name_prefix: prefix });
    metrics.counter("requests").inc();
}
