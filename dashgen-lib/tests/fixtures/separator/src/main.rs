use promenade::{MetricOpts, PrometheusMetrics};

// @ZeroToleranceErrorAlertRule(name = diskFull, errorLabel = disk_full, summary = The disk is full)

fn main() {
    let opts = MetricOpts {
        metric_name_prefix: "prefix",
        prefix_separator: ":",
    };
    let metrics = PrometheusMetrics::new(opts);

    metrics.counter("c").inc();
    metrics.gauge_with_label("queue-depth", "queue").with_label("in").set(0.0);
    metrics.error("disk_full").inc();
}
