use promenade::{MetricOpts, PrometheusMetrics};

// @ElevatedErrorRateAlertRule(name = tooMany, errorLabel = e, ratePerSecondThreshold = "", summary = Too many errors)

pub fn work(metrics: &PrometheusMetrics) {
    let _opts = MetricOpts { metric_name_prefix: "worker" };
    metrics.error("e").inc();
}
