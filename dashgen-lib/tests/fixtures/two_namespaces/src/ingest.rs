use promenade::{MetricOpts, PrometheusMetrics};

// @ElevatedErrorRateAlertRule(name = ingestFailures, errorLabel = ingest_failed, ratePerSecondThreshold = 0.5, summary = Ingestion is failing)

pub fn ingest() {
    let metrics = PrometheusMetrics::new(MetricOpts { metric_name_prefix: "ingest" });
    metrics.counter("records").inc();
    metrics.error("failed").inc();
}
