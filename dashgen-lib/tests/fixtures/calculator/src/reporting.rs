use promenade::PrometheusMetrics;

pub fn report(metrics: &PrometheusMetrics, value: f64) {
    // Same counter as the calculator; it is only reported once.
    metrics.counter("c").inc();
    metrics.histogram("hb").observe(value);
}
