use promenade::{MetricOpts, PrometheusMetrics};
use std::sync::LazyLock;

static METRICS: LazyLock<PrometheusMetrics> = LazyLock::new(|| {
    PrometheusMetrics::new(MetricOpts {
        metric_name_prefix: "svc",
    })
});

fn record<'a>(registry: &'a PrometheusMetrics) {
    registry.counter("hits").inc();
}

fn reset(shared: &'static mut PrometheusMetrics) {
    shared.gauge("depth").set(0.0);
}

pub fn serve() {
    METRICS.histogram("latency").observe(0.5);
    record(&METRICS);
}
