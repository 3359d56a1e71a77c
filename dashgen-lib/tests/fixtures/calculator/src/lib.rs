//! A calculator service instrumented with Prometheus metrics.

use promenade::{MetricOpts, PrometheusMetrics};

mod reporting;

/*
  @AlertDefaults(displayPrefix = Application, severity = warning, team = myTeam)
  @ZeroToleranceErrorAlertRule(name = calcError, errorLabel="e", severity = pager, summary = Calculation error, description = "A calculation failed unexpectedly")
  @ElevatedErrorRateAlertRule(name = calcProblems, errorLabel = e, timeRange = 10m, ratePerSecondThreshold = 1, summary = More errors, description = Too high error rate)
*/

const CITY_LABEL: &str = "city";
const ANIMAL_LABELS: &[&str] = &["type", "breed"];

pub struct Calculator {
    metrics: PrometheusMetrics,
}

impl Calculator {
    pub fn new() -> Self {
        let metrics = PrometheusMetrics::new(MetricOpts { metric_name_prefix: "prefix" });
        Self { metrics }
    }

    pub fn calculate(&self, city: &str, kind: &str, breed: &str) -> Result<u64, String> {
        self.metrics.counter("c").inc();
        self.metrics.counter_with_label("places", CITY_LABEL).with_label(city).inc();
        self.metrics.counter_with_labels("animals", ANIMAL_LABELS).with_labels(&[kind, breed]).inc();

        if city.is_empty() {
            self.metrics.error("e").inc();
            return Err("no city".to_string());
        }

        self.metrics.gauge("g").set(1.0);
        self.metrics.histogram("h").observe(2.0);
        self.metrics.summary("s").observe(3.0);

        let _timer = self.metrics.timer("t");
        Ok(42)
    }
}
