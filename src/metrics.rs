use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // Pre-register counters so they appear even before the first increment.
    counter!("quote_fetch_attempts_total").absolute(0);
    counter!("quote_fetch_failures_total").absolute(0);
    counter!("refresh_runs_total").absolute(0);
    counter!("positions_updated_total").absolute(0);

    gauge!("tracked_positions").set(0.0);

    handle
}
