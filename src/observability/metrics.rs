use prometheus::{
    Encoder, GaugeVec, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub assignments_total: IntCounterVec,
    pub assignment_latency_seconds: HistogramVec,
    pub fleet_refresh_failures_total: IntCounter,
    pub vehicle_utilization: GaugeVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let assignments_total = IntCounterVec::new(
            Opts::new("assignments_total", "Total assignment attempts by outcome"),
            &["outcome"],
        )
        .expect("valid assignments_total metric");

        let assignment_latency_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "assignment_latency_seconds",
                "Latency of assignment attempts in seconds",
            ),
            &["outcome"],
        )
        .expect("valid assignment_latency_seconds metric");

        let fleet_refresh_failures_total = IntCounter::new(
            "fleet_refresh_failures_total",
            "Fleet snapshot fetches that fell back to cached data",
        )
        .expect("valid fleet_refresh_failures_total metric");

        let vehicle_utilization = GaugeVec::new(
            Opts::new("vehicle_utilization", "Vehicle load over capacity [0..1]"),
            &["vehicle_id"],
        )
        .expect("valid vehicle_utilization metric");

        registry
            .register(Box::new(assignments_total.clone()))
            .expect("register assignments_total");
        registry
            .register(Box::new(assignment_latency_seconds.clone()))
            .expect("register assignment_latency_seconds");
        registry
            .register(Box::new(fleet_refresh_failures_total.clone()))
            .expect("register fleet_refresh_failures_total");
        registry
            .register(Box::new(vehicle_utilization.clone()))
            .expect("register vehicle_utilization");

        Self {
            registry,
            assignments_total,
            assignment_latency_seconds,
            fleet_refresh_failures_total,
            vehicle_utilization,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
