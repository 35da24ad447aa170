//! Metrics collection and Prometheus integration service.

use prometheus::{
    CounterVec, Gauge, HistogramOpts, HistogramVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::time::{Duration, Instant};

/// Application metrics collector for Prometheus integration
#[derive(Clone)]
pub struct AppMetrics {
    pub registry: Registry,
    pub http_requests_total: CounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub app_uptime_seconds: Gauge,
    pub app_info: CounterVec,
    pub rate_limit_rejections_total: CounterVec,
    pub rate_limit_tracked_identifiers: IntGauge,
    pub notifications_total: CounterVec,
    pub start_time: Instant,
}

impl AppMetrics {
    /// Create a new metrics collector on its own registry
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = CounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "status", "route"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![
                0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["method", "route"],
        )?;

        let app_uptime_seconds = Gauge::new("app_uptime_seconds", "Application uptime in seconds")?;

        let app_info = CounterVec::new(
            Opts::new("app_info", "Application information"),
            &["version"],
        )?;

        let rate_limit_rejections_total = CounterVec::new(
            Opts::new(
                "rate_limit_rejections_total",
                "Requests rejected by the rate limiter, by preset",
            ),
            &["preset"],
        )?;

        let rate_limit_tracked_identifiers = IntGauge::new(
            "rate_limit_tracked_identifiers",
            "Identifiers with a rate-limit window in the store",
        )?;

        let notifications_total = CounterVec::new(
            Opts::new(
                "notifications_total",
                "Notification dispatch attempts by channel and outcome",
            ),
            &["channel", "outcome"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(app_uptime_seconds.clone()))?;
        registry.register(Box::new(app_info.clone()))?;
        registry.register(Box::new(rate_limit_rejections_total.clone()))?;
        registry.register(Box::new(rate_limit_tracked_identifiers.clone()))?;
        registry.register(Box::new(notifications_total.clone()))?;

        app_info
            .with_label_values(&[env!("CARGO_PKG_VERSION")])
            .inc();

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            app_uptime_seconds,
            app_info,
            rate_limit_rejections_total,
            rate_limit_tracked_identifiers,
            notifications_total,
            start_time: Instant::now(),
        })
    }

    /// Record an HTTP request with method, route, status, and duration
    pub fn record_request(&self, method: &str, route: &str, status: u16, duration: Duration) {
        if route == "/api/metrics" {
            // Scrapes would otherwise dominate the request counters
            return;
        }

        self.http_requests_total
            .with_label_values(&[method, &status.to_string(), route])
            .inc();

        self.http_request_duration_seconds
            .with_label_values(&[method, route])
            .observe(duration.as_secs_f64());
    }

    pub fn record_rate_limit_rejection(&self, preset: &str) {
        self.rate_limit_rejections_total
            .with_label_values(&[preset])
            .inc();
    }

    pub fn set_tracked_identifiers(&self, count: usize) {
        self.rate_limit_tracked_identifiers
            .set(i64::try_from(count).unwrap_or(i64::MAX));
    }

    pub fn record_notification(&self, channel: &str, outcome: &str) {
        self.notifications_total
            .with_label_values(&[channel, outcome])
            .inc();
    }

    /// Update the application uptime gauge
    pub fn update_uptime(&self) {
        self.app_uptime_seconds
            .set(self.start_time.elapsed().as_secs_f64());
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder.encode_to_string(&metric_families)
    }
}
