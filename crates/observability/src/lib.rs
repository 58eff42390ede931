use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct AppMetrics {
    requests_total: AtomicU64,
    entries_created_total: AtomicU64,
    analyses_total: AtomicU64,
    remote_inference_total: AtomicU64,
    remote_failures_total: AtomicU64,
    keyword_overrides_total: AtomicU64,
    auth_failures_total: AtomicU64,
    total_latency_millis: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub entries_created_total: u64,
    pub analyses_total: u64,
    pub remote_inference_total: u64,
    pub remote_failures_total: u64,
    pub keyword_overrides_total: u64,
    pub auth_failures_total: u64,
    pub avg_latency_millis: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_entry_created(&self) {
        self.entries_created_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_analysis(&self) {
        self.analyses_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_remote_inference(&self) {
        self.remote_inference_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_remote_failure(&self) {
        self.remote_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_keyword_override(&self) {
        self.keyword_overrides_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_auth_failure(&self) {
        self.auth_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn observe_latency(&self, duration: Duration) {
        self.total_latency_millis
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests = self.requests_total.load(Ordering::Relaxed);
        let latency = self.total_latency_millis.load(Ordering::Relaxed);

        MetricsSnapshot {
            requests_total: requests,
            entries_created_total: self.entries_created_total.load(Ordering::Relaxed),
            analyses_total: self.analyses_total.load(Ordering::Relaxed),
            remote_inference_total: self.remote_inference_total.load(Ordering::Relaxed),
            remote_failures_total: self.remote_failures_total.load(Ordering::Relaxed),
            keyword_overrides_total: self.keyword_overrides_total.load(Ordering::Relaxed),
            auth_failures_total: self.auth_failures_total.load(Ordering::Relaxed),
            avg_latency_millis: if requests == 0 {
                0.0
            } else {
                latency as f64 / requests as f64
            },
        }
    }
}

pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,moodlog_api=info,moodlog_journal=info,moodlog_ml=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reports_counters_and_average_latency() {
        let metrics = AppMetrics::default();
        metrics.inc_request();
        metrics.inc_request();
        metrics.inc_entry_created();
        metrics.inc_remote_inference();
        metrics.inc_remote_failure();
        metrics.inc_keyword_override();
        metrics.observe_latency(Duration::from_millis(30));
        metrics.observe_latency(Duration::from_millis(10));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.requests_total, 2);
        assert_eq!(snapshot.entries_created_total, 1);
        assert_eq!(snapshot.remote_failures_total, 1);
        assert_eq!(snapshot.keyword_overrides_total, 1);
        assert!((snapshot.avg_latency_millis - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_snapshot_has_zero_latency() {
        assert_eq!(AppMetrics::shared().snapshot().avg_latency_millis, 0.0);
    }
}
