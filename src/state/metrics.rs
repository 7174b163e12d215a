use std::fmt::{self, Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct PipelineMetrics {
    inner: Arc<MetricsInner>,
}

#[derive(Default)]
struct MetricsInner {
    batches_generated: AtomicU64,
    batches_reduced: AtomicU64,
    results_drained: AtomicU64,
    reports: AtomicU64,
}

impl PipelineMetrics {
    pub fn inc_batches_generated(&self) {
        self.inner.batches_generated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_batches_reduced(&self) {
        self.inner.batches_reduced.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_results_drained(&self) {
        self.inner.results_drained.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_reports(&self) {
        self.inner.reports.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            batches_generated: self.inner.batches_generated.load(Ordering::Relaxed),
            batches_reduced: self.inner.batches_reduced.load(Ordering::Relaxed),
            results_drained: self.inner.results_drained.load(Ordering::Relaxed),
            reports: self.inner.reports.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub batches_generated: u64,
    pub batches_reduced: u64,
    pub results_drained: u64,
    pub reports: u64,
}

impl Display for MetricsSnapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "generated={} reduced={} drained={} reports={}",
            self.batches_generated, self.batches_reduced, self.results_drained, self.reports
        )
    }
}
