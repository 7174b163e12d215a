mod metrics;

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

pub use self::metrics::{MetricsSnapshot, PipelineMetrics};

/// Running total shared between the workers and the reporter.
///
/// Cloning hands out another reference to the same counter. The only operations are an
/// atomic add and an atomic load, so no caller ever blocks.
#[derive(Debug, Clone, Default)]
pub struct SumAccumulator {
    inner: Arc<AtomicI64>,
}

impl SumAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, sum: i64) {
        // result channels publish the add to downstream readers
        self.inner.fetch_add(sum, Ordering::Relaxed);
    }

    pub fn load(&self) -> i64 {
        self.inner.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use crate::state::SumAccumulator;

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(SumAccumulator::new().load(), 0);
    }

    #[test]
    fn test_clones_share_counter() {
        let acc = SumAccumulator::new();
        let other = acc.clone();
        other.add(245);
        acc.add(5);
        assert_eq!(acc.load(), 250);
        assert_eq!(other.load(), 250);
    }

    #[test]
    fn test_concurrent_adds() {
        let acc = SumAccumulator::new();
        let threads: i64 = 16;
        let adds_per_thread: i64 = 10_000;
        thread::scope(|s| {
            for t in 0..threads {
                let acc = acc.clone();
                s.spawn(move || {
                    for _ in 0..adds_per_thread {
                        acc.add(t + 1);
                    }
                });
            }
        });
        let expected = (1..=threads).sum::<i64>() * adds_per_thread;
        assert_eq!(acc.load(), expected);
    }
}
