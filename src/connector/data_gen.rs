use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::connector::BatchSource;
use crate::stream::{Batch, Value};

/// Number of values in every generated batch.
pub const BATCH_SIZE: usize = 10;

/// Generated values fall in `0..VALUE_UPPER_BOUND`.
pub const VALUE_UPPER_BOUND: Value = 100;

pub struct RandomBatchSource {
    batch_size: usize,
    rng: StdRng,
}

impl RandomBatchSource {
    pub fn new(batch_size: usize) -> Self {
        RandomBatchSource {
            batch_size,
            rng: StdRng::from_entropy(),
        }
    }

    /// Same batches for the same seed; only meant for tests.
    pub fn with_seed(batch_size: usize, seed: u64) -> Self {
        RandomBatchSource {
            batch_size,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomBatchSource {
    fn default() -> Self {
        Self::new(BATCH_SIZE)
    }
}

impl BatchSource for RandomBatchSource {
    fn next_batch(&mut self) -> Batch {
        let rng = &mut self.rng;
        (0..self.batch_size)
            .map(|_| rng.gen_range(0..VALUE_UPPER_BOUND))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::connector::BatchSource;
    use crate::connector::data_gen::{RandomBatchSource, BATCH_SIZE, VALUE_UPPER_BOUND};

    #[test]
    fn test_batch_shape() {
        let mut source = RandomBatchSource::default();
        for _ in 0..100 {
            let batch = source.next_batch();
            assert_eq!(batch.len(), BATCH_SIZE);
            assert!(batch.values().iter().all(|v| (0..VALUE_UPPER_BOUND).contains(v)));
        }
    }

    #[test]
    fn test_seeded_is_repeatable() {
        let mut a = RandomBatchSource::with_seed(32, 7);
        let mut b = RandomBatchSource::with_seed(32, 7);
        for _ in 0..10 {
            assert_eq!(a.next_batch(), b.next_batch());
        }
    }
}
