use crate::connector::BatchSource;
use crate::stream::Batch;

/// Replays a fixed list of batches, starting over once the list is exhausted.
pub struct ValueSource {
    batches: Vec<Batch>,
    cursor: usize,
}

impl ValueSource {
    pub fn new(batches: Vec<Batch>) -> Self {
        ValueSource { batches, cursor: 0 }
    }

    pub fn repeat(batch: Batch) -> Self {
        Self::new(vec![batch])
    }
}

impl BatchSource for ValueSource {
    fn next_batch(&mut self) -> Batch {
        if self.batches.is_empty() {
            return Batch::default();
        }
        let batch = self.batches[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.batches.len();
        batch
    }
}
