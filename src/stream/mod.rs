mod job;
mod rendezvous;

pub use crate::stream::job::Pipeline;
pub use crate::stream::job::RunningPipeline;
pub use crate::stream::rendezvous::{rendezvous, HandoffReceiver, HandoffSender, RecvError, SendError};

/// A single generated value.
pub type Value = i64;

/// One generated sequence of values, processed as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Batch(Vec<Value>);

impl Batch {
    pub fn new(values: Vec<Value>) -> Self {
        Batch(values)
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }
}

impl From<Vec<Value>> for Batch {
    fn from(values: Vec<Value>) -> Self {
        Batch(values)
    }
}

impl FromIterator<Value> for Batch {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Batch(iter.into_iter().collect())
    }
}

/// The largest values of a batch, ordered from largest to smallest.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopK(Vec<Value>);

impl TopK {
    pub(crate) fn from_sorted(values: Vec<Value>) -> Self {
        debug_assert!(values.windows(2).all(|w| w[0] >= w[1]));
        TopK(values)
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sum(&self) -> i64 {
        self.0.iter().sum()
    }

    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }
}
