pub mod data_gen;
mod print;
mod black_hole;
mod channel;
mod value;

pub use data_gen::RandomBatchSource;
pub use print::Print;
pub use black_hole::BlackHole;
pub use channel::ChannelSink;
pub use value::ValueSource;

use crate::stream::Batch;

/// Produces the batch emitted on each generation tick.
pub trait BatchSource: Send {
    fn next_batch(&mut self) -> Batch;
}

/// Terminal consumer of the items a pipeline loop produces.
pub trait Sink<T>: Send {
    fn write(&mut self, item: T);
}
