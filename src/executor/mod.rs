mod top_k;
mod generate;
mod worker;
mod report;
mod drain;

use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

pub use self::top_k::top_k;
pub use self::generate::GenerateExecutor;
pub use self::worker::WorkerExecutor;
pub use self::report::ReportExecutor;
pub use self::drain::DrainExecutor;

/// How many of the largest values each worker keeps from a batch.
pub const TOP_K: usize = 3;

/// A fixed-period timer whose first tick fires one full period from now.
///
/// A consumer that falls behind gets one late tick and then rejoins the original
/// schedule instead of receiving a burst.
pub(crate) fn ticker(period: Duration) -> Interval {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}
