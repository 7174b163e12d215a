use std::time::Duration;
use futures::stream::{BoxStream, StreamExt};
use log::debug;
use tokio_stream::wrappers::IntervalStream;
use tokio_util::sync::CancellationToken;
use crate::connector::Sink;
use crate::executor::ticker;
use crate::state::{PipelineMetrics, SumAccumulator};

/// Emits a snapshot of the accumulator on every tick.
///
/// Snapshots are not aligned with batch boundaries, but since the accumulator only grows
/// they never decrease.
pub struct ReportExecutor {
    sums: BoxStream<'static, i64>,
    sink: Box<dyn Sink<i64>>,
    metrics: PipelineMetrics,
}

impl ReportExecutor {
    pub fn new(accumulator: SumAccumulator,
               period: Duration,
               sink: Box<dyn Sink<i64>>,
               metrics: PipelineMetrics) -> Self {
        let sums = IntervalStream::new(ticker(period))
            .map(move |_| accumulator.load())
            .boxed();
        ReportExecutor { sums, sink, metrics }
    }

    pub async fn execute(mut self, cancel: CancellationToken) {
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                sum = self.sums.next() => match sum {
                    Some(sum) => {
                        self.metrics.inc_reports();
                        self.sink.write(sum);
                    }
                    None => break,
                },
            }
        }
        debug!("reporter stopped");
    }
}
