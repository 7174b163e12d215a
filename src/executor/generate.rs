use std::time::Duration;
use async_stream::stream;
use futures::stream::{BoxStream, StreamExt};
use log::debug;
use tokio_util::sync::CancellationToken;
use crate::connector::BatchSource;
use crate::executor::ticker;
use crate::state::PipelineMetrics;
use crate::stream::{Batch, HandoffSender};

pub struct GenerateExecutor {
    batches: BoxStream<'static, Batch>,
    output: HandoffSender<Batch>,
    metrics: PipelineMetrics,
}

impl GenerateExecutor {
    pub fn new(source: Box<dyn BatchSource>,
               period: Duration,
               output: HandoffSender<Batch>,
               metrics: PipelineMetrics) -> Self {
        GenerateExecutor {
            batches: Self::batch_stream(source, period),
            output,
            metrics,
        }
    }

    /// One batch from `source` per tick of `period`.
    pub fn batch_stream(mut source: Box<dyn BatchSource>, period: Duration) -> BoxStream<'static, Batch> {
        stream! {
            let mut ticks = ticker(period);
            loop {
                ticks.tick().await;
                yield source.next_batch();
            }
        }.boxed()
    }

    /// Hand every generated batch to a worker, waiting until one takes it.
    pub async fn execute(mut self, cancel: CancellationToken) {
        loop {
            let batch = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                batch = self.batches.next() => match batch {
                    Some(batch) => batch,
                    None => break,
                },
            };
            self.metrics.inc_batches_generated();
            debug!("generated batch {:?}", batch.values());

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                sent = self.output.send(batch) => {
                    if sent.is_err() {
                        debug!("no worker left to take batches");
                        break;
                    }
                }
            }
        }
        debug!("generator stopped");
    }
}
