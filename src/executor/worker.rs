use log::debug;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use crate::executor::{top_k, TOP_K};
use crate::state::{PipelineMetrics, SumAccumulator};
use crate::stream::{Batch, HandoffReceiver, TopK};

pub struct WorkerExecutor {
    id: usize,
    k: usize,
    input: HandoffReceiver<Batch>,
    output: mpsc::Sender<TopK>,
    accumulator: SumAccumulator,
    metrics: PipelineMetrics,
}

impl WorkerExecutor {
    pub fn new(id: usize,
               input: HandoffReceiver<Batch>,
               output: mpsc::Sender<TopK>,
               accumulator: SumAccumulator,
               metrics: PipelineMetrics) -> Self {
        WorkerExecutor {
            id,
            k: TOP_K,
            input,
            output,
            accumulator,
            metrics,
        }
    }

    /// Reduce one batch and fold its sum into the accumulator.
    pub fn process(&self, batch: Batch) -> TopK {
        let top = top_k(batch, self.k);
        self.accumulator.add(top.sum());
        self.metrics.inc_batches_reduced();
        top
    }

    pub async fn execute(self, cancel: CancellationToken) {
        loop {
            let batch = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                batch = self.input.recv() => match batch {
                    Ok(batch) => batch,
                    Err(_) => break,
                },
            };
            let top = self.process(batch);
            debug!("worker {} reduced batch to {:?}", self.id, top.values());

            // the sum is already in the accumulator before the result is visible downstream
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                sent = self.output.send(top) => {
                    if sent.is_err() {
                        break;
                    }
                }
            }
        }
        debug!("worker {} stopped", self.id);
    }
}
