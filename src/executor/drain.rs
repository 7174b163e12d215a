use log::debug;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use crate::connector::Sink;
use crate::state::PipelineMetrics;
use crate::stream::TopK;

/// Empties the result channel so workers are never held up by it for long.
pub struct DrainExecutor {
    input: mpsc::Receiver<TopK>,
    sink: Box<dyn Sink<TopK>>,
    metrics: PipelineMetrics,
}

impl DrainExecutor {
    pub fn new(input: mpsc::Receiver<TopK>, sink: Box<dyn Sink<TopK>>, metrics: PipelineMetrics) -> Self {
        DrainExecutor { input, sink, metrics }
    }

    pub async fn execute(mut self, cancel: CancellationToken) {
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                result = self.input.recv() => match result {
                    Some(result) => {
                        self.metrics.inc_results_drained();
                        self.sink.write(result);
                    }
                    None => break,
                },
            }
        }
        debug!("drain stopped");
    }
}
