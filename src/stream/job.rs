use futures::future::join_all;
use log::{info, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use crate::config::Config;
use crate::connector::{BatchSource, BlackHole, Print, RandomBatchSource, Sink};
use crate::executor::{DrainExecutor, GenerateExecutor, ReportExecutor, WorkerExecutor};
use crate::state::{MetricsSnapshot, PipelineMetrics, SumAccumulator};
use crate::stream::{rendezvous, TopK};

/// The generate → reduce → report pipeline, before it is started.
///
/// By default batches come from a [`RandomBatchSource`], reports are printed to stdout
/// and reduced results are discarded after draining.
pub struct Pipeline {
    config: Config,
    source: Box<dyn BatchSource>,
    report_sink: Box<dyn Sink<i64>>,
    result_sink: Box<dyn Sink<TopK>>,
    accumulator: SumAccumulator,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Pipeline {
            config,
            source: Box::new(RandomBatchSource::default()),
            report_sink: Box::new(Print::stdout()),
            result_sink: Box::new(BlackHole),
            accumulator: SumAccumulator::new(),
        }
    }

    pub fn with_source(mut self, source: impl BatchSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    pub fn with_report_sink(mut self, sink: impl Sink<i64> + 'static) -> Self {
        self.report_sink = Box::new(sink);
        self
    }

    pub fn with_result_sink(mut self, sink: impl Sink<TopK> + 'static) -> Self {
        self.result_sink = Box::new(sink);
        self
    }

    pub fn with_accumulator(mut self, accumulator: SumAccumulator) -> Self {
        self.accumulator = accumulator;
        self
    }

    pub fn accumulator(&self) -> SumAccumulator {
        self.accumulator.clone()
    }

    /// Spawn all loops on the current tokio runtime.
    ///
    /// One generator feeds `worker_count` workers through a rendezvous channel. Workers
    /// push their results into a channel of capacity `worker_count`, which a single drain
    /// loop empties. The reporter only reads the accumulator.
    pub fn spawn(self) -> RunningPipeline {
        let Pipeline {
            config,
            source,
            report_sink,
            result_sink,
            accumulator,
        } = self;
        let id = Uuid::new_v4();
        let cancel = CancellationToken::new();
        let metrics = PipelineMetrics::default();
        let worker_count = config.worker_count();

        info!("starting pipeline {}: generate every {:?}, report every {:?}, {} workers",
            id, config.generate_interval(), config.report_interval(), worker_count);

        let (data_tx, data_rx) = rendezvous();
        let (result_tx, result_rx) = mpsc::channel(worker_count);
        let mut handles = Vec::with_capacity(worker_count + 3);

        for worker_id in 0..worker_count {
            let worker = WorkerExecutor::new(
                worker_id,
                data_rx.clone(),
                result_tx.clone(),
                accumulator.clone(),
                metrics.clone());
            handles.push(tokio::spawn(worker.execute(cancel.clone())));
        }
        drop(data_rx);
        drop(result_tx);

        let drain = DrainExecutor::new(result_rx, result_sink, metrics.clone());
        handles.push(tokio::spawn(drain.execute(cancel.clone())));

        let reporter = ReportExecutor::new(
            accumulator.clone(),
            config.report_interval(),
            report_sink,
            metrics.clone());
        handles.push(tokio::spawn(reporter.execute(cancel.clone())));

        let generator = GenerateExecutor::new(
            source,
            config.generate_interval(),
            data_tx,
            metrics.clone());
        handles.push(tokio::spawn(generator.execute(cancel.clone())));

        RunningPipeline {
            id,
            cancel,
            handles,
            accumulator,
            metrics,
        }
    }
}

/// Handle to the spawned loops. Dropping it cancels them without waiting.
pub struct RunningPipeline {
    id: Uuid,
    cancel: CancellationToken,
    handles: Vec<JoinHandle<()>>,
    accumulator: SumAccumulator,
    metrics: PipelineMetrics,
}

impl RunningPipeline {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn accumulator(&self) -> &SumAccumulator {
        &self.accumulator
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Cancelling this token stops the pipeline the same way [`RunningPipeline::stop`] does.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Cancel every loop and wait for all of them to exit.
    pub async fn stop(mut self) -> MetricsSnapshot {
        self.cancel.cancel();
        let handles = std::mem::take(&mut self.handles);
        for result in join_all(handles).await {
            if let Err(e) = result {
                warn!("pipeline {} task failed: {}", self.id, e);
            }
        }
        let snapshot = self.metrics.snapshot();
        info!("stopped pipeline {}: {}, sum={}", self.id, snapshot, self.accumulator.load());
        snapshot
    }
}

impl Drop for RunningPipeline {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
