use std::io::Read;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread;

use eyre::eyre;
use parking_lot::Mutex;
use spmcbuf::SharedQueue;
use tracing::debug;

use crate::config::PipelineConfig;
use crate::consumer::run_consumer;
use crate::producer::run_producer;
use crate::sink::{CsvSink, SharedSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Readings the producer enqueued.
    pub produced: u64,
    /// Readings the workers persisted.
    pub consumed: u64,
    /// Readings abandoned after a failed insert.
    pub dropped: u64,
}

/// Run the whole pipeline to completion: spawn the producer and the worker
/// pool over a fresh queue, join everything, tear the queue down.
///
/// The queue and the sink lock are created here and handed to the actors;
/// neither outlives the join. The shutdown flag only shortens the
/// producer's reading phase, termination is always signaled through the
/// queue.
pub fn run<R>(
    source: R,
    sink: CsvSink,
    config: &PipelineConfig,
    shutdown: Arc<AtomicBool>,
) -> eyre::Result<PipelineSummary>
where
    R: Read + Send + 'static,
{
    let queue = Arc::new(SharedQueue::new());
    let sink: SharedSink = Arc::new(Mutex::new(sink));
    // a pool of zero workers would leave the stream unconsumed
    let workers = config.workers.max(1);

    debug!(workers, "starting pipeline");

    let producer = {
        let queue = queue.clone();
        let shutdown = shutdown.clone();
        let read_delay = config.read_delay();
        thread::Builder::new()
            .name("producer".to_string())
            .spawn(move || run_producer(source, &queue, workers, read_delay, &shutdown))?
    };

    let mut worker_handles = Vec::with_capacity(workers);
    for worker in 0..workers {
        let queue = queue.clone();
        let sink = sink.clone();
        let drain_delay = config.drain_delay();
        let handle = thread::Builder::new()
            .name(format!("worker-{worker}"))
            .spawn(move || run_consumer(&queue, &sink, drain_delay))?;
        worker_handles.push(handle);
    }

    let produced = producer
        .join()
        .map_err(|_| eyre!("producer thread panicked"))?;
    let mut consumed = 0u64;
    for handle in worker_handles {
        consumed += handle
            .join()
            .map_err(|_| eyre!("worker thread panicked"))?;
    }

    Ok(PipelineSummary {
        produced,
        consumed,
        dropped: queue.dropped(),
    })
}
