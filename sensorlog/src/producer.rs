use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use spmcbuf::SharedQueue;
use telemetry::{Reading, ReadingReader};
use tracing::{debug, error, warn};

/// Read the source to exhaustion, feeding every reading into the queue,
/// then enqueue one end-of-stream marker per worker.
///
/// A failed insert drops the reading (logged and counted, never retried).
/// The shutdown flag stops ingestion early; the markers are enqueued
/// regardless so every worker still terminates. Returns the number of
/// readings enqueued.
pub fn run_producer<R: Read>(
    source: R,
    queue: &SharedQueue,
    workers: usize,
    read_delay: Duration,
    shutdown: &AtomicBool,
) -> u64 {
    let mut produced = 0u64;

    for result in ReadingReader::new(source) {
        if shutdown.load(Ordering::SeqCst) {
            debug!("shutdown requested, stopping ingestion");
            break;
        }
        match result {
            Ok(reading) => match queue.insert(reading) {
                Ok(()) => produced += 1,
                Err(e) => {
                    queue.increment_dropped();
                    warn!(id = reading.id, error = %e, "insert failed, dropping reading");
                }
            },
            Err(e) => {
                warn!(error = %e, "malformed record, stopping ingestion");
                break;
            }
        }
        if !read_delay.is_zero() {
            thread::sleep(read_delay);
        }
    }

    // one marker per worker, never a shared one
    for _ in 0..workers {
        if let Err(e) = queue.insert(Reading::sentinel()) {
            error!(error = %e, "failed to enqueue end-of-stream marker");
        }
    }

    debug!(produced, "producer finished");
    produced
}
