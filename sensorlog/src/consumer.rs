use std::thread;
use std::time::Duration;

use spmcbuf::{BufferError, SharedQueue};
use tracing::{debug, warn};

use crate::sink::SharedSink;

/// Drain the queue into the sink until the end-of-stream marker is
/// observed. Returns the number of readings persisted.
///
/// The sink lock is held only around the write+flush of a single reading.
/// Errors other than end-of-stream are logged and the loop retries
/// immediately, matching the transient-failure contract of the queue.
pub fn run_consumer(queue: &SharedQueue, sink: &SharedSink, drain_delay: Duration) -> u64 {
    let mut consumed = 0u64;

    loop {
        match queue.remove() {
            Ok(reading) => {
                {
                    let mut sink = sink.lock();
                    if let Err(e) = sink.write_reading(&reading) {
                        warn!(id = reading.id, error = %e, "failed to persist reading");
                    }
                }
                consumed += 1;
                if !drain_delay.is_zero() {
                    thread::sleep(drain_delay);
                }
            }
            Err(BufferError::EndOfStream) => break,
            Err(e) => warn!(error = %e, "queue read failed, retrying"),
        }
    }

    debug!(consumed, "worker finished");
    consumed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::CsvSink;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use telemetry::Reading;
    use tempfile::tempdir;

    #[test]
    fn test_consumer_drains_until_marker() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let sink: SharedSink = Arc::new(Mutex::new(CsvSink::create(&path, false).unwrap()));

        let queue = SharedQueue::new();
        for id in 1..=3 {
            queue
                .insert(Reading {
                    id,
                    value: f64::from(id) * 2.0,
                    timestamp: i64::from(id),
                })
                .unwrap();
        }
        queue.insert(Reading::sentinel()).unwrap();

        let consumed = run_consumer(&queue, &sink, Duration::ZERO);

        assert_eq!(consumed, 3);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "1,2.00,1\n2,4.00,2\n3,6.00,3\n");
        // the marker stays behind for any other worker
        assert_eq!(queue.len(), 1);
    }
}
