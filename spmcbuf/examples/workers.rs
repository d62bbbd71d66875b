use std::sync::Arc;
use std::thread;
use std::time::Duration;

use spmcbuf::{BufferError, SharedQueue};
use telemetry::Reading;
use tracing::{info, warn};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let queue = Arc::new(SharedQueue::new());
    let workers = 2;

    let producer = {
        let queue = queue.clone();
        thread::spawn(move || {
            for seq in 1..=10u16 {
                let reading = Reading {
                    id: seq,
                    value: f64::from(seq) * 1.5,
                    timestamp: i64::from(seq) * 100,
                };
                if let Err(e) = queue.insert(reading) {
                    queue.increment_dropped();
                    warn!(id = seq, error = %e, "insert failed, dropping reading");
                }
                thread::sleep(Duration::from_millis(10));
            }
            for _ in 0..workers {
                let _ = queue.insert(Reading::sentinel());
            }
            info!("producer finished");
        })
    };

    let handles: Vec<_> = (0..workers)
        .map(|worker| {
            let queue = queue.clone();
            thread::spawn(move || loop {
                match queue.remove() {
                    Ok(reading) => {
                        info!(
                            worker,
                            id = reading.id,
                            value = reading.value,
                            timestamp = reading.timestamp,
                            "processed reading"
                        );
                    }
                    Err(BufferError::EndOfStream) => {
                        info!(worker, "end of stream");
                        return;
                    }
                    Err(e) => warn!(worker, error = %e, "queue read failed, retrying"),
                }
            })
        })
        .collect();

    producer.join().unwrap();
    for handle in handles {
        handle.join().unwrap();
    }

    info!(dropped = queue.dropped(), "all workers finished");
}
