#[cfg(all(test, feature = "loom"))]
mod tests {
    use crate::{BufferError, SharedQueue};
    use loom::model::Builder;
    use loom::sync::Arc;
    use loom::thread;
    use telemetry::Reading;

    fn drain(queue: &SharedQueue) -> Vec<u16> {
        let mut got = Vec::new();
        loop {
            match queue.remove() {
                Ok(r) => got.push(r.id),
                Err(BufferError::EndOfStream) => return got,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
    }

    #[test]
    fn test_producer_two_consumers_terminate() {
        let mut builder = Builder::new();
        if builder.preemption_bound.is_none() {
            builder.preemption_bound = Some(3);
        }

        builder.check(|| {
            let queue = Arc::new(SharedQueue::new());
            let consumers = 2;

            let producer = {
                let queue = queue.clone();
                thread::spawn(move || {
                    for id in 1..=2u16 {
                        queue
                            .insert(Reading {
                                id,
                                value: f64::from(id),
                                timestamp: i64::from(id),
                            })
                            .unwrap();
                    }
                    for _ in 0..consumers {
                        queue.insert(Reading::sentinel()).unwrap();
                    }
                })
            };

            let handles: Vec<_> = (0..consumers)
                .map(|_| {
                    let queue = queue.clone();
                    thread::spawn(move || drain(&queue))
                })
                .collect();

            producer.join().unwrap();

            let mut all: Vec<u16> = Vec::new();
            for handle in handles {
                let got = handle.join().unwrap();
                assert!(got.windows(2).all(|w| w[0] < w[1]));
                all.extend(got);
            }
            all.sort_unstable();
            assert_eq!(all, vec![1, 2]);
        });
    }

    #[test]
    fn test_single_producer_single_consumer_fifo() {
        let mut builder = Builder::new();
        if builder.preemption_bound.is_none() {
            builder.preemption_bound = Some(3);
        }

        builder.check(|| {
            let queue = Arc::new(SharedQueue::new());

            let producer = {
                let queue = queue.clone();
                thread::spawn(move || {
                    for id in 1..=3u16 {
                        queue
                            .insert(Reading {
                                id,
                                value: 0.0,
                                timestamp: 0,
                            })
                            .unwrap();
                    }
                    queue.insert(Reading::sentinel()).unwrap();
                })
            };

            let got = drain(&queue);

            producer.join().unwrap();
            assert_eq!(got, vec![1, 2, 3]);
        });
    }
}
