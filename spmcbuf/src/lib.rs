//! # spmcbuf - Single-Producer Multi-Consumer Blocking Buffer
//!
//! Unbounded FIFO buffer coordinating one producer thread with a pool of
//! consumer threads. The whole structure is serialized behind a single
//! mutex; consumers block on a condition variable while the buffer is
//! empty, and shutdown is signaled cooperatively with per-consumer
//! end-of-stream markers rather than forced cancellation.
//!
//! ## Creating the queue
//!
//! The coordinator creates the queue before any actor starts and shares it
//! behind an [`Arc`](std::sync::Arc):
//!
//! ```rust
//! use spmcbuf::SharedQueue;
//! use std::sync::Arc;
//!
//! let queue = Arc::new(SharedQueue::new());
//! ```
//!
//! ## Producing
//!
//! [`SharedQueue::insert`] appends at the tail and wakes one blocked
//! consumer. It never blocks; the buffer is unbounded and only a failed
//! allocation makes an insert fail:
//!
//! ```rust
//! use spmcbuf::SharedQueue;
//! use telemetry::Reading;
//!
//! let queue = SharedQueue::new();
//! let reading = Reading { id: 12, value: 21.5, timestamp: 1_700_000_000 };
//!
//! if queue.insert(reading).is_err() {
//!     queue.increment_dropped();
//! }
//! # Ok::<(), spmcbuf::BufferError>(())
//! ```
//!
//! ## Consuming
//!
//! [`SharedQueue::remove`] pops the head, suspending the calling thread
//! while the queue is empty. Emptiness is re-checked after every wake, so
//! spurious wake-ups and faster siblings are handled by the queue, not the
//! caller:
//!
//! ```rust
//! # use spmcbuf::SharedQueue;
//! # use telemetry::Reading;
//! # let queue = SharedQueue::new();
//! # queue.insert(Reading { id: 1, value: 0.5, timestamp: 0 })?;
//! let reading = queue.remove()?;
//! # assert_eq!(reading.id, 1);
//! # Ok::<(), spmcbuf::BufferError>(())
//! ```
//!
//! ## Termination
//!
//! The producer enqueues exactly one sentinel reading per consumer when its
//! source is exhausted. A sentinel at the head is reported as
//! [`BufferError::EndOfStream`] and deliberately left in the queue, so each
//! consumer observes its own marker and exits; `remove` is idempotent while
//! draining:
//!
//! ```rust
//! use spmcbuf::{BufferError, SharedQueue};
//! use telemetry::Reading;
//!
//! let queue = SharedQueue::new();
//! let consumers = 2;
//!
//! queue.insert(Reading { id: 1, value: 10.5, timestamp: 100 })?;
//! for _ in 0..consumers {
//!     queue.insert(Reading::sentinel())?;
//! }
//!
//! let mut collected = 0;
//! loop {
//!     match queue.remove() {
//!         Ok(_) => collected += 1,
//!         Err(BufferError::EndOfStream) => break,
//!         Err(e) => return Err(e),
//!     }
//! }
//! assert_eq!(collected, 1);
//! # Ok::<(), spmcbuf::BufferError>(())
//! ```
//!
//! ## Monitoring
//!
//! ```rust
//! # use spmcbuf::SharedQueue;
//! # let queue = SharedQueue::new();
//! let queued = queue.len();
//! let dropped = queue.dropped();
//! ```

pub use error::BufferError;
pub use queue::SharedQueue;

pub mod error;
#[cfg(all(test, feature = "loom"))]
pub(crate) mod loom;
pub mod queue;
pub(crate) mod sync;
