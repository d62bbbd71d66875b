// Copyright (C) 2025 Category Labs, Inc.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::collections::VecDeque;

use telemetry::Reading;
use tracing::trace;

use crate::sync::{AtomicU64, Condvar, Mutex, Ordering};
use crate::BufferError;

/// Unbounded FIFO of readings shared between one producer and a pool of
/// consumers. One mutex serializes every access to the internal structure;
/// consumers block on a condition variable while the queue is empty.
pub struct SharedQueue {
    readings: Mutex<VecDeque<Reading>>,
    available: Condvar,
    dropped: AtomicU64,
}

impl SharedQueue {
    pub fn new() -> Self {
        SharedQueue {
            readings: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
            dropped: AtomicU64::new(0),
        }
    }

    /// Append a reading at the tail and wake one blocked consumer.
    ///
    /// Never blocks. Fails only when growing the queue fails
    /// ([`BufferError::Allocation`], the reading is not enqueued) or the
    /// lock is poisoned.
    pub fn insert(&self, reading: Reading) -> Result<(), BufferError> {
        let mut readings = self.readings.lock().map_err(|_| BufferError::Poisoned)?;
        readings.try_reserve(1)?;
        readings.push_back(reading);
        trace!(id = reading.id, len = readings.len(), "reading enqueued");
        // wake one waiter, inserts are serialized by the single producer
        self.available.notify_one();
        Ok(())
    }

    /// Remove and return the head reading, blocking while the queue is
    /// empty.
    ///
    /// The wait releases the lock and re-checks emptiness on every wake.
    /// A sentinel at the head is reported as [`BufferError::EndOfStream`]
    /// and left in place so that every consumer observes it; repeated
    /// calls keep returning `EndOfStream` without mutating the queue.
    pub fn remove(&self) -> Result<Reading, BufferError> {
        let mut readings = self.readings.lock().map_err(|_| BufferError::Poisoned)?;
        loop {
            if readings.front().is_some_and(Reading::is_sentinel) {
                trace!("end-of-stream marker at head");
                return Err(BufferError::EndOfStream);
            }
            if let Some(reading) = readings.pop_front() {
                return Ok(reading);
            }
            readings = self
                .available
                .wait(readings)
                .map_err(|_| BufferError::Poisoned)?;
        }
    }

    /// Number of readings currently queued, sentinels included.
    pub fn len(&self) -> usize {
        self.readings.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record that the producer abandoned a reading after a failed insert.
    pub fn increment_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of readings abandoned by the producer.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl Default for SharedQueue {
    fn default() -> Self {
        Self::new()
    }
}
