#[cfg(not(feature = "loom"))]
pub(crate) use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "loom")]
pub(crate) use loom::sync::atomic::{AtomicU64, Ordering};

#[cfg(not(feature = "loom"))]
pub(crate) use std::sync::{Condvar, Mutex};

#[cfg(feature = "loom")]
pub(crate) use loom::sync::{Condvar, Mutex};
