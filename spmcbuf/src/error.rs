use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BufferError {
    #[error("buffer allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("no further data: the stream has ended")]
    EndOfStream,

    #[error("buffer lock poisoned by a panicked thread")]
    Poisoned,
}
