//! tileflow - bounded producer/consumer pipeline for cache-tiled matrix
//! multiplication
//!
//! A fixed-capacity circular buffer guarded by one mutex and two counting
//! semaphores moves pairs of random matrices from producer threads to
//! consumer threads. A shared pair of claim counters caps the total work on
//! each side, so any number of workers agree on "enough" without a central
//! coordinator. Consumers multiply each pair with a cache-tiled kernel.
#![warn(missing_docs)]

mod buffer;
mod counter;
mod matrix;
mod pipeline;
mod semaphore;

pub use buffer::{BoundedBuffer, RecvError, SendError};
pub use counter::WorkTarget;
pub use matrix::{Matrix, WorkItem};
pub use pipeline::{
    run, run_worker, ConfigError, PipelineConfig, PipelineReport, Role, MAX_WORKERS,
};
pub use semaphore::Semaphore;
