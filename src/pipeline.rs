//! Worker roles, run configuration, and the spawn/join harness.

use core::fmt;
use std::hint;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::buffer::BoundedBuffer;
use crate::counter::WorkTarget;
use crate::matrix::WorkItem;

/// Upper bound on threads per role accepted by
/// [`PipelineConfig::validate`].
pub const MAX_WORKERS: usize = 512;

/// Which side of the buffer a worker thread drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Generates work items and pushes them into the buffer.
    Producer,
    /// Pops work items from the buffer and multiplies them.
    Consumer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Producer => write!(f, "producer"),
            Role::Consumer => write!(f, "consumer"),
        }
    }
}

/// Tunable knobs for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Buffer capacity in work items.
    pub capacity: usize,
    /// Matrix side length.
    pub dim: usize,
    /// Tile side for the multiply kernel.
    pub tile_size: usize,
    /// Work units each role processes in total, across all its threads.
    pub target: usize,
    /// Producer thread count.
    pub producers: usize,
    /// Consumer thread count.
    pub consumers: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            capacity: 5,
            dim: 20,
            tile_size: 8,
            target: 20,
            producers: 2,
            consumers: 3,
        }
    }
}

/// Rejected configuration, reported before any thread is spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Buffer capacity was 0.
    ZeroCapacity,
    /// Matrix dimension was 0.
    ZeroDim,
    /// Tile size was 0.
    ZeroTileSize,
    /// A role had no threads.
    NoWorkers(Role),
    /// A role asked for more than [`MAX_WORKERS`] threads.
    TooManyWorkers(Role, usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCapacity => write!(f, "buffer capacity must be at least 1"),
            ConfigError::ZeroDim => write!(f, "matrix dimension must be at least 1"),
            ConfigError::ZeroTileSize => write!(f, "tile size must be at least 1"),
            ConfigError::NoWorkers(role) => write!(f, "need at least 1 {role} thread"),
            ConfigError::TooManyWorkers(role, count) => {
                write!(f, "{count} {role} threads exceeds the limit of {MAX_WORKERS}")
            }
        }
    }
}

impl PipelineConfig {
    /// Check the configuration before spawning anything. A `target` of 0 is
    /// valid: every worker's first claim fails and the run completes
    /// immediately.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.dim == 0 {
            return Err(ConfigError::ZeroDim);
        }
        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        for (role, count) in [
            (Role::Producer, self.producers),
            (Role::Consumer, self.consumers),
        ] {
            if count == 0 {
                return Err(ConfigError::NoWorkers(role));
            }
            if count > MAX_WORKERS {
                return Err(ConfigError::TooManyWorkers(role, count));
            }
        }
        Ok(())
    }
}

/// Totals observed after every worker has joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineReport {
    /// Production units claimed over the whole run.
    pub produced: usize,
    /// Consumption units claimed over the whole run.
    pub consumed: usize,
    /// Wall-clock time from first spawn to last join.
    pub elapsed: Duration,
}

impl PipelineReport {
    /// Work units consumed per second of wall-clock time.
    pub fn throughput(&self) -> f64 {
        if self.consumed == 0 {
            return 0.0;
        }
        self.consumed as f64 / self.elapsed.as_secs_f64()
    }
}

/// Single worker entry point, parameterized by role.
///
/// Loops until the role's target claim fails. A producer claims a production
/// unit, fills a fresh random pair, and blocks on a free slot; a consumer
/// claims a consumption unit, blocks on a filled slot, and multiplies what
/// it receives. The claim deliberately precedes the buffer wait on both
/// sides: the target counters bound how much work happens in total, while
/// the buffer's own semaphores pace the actual transfer.
///
/// Returns the number of work units this thread handled.
pub fn run_worker(
    role: Role,
    buffer: &BoundedBuffer<WorkItem>,
    target: &WorkTarget,
    config: &PipelineConfig,
) -> usize {
    let mut handled = 0;
    match role {
        Role::Producer => {
            let mut rng = rand::rng();
            while target.claim_production() {
                let item = WorkItem::random(config.dim, &mut rng);
                buffer.send(item);
                handled += 1;
            }
        }
        Role::Consumer => {
            while target.claim_consumption() {
                let (item, _slot) = buffer.recv();
                hint::black_box(item.process(config.tile_size));
                handled += 1;
            }
        }
    }
    handled
}

/// Validate `config`, run the full pipeline, and report totals and elapsed
/// wall-clock time once every worker has joined.
///
/// The buffer and the target counters are constructed here and handed to
/// each worker by shared ownership, so independent runs never share state.
pub fn run(config: &PipelineConfig) -> Result<PipelineReport, ConfigError> {
    config.validate()?;

    let buffer = Arc::new(BoundedBuffer::new(config.capacity));
    let target = Arc::new(WorkTarget::new(config.target));

    let roles = std::iter::repeat(Role::Producer)
        .take(config.producers)
        .chain(std::iter::repeat(Role::Consumer).take(config.consumers));

    let start = Instant::now();
    let mut handles = Vec::with_capacity(config.producers + config.consumers);
    for role in roles {
        let buffer = Arc::clone(&buffer);
        let target = Arc::clone(&target);
        let config = config.clone();
        handles.push(thread::spawn(move || {
            run_worker(role, &buffer, &target, &config)
        }));
    }
    for handle in handles {
        handle.join().expect("worker thread panicked");
    }
    let elapsed = start.elapsed();

    Ok(PipelineReport {
        produced: target.produced(),
        consumed: target.consumed(),
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let config = PipelineConfig {
            capacity: 0,
            ..PipelineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCapacity));

        let config = PipelineConfig {
            consumers: 0,
            ..PipelineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoWorkers(Role::Consumer)));

        let config = PipelineConfig {
            producers: MAX_WORKERS + 1,
            ..PipelineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyWorkers(Role::Producer, MAX_WORKERS + 1))
        );

        let config = PipelineConfig {
            tile_size: 0,
            ..PipelineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTileSize));
    }

    #[test]
    fn zero_target_is_valid_and_instant() {
        let config = PipelineConfig {
            target: 0,
            ..PipelineConfig::default()
        };
        let report = run(&config).unwrap();
        assert_eq!(report.produced, 0);
        assert_eq!(report.consumed, 0);
        assert_eq!(report.throughput(), 0.0);
    }
}
