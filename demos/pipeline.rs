//! Full pipeline driver: configurable worker counts, timed run.
//!
//! Usage: cargo run --example pipeline -- [producers] [consumers] [target]

use std::env;
use std::process;

use tileflow::{run, PipelineConfig};

fn main() {
    let mut args = env::args().skip(1);
    let mut config = PipelineConfig::default();
    if let Some(value) = args.next() {
        config.producers = parse(&value, "producers");
    }
    if let Some(value) = args.next() {
        config.consumers = parse(&value, "consumers");
    }
    if let Some(value) = args.next() {
        config.target = parse(&value, "target");
    }

    println!(
        "{} producers, {} consumers, {} work items ({}x{} matrices, tile {}, buffer capacity {})",
        config.producers,
        config.consumers,
        config.target,
        config.dim,
        config.dim,
        config.tile_size,
        config.capacity
    );

    match run(&config) {
        Ok(report) => {
            println!("produced {} / consumed {}", report.produced, report.consumed);
            println!(
                "elapsed: {:?} ({:.0} items/sec)",
                report.elapsed,
                report.throughput()
            );
        }
        Err(error) => {
            eprintln!("invalid configuration: {error}");
            process::exit(1);
        }
    }
}

fn parse(value: &str, name: &str) -> usize {
    value.parse().unwrap_or_else(|_| {
        eprintln!("{name} must be a non-negative integer, got {value:?}");
        process::exit(1);
    })
}
