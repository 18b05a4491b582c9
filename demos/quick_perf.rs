//! Timing sweep across producer/consumer counts.

use tileflow::{run, PipelineConfig};

const TARGET: usize = 200;
const DIM: usize = 64;
const TILE: usize = 16;

fn main() {
    println!("tileflow Performance Sweep");
    println!("==========================\n");
    println!("{TARGET} work items per run, {DIM}x{DIM} matrices, tile {TILE}\n");

    for (producers, consumers) in [(1, 1), (2, 1), (1, 2), (2, 2), (4, 2), (2, 4), (4, 4)] {
        let config = PipelineConfig {
            capacity: 8,
            dim: DIM,
            tile_size: TILE,
            target: TARGET,
            producers,
            consumers,
        };
        let report = run(&config).expect("sweep configs are valid");
        println!(
            "{producers} producers / {consumers} consumers: {:>10.2?} ({:.0} items/sec)",
            report.elapsed,
            report.throughput()
        );
    }
}
