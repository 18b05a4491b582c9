//! Minimal 1 producer / 1 consumer run with per-slot progress lines.

use std::sync::Arc;
use std::thread;

use tileflow::{BoundedBuffer, WorkItem, WorkTarget};

const DIM: usize = 8;
const TILE: usize = 4;
const TARGET: usize = 10;

fn main() {
    println!("tileflow - Simple Example\n");

    let buffer = Arc::new(BoundedBuffer::new(4));
    let target = Arc::new(WorkTarget::new(TARGET));

    let producer_buffer = buffer.clone();
    let producer_target = target.clone();
    let producer = thread::spawn(move || {
        let mut rng = rand::rng();
        while producer_target.claim_production() {
            let slot = producer_buffer.send(WorkItem::random(DIM, &mut rng));
            println!("producer filled slot {slot}");
        }
        println!("producer finished");
    });

    let consumer_buffer = buffer.clone();
    let consumer_target = target.clone();
    let consumer = thread::spawn(move || {
        while consumer_target.claim_consumption() {
            let (item, slot) = consumer_buffer.recv();
            let product = item.process(TILE);
            println!("consumer drained slot {slot} (result[0][0] = {})", product.at(0, 0));
        }
        println!("consumer finished");
    });

    producer.join().unwrap();
    consumer.join().unwrap();

    println!(
        "\nDone: {} produced, {} consumed, buffer holds {}",
        target.produced(),
        target.consumed(),
        buffer.len()
    );
}
