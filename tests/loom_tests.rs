#![cfg(loom)]

use loom::sync::Arc;
use loom::thread;

use tileflow::{BoundedBuffer, WorkTarget};

#[test]
fn loom_spsc() {
    loom::model(|| {
        let buffer = Arc::new(BoundedBuffer::new(2));
        let producer_buffer = buffer.clone();
        let consumer_buffer = buffer.clone();

        let producer = thread::spawn(move || {
            for i in 0..2 {
                producer_buffer.send(i);
            }
        });

        let consumer = thread::spawn(move || {
            let mut received = vec![];
            for _ in 0..2 {
                let (value, _slot) = consumer_buffer.recv();
                received.push(value);
            }
            received
        });

        producer.join().unwrap();
        let received = consumer.join().unwrap();
        assert_eq!(received, vec![0, 1]);
    });
}

#[test]
fn loom_claims_never_exceed_target() {
    loom::model(|| {
        let target = Arc::new(WorkTarget::new(2));
        let mut handles = vec![];

        for _ in 0..2 {
            let target = target.clone();
            handles.push(thread::spawn(move || {
                let mut won = 0usize;
                while target.claim_production() {
                    won += 1;
                }
                won
            }));
        }

        let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 2);
    });
}
