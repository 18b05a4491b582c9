//! Counting semaphore built from a mutex and a condition variable.

use std::sync::{Condvar, Mutex};

/// Counting semaphore: [`acquire`](Semaphore::acquire) blocks until the count
/// is positive then decrements it, [`release`](Semaphore::release) increments
/// it and wakes one waiter.
///
/// The standard library has no counting semaphore, so this is the usual
/// condvar-plus-count construction. No fairness guarantee: the order in which
/// blocked threads win permits is unspecified.
pub struct Semaphore {
    permits: Mutex<usize>,
    available: Condvar,
}

impl Semaphore {
    /// Create a semaphore holding `permits` initial permits.
    pub fn new(permits: usize) -> Self {
        Semaphore {
            permits: Mutex::new(permits),
            available: Condvar::new(),
        }
    }

    /// Block until a permit is available, then take it.
    pub fn acquire(&self) {
        let mut permits = self.permits.lock().expect("semaphore mutex poisoned");
        while *permits == 0 {
            permits = self
                .available
                .wait(permits)
                .expect("semaphore mutex poisoned");
        }
        *permits -= 1;
    }

    /// Take a permit if one is available right now. Never blocks.
    pub fn try_acquire(&self) -> bool {
        let mut permits = self.permits.lock().expect("semaphore mutex poisoned");
        if *permits == 0 {
            return false;
        }
        *permits -= 1;
        true
    }

    /// Return a permit and wake one blocked [`acquire`](Semaphore::acquire).
    pub fn release(&self) {
        let mut permits = self.permits.lock().expect("semaphore mutex poisoned");
        *permits += 1;
        self.available.notify_one();
    }

    /// Number of permits currently available.
    pub fn available(&self) -> usize {
        *self.permits.lock().expect("semaphore mutex poisoned")
    }
}
