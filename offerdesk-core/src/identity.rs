use std::sync::atomic::{AtomicI32, Ordering};

/// Hands out offer ids, starting at 1.
///
/// Ids only ever grow for the lifetime of the generator and are not
/// reconciled with ids already present in storage.
#[derive(Debug, Default)]
pub struct IdGenerator {
    counter: AtomicI32,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> i32 {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }
}
