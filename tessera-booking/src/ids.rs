use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic identifier source.
///
/// Each source issues its own sequence starting at zero, so the hold and
/// reservation sequences stay independent. Issuance is an atomic increment
/// and never hands the same id to two callers, with or without any outer
/// lock held. Sources are injectable so a service can be instantiated and
/// tested in isolation instead of leaning on process-wide counters.
#[derive(Debug, Default)]
pub struct IdSource {
    next: AtomicU64,
}

impl IdSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source whose first issued id is `first`.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}
