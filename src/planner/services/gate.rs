//! In-process serialisation of store mutations.

use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Clonable mutation lock shared by the planner services.
///
/// Read-modify-write sequences and rollover batches hold the gate for
/// their full duration, so two concurrent updates against the same task
/// within one process never interleave their read and write halves, and a
/// rollover pass behaves as one logical transaction. Cross-process
/// exclusion is out of scope; independent surfaces race last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct MutationGate {
    inner: Arc<Mutex<()>>,
}

impl MutationGate {
    /// Creates a new gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the gate, waiting until any in-flight mutation completes.
    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().await
    }
}
