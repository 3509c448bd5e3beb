use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

/// Counter for "latest request wins" call sites.
///
/// The client itself never sequences or cancels requests; overlapping calls
/// settle in any order. A caller that fires the same query repeatedly (a
/// filter box, say) takes a [`Ticket`] per call and keeps only results whose
/// ticket is still the newest.
#[derive(Clone, Default)]
pub struct RequestGeneration {
    current: Arc<AtomicU64>,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, making every earlier ticket stale.
    pub fn begin(&self) -> Ticket {
        let id = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            current: self.current.clone(),
            id,
        }
    }

    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }
}

pub struct Ticket {
    current: Arc<AtomicU64>,
    id: u64,
}

impl Ticket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.id
    }

    /// `Some(value)` if no newer ticket was issued.
    pub fn accept<T>(&self, value: T) -> Option<T> {
        self.is_current().then_some(value)
    }

    /// Await `fut`, then keep its output only if this ticket is still
    /// current. The future always runs to completion.
    pub async fn settle<F: Future>(self, fut: F) -> Option<F::Output> {
        let output = fut.await;
        if self.is_current() {
            Some(output)
        } else {
            debug!(ticket = self.id, latest = self.current.load(Ordering::SeqCst), "discarding stale response");
            None
        }
    }
}
