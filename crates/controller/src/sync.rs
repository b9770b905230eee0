//! Stale-response guard for list fetches.
//!
//! Each list-producing fetch takes a [`Ticket`] before its request goes
//! out. Only the holder of the newest ticket may render; a response that
//! arrives after a newer fetch started is dropped.

use std::sync::atomic::{AtomicU64, Ordering};

/// Sequence number of one list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// Issues tickets and answers whether a ticket is still the newest.
#[derive(Debug, Default)]
pub struct ViewSync {
    issued: AtomicU64,
}

impl ViewSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }
}
