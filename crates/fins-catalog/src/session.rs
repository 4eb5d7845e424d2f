//! Generation tickets for search interactions
//!
//! Each new search takes a ticket. Results from an older ticket settle as
//! [`Settled::Superseded`] so they can never overwrite a newer search.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Hands out tickets; clones share the same generation counter
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    generation: Arc<AtomicU64>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search, superseding every earlier ticket
    pub fn begin(&self) -> SearchTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        SearchTicket {
            generation,
            session: self.generation.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchTicket {
    generation: u64,
    session: Arc<AtomicU64>,
}

impl SearchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        self.session.load(Ordering::SeqCst) == self.generation
    }

    pub fn settle<T>(&self, value: T) -> Settled<T> {
        if self.is_current() {
            Settled::Current(value)
        } else {
            Settled::Superseded
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled<T> {
    Current(T),
    Superseded,
}

impl<T> Settled<T> {
    pub fn into_current(self) -> Option<T> {
        match self {
            Settled::Current(value) => Some(value),
            Settled::Superseded => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_ticket_is_current() {
        let session = SearchSession::new();
        let first = session.begin();
        assert!(first.is_current());

        let second = session.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert!(second.generation() > first.generation());
    }

    #[test]
    fn test_stale_ticket_settles_superseded() {
        let session = SearchSession::new();
        let stale = session.begin();
        let fresh = session.begin();

        assert_eq!(stale.settle("old"), Settled::Superseded);
        assert_eq!(fresh.settle("new"), Settled::Current("new"));
        assert_eq!(fresh.settle(1).into_current(), Some(1));
    }

    #[test]
    fn test_clones_share_generation() {
        let session = SearchSession::new();
        let ticket = session.begin();
        session.clone().begin();
        assert!(!ticket.is_current());
    }
}
