use std::{cell::RefCell, collections::HashMap, hash::Hash};

/// Hands out monotonically increasing tickets per kind of request.
///
/// Only the response for the most recently issued ticket of a kind
/// should be applied. Responses of older requests that arrive late
/// are outdated and must be discarded.
#[derive(Debug)]
pub struct RequestSequencer<K> {
    latest: RefCell<HashMap<K, u64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket<K> {
    kind: K,
    seq: u64,
}

impl<K> Ticket<K> {
    pub const fn seq(&self) -> u64 {
        self.seq
    }
}

impl<K> Default for RequestSequencer<K> {
    fn default() -> Self {
        Self {
            latest: RefCell::new(HashMap::new()),
        }
    }
}

impl<K> RequestSequencer<K>
where
    K: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, kind: K) -> Ticket<K> {
        let mut latest = self.latest.borrow_mut();
        let seq = latest.entry(kind).or_default();
        *seq += 1;
        Ticket { kind, seq: *seq }
    }

    pub fn is_latest(&self, ticket: &Ticket<K>) -> bool {
        self.latest.borrow().get(&ticket.kind) == Some(&ticket.seq)
    }

    /// Outdate all tickets of this kind that have been issued so far.
    pub fn invalidate(&self, kind: K) {
        self.issue(kind);
    }
}
