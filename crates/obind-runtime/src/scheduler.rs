#![forbid(unsafe_code)]

//! Host-side update scheduling.
//!
//! A binding never renders itself. When an emission changes its state it
//! asks the host, through [`UpdateScheduler`], to render it again. The host
//! decides when; [`UpdateQueue`] is the simplest host: a FIFO drained by the
//! render loop.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_BINDING_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique binding identifier, assigned in construction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BindingId(u64);

impl BindingId {
    pub(crate) fn next() -> Self {
        Self(NEXT_BINDING_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Receives "please re-render" requests from bindings.
pub trait UpdateScheduler {
    fn schedule_update(&self, id: BindingId);
}

/// FIFO of pending updates. One entry per request; nothing is coalesced.
#[derive(Debug, Default)]
pub struct UpdateQueue {
    pending: RefCell<VecDeque<BindingId>>,
}

impl UpdateQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    /// Take every pending update in request order.
    pub fn drain(&self) -> Vec<BindingId> {
        self.pending.borrow_mut().drain(..).collect()
    }

    /// Drop every pending update for `id`. Returns how many were dropped.
    pub fn discard(&self, id: BindingId) -> usize {
        let mut pending = self.pending.borrow_mut();
        let before = pending.len();
        pending.retain(|queued| *queued != id);
        before - pending.len()
    }
}

impl UpdateScheduler for UpdateQueue {
    fn schedule_update(&self, id: BindingId) {
        self.pending.borrow_mut().push_back(id);
    }
}
