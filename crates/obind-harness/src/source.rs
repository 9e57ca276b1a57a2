#![forbid(unsafe_code)]

//! Test-driven push source.
//!
//! [`ScriptedSource`] delivers exactly what the test pushes, to at most one
//! handler at a time, and counts every `subscribe` and `dispose`. Clones
//! share state, so a test can keep one clone while the binding owns another.
//!
//! | Setting                    | Effect                                          |
//! |----------------------------|-------------------------------------------------|
//! | `LateDelivery::Stop`       | `dispose` detaches the handler (default)        |
//! | `LateDelivery::Continue`   | handler keeps receiving pushes after `dispose`  |
//! | `fail_subscribe(true)`     | `subscribe` returns `SubscribeRefused`          |
//! | `fail_dispose(true)`       | `dispose` is counted, then returns `DisposeFailed` |

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use obind_core::{Disposable, Handler, Observable};

/// Whether a disposed subscription still receives pushes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LateDelivery {
    #[default]
    Stop,
    Continue,
}

/// Injected source faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceError {
    SubscribeRefused,
    DisposeFailed,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SubscribeRefused => f.write_str("subscribe refused"),
            Self::DisposeFailed => f.write_str("dispose failed"),
        }
    }
}

impl std::error::Error for SourceError {}

struct ScriptInner<T> {
    handler: Option<Handler<T>>,
    subscribes: u32,
    disposes: u32,
    pushed: u64,
    delivered: u64,
    late_delivery: LateDelivery,
    fail_subscribe: bool,
    fail_dispose: bool,
}

/// A source whose emissions are pushed by the test.
pub struct ScriptedSource<T> {
    inner: Rc<RefCell<ScriptInner<T>>>,
}

impl<T> Clone for ScriptedSource<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for ScriptedSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ScriptedSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ScriptedSource")
            .field("subscribed", &inner.handler.is_some())
            .field("subscribes", &inner.subscribes)
            .field("disposes", &inner.disposes)
            .field("pushed", &inner.pushed)
            .field("delivered", &inner.delivered)
            .field("late_delivery", &inner.late_delivery)
            .finish()
    }
}

impl<T> ScriptedSource<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ScriptInner {
                handler: None,
                subscribes: 0,
                disposes: 0,
                pushed: 0,
                delivered: 0,
                late_delivery: LateDelivery::Stop,
                fail_subscribe: false,
                fail_dispose: false,
            })),
        }
    }

    #[must_use]
    pub fn with_late_delivery(self, late_delivery: LateDelivery) -> Self {
        self.inner.borrow_mut().late_delivery = late_delivery;
        self
    }

    pub fn fail_subscribe(&self, fail: bool) {
        self.inner.borrow_mut().fail_subscribe = fail;
    }

    pub fn fail_dispose(&self, fail: bool) {
        self.inner.borrow_mut().fail_dispose = fail;
    }

    /// Deliver `value` to the current handler. Returns whether anyone
    /// received it.
    pub fn push(&self, value: T) -> bool {
        let handler = {
            let mut inner = self.inner.borrow_mut();
            inner.pushed += 1;
            let handler = inner.handler.clone();
            if handler.is_some() {
                inner.delivered += 1;
            }
            handler
        };
        match handler {
            Some(handler) => {
                handler(&value);
                true
            }
            None => false,
        }
    }

    /// Push each value in order; returns how many were delivered.
    pub fn push_all(&self, values: impl IntoIterator<Item = T>) -> usize {
        let mut delivered = 0;
        for value in values {
            if self.push(value) {
                delivered += 1;
            }
        }
        delivered
    }

    #[must_use]
    pub fn subscribe_count(&self) -> u32 {
        self.inner.borrow().subscribes
    }

    #[must_use]
    pub fn dispose_count(&self) -> u32 {
        self.inner.borrow().disposes
    }

    #[must_use]
    pub fn delivered_count(&self) -> u64 {
        self.inner.borrow().delivered
    }

    /// Whether a handler is currently attached.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.inner.borrow().handler.is_some()
    }
}

impl<T: 'static> Observable for ScriptedSource<T> {
    type Item = T;
    type Error = SourceError;
    type Handle = ScriptHandle<T>;

    fn subscribe(&mut self, handler: Handler<T>) -> Result<ScriptHandle<T>, SourceError> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_subscribe {
            return Err(SourceError::SubscribeRefused);
        }
        inner.subscribes += 1;
        inner.handler = Some(handler);
        Ok(ScriptHandle {
            source: self.clone(),
        })
    }
}

/// Handle returned by [`ScriptedSource::subscribe`].
pub struct ScriptHandle<T> {
    source: ScriptedSource<T>,
}

impl<T> fmt::Debug for ScriptHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptHandle").finish_non_exhaustive()
    }
}

impl<T> Disposable for ScriptHandle<T> {
    type Error = SourceError;

    fn dispose(self) -> Result<(), SourceError> {
        let mut inner = self.source.inner.borrow_mut();
        inner.disposes += 1;
        if inner.late_delivery == LateDelivery::Stop {
            inner.handler = None;
        }
        if inner.fail_dispose {
            return Err(SourceError::DisposeFailed);
        }
        Ok(())
    }
}
