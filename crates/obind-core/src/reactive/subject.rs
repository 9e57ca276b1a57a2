#![forbid(unsafe_code)]

//! Shared value with change notification, usable as an [`Observable`].
//!
//! # Design
//!
//! [`Subject<T>`] keeps its value in `Rc<RefCell<..>>`. Subscribers are held
//! as `Weak` handlers; the strong side lives in the returned
//! [`SubjectSubscription`], so releasing the subscription is enough to stop
//! delivery. Dead entries are pruned on the next notification.
//!
//! | Operation     | Complexity                 |
//! |---------------|----------------------------|
//! | `get()`       | O(1)                       |
//! | `set()`       | O(S) where S = subscribers |
//! | `emit()`      | O(S)                       |
//! | `subscribe()` | O(1) amortized             |
//!
//! # Failure Modes
//!
//! - **Re-entrant set**: no borrow is held while handlers run, so a callback
//!   may read the subject or call `set()`/`emit()` on it. The nested call
//!   notifies every subscriber before the outer loop resumes, and the outer
//!   loop keeps passing the value it started with.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::{Rc, Weak};

use crate::source::{Disposable, Handler, Observable};

type HandlerWeak<T> = Weak<dyn Fn(&T)>;

struct SubjectInner<T> {
    value: T,
    version: u64,
    subscribers: Vec<HandlerWeak<T>>,
}

/// A shared, version-tracked value with change notification.
///
/// Cloning a `Subject` creates another handle to the same value and the
/// same subscriber list.
pub struct Subject<T> {
    inner: Rc<RefCell<SubjectInner<T>>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Subject")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Subject<T> {
    /// Create a subject holding `value`, at version 0 with no subscribers.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SubjectInner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value and notify, unless it equals the current value.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Replace the value and notify unconditionally.
    ///
    /// Use this for event-like sources where a repeated value is still a
    /// distinct emission.
    pub fn emit(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Modify the value in place; notifies only if it changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let old = inner.value.clone();
            f(&mut inner.value);
            if inner.value != old {
                inner.version += 1;
                true
            } else {
                false
            }
        };
        if changed {
            self.notify();
        }
    }

    /// Register a callback for subsequent notifications.
    ///
    /// The current value is not replayed.
    pub fn subscribe_fn(&self, callback: impl Fn(&T) + 'static) -> SubjectSubscription {
        self.attach(Rc::new(callback))
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Registered subscribers, including released ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn attach(&self, handler: Handler<T>) -> SubjectSubscription {
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&handler));
        SubjectSubscription {
            _guard: Box::new(handler),
        }
    }

    fn notify(&self) {
        let handlers: Vec<Handler<T>> = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner
                .subscribers
                .iter()
                .filter_map(Weak::upgrade)
                .collect()
        };

        let value = self.inner.borrow().value.clone();
        for handler in &handlers {
            handler(&value);
        }
    }
}

impl<T: Clone + PartialEq + 'static> Observable for Subject<T> {
    type Item = T;
    type Error = Infallible;
    type Handle = SubjectSubscription;

    fn subscribe(&mut self, handler: Handler<T>) -> Result<SubjectSubscription, Infallible> {
        Ok(self.attach(handler))
    }
}

/// RAII handle for a [`Subject`] subscriber.
///
/// Holds the only strong reference to the handler; once dropped, the weak
/// entry in the subject can no longer be upgraded.
pub struct SubjectSubscription {
    _guard: Box<dyn std::any::Any>,
}

impl Disposable for SubjectSubscription {
    type Error = Infallible;

    fn dispose(self) -> Result<(), Infallible> {
        drop(self);
        Ok(())
    }
}

impl std::fmt::Debug for SubjectSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubjectSubscription").finish_non_exhaustive()
    }
}
