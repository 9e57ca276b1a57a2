#![forbid(unsafe_code)]

//! Capability traits for push-based data sources.
//!
//! A source hands values to a [`Handler`] registered through
//! [`Observable::subscribe`] and returns a [`Disposable`] handle. Releasing
//! the handle consumes it, so a handle can be disposed at most once.
//!
//! Sources are not required to stop delivering synchronously on dispose;
//! consumers must tolerate values that arrive after they released the handle.

use std::rc::Rc;

/// Emission callback. Shared so a source may keep a weak reference to it.
pub type Handler<T> = Rc<dyn Fn(&T)>;

/// A push source of `Item` values.
pub trait Observable {
    type Item;
    type Error: std::error::Error + 'static;
    type Handle: Disposable<Error = Self::Error>;

    /// Register `handler` for subsequent emissions.
    fn subscribe(&mut self, handler: Handler<Self::Item>) -> Result<Self::Handle, Self::Error>;
}

/// A subscription token that must be released exactly once.
pub trait Disposable {
    type Error: std::error::Error + 'static;

    fn dispose(self) -> Result<(), Self::Error>;
}
