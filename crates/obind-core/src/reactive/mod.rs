#![forbid(unsafe_code)]

//! Reference push source.
//!
//! - [`Subject`]: a shared, version-tracked value that notifies subscribers
//!   when it changes or when a value is explicitly emitted.
//! - [`SubjectSubscription`]: RAII handle that detaches its callback on
//!   drop or [`dispose`](crate::Disposable::dispose).
//!
//! # Invariants
//!
//! 1. Version increments exactly once per notifying mutation.
//! 2. Subscribers are notified in registration order.
//! 3. `set` with a value equal to the current one is a no-op; `emit` always
//!    notifies.
//! 4. A released subscription is never called again.

pub mod subject;

pub use subject::{Subject, SubjectSubscription};
