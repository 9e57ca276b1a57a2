#![forbid(unsafe_code)]

//! Core: property maps, the wrapped-component contract, and the push-source
//! capability traits consumed by the binding runtime.
//!
//! # Role in obind
//! `obind-core` is the vocabulary layer. It owns the [`Props`] mapping that
//! flows from parent to binding to wrapped component, the [`Component`]
//! trait a presentational unit implements, and the [`Observable`] /
//! [`Disposable`] pair that any external data source must provide.
//!
//! # Primary responsibilities
//! - **Props**: ordered prop-name to value mapping, with the render merge rule.
//! - **Component**: display name, container flag, and a pure `render`.
//! - **Observable / Disposable**: `subscribe(handler) -> handle` and
//!   `handle.dispose()`, expressed as traits.
//! - **Subject**: a single-threaded reference source implementing the traits.
//!
//! # How it fits in the system
//! The runtime (`obind-runtime`) owns lifecycle and scheduling and depends
//! only on the traits defined here, so any source or view type can be bound.

pub mod component;
pub mod logging;
pub mod props;
pub mod reactive;
pub mod source;

pub use component::{Component, ComponentMeta};
pub use props::{DerivedState, Props, merge_render_props};
pub use reactive::{Subject, SubjectSubscription};
pub use source::{Disposable, Handler, Observable};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, trace, warn};
