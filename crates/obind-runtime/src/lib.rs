#![forbid(unsafe_code)]

//! Runtime: binds a presentational [`Component`](obind_core::Component) to
//! an [`Observable`](obind_core::Observable) for exactly the interval it is
//! mounted.
//!
//! # Lifecycle
//!
//! ```text
//!   Initial ──mount──▶ Active ──unmount──▶ TornDown
//!      │                                      ▲
//!      └───────────────unmount────────────────┘
//! ```
//!
//! - `new` computes the initial state from an absent value and builds the
//!   source, without subscribing.
//! - `mount` subscribes once; every emission while `Active` replaces the
//!   state and schedules one update with the host.
//! - `unmount` leaves `Active` first, then disposes the handle. Emissions
//!   that arrive afterwards are dropped.
//!
//! # Example
//!
//! ```ignore
//! use obind_core::{Props, Subject};
//! use obind_runtime::{BindingConfig, ObservableBinding, UpdateQueue};
//! use std::rc::Rc;
//!
//! let ticks = Subject::new(0u64);
//! let source = ticks.clone();
//! let config = BindingConfig::new(
//!     move |_props: &Props| source.clone(),
//!     |value: Option<&u64>, _args| Props::new().with("ticks", value.copied().unwrap_or(0)),
//! );
//! let queue = Rc::new(UpdateQueue::new());
//! let mut binding = ObservableBinding::new(Rc::new(Clock), config, Props::new());
//! binding.mount(queue.clone())?;
//! ticks.set(1);
//! for _ in queue.drain() {
//!     binding.render();
//! }
//! binding.unmount()?;
//! ```

pub mod binding;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod scheduler;

pub use binding::{BindingConfig, ObservableBinding, StateArgs};
pub use config::{BindingOptions, BindingOptionsError, BindingOptionsParse, LifecyclePolicy};
pub use error::BindingError;
pub use lifecycle::{Lifecycle, LifecycleError, Transition};
pub use scheduler::{BindingId, UpdateQueue, UpdateScheduler};
