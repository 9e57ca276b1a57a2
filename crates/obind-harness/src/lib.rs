#![forbid(unsafe_code)]

//! Test harness for obind bindings.
//!
//! # Role in obind
//! Bindings are driven by a host and fed by a source, neither of which
//! exists in a unit test. This crate supplies deterministic stand-ins:
//!
//! - [`ScriptedSource`]: a push source whose emissions are driven by the
//!   test, with counted subscribe/dispose calls, injectable faults, and an
//!   option to keep delivering after dispose.
//! - [`RecordingComponent`]: a wrapped component that logs every prop map it
//!   is rendered with.
//! - [`Harness`]: a minimal host. Renders before mounting, renders once per
//!   scheduled update on [`Harness::flush`], and exposes the render log.

pub mod component;
pub mod host;
pub mod logging;
pub mod source;

pub use component::{RecordingComponent, RenderLog};
pub use host::Harness;
pub use logging::init_test_logging;
pub use source::{LateDelivery, ScriptHandle, ScriptedSource, SourceError};
