#![forbid(unsafe_code)]

//! obind: subscribe a presentational component to an external push source
//! for exactly as long as it is mounted.
//!
//! This crate re-exports the public surface of `obind-core` and
//! `obind-runtime`. Most users only need the [`prelude`].
//!
//! ```ignore
//! use obind::prelude::*;
//!
//! let mut binding = ObservableBinding::new(
//!     Rc::new(TodoList),
//!     BindingConfig::new(
//!         |props: &Props| store.todos_for(props),
//!         |todos: Option<&Vec<Todo>>, _args: StateArgs<'_>| {
//!             Props::new().with("todos", todos.map_or(0, Vec::len) as u64)
//!         },
//!     ),
//!     Props::new().with("filter", "open"),
//! );
//! binding.mount(host_queue.clone())?;
//! ```

pub use obind_core as core;
pub use obind_runtime as runtime;

pub use obind_core::{
    Component, ComponentMeta, DerivedState, Disposable, Handler, Observable, Props, Subject,
    SubjectSubscription, merge_render_props,
};
pub use obind_runtime::{
    BindingConfig, BindingError, BindingId, BindingOptions, Lifecycle, LifecycleError,
    LifecyclePolicy, ObservableBinding, StateArgs, UpdateQueue, UpdateScheduler,
};

#[cfg(feature = "tracing-json")]
pub use obind_core::logging::init_json_logging;

/// Common imports.
pub mod prelude {
    pub use crate::{
        BindingConfig, BindingError, Component, Disposable, Observable, ObservableBinding, Props,
        StateArgs, Subject, UpdateQueue, UpdateScheduler,
    };
    pub use std::rc::Rc;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use obind_harness::RecordingComponent;

    #[test]
    fn prelude_is_enough_to_bind() {
        let source = Subject::new(false);
        let feed = source.clone();
        let queue = Rc::new(UpdateQueue::new());
        let component = Rc::new(RecordingComponent::new("Toggle"));
        let mut binding = ObservableBinding::new(
            Rc::clone(&component),
            BindingConfig::new(move |_: &Props| source, |on: Option<&bool>, _: StateArgs<'_>| {
                Props::new().with("on", on.copied().unwrap_or(false))
            }),
            Props::new(),
        );
        binding.mount(queue.clone()).unwrap();
        feed.set(true);
        assert_eq!(queue.drain(), vec![binding.id()]);
        assert_eq!(binding.render(), Props::new().with("on", true));
        binding.unmount().unwrap();
        assert_eq!(component.render_count(), 1);
    }
}
