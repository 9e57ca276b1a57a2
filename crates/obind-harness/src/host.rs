#![forbid(unsafe_code)]

//! A minimal host for one binding.
//!
//! The harness plays the part of the UI framework: it paints once before
//! mounting, queues update requests from the binding, and paints once per
//! request when the test calls [`Harness::flush`].

use std::rc::Rc;

use obind_core::{DerivedState, Observable, Props};
use obind_runtime::{
    BindingConfig, BindingError, BindingOptions, ObservableBinding, StateArgs, UpdateQueue,
    UpdateScheduler,
};

use crate::component::RecordingComponent;

/// Drives a binding over a [`RecordingComponent`].
pub struct Harness<O, S>
where
    O: Observable,
{
    component: Rc<RecordingComponent>,
    binding: ObservableBinding<RecordingComponent, O, S>,
    queue: Rc<UpdateQueue>,
}

impl<O, S> Harness<O, S>
where
    O: Observable,
    O::Item: 'static,
    S: Fn(Option<&O::Item>, StateArgs<'_>) -> DerivedState + 'static,
{
    pub fn new<F>(component: RecordingComponent, config: BindingConfig<F, S>, props: Props) -> Self
    where
        F: FnOnce(&Props) -> O,
    {
        Self::with_options(component, config, props, BindingOptions::default())
    }

    pub fn with_options<F>(
        component: RecordingComponent,
        config: BindingConfig<F, S>,
        props: Props,
        options: BindingOptions,
    ) -> Self
    where
        F: FnOnce(&Props) -> O,
    {
        let component = Rc::new(component);
        let binding =
            ObservableBinding::with_options(Rc::clone(&component), config, props, options);
        Self {
            component,
            binding,
            queue: Rc::new(UpdateQueue::new()),
        }
    }

    /// Paint the initial state, then mount the binding.
    pub fn mount(&mut self) -> Result<(), BindingError<O::Error>> {
        self.binding.render();
        let scheduler: Rc<dyn UpdateScheduler> = self.queue.clone();
        self.binding.mount(scheduler)
    }
}

impl<O, S> Harness<O, S>
where
    O: Observable,
{
    /// Paint once per queued update. Returns the number of paints.
    ///
    /// A torn-down binding is never painted; its queued updates are dropped.
    pub fn flush(&mut self) -> usize {
        let mut painted = 0;
        for id in self.queue.drain() {
            if id == self.binding.id() && !self.binding.lifecycle().is_terminal() {
                self.binding.render();
                painted += 1;
            }
        }
        painted
    }

    /// Unmount the binding and drop any updates it queued while mounted.
    pub fn unmount(&mut self) -> Result<(), BindingError<O::Error>> {
        let result = self.binding.unmount();
        if self.binding.lifecycle().is_terminal() {
            self.queue.discard(self.binding.id());
        }
        result
    }

    /// Parent re-render with new props. No paint once torn down.
    pub fn rerender_with(&mut self, props: Props) {
        self.binding.set_props(props);
        if !self.binding.lifecycle().is_terminal() {
            self.binding.render();
        }
    }

    #[must_use]
    pub fn renders(&self) -> Vec<Props> {
        self.component.renders()
    }

    #[must_use]
    pub fn render_count(&self) -> usize {
        self.component.render_count()
    }

    #[must_use]
    pub fn pending_updates(&self) -> usize {
        self.queue.pending()
    }

    #[must_use]
    pub fn binding(&self) -> &ObservableBinding<RecordingComponent, O, S> {
        &self.binding
    }
}
