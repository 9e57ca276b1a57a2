#![forbid(unsafe_code)]

//! [`ObservableBinding`]: a component wrapper whose state follows a push
//! source while mounted.
//!
//! # Design
//!
//! The binding does not extend the wrapped component; it holds an `Rc` to it
//! and renders it with merged props. Mutable parts (state, current props,
//! lifecycle) live in `Rc<RefCell<..>>` so the emission handler handed to
//! the source can reach them through a `Weak` without keeping the binding
//! alive.
//!
//! # Invariants
//!
//! 1. At most one source and one subscription handle per binding.
//! 2. State is always defined: computed from `None` at construction, then
//!    replaced wholesale on each accepted emission.
//! 3. An emission is accepted only while the lifecycle is `Active`.
//! 4. `unmount` leaves `Active` before the handle is disposed, so an emission
//!    racing the disposal is dropped.
//! 5. Rendering never mutates state, props, or the source.
//!
//! # Failure Modes
//!
//! - **Source fault**: `subscribe`/`dispose` errors are returned unchanged in
//!   [`BindingError::Source`]. A failed `subscribe` leaves the binding
//!   `TornDown` with no handle.
//! - **Transform panic**: panics from either user function unwind through
//!   the caller (construction or the source's notify call).

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use obind_core::{
    Component, ComponentMeta, DerivedState, Disposable, Handler, Observable, Props,
    merge_render_props,
};
use tracing::{debug, debug_span, trace, warn};

use crate::config::{BindingOptions, LifecyclePolicy};
use crate::error::BindingError;
use crate::lifecycle::{Lifecycle, Transition};
use crate::scheduler::{BindingId, UpdateScheduler};

/// Second argument of the state transform.
#[derive(Debug, Clone, Copy)]
pub struct StateArgs<'a> {
    pub props: &'a Props,
}

/// The two user functions that define a binding.
///
/// - `get_observable(&props)` builds the source. Called once per binding.
/// - `get_state_from_observable(value, args)` maps the latest value (or
///   `None` before any emission) and the current props to a state map.
pub struct BindingConfig<F, S> {
    pub get_observable: F,
    pub get_state_from_observable: S,
}

impl<F, S> BindingConfig<F, S> {
    pub fn new(get_observable: F, get_state_from_observable: S) -> Self {
        Self {
            get_observable,
            get_state_from_observable,
        }
    }
}

impl<F, S> fmt::Debug for BindingConfig<F, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingConfig").finish_non_exhaustive()
    }
}

/// State reachable from the emission handler.
#[derive(Debug)]
struct Shared {
    state: DerivedState,
    props: Props,
    lifecycle: Lifecycle,
    emissions: u64,
    discarded: u64,
}

/// Subscribes a wrapped [`Component`] to an [`Observable`] for the interval
/// it is mounted.
pub struct ObservableBinding<C, O, S>
where
    C: Component,
    O: Observable,
{
    id: BindingId,
    component: Rc<C>,
    meta: ComponentMeta,
    options: BindingOptions,
    shared: Rc<RefCell<Shared>>,
    transform: Rc<S>,
    source: O,
    handle: Option<O::Handle>,
}

impl<C, O, S> ObservableBinding<C, O, S>
where
    C: Component,
    O: Observable,
    O::Item: 'static,
    S: Fn(Option<&O::Item>, StateArgs<'_>) -> DerivedState + 'static,
{
    /// Build a binding with default [`BindingOptions`].
    pub fn new<F>(component: Rc<C>, config: BindingConfig<F, S>, props: Props) -> Self
    where
        F: FnOnce(&Props) -> O,
    {
        Self::with_options(component, config, props, BindingOptions::default())
    }

    /// Build a binding: compute the initial state from an absent value, then
    /// build the source. Nothing is subscribed until [`mount`](Self::mount).
    pub fn with_options<F>(
        component: Rc<C>,
        config: BindingConfig<F, S>,
        props: Props,
        options: BindingOptions,
    ) -> Self
    where
        F: FnOnce(&Props) -> O,
    {
        let BindingConfig {
            get_observable,
            get_state_from_observable,
        } = config;
        let state = get_state_from_observable(None, StateArgs { props: &props });
        let source = get_observable(&props);
        let meta = ComponentMeta::of(component.as_ref());
        Self {
            id: BindingId::next(),
            component,
            meta,
            options,
            shared: Rc::new(RefCell::new(Shared {
                state,
                props,
                lifecycle: Lifecycle::Initial,
                emissions: 0,
                discarded: 0,
            })),
            transform: Rc::new(get_state_from_observable),
            source,
            handle: None,
        }
    }

    /// `Initial -> Active`: subscribe to the source.
    ///
    /// Every accepted emission asks `scheduler` for one update of this
    /// binding's [`id`](Self::id).
    pub fn mount(
        &mut self,
        scheduler: Rc<dyn UpdateScheduler>,
    ) -> Result<(), BindingError<O::Error>> {
        let next = self.lifecycle().apply(Transition::Mount)?;
        let _span = debug_span!(
            "binding.mount",
            binding = %self.id,
            component = %self.meta.display_name
        )
        .entered();

        self.shared.borrow_mut().lifecycle = next;
        let handler = self.emission_handler(scheduler);
        match self.source.subscribe(handler) {
            Ok(handle) => {
                self.handle = Some(handle);
                debug!("subscribed");
                Ok(())
            }
            Err(err) => {
                self.shared.borrow_mut().lifecycle = Lifecycle::TornDown;
                debug!("subscribe failed");
                Err(BindingError::Source(err))
            }
        }
    }

    fn emission_handler(&self, scheduler: Rc<dyn UpdateScheduler>) -> Handler<O::Item> {
        let shared = Rc::downgrade(&self.shared);
        let transform = Rc::clone(&self.transform);
        let id = self.id;
        let log_discarded = self.options.log_discarded;
        Rc::new(move |value: &O::Item| {
            on_emit(
                &shared,
                transform.as_ref(),
                scheduler.as_ref(),
                id,
                log_discarded,
                value,
            );
        })
    }
}

fn on_emit<T, S>(
    shared: &Weak<RefCell<Shared>>,
    transform: &S,
    scheduler: &dyn UpdateScheduler,
    id: BindingId,
    log_discarded: bool,
    value: &T,
) where
    S: Fn(Option<&T>, StateArgs<'_>) -> DerivedState,
{
    let Some(shared) = shared.upgrade() else {
        return;
    };
    {
        let mut shared = shared.borrow_mut();
        if !shared.lifecycle.accepts_emissions() {
            shared.discarded += 1;
            if log_discarded {
                debug!(binding = %id, lifecycle = %shared.lifecycle, "emission discarded");
            }
            return;
        }
        let next = transform(Some(value), StateArgs { props: &shared.props });
        shared.state = next;
        shared.emissions += 1;
        trace!(binding = %id, emissions = shared.emissions, "state replaced");
    }
    scheduler.schedule_update(id);
}

impl<C, O, S> ObservableBinding<C, O, S>
where
    C: Component,
    O: Observable,
{
    /// `Active -> TornDown` (or `Initial -> TornDown`): stop accepting
    /// emissions, then dispose the subscription handle.
    ///
    /// Under [`LifecyclePolicy::Lenient`] a repeated unmount returns `Ok`.
    pub fn unmount(&mut self) -> Result<(), BindingError<O::Error>> {
        let next = match self.lifecycle().apply(Transition::Unmount) {
            Ok(next) => next,
            Err(err) => {
                return match self.options.lifecycle_policy {
                    LifecyclePolicy::Lenient => Ok(()),
                    LifecyclePolicy::Strict => Err(err.into()),
                };
            }
        };
        let _span = debug_span!(
            "binding.unmount",
            binding = %self.id,
            component = %self.meta.display_name
        )
        .entered();

        self.shared.borrow_mut().lifecycle = next;
        if let Some(handle) = self.handle.take() {
            handle.dispose().map_err(BindingError::Source)?;
            debug!("subscription disposed");
        }
        Ok(())
    }

    /// Replace the props supplied by the parent.
    ///
    /// Later emissions and renders see the new props. State is not
    /// recomputed and the source is not rebuilt.
    pub fn set_props(&mut self, props: Props) {
        self.shared.borrow_mut().props = props;
    }

    /// Render the wrapped component with state overlaid by props.
    pub fn render(&self) -> C::Output {
        let props = self.render_props();
        self.component.render(&props)
    }

    /// The map [`render`](Self::render) passes to the wrapped component.
    #[must_use]
    pub fn render_props(&self) -> Props {
        let shared = self.shared.borrow();
        merge_render_props(&shared.state, &shared.props)
    }

    #[must_use]
    pub fn id(&self) -> BindingId {
        self.id
    }

    /// Identity copied from the wrapped component.
    #[must_use]
    pub fn meta(&self) -> &ComponentMeta {
        &self.meta
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.meta.display_name
    }

    #[must_use]
    pub fn container_required(&self) -> bool {
        self.meta.container_required
    }

    #[must_use]
    pub fn options(&self) -> &BindingOptions {
        &self.options
    }

    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.shared.borrow().lifecycle
    }

    #[must_use]
    pub fn state(&self) -> DerivedState {
        self.shared.borrow().state.clone()
    }

    #[must_use]
    pub fn props(&self) -> Props {
        self.shared.borrow().props.clone()
    }

    /// Emissions applied to state.
    #[must_use]
    pub fn emission_count(&self) -> u64 {
        self.shared.borrow().emissions
    }

    /// Emissions dropped because the binding was not active.
    #[must_use]
    pub fn discarded_count(&self) -> u64 {
        self.shared.borrow().discarded
    }
}

impl<C, O, S> fmt::Debug for ObservableBinding<C, O, S>
where
    C: Component,
    O: Observable,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.shared.borrow();
        f.debug_struct("ObservableBinding")
            .field("id", &self.id)
            .field("component", &self.meta.display_name)
            .field("lifecycle", &shared.lifecycle)
            .field("state", &shared.state)
            .field("props", &shared.props)
            .field("subscribed", &self.handle.is_some())
            .finish()
    }
}

impl<C, O, S> Drop for ObservableBinding<C, O, S>
where
    C: Component,
    O: Observable,
{
    fn drop(&mut self) {
        if self.lifecycle() != Lifecycle::Active {
            return;
        }
        if let Err(err) = self.unmount() {
            warn!(binding = %self.id, error = %err, "dispose failed while dropping binding");
        }
    }
}
