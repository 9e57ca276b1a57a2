#![forbid(unsafe_code)]

//! A wrapped component that records what it was asked to render.

use std::cell::RefCell;
use std::rc::Rc;

use obind_core::{Component, Props};

/// Shared log of rendered prop maps, oldest first.
pub type RenderLog = Rc<RefCell<Vec<Props>>>;

/// Renders to its own props and appends them to a [`RenderLog`].
#[derive(Debug)]
pub struct RecordingComponent {
    display_name: String,
    container_required: bool,
    log: RenderLog,
}

impl RecordingComponent {
    #[must_use]
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            container_required: false,
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn requiring_container(mut self) -> Self {
        self.container_required = true;
        self
    }

    #[must_use]
    pub fn log(&self) -> RenderLog {
        Rc::clone(&self.log)
    }

    /// Snapshot of every render so far.
    #[must_use]
    pub fn renders(&self) -> Vec<Props> {
        self.log.borrow().clone()
    }

    #[must_use]
    pub fn render_count(&self) -> usize {
        self.log.borrow().len()
    }
}

impl Component for RecordingComponent {
    type Output = Props;

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn container_required(&self) -> bool {
        self.container_required
    }

    fn render(&self, props: &Props) -> Props {
        self.log.borrow_mut().push(props.clone());
        props.clone()
    }
}
