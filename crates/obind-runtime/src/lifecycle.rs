#![forbid(unsafe_code)]

//! Explicit binding lifecycle.

use std::fmt;

/// Where a binding is in its mount cycle. `TornDown` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifecycle {
    /// Constructed; state computed, source built, nothing subscribed.
    #[default]
    Initial,
    /// Mounted and subscribed; emissions update state.
    Active,
    /// Unmounted. No further state updates.
    TornDown,
}

/// A requested lifecycle move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Mount,
    Unmount,
}

/// An illegal transition for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleError {
    pub transition: Transition,
    pub state: Lifecycle,
}

impl Lifecycle {
    /// State reached by applying `transition`, or the error if illegal.
    pub fn apply(self, transition: Transition) -> Result<Lifecycle, LifecycleError> {
        match (self, transition) {
            (Self::Initial, Transition::Mount) => Ok(Self::Active),
            (Self::Initial | Self::Active, Transition::Unmount) => Ok(Self::TornDown),
            (state, transition) => Err(LifecycleError { transition, state }),
        }
    }

    #[must_use]
    pub fn accepts_emissions(self) -> bool {
        self == Self::Active
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Self::TornDown
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Active => "active",
            Self::TornDown => "torn-down",
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mount => f.write_str("mount"),
            Self::Unmount => f.write_str("unmount"),
        }
    }
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot {} a binding in state {}", self.transition, self.state)
    }
}

impl std::error::Error for LifecycleError {}
