#![forbid(unsafe_code)]

//! Binding errors.
//!
//! Source faults are carried untouched in [`BindingError::Source`]; the only
//! errors the binding itself raises are lifecycle misuse.

use std::fmt;

use crate::lifecycle::LifecycleError;

/// Failure of a binding operation. `E` is the source's own error type.
#[derive(Debug)]
pub enum BindingError<E> {
    /// `subscribe` or `dispose` on the source failed.
    Source(E),
    /// The requested transition is illegal in the current state.
    Lifecycle(LifecycleError),
}

impl<E> BindingError<E> {
    /// The source error, if this is one.
    pub fn into_source(self) -> Option<E> {
        match self {
            Self::Source(e) => Some(e),
            Self::Lifecycle(_) => None,
        }
    }
}

impl<E> From<LifecycleError> for BindingError<E> {
    fn from(err: LifecycleError) -> Self {
        Self::Lifecycle(err)
    }
}

impl<E: fmt::Display> fmt::Display for BindingError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(e) => write!(f, "observable source error: {e}"),
            Self::Lifecycle(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for BindingError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Source(e) => Some(e),
            Self::Lifecycle(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::{Lifecycle, Transition};
    use std::error::Error;

    #[derive(Debug, PartialEq)]
    struct Refused;

    impl fmt::Display for Refused {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("refused")
        }
    }

    impl Error for Refused {}

    #[test]
    fn source_error_is_preserved() {
        let err: BindingError<Refused> = BindingError::Source(Refused);
        assert_eq!(err.to_string(), "observable source error: refused");
        assert!(err.source().is_some());
        assert_eq!(err.into_source(), Some(Refused));
    }

    #[test]
    fn lifecycle_error_converts() {
        let lifecycle = LifecycleError {
            transition: Transition::Mount,
            state: Lifecycle::Active,
        };
        let err: BindingError<Refused> = lifecycle.into();
        assert!(matches!(err, BindingError::Lifecycle(_)));
        assert_eq!(err.to_string(), "cannot mount a binding in state active");
        assert_eq!(err.into_source(), None);
    }
}
