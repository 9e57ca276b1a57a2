#![forbid(unsafe_code)]

//! Binding options (deterministic, env-overridable).
//!
//! # Environment Variables
//! - `OBIND_LIFECYCLE_POLICY` = strict|lenient
//! - `OBIND_LOG_DISCARDED` (bool)
//!
//! Unparseable values leave the default in place and are reported through
//! [`BindingOptions::from_env_with_diagnostics`].

use std::env;
use std::fmt;

const ENV_LIFECYCLE_POLICY: &str = "OBIND_LIFECYCLE_POLICY";
const ENV_LOG_DISCARDED: &str = "OBIND_LOG_DISCARDED";

/// How illegal lifecycle transitions are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecyclePolicy {
    /// Every illegal transition returns an error.
    #[default]
    Strict,
    /// Redundant unmounts are no-ops. Mounting twice is still an error.
    Lenient,
}

impl LifecyclePolicy {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "lenient" => Some(Self::Lenient),
            _ => None,
        }
    }
}

impl fmt::Display for LifecyclePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => f.write_str("strict"),
            Self::Lenient => f.write_str("lenient"),
        }
    }
}

/// Per-binding options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingOptions {
    pub lifecycle_policy: LifecyclePolicy,
    /// Emit a `debug` event for every emission dropped after unmount.
    pub log_discarded: bool,
}

impl Default for BindingOptions {
    fn default() -> Self {
        Self {
            lifecycle_policy: LifecyclePolicy::Strict,
            log_discarded: true,
        }
    }
}

/// Options plus any problems found while reading them.
#[derive(Debug, Clone)]
pub struct BindingOptionsParse {
    pub options: BindingOptions,
    pub errors: Vec<BindingOptionsError>,
}

/// A rejected option value with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingOptionsError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl BindingOptionsError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for BindingOptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for BindingOptionsError {}

impl BindingOptions {
    #[must_use]
    pub fn with_lifecycle_policy(mut self, policy: LifecyclePolicy) -> Self {
        self.lifecycle_policy = policy;
        self
    }

    #[must_use]
    pub fn with_log_discarded(mut self, enabled: bool) -> Self {
        self.log_discarded = enabled;
        self
    }

    /// Read options from the environment, ignoring bad values.
    #[must_use]
    pub fn from_env() -> BindingOptions {
        Self::from_env_with_diagnostics().options
    }

    /// Read options from the environment and report bad values.
    #[must_use]
    pub fn from_env_with_diagnostics() -> BindingOptionsParse {
        from_env_with(|key| env::var(key).ok())
    }
}

fn from_env_with<F>(mut get: F) -> BindingOptionsParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut options = BindingOptions::default();
    let mut errors = Vec::new();

    if let Some(value) = get(ENV_LIFECYCLE_POLICY) {
        match LifecyclePolicy::parse(&value) {
            Some(parsed) => options.lifecycle_policy = parsed,
            None => errors.push(BindingOptionsError::new(
                "lifecycle_policy",
                value,
                "expected strict|lenient",
            )),
        }
    }

    if let Some(value) = get(ENV_LOG_DISCARDED) {
        match parse_bool(&value) {
            Some(parsed) => options.log_discarded = parsed,
            None => errors.push(BindingOptionsError::new(
                "log_discarded",
                value,
                "expected bool (1/0/true/false)",
            )),
        }
    }

    BindingOptionsParse { options, errors }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
