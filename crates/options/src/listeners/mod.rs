//! Change listeners for the option set.
//!
//! Listeners are local observers interested in one event: "the options
//! changed". They run synchronously, in registration order, after every
//! accepted mutation and receive a read-only [`OptionsView`] of the new state.
//!
//! # Failure isolation
//!
//! A listener that returns `Err` never stops the fan-out. The error is logged
//! at a level chosen by the listener's [`ListenerCriticality`] and the
//! remaining listeners still run. The mutation that triggered the
//! notification has already been applied and is not rolled back.

mod registry;

pub use registry::{ListenerRegistry, NotifyOutcome};

use crate::error::ListenerResult;
use crate::view::OptionsView;

/// How loudly a listener failure is reported.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ListenerCriticality {
    /// Failure is logged at error level (default).
    #[default]
    Important,

    /// Failure is expected now and then and logged at debug level
    /// (e.g. a panel that is not on screen yet).
    Optional,
}

/// Observer of option changes.
pub trait OptionsListener {
    /// Returns a human-readable name for this listener (used in logging).
    fn name(&self) -> &str {
        "anonymous"
    }

    fn criticality(&self) -> ListenerCriticality {
        ListenerCriticality::Important
    }

    /// Called after every accepted change.
    fn on_options_changed(&self, options: &OptionsView<'_>) -> ListenerResult;
}

/// Adapter turning a closure into an [`OptionsListener`].
pub struct FnListener<F> {
    name: String,
    criticality: ListenerCriticality,
    callback: F,
}

impl<F> FnListener<F>
where
    F: Fn(&OptionsView<'_>) -> ListenerResult,
{
    pub fn new(callback: F) -> Self {
        Self::named("anonymous", callback)
    }

    pub fn named(name: impl Into<String>, callback: F) -> Self {
        Self {
            name: name.into(),
            criticality: ListenerCriticality::Important,
            callback,
        }
    }

    pub fn with_criticality(mut self, criticality: ListenerCriticality) -> Self {
        self.criticality = criticality;
        self
    }
}

impl<F> OptionsListener for FnListener<F>
where
    F: Fn(&OptionsView<'_>) -> ListenerResult,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn criticality(&self) -> ListenerCriticality {
        self.criticality
    }

    fn on_options_changed(&self, options: &OptionsView<'_>) -> ListenerResult {
        (self.callback)(options)
    }
}
