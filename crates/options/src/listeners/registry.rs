//! Ordered registry of change listeners.

use tracing::{debug, error, trace};

use super::{ListenerCriticality, OptionsListener};
use crate::error::ListenerError;
use crate::view::OptionsView;

/// Result of one notification round.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NotifyOutcome {
    /// Listeners that were invoked.
    pub notified: usize,
    /// Listeners that returned an error.
    pub failed: usize,
}

/// Listeners in registration order.
///
/// Add-only: there is no removal, and the registry lives as long as the store
/// that owns it.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<Box<dyn OptionsListener>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener. It is not invoked until the next change.
    pub fn register(&mut self, listener: Box<dyn OptionsListener>) {
        trace!(target: "options::listeners", listener = listener.name(), "Listener registered");
        self.listeners.push(listener);
    }

    /// Invoke every listener once, in registration order.
    ///
    /// Failures are logged per criticality and counted; they never stop the
    /// remaining listeners.
    pub fn notify_all(&self, options: &OptionsView<'_>) -> NotifyOutcome {
        let mut outcome = NotifyOutcome::default();

        for listener in &self.listeners {
            outcome.notified += 1;
            if let Err(e) = listener.on_options_changed(options) {
                outcome.failed += 1;
                Self::handle_listener_error(listener.as_ref(), e);
            }
        }

        outcome
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Returns an iterator over listener names in invocation order (for debugging).
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.listeners.iter().map(|l| l.name())
    }

    fn handle_listener_error(listener: &dyn OptionsListener, error: ListenerError) {
        let criticality = listener.criticality();
        match criticality {
            ListenerCriticality::Important => error!(
                target: "options::listeners",
                listener = listener.name(),
                criticality = criticality.as_ref(),
                error = ?error,
                "Listener failed, continuing"
            ),
            ListenerCriticality::Optional => debug!(
                target: "options::listeners",
                listener = listener.name(),
                criticality = criticality.as_ref(),
                error = ?error,
                "Optional listener failed"
            ),
        }
    }
}
