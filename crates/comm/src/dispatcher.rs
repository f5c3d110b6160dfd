//! Kind-to-handler routing for inbound messages.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::errors::{CommError, HandlerResult, Result};
use crate::message::Message;

/// Handler invoked with every message of the kind it was registered for.
///
/// Handlers run on the dispatching thread and complete before the next
/// message is routed, so they may capture single-threaded shared state.
pub type MessageHandler = Box<dyn FnMut(&Message) -> HandlerResult>;

/// Registration side of a dispatcher.
///
/// Components receive `&mut dyn HandlerRegistrar` (or a generic `R`) at wiring
/// time so they never depend on the concrete transport.
pub trait HandlerRegistrar {
    fn register_handler(&mut self, kind: &str, handler: MessageHandler);
}

/// Routes decoded messages to registered handlers.
///
/// # Unknown kinds
///
/// In strict mode a message without a handler is an error
/// ([`CommError::UnknownKind`]). Otherwise it is logged at debug level and
/// dropped; servers routinely send kinds a given client does not care about.
pub struct Dispatcher {
    handlers: HashMap<String, MessageHandler>,
    strict: bool,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            strict: false,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Route one message. Returns `Ok(false)` if it was dropped as unknown.
    pub fn dispatch(&mut self, message: &Message) -> Result<bool> {
        let Some(handler) = self.handlers.get_mut(message.kind()) else {
            if self.strict {
                return Err(CommError::UnknownKind {
                    kind: message.kind().to_string(),
                });
            }
            debug!(
                target: "comm::dispatch",
                kind = message.kind(),
                "No handler registered, dropping message"
            );
            return Ok(false);
        };

        trace!(target: "comm::dispatch", kind = message.kind(), "Dispatching message");

        handler(message).map_err(|source| CommError::Handler {
            kind: message.kind().to_string(),
            source,
        })?;

        Ok(true)
    }

    /// Parse a raw frame and route it.
    pub fn dispatch_frame(&mut self, frame: &str) -> Result<bool> {
        let message = Message::from_frame(frame)?;
        self.dispatch(&message)
    }

    /// Check if a handler is registered for `kind`.
    pub fn handles(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }

    /// Returns the registered message kinds (for debugging).
    pub fn kinds(&self) -> impl Iterator<Item = &str> + '_ {
        self.handlers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl HandlerRegistrar for Dispatcher {
    /// Register a handler. An existing handler for the same kind is replaced.
    fn register_handler(&mut self, kind: &str, handler: MessageHandler) {
        if self.handlers.insert(kind.to_string(), handler).is_some() {
            warn!(target: "comm::dispatch", kind, "Replacing existing message handler");
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
