//! Client-resident cache of server-pushed options.
//!
//! The server owns the option values; the client keeps a copy, applies the
//! updates the server pushes, lets local code change individual options, and
//! tells interested UI components whenever anything changed.
//!
//! Modules are organized by responsibility:
//! - [`store`] owns the option set and the apply-then-notify path
//! - [`view`] is the read-only accessor handed to callers and listeners
//! - [`listeners`] holds the ordered change listeners and their failure policy
//! - [`handle`] shares one store across the client's single event thread
//! - [`bindings`] wires the store into message dispatch and the command registry
//! - [`value`] defines option values and the option set
pub mod bindings;
pub mod error;
pub mod handle;
pub mod listeners;
pub mod store;
pub mod value;
pub mod view;

pub use bindings::{
    OPTIONS_MESSAGE, OptionsPayload, SET_OPTION_COMMAND, SET_OPTION_MESSAGE, SetOptionPayload,
};
pub use error::{ListenerError, ListenerResult, OptionsError, Result};
pub use handle::{OptionsHandle, WeakOptionsHandle};
pub use listeners::{
    FnListener, ListenerCriticality, ListenerRegistry, NotifyOutcome, OptionsListener,
};
pub use store::OptionsStore;
pub use value::{OptionSet, OptionValue};
pub use view::OptionsView;
