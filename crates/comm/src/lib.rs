//! Inbound message plumbing for the client.
//!
//! This crate is the seam between the transport (whatever delivers frames from
//! the server) and the client-side components that react to them. Components
//! never see the transport itself; they register handlers by message kind and
//! the [`Dispatcher`] routes each decoded [`Message`] to them in delivery order.
//!
//! Modules are organized by responsibility:
//! - [`message`] decodes JSON frames into kind + payload
//! - [`dispatcher`] owns the kind-to-handler table
//! - [`commands`] is the named command surface for externally-authored callers
//! - [`pump`] drains an inbound channel into the dispatcher and command registry
//! - [`config`] holds environment-driven settings
pub mod commands;
pub mod config;
pub mod dispatcher;
pub mod errors;
pub mod message;
pub mod pump;

pub use commands::{Command, CommandRegistry, parse_command_line};
pub use config::CommConfig;
pub use dispatcher::{Dispatcher, HandlerRegistrar, MessageHandler};
pub use errors::{BoxError, CommError, CommandError, HandlerError, HandlerResult, Result};
pub use message::Message;
pub use pump::{Inbound, PumpStats, pump};
