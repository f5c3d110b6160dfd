//! Top-level client wiring the option store into inbound dispatch.
//!
//! # Architecture
//!
//! ```text
//! transport (stdin lines) ──mpsc──▶ pump ──▶ Dispatcher ──▶ OptionsHandle
//!                                     │                          │
//!                                     └──▶ CommandRegistry ──────┘
//!                                                                ▼
//!                                                           listeners (UI)
//! ```
//!
//! The client is the composition root: it owns the dispatcher and command
//! registry, injects the shared [`OptionsHandle`] into both, and runs the pump
//! on the current thread.

mod builder;
pub mod config;
pub mod console;
pub mod logging;

pub use builder::ClientBuilder;
pub use config::ClientConfig;

use client_comm::{CommandRegistry, Dispatcher, Inbound, PumpStats};
use client_options::OptionsHandle;
use tokio::sync::mpsc;

/// Message kind sent when the server ends the session.
pub const CLOSE_MESSAGE: &str = "close";

/// Client container.
///
/// # Lifecycle
///
/// 1. `Client::builder()` wires handlers and commands
/// 2. Callers register listeners through [`Client::options`]
/// 3. [`Client::run`] drains the inbound channel until every sender is gone
pub struct Client {
    config: ClientConfig,
    options: OptionsHandle,
    dispatcher: Dispatcher,
    commands: CommandRegistry,
}

impl Client {
    /// Create a new ClientBuilder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Shared handle to the option store.
    pub fn options(&self) -> &OptionsHandle {
        &self.options
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    pub fn commands_mut(&mut self) -> &mut CommandRegistry {
        &mut self.commands
    }

    /// Inbound channel sized from configuration.
    pub fn channel(&self) -> (mpsc::Sender<Inbound>, mpsc::Receiver<Inbound>) {
        mpsc::channel(self.config.comm.inbound_buffer)
    }

    /// Apply inbound items until the channel closes.
    pub async fn run(&mut self, inbound: mpsc::Receiver<Inbound>) -> PumpStats {
        client_comm::pump(inbound, &mut self.dispatcher, &mut self.commands).await
    }
}
