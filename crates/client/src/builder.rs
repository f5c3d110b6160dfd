//! Client builder with dependency injection pattern.

use client_comm::{CommandRegistry, Dispatcher, HandlerRegistrar, HandlerResult, Message};
use client_options::{OptionsHandle, OptionsStore};

use crate::config::ClientConfig;
use crate::{CLOSE_MESSAGE, Client};

/// Builder for constructing a [`Client`].
///
/// # Design Principles
///
/// - **Optional fields**: configuration and the option store default sensibly
/// - **Injection**: callers that already hold an [`OptionsHandle`] (e.g. a UI
///   layer built first) pass it in so both sides share one store
/// - **Fluent API**: Chainable methods for ergonomic construction
#[derive(Default)]
pub struct ClientBuilder {
    config: Option<ClientConfig>,
    options: Option<OptionsHandle>,
}

impl ClientBuilder {
    /// Create a new ClientBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration (defaults to `ClientConfig::default()`).
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Share an existing option store instead of creating a fresh one.
    pub fn options(mut self, options: OptionsHandle) -> Self {
        self.options = Some(options);
        self
    }

    /// Build the client and wire every component into dispatch.
    ///
    /// Registers:
    /// - `options` / `set_option` message handlers on the dispatcher
    /// - the `set_option` console command
    /// - a `close` handler that clears the options, as on disconnect
    pub fn build(self) -> Client {
        let config = self.config.unwrap_or_default();
        let options = self
            .options
            .unwrap_or_else(|| OptionsHandle::new(OptionsStore::new()));

        let mut dispatcher = Dispatcher::new().strict(config.comm.strict);
        let mut commands = CommandRegistry::new();

        options.register_handlers(&mut dispatcher);
        options.register_commands(&mut commands);

        let on_close = options.clone();
        dispatcher.register_handler(
            CLOSE_MESSAGE,
            Box::new(move |_: &Message| -> HandlerResult {
                tracing::info!("Connection closed, clearing options");
                on_close
                    .clear()
                    .map_err(client_comm::HandlerError::failed)
            }),
        );

        tracing::debug!(
            kinds = ?dispatcher.kinds().collect::<Vec<_>>(),
            commands = ?commands.names().collect::<Vec<_>>(),
            "Client wired"
        );

        Client {
            config,
            options,
            dispatcher,
            commands,
        }
    }
}
