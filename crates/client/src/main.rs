//! Webtiles client binary.
//!
//! Reads server frames (one JSON object per line) and console commands
//! (lines starting with `/`) from stdin and keeps the option cache in sync.
//!
//! # Examples
//!
//! ```bash
//! printf '%s\n' \
//!   '{"msg":"options","options":{"tile_font_size":16}}' \
//!   '/set_option tile_font_size 18' \
//!   | cargo run -p webtiles-client
//! ```

use anyhow::Result;
use client_options::{FnListener, ListenerCriticality, OptionsView};
use webtiles_client::{Client, ClientConfig, console, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(&config)?;

    tracing::info!("Starting webtiles client");
    tracing::debug!(
        inbound_buffer = config.comm.inbound_buffer,
        strict = config.comm.strict,
        "Configuration loaded"
    );

    let mut client = Client::builder().config(config).build();

    client.options().add_observer(
        FnListener::named("summary", |view: &OptionsView<'_>| {
            tracing::info!(count = view.len(), "Options changed");
            Ok(())
        })
        .with_criticality(ListenerCriticality::Optional),
    )?;

    let (tx, rx) = client.channel();
    let reader = console::spawn_stdin_reader(tx);

    let stats = client.run(rx).await;
    let forwarded = reader.await??;

    tracing::info!(
        forwarded,
        delivered = stats.delivered,
        failed = stats.failed,
        "Client shutdown complete"
    );
    Ok(())
}
