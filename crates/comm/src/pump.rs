//! Inbound loop feeding the dispatcher.
//!
//! The transport side pushes [`Inbound`] items into a bounded tokio channel;
//! [`pump`] drains it on the client's thread and applies each item to
//! completion before receiving the next, which preserves delivery order.
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::commands::CommandRegistry;
use crate::dispatcher::Dispatcher;

/// One unit of inbound work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Raw JSON message frame from the server.
    Frame(String),
    /// Console line for the command registry (e.g. `/set_option name value`).
    Console(String),
}

/// Counters reported when the inbound channel closes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PumpStats {
    /// Frames routed to a handler.
    pub delivered: usize,
    /// Frames with no registered handler.
    pub dropped: usize,
    /// Console commands that ran successfully.
    pub commands: usize,
    /// Frames or commands that failed.
    pub failed: usize,
}

/// Drain `inbound` until every sender is dropped.
///
/// Failures are logged and counted; a bad frame never stops the loop.
pub async fn pump(
    mut inbound: mpsc::Receiver<Inbound>,
    dispatcher: &mut Dispatcher,
    commands: &mut CommandRegistry,
) -> PumpStats {
    let mut stats = PumpStats::default();

    while let Some(item) = inbound.recv().await {
        match item {
            Inbound::Frame(frame) => match dispatcher.dispatch_frame(&frame) {
                Ok(true) => stats.delivered += 1,
                Ok(false) => stats.dropped += 1,
                Err(error) => {
                    stats.failed += 1;
                    warn!(target: "comm::pump", error = ?error, "Failed to apply inbound frame");
                }
            },
            Inbound::Console(line) => match commands.invoke_line(&line) {
                Ok(()) => stats.commands += 1,
                Err(error) => {
                    stats.failed += 1;
                    warn!(target: "comm::pump", error = ?error, line = %line, "Console command failed");
                }
            },
        }
    }

    info!(
        target: "comm::pump",
        delivered = stats.delivered,
        dropped = stats.dropped,
        commands = stats.commands,
        failed = stats.failed,
        "Inbound channel closed"
    );

    stats
}
