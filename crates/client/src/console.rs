//! Line-oriented stdin transport.
//!
//! Stands in for the websocket: each stdin line is either a JSON message frame
//! or, when it starts with `/`, a console command such as
//! `/set_option tile_font_size 16`.

use anyhow::{Context, Result};
use client_comm::Inbound;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Classify one input line. Blank lines yield `None`.
pub fn classify_line(line: &str) -> Option<Inbound> {
    let line = line.trim();
    if line.is_empty() {
        None
    } else if line.starts_with('/') {
        Some(Inbound::Console(line.to_string()))
    } else {
        Some(Inbound::Frame(line.to_string()))
    }
}

/// Forward stdin lines into `tx` until EOF or until the receiver is dropped.
///
/// Returns the number of forwarded items.
pub fn spawn_stdin_reader(tx: mpsc::Sender<Inbound>) -> JoinHandle<Result<usize>> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut forwarded = 0;

        while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
            let Some(item) = classify_line(&line) else {
                continue;
            };
            if tx.send(item).await.is_err() {
                tracing::debug!("Inbound receiver dropped, stopping stdin reader");
                break;
            }
            forwarded += 1;
        }

        Ok(forwarded)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_frames_and_commands() {
        assert_eq!(
            classify_line(r#"  {"msg":"options","options":{}}  "#),
            Some(Inbound::Frame(r#"{"msg":"options","options":{}}"#.into()))
        );
        assert_eq!(
            classify_line("/set_option a 1"),
            Some(Inbound::Console("/set_option a 1".into()))
        );
        assert_eq!(classify_line("   "), None);
    }
}
