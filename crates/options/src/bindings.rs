//! Wiring between the option store and the message/command surfaces.
//!
//! Two inbound message kinds feed the store:
//!
//! | kind         | payload                               | effect          |
//! |--------------|---------------------------------------|-----------------|
//! | `options`    | `{"options": {..}, "watcher": bool}`  | `apply_bulk`    |
//! | `set_option` | `{"name": str, "value": scalar}`      | `apply_single`  |
//!
//! and one named command, `set_option name value`, lets callers outside the
//! client's own types (inline UI handlers, the console) write options.

use client_comm::{
    CommandError, CommandRegistry, HandlerError, HandlerRegistrar, HandlerResult, Message,
};
use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::handle::OptionsHandle;
use crate::value::{OptionSet, OptionValue};

/// Message kind carrying a full options snapshot.
pub const OPTIONS_MESSAGE: &str = "options";
/// Message kind carrying a single option change.
pub const SET_OPTION_MESSAGE: &str = "set_option";
/// Command name exposed to externally-authored callers.
pub const SET_OPTION_COMMAND: &str = "set_option";

/// Full snapshot payload.
///
/// Decoding is lenient: an entry whose value is not a scalar is logged and
/// skipped instead of failing the whole snapshot, and anything other than a
/// literal `true` under `watcher` counts as `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionsPayload {
    #[serde(deserialize_with = "scalar_entries")]
    pub options: OptionSet,
    #[serde(default, deserialize_with = "watcher_flag")]
    pub watcher: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetOptionPayload {
    pub name: String,
    pub value: OptionValue,
}

impl OptionsHandle {
    /// Register the `options` and `set_option` message handlers.
    pub fn register_handlers<R>(&self, registrar: &mut R)
    where
        R: HandlerRegistrar + ?Sized,
    {
        let options = self.clone();
        registrar.register_handler(
            OPTIONS_MESSAGE,
            Box::new(move |message: &Message| -> HandlerResult {
                let payload: OptionsPayload = message.decode()?;
                options
                    .apply_bulk(payload.options, payload.watcher)
                    .map_err(HandlerError::failed)?;
                Ok(())
            }),
        );

        let options = self.clone();
        registrar.register_handler(
            SET_OPTION_MESSAGE,
            Box::new(move |message: &Message| -> HandlerResult {
                let payload: SetOptionPayload = message.decode()?;
                options
                    .apply_single(payload.name, payload.value)
                    .map_err(HandlerError::failed)?;
                Ok(())
            }),
        );
    }

    /// Expose `set` as the `set_option` command.
    pub fn register_commands(&self, commands: &mut CommandRegistry) {
        let options = self.clone();
        commands.register(
            SET_OPTION_COMMAND,
            Box::new(move |args: &[Value]| -> Result<(), CommandError> {
                let (name, value) = parse_set_option_args(args)?;
                options
                    .set(name, value)
                    .map_err(|e| CommandError::failed(SET_OPTION_COMMAND, e))?;
                Ok(())
            }),
        );
    }
}

fn scalar_entries<'de, D>(deserializer: D) -> Result<OptionSet, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = HashMap::<String, Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(name, value)| match OptionValue::deserialize(&value) {
            Ok(decoded) => Some((name, decoded)),
            Err(_) => {
                warn!(
                    target: "options::store",
                    option = %name,
                    %value,
                    "Skipping option with unsupported value"
                );
                None
            }
        })
        .collect())
}

fn watcher_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

fn parse_set_option_args(args: &[Value]) -> Result<(String, OptionValue), CommandError> {
    let [name, value] = args else {
        return Err(CommandError::invalid_arguments(
            SET_OPTION_COMMAND,
            format!("expected 2 arguments (name, value), got {}", args.len()),
        ));
    };

    let name = name.as_str().ok_or_else(|| {
        CommandError::invalid_arguments(SET_OPTION_COMMAND, "option name must be a string")
    })?;

    let value = OptionValue::deserialize(value).map_err(|e| {
        CommandError::invalid_arguments(SET_OPTION_COMMAND, format!("unsupported value: {e}"))
    })?;

    Ok((name.to_string(), value))
}
