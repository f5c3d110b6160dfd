//! Named command surface for callers outside the component boundary.
//!
//! Inline UI handlers, console input and scripts cannot hold typed references
//! to client components. Instead a component registers a command under a
//! well-known name and such callers invoke it by name with JSON arguments.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::CommandError;

/// A registered command. Receives the positional arguments of one invocation.
pub type Command = Box<dyn FnMut(&[Value]) -> Result<(), CommandError>>;

/// Registry of named commands.
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register a command under `name`.
    ///
    /// If a command already exists under this name, it will be replaced.
    pub fn register(&mut self, name: &str, command: Command) {
        if self.commands.insert(name.to_string(), command).is_some() {
            warn!(target: "comm::commands", command = name, "Replacing existing command");
        }
    }

    /// Invoke a command by name.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::UnknownCommand` if nothing is registered under
    /// `name`, otherwise whatever the command itself reports.
    pub fn invoke(&mut self, name: &str, args: &[Value]) -> Result<(), CommandError> {
        let command = self
            .commands
            .get_mut(name)
            .ok_or_else(|| CommandError::UnknownCommand {
                name: name.to_string(),
            })?;

        debug!(target: "comm::commands", command = name, args = args.len(), "Invoking command");
        command(args)
    }

    /// Parse a console line (see [`parse_command_line`]) and invoke it.
    pub fn invoke_line(&mut self, line: &str) -> Result<(), CommandError> {
        let (name, args) = parse_command_line(line)?;
        self.invoke(&name, &args)
    }

    /// Check if a command is registered under `name`.
    pub fn has(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Returns the registered command names (for debugging).
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a console line into a command name and JSON arguments.
///
/// The leading `/` is optional. Arguments are separated by whitespace; each one
/// is parsed as JSON when possible and kept as a plain string otherwise.
/// Double-quoted arguments may contain whitespace.
///
/// ```text
/// /set_option show_game_time true    -> ("set_option", [true])
/// /set_option tile_font "DejaVu Sans" -> ("set_option", ["tile_font", "DejaVu Sans"])
/// ```
pub fn parse_command_line(line: &str) -> Result<(String, Vec<Value>), CommandError> {
    let line = line.trim();
    let line = line.strip_prefix('/').unwrap_or(line);

    let mut tokens = tokenize(line)?.into_iter();
    let name = tokens.next().ok_or(CommandError::Empty)?;

    let args = tokens
        .map(|token| serde_json::from_str(&token).unwrap_or(Value::String(token)))
        .collect();

    Ok((name, args))
}

fn tokenize(line: &str) -> Result<Vec<String>, CommandError> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let mut token = String::new();
        if c == '"' {
            // Keep the quotes so the token parses as a JSON string.
            token.push(c);
            chars.next();
            let mut escaped = false;
            let mut closed = false;
            for c in chars.by_ref() {
                token.push(c);
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    closed = true;
                    break;
                }
            }
            if !closed {
                return Err(CommandError::InvalidArguments {
                    command: line.split_whitespace().next().unwrap_or_default().to_string(),
                    reason: "unterminated quoted argument".to_string(),
                });
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                token.push(c);
                chars.next();
            }
        }
        tokens.push(token);
    }

    Ok(tokens)
}
