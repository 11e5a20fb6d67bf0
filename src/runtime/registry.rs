//! The name/symbol registry: qualified-path table plus the run's buffered
//! log output. The registry never performs I/O itself; the buffer is
//! drained once by the caller after execution.

use std::collections::HashMap;
use std::io::{self, Write};

use crate::diagnostics::{ExecError, error_codes};
use crate::syntax::directive::NodeId;
use crate::syntax::position::Position;

/// A registered, addressable declaration or scope, keyed by its qualified
/// path. `node` points back into the scanned directive sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub path: String,
    pub node: NodeId,
}

#[derive(Debug, Default)]
pub struct Registry {
    entities: HashMap<String, Entity>,
    output: Vec<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `path` for the entity called `short`. Fails when the
    /// short name breaks the identifier rule; returns `false` without
    /// touching the table when the path is already taken.
    pub fn register(
        &mut self,
        short: &str,
        path: String,
        node: NodeId,
        position: Position,
    ) -> Result<bool, ExecError> {
        if !is_valid_name(short) {
            return Err(ExecError::new(
                &error_codes::INVALID_NAME,
                format!("declaration \"{}\" has an invalid format", short),
                position,
            ));
        }
        if self.entities.contains_key(&path) {
            return Ok(false);
        }
        self.entities.insert(path.clone(), Entity { path, node });
        Ok(true)
    }

    /// Exact-match lookup by qualified path.
    pub fn lookup(&self, path: &str) -> Option<&Entity> {
        self.entities.get(path)
    }

    /// Appends one line to the buffered run output.
    pub fn log(&mut self, line: String) {
        self.output.push(line);
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Writes the buffered lines to `sink` in insertion order, then clears
    /// the buffer. One-shot; there are no partial drains.
    pub fn drain(&mut self, sink: &mut impl Write) -> io::Result<()> {
        for line in self.output.drain(..) {
            writeln!(sink, "{}", line)?;
        }
        Ok(())
    }
}

/// Identifier rule: one ASCII letter followed by zero or more ASCII
/// letters or digits, case-insensitive.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric())
}
