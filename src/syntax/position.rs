use std::fmt;

use serde::Serialize;

/// Source location with a 1-based line number.
///
/// The scanner starts at line 1, column 0 and advances the column before
/// handling a character, so the first character of every line sits at
/// column 1. A newline moves to the next line and resets the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Advance past one consumed character.
    pub fn advance(&mut self) {
        self.column += 1;
    }

    /// Move to the start of the next line.
    pub fn newline(&mut self) {
        self.line += 1;
        self.column = 0;
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
