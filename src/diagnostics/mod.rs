pub mod error_codes;

pub use error_codes::ErrorCode;

use std::error::Error;
use std::fmt;

use crate::syntax::position::Position;

/// One reported failure: a stable code and tag from [`error_codes`], a
/// human-readable reason, and the position it was produced at.
///
/// The tag is always shown to the user; the reason and position only in
/// debug mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: &'static str,
    pub title: &'static str,
    pub message: String,
    pub position: Position,
}

impl Diagnostic {
    pub fn new(spec: &ErrorCode, message: impl Into<String>, position: Position) -> Self {
        Self {
            code: spec.code,
            title: spec.title,
            message: message.into(),
            position,
        }
    }

    /// Short tag: `error[E104]: UNRESOLVED NAME`.
    pub fn tag(&self) -> String {
        format!("error[{}]: {}", self.code, self.title)
    }

    /// Detailed reason with source position.
    pub fn detail(&self) -> String {
        format!("{} at {}", self.message, self.position)
    }

    pub fn render(&self, debug: bool) -> String {
        if debug {
            format!("{}: {}", self.tag(), self.detail())
        } else {
            self.tag()
        }
    }
}

/// A structural or parse-time failure. One of these invalidates the whole
/// run: no directive sequence is produced and nothing executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError(Diagnostic);

impl ScanError {
    pub fn new(spec: &ErrorCode, message: impl Into<String>, position: Position) -> Self {
        Self(Diagnostic::new(spec, message, position))
    }

    pub fn diagnostic(&self) -> &Diagnostic {
        &self.0
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.tag())
    }
}

impl Error for ScanError {}

/// An execute-phase failure. Skips exactly one directive; the run
/// continues with the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecError(Diagnostic);

impl ExecError {
    pub fn new(spec: &ErrorCode, message: impl Into<String>, position: Position) -> Self {
        Self(Diagnostic::new(spec, message, position))
    }

    pub fn diagnostic(&self) -> &Diagnostic {
        &self.0
    }
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.tag())
    }
}

impl Error for ExecError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_is_short_and_stable() {
        let diag = Diagnostic::new(
            &error_codes::UNRESOLVED_NAME,
            "declaration \"x\" does not exist",
            Position::new(4, 9),
        );
        assert_eq!(diag.tag(), "error[E104]: UNRESOLVED NAME");
        assert_eq!(diag.render(false), "error[E104]: UNRESOLVED NAME");
    }

    #[test]
    fn debug_render_appends_reason_and_position() {
        let diag = Diagnostic::new(
            &error_codes::UNBALANCED_SCOPE,
            "more scope ends than scope starts",
            Position::new(2, 1),
        );
        assert_eq!(
            diag.render(true),
            "error[E004]: UNBALANCED SCOPE: more scope ends than scope starts at 2:1"
        );
    }
}
