pub mod diagnostics;
pub mod runtime;
pub mod syntax;
