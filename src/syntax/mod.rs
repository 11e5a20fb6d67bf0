pub mod directive;
pub mod position;
pub mod scanner;

pub use directive::{Directive, NodeId};
pub use position::Position;
pub use scanner::Scanner;
