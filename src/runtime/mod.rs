pub mod interpreter;
pub mod registry;

pub use interpreter::run_program;
pub use registry::{Entity, Registry};
