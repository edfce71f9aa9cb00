//! CLI command handlers.

pub mod emit;
pub mod levels;
pub mod services;

pub use emit::{EmitCommandInput, run_emit};
pub use levels::run_levels;
pub use services::run_services;
