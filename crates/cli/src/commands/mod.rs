//! CLI commands for return significance testing.

pub mod analyze_returns;

pub use analyze_returns::{run_from_source, CommandError, EXIT_FAILURE, EXIT_INPUT_ERROR};
