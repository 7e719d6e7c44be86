//! CLI engine: argument parsing and the run handler.

pub mod arg_parser;
pub mod cli;

pub use arg_parser::{Cli, SensorArg};
pub use cli::handle_run;
