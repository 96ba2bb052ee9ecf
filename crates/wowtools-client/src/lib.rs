//! CLI, configuration and output for the `wowtools` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod token;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
