//! Subcommand implementations.

pub mod calendar;
pub mod config;
pub mod lookup;
pub mod url;

use serde::Serialize;

use crate::error::ClientResult;

/// Writes `value` to stdout as pretty-printed JSON.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> ClientResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
