//! Errors and diagnostics shared by the commands.

mod errors;

pub use errors::*;
