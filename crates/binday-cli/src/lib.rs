//! The `binday` command-line interface.
//!
//! Provisions a Google calendar with a decade of glass-bin collection
//! reminders. The flow is strictly linear: authenticate, create the
//! calendar, insert one event per month.

pub mod cli;
pub mod commands;
pub mod config;
pub mod defaults;
pub mod error;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
