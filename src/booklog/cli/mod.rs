//! # CLI Layer
//!
//! One possible UI client for booklog. This is the only place that knows about
//! stdout/stderr, exit codes and argument parsing.
//!
//! - `setup.rs`: clap definitions
//! - `commands.rs`: context setup, dispatch, per-command handlers
//! - `print.rs`: terminal formatting of `CmdResult` data

mod commands;
mod print;
mod setup;

pub use commands::run;
