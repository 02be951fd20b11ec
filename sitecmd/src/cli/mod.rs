//! Binary-level CLI definitions and handlers
//!
//! This module organizes the binary's CLI into logical submodules:
//! - [`args`] - Global flags and built-in subcommands
//! - [`handlers`] - Built-in subcommand handlers

mod args;
mod handlers;

pub use args::*;
pub use handlers::*;
