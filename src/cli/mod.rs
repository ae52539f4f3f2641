//! This module defines the command-line interface structure and handlers.

pub mod commands;
pub mod formatters;

pub use commands::{handle_command, CliArgs};
pub use formatters::{ConsoleSink, JsonSink, Palette};
