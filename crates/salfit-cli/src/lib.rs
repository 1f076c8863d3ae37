//! Salfit CLI library.
//!
//! This library provides the core functionality for the Salfit command-line interface,
//! including configuration management, reference data loading, command execution,
//! and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod reference;
pub mod sink;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use reference::{load_reference, BuiltinReference, FileReference};
pub use sink::ConsoleSink;
