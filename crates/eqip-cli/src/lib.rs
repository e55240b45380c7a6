//! Eqip CLI library.
//!
//! Runs the attribution and ownership pipeline over JSON request files and
//! prints the results as tables, JSON or bare `email<TAB>value` lines.

#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::{Config, OutputFormat};
pub use error::{CliError, Result};
pub use output::Formatter;

use tracing_subscriber::EnvFilter;

/// Send pipeline logs to stderr (`RUST_LOG` overrides the `info` default)
///
/// Stdout carries only command output so it can be piped.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
