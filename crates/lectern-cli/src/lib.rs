//! Lectern CLI library.
//!
//! Front end for the pipeline: loads `~/.lectern/config.toml`, runs the
//! startup checks, and drives a [`lectern_pipeline::Session`] either once
//! (`ask`, `extract`) or interactively (`repl`).

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
