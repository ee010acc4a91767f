//! # schemabox-cli
//!
//! Library behind the `schemabox` command, which turns a JSON entity schema
//! into a generated model file.
//!
//! ## Architecture
//!
//! - [`config`] - `schemabox.toml` loading and CLI overrides
//! - [`pipeline`] - load, lint and generate, plus the up-to-date check
//! - [`writer`] - file output with dry-run support
//! - [`watcher`] - schema watching for development mode
//! - [`error`] - error types and exit codes

pub mod config;
pub mod error;
pub mod pipeline;
pub mod watcher;
pub mod writer;

pub use config::{CliArgs, Config, ConfigManager, CONFIG_FILENAME};
pub use error::{CliError, CliResult};
pub use pipeline::{Generation, Pipeline};
pub use watcher::{FileWatcher, WatchEvent};
pub use writer::{FileWriter, WriteResult};
