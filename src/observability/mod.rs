//! Structured logging to a rotating file in the data directory.
//!
//! The jar owns the terminal, so log output never goes to stdout or stderr.
//! Events from `tracing` macros are formatted by `tracing-subscriber` and
//! appended to `emotion-jar.log`:
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → RotatingLog → emotion-jar.log
//! ```
//!
//! # Configuration
//!
//! The filter is resolved from:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::RotatingLog;
pub use init::{init_tracing, LOG_FILE_NAME};
