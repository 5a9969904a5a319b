//! Shared utilities for the tangle workspace.

pub mod logging;

pub use logging::{init_logging, LogFormat, ParseLogFormatError};
