//! Observability module
//!
//! Logging setup for the `dmsnap` binary.

pub mod logging;

pub use logging::{LogFormat, init_logging};
