//! Configuration module
//!
//! Loading, normalization and validation of the devmapper snapshotter
//! configuration file.

pub mod loader;
pub mod schema;
pub mod size;
pub mod validation;

pub use loader::{ConfigLoader, LoadResult, LoaderOptions, load_config, load_config_optional};
pub use schema::{Config, DEFAULT_CONFIG_PATH};
pub use size::{SizeParseError, format_size, parse_size};
pub use validation::{ValidationResult, Validator};
