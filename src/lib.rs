//! `dmsnap` - configuration for a device-mapper thin-pool snapshotter
//!
//! Loads the snapshotter's TOML configuration file, converts the
//! human-readable base image size into bytes and checks that every required
//! field is present.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use dmsnap::config::load_config_optional;
//!
//! # fn main() -> Result<(), dmsnap::error::ConfigError> {
//! match load_config_optional(Path::new("/etc/containerd/devmapper.toml"))? {
//!     Some(config) => println!("pool {} ({} bytes)", config.pool_name, config.base_image_size_bytes),
//!     None => println!("devmapper snapshotter not configured"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
