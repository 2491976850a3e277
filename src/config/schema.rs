//! Devmapper snapshotter configuration schema
//!
//! A configuration file is a flat TOML document:
//!
//! ```toml
//! root_path = "/var/lib/containerd/devmapper"
//! pool_name = "containerd-pool"
//! base_image_size = "10GB"
//! async_remove = true
//! discard_blocks = false
//! ```
//!
//! Unknown keys are ignored. Missing string keys deserialize as empty strings
//! so that validation can report every one of them at once.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default location of the devmapper configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/containerd/devmapper.toml";

/// Device-mapper snapshotter configuration.
///
/// Size values are written in human-readable form (`"32KiB"`, `"32GB"`,
/// `"32Tb"`); the loader fills in [`base_image_size_bytes`] from
/// [`base_image_size`].
///
/// [`base_image_size_bytes`]: Config::base_image_size_bytes
/// [`base_image_size`]: Config::base_image_size
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Snapshotter root directory for metadata.
    pub root_path: PathBuf,

    /// Name of the thin-pool device, without the `/dev/mapper/` prefix.
    pub pool_name: String,

    /// Space to allocate when creating the base image for a container.
    pub base_image_size: String,

    /// [`base_image_size`](Self::base_image_size) in bytes. Never read from
    /// or written to TOML.
    #[serde(skip)]
    pub base_image_size_bytes: u64,

    /// Remove devices asynchronously from the snapshot garbage collector
    /// instead of at removal time.
    pub async_remove: bool,

    /// Discard blocks when removing a thin device.
    pub discard_blocks: bool,
}

impl Config {
    /// Serializes the configuration back to TOML.
    ///
    /// The derived byte count is omitted; reloading the output yields an
    /// equal configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `root_path` is not valid UTF-8.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}
