//! Shared integration-test harness for running the `dmsnap` binary and
//! writing scratch configuration files.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// A complete, valid configuration document.
pub const VALID_CONFIG: &str = r#"
root_path = "/var/lib/containerd/devmapper"
pool_name = "containerd-pool"
base_image_size = "10GB"
"#;

/// Helpers for invoking the `dmsnap` binary.
pub struct DmsnapProcess;

impl DmsnapProcess {
    /// Runs `dmsnap` with the given arguments and waits for it to exit.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_command(args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_dmsnap"))
            .args(args)
            .env_remove("DMSNAP_CONFIG")
            .env_remove("DMSNAP_LOG_LEVEL")
            .env("NO_COLOR", "1")
            .output()
            .expect("failed to run dmsnap")
    }

    /// Returns the path to a test fixture.
    #[must_use]
    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }
}

/// Writes `content` to `name` inside `dir` and returns the full path.
#[allow(clippy::missing_panics_doc)]
pub fn write_config(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("failed to write config");
    path
}

/// Converts a path to `&str` for use as a CLI argument.
#[allow(clippy::missing_panics_doc)]
#[must_use]
pub fn arg(path: &Path) -> &str {
    path.to_str().expect("non-UTF-8 path")
}
