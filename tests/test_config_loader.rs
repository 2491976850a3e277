mod common;

use std::path::{Path, PathBuf};

use common::{DmsnapProcess, VALID_CONFIG, write_config};
use dmsnap::config::{
    Config, ConfigLoader, LoaderOptions, load_config, load_config_optional, parse_size,
};
use dmsnap::error::{ConfigError, ConfigErrorKind};

fn fixture(name: &str) -> PathBuf {
    DmsnapProcess::fixture_path(name)
}

#[test]
fn load_valid_fixture() {
    let config = load_config(&fixture("valid.toml")).unwrap();
    assert_eq!(
        config.root_path,
        PathBuf::from("/var/lib/containerd/io.containerd.snapshotter.v1.devmapper")
    );
    assert_eq!(config.pool_name, "containerd-pool");
    assert_eq!(config.base_image_size, "32GiB");
    assert_eq!(config.base_image_size_bytes, 34_359_738_368);
    assert!(config.async_remove);
    assert!(config.discard_blocks);
}

#[test]
fn flags_default_to_false() {
    let config = load_config(&fixture("minimal.toml")).unwrap();
    assert_eq!(config.base_image_size_bytes, 32_000_000_000);
    assert!(!config.async_remove);
    assert!(!config.discard_blocks);
}

#[test]
fn flags_pass_through_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    for (async_remove, discard_blocks) in [(true, false), (false, true), (false, false)] {
        let content =
            format!("{VALID_CONFIG}async_remove = {async_remove}\ndiscard_blocks = {discard_blocks}\n");
        let path = write_config(dir.path(), "flags.toml", &content);
        let config = load_config(&path).unwrap();
        assert_eq!(config.async_remove, async_remove);
        assert_eq!(config.discard_blocks, discard_blocks);
    }
}

#[test]
fn derived_bytes_match_independent_parse() {
    let dir = tempfile::tempdir().unwrap();
    for size in ["0", "1024", "1KiB", "32GB", "32GiB", "512mib", "3Tb"] {
        let content = format!(
            "root_path = \"/r\"\npool_name = \"p\"\nbase_image_size = \"{size}\"\n"
        );
        let path = write_config(dir.path(), "size.toml", &content);
        let config = load_config(&path).unwrap();
        assert_eq!(config.base_image_size_bytes, parse_size(size).unwrap(), "size {size}");
    }
}

#[test]
fn unknown_keys_are_ignored() {
    let config = load_config(&fixture("unknown_keys.toml")).unwrap();
    assert_eq!(config.base_image_size_bytes, 512 * 1024 * 1024);
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = load_config(&path).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::NotFound);
    assert!(matches!(err, ConfigError::NotFound { path: ref p } if p == &path));
}

#[test]
fn missing_file_is_none_when_optional() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_config_optional(&dir.path().join("absent.toml")).unwrap();
    assert!(result.is_none());

    let present = load_config_optional(&fixture("minimal.toml")).unwrap();
    assert!(present.is_some());
}

#[test]
fn optional_load_still_reports_broken_files() {
    let err = load_config_optional(&fixture("bad_syntax.toml")).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::Parse);
}

#[test]
fn unreadable_path_is_io_error() {
    // Reading a directory fails regardless of privileges.
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(dir.path()).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::Io);
}

#[cfg(unix)]
#[test]
fn path_through_regular_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_config(dir.path(), "plain", "x");
    // "plain/config.toml" fails with ENOTDIR, which is not a missing file.
    let err = load_config(&file.join("config.toml")).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::Io);
}

#[test]
fn syntax_error_is_parse_error_with_path() {
    let path = fixture("bad_syntax.toml");
    let err = load_config(&path).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::Parse);
    match &err {
        ConfigError::Parse { path: p, line, .. } => {
            assert_eq!(p, &path);
            assert_eq!(*line, Some(2));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
    assert!(err.to_string().contains("bad_syntax.toml"));
}

#[test]
fn binary_content_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binary.toml");
    std::fs::write(&path, b"\x00\x01\x02\x03\xff\xfe\xfd\xfc").unwrap();

    let err = load_config(&path).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::Parse);
}

#[test]
fn bad_size_names_field_and_value() {
    let err = load_config(&fixture("bad_size.toml")).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::Parse);
    let msg = err.to_string();
    assert!(msg.contains("base_image_size"), "{msg}");
    assert!(msg.contains("ten gigabytes"), "{msg}");
}

#[test]
fn empty_size_fails_as_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        "empty_size.toml",
        "root_path = \"/r\"\npool_name = \"p\"\nbase_image_size = \"\"\n",
    );
    let err = load_config(&path).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::Parse);
}

#[test]
fn missing_fields_are_aggregated() {
    let err = load_config(&fixture("missing_fields.toml")).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::Validation);

    let messages: Vec<String> = err.issues().iter().map(ToString::to_string).collect();
    assert_eq!(messages, vec!["pool_name is required", "root_path is required"]);
}

#[test]
fn validate_reports_one_entry_per_missing_field() {
    let base = Config {
        root_path: PathBuf::from("/r"),
        pool_name: "p".to_string(),
        base_image_size: "1GB".to_string(),
        ..Config::default()
    };
    assert!(base.validate().is_ok());

    for mask in 1u8..8 {
        let mut config = base.clone();
        let mut expected = Vec::new();
        if mask & 1 != 0 {
            config.pool_name.clear();
            expected.push("pool_name");
        }
        if mask & 2 != 0 {
            config.root_path = PathBuf::new();
            expected.push("root_path");
        }
        if mask & 4 != 0 {
            config.base_image_size.clear();
            expected.push("base_image_size");
        }

        let err = config.validate().unwrap_err();
        let fields: Vec<&str> = err.issues().iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, expected, "mask {mask:03b}");
    }
}

#[test]
fn warnings_do_not_fail_load() {
    let result = ConfigLoader::with_defaults()
        .load(&fixture("warnings.toml"))
        .unwrap();
    let fields: Vec<&str> = result.warnings.iter().map(|w| w.field.as_str()).collect();
    assert_eq!(fields, vec!["pool_name", "root_path"]);
}

#[test]
fn strict_loader_rejects_warnings() {
    let loader = ConfigLoader::new(LoaderOptions { strict: true });
    let err = loader.load(&fixture("warnings.toml")).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::Validation);
    assert_eq!(err.issues().len(), 2);
}

#[test]
fn repeated_loads_are_independent() {
    let path = fixture("valid.toml");
    let first = load_config(&path).unwrap();
    let second = load_config(Path::new(&path)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn toml_output_reloads_to_same_record() {
    let config = load_config(&fixture("valid.toml")).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "rewritten.toml", &config.to_toml_string().unwrap());
    assert_eq!(load_config(&path).unwrap(), config);
}
