//! Loader error matrix: every invalid configuration fails with a distinct,
//! stable error kind; valid configurations round-trip exactly.

use std::fs;
use std::path::Path;

use modwatch::{ConfigSource, MwdError};

fn write_config(dir: &Path, contents: &str) -> ConfigSource {
    let path = dir.join("config.toml");
    fs::write(&path, contents).expect("write config");
    ConfigSource::new(path)
}

#[test]
fn valid_pair_roundtrips() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let watched = tmp.path().join("watched");
    fs::create_dir(&watched).expect("create watched dir");

    let source = write_config(
        tmp.path(),
        &format!("period = 30\ndirectory = \"{}\"\n", watched.display()),
    );
    let config = source.load().expect("valid config must load");
    assert_eq!(config.period, 30);
    assert_eq!(config.directory, watched);
}

#[test]
fn missing_period_is_rejected() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let source = write_config(
        tmp.path(),
        &format!("directory = \"{}\"\n", tmp.path().display()),
    );
    let err = source.load().expect_err("missing period must fail");
    assert!(
        matches!(err, MwdError::MissingField { field: "period" }),
        "wrong error: {err}"
    );
    assert_eq!(err.code(), "MWD-1002");
}

#[test]
fn zero_period_is_rejected() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let source = write_config(
        tmp.path(),
        &format!("period = 0\ndirectory = \"{}\"\n", tmp.path().display()),
    );
    let err = source.load().expect_err("zero period must fail");
    assert!(
        matches!(err, MwdError::InvalidPeriod { value: 0 }),
        "wrong error: {err}"
    );
}

#[test]
fn negative_period_is_rejected() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let source = write_config(
        tmp.path(),
        &format!("period = -5\ndirectory = \"{}\"\n", tmp.path().display()),
    );
    let err = source.load().expect_err("negative period must fail");
    assert!(
        matches!(err, MwdError::InvalidPeriod { value: -5 }),
        "wrong error: {err}"
    );
}

#[test]
fn missing_directory_is_rejected() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let source = write_config(tmp.path(), "period = 30\n");
    let err = source.load().expect_err("missing directory must fail");
    assert!(
        matches!(err, MwdError::MissingField { field: "directory" }),
        "wrong error: {err}"
    );
}

#[test]
fn nonexistent_directory_is_rejected() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let missing = tmp.path().join("nope");
    let source = write_config(
        tmp.path(),
        &format!("period = 30\ndirectory = \"{}\"\n", missing.display()),
    );
    let err = source.load().expect_err("nonexistent directory must fail");
    assert!(
        matches!(err, MwdError::InvalidDirectory { .. }),
        "wrong error: {err}"
    );
    assert_eq!(err.code(), "MWD-1004");
}

#[test]
fn file_as_directory_is_rejected() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let file = tmp.path().join("plain.txt");
    fs::write(&file, "not a directory").expect("write file");

    let source = write_config(
        tmp.path(),
        &format!("period = 30\ndirectory = \"{}\"\n", file.display()),
    );
    let err = source.load().expect_err("file path must fail the probe");
    assert!(
        matches!(err, MwdError::InvalidDirectory { .. }),
        "wrong error: {err}"
    );
}

#[test]
fn missing_source_file_is_unreadable() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let source = ConfigSource::new(tmp.path().join("absent.toml"));
    let err = source.load().expect_err("absent file must fail");
    assert!(
        matches!(err, MwdError::ConfigUnreadable { .. }),
        "wrong error: {err}"
    );
    assert_eq!(err.code(), "MWD-1001");
}

#[test]
fn unparseable_source_is_unreadable() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let source = write_config(tmp.path(), "::: definitely not toml :::");
    let err = source.load().expect_err("garbage must fail");
    assert!(
        matches!(err, MwdError::ConfigUnreadable { .. }),
        "wrong error: {err}"
    );
}

#[test]
fn wrongly_typed_period_is_unreadable() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let source = write_config(
        tmp.path(),
        &format!(
            "period = \"soon\"\ndirectory = \"{}\"\n",
            tmp.path().display()
        ),
    );
    let err = source.load().expect_err("string period must fail the parse");
    assert!(
        matches!(err, MwdError::ConfigUnreadable { .. }),
        "wrong error: {err}"
    );
}
