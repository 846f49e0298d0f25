use bogie::cli::Args;
use bogie::config::{load_config, Config};
use bogie::output::OutputFormat;
use bogie::error::Error;
use clap::Parser;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("bogie")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_args() {
    let parsed = Args::try_parse_from(make_args(&[])).unwrap();

    assert_eq!(parsed.config, PathBuf::from("bogie.yaml"));
    assert!(parsed.out_format.is_none());
    assert!(!parsed.verbose);
    assert!(!parsed.prune);
}

#[test]
fn test_all_flags() {
    let args = make_args(&[
        "-c",
        "deploy/bogie.yaml",
        "--out-format",
        "file",
        "--out-path",
        "build",
        "--out-file",
        "all.yaml",
        "--env-file",
        "env/prod.yaml",
        "--app-regex",
        "^web",
        "--ignore-file",
        ".globalignore",
        "--ldelim",
        "[[",
        "--rdelim",
        "]]",
        "--prune",
        "--verbose",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.config, PathBuf::from("deploy/bogie.yaml"));
    assert_eq!(parsed.out_format.as_deref(), Some("file"));
    assert_eq!(parsed.out_path, Some(PathBuf::from("build")));
    assert_eq!(parsed.app_regex.as_deref(), Some("^web"));
    assert!(parsed.prune);
    assert!(parsed.verbose);
}

#[test]
fn test_unknown_flag() {
    assert!(Args::try_parse_from(make_args(&["--force"])).is_err());
}

#[test]
fn test_apply_overrides_config() {
    let args = Args::try_parse_from(make_args(&[
        "--out-format",
        "stdout",
        "--out-path",
        "elsewhere",
        "--prune",
    ]))
    .unwrap();
    let mut config = Config::default();
    args.apply_to(&mut config).unwrap();

    assert_eq!(config.out_format, "stdout");
    assert_eq!(config.out_path, PathBuf::from("elsewhere"));
    assert!(config.prune);
}

#[test]
fn test_apply_rejects_unknown_format() {
    let args = Args::try_parse_from(make_args(&["--out-format", "xml"])).unwrap();
    let mut config = Config::default();

    match args.apply_to(&mut config) {
        Err(Error::UnknownOutputFormat { format }) => assert_eq!(format, "xml"),
        other => panic!("Expected UnknownOutputFormat, got {other:?}"),
    }
}

#[test]
fn test_apply_fixes_invalid_file_format() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bogie.yaml");
    fs::write(&path, "out_format: xml\napplications: []\n").unwrap();

    let args = Args::try_parse_from(make_args(&["--out-format", "dir"])).unwrap();
    let mut config = load_config(&path).unwrap();
    args.apply_to(&mut config).unwrap();

    assert_eq!(config.output_format().unwrap(), OutputFormat::Dir);
}

#[test]
fn test_apply_validates_file_settings() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bogie.yaml");
    fs::write(&path, "out_format: xml\napplications: []\n").unwrap();

    let args = Args::try_parse_from(make_args(&["--prune"])).unwrap();
    let mut config = load_config(&path).unwrap();

    assert!(matches!(
        args.apply_to(&mut config),
        Err(Error::UnknownOutputFormat { .. })
    ));
}
