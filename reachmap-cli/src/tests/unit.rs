//! Focused unit tests covering export CLI configuration and execution.

use super::helpers::{Workspace, rogue_source};
use super::*;
use camino::Utf8PathBuf;
use ortho_config::MergeComposer;
use reachmap_core::DEFAULT_PAGE_SIZE;
use reachmap_data::graphql::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use rstest::rstest;
use serde_json::json;
use std::time::Duration;

#[rstest]
fn converting_empty_args_uses_defaults() {
    let config = ExportConfig::try_from(ExportArgs::default()).expect("defaults should resolve");

    assert_eq!(config.source.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.source.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(
        config.source.timeout,
        Duration::from_secs(DEFAULT_TIMEOUT_SECS)
    );
    assert_eq!(config.output_dir, Utf8PathBuf::from("data"));
    assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
}

#[rstest]
fn converting_overrides_every_field() {
    let args = ExportArgs {
        endpoint: Some("http://localhost:4000/graphql".to_owned()),
        user_agent: Some("tester/2.0".to_owned()),
        output_dir: Some(Utf8PathBuf::from("out")),
        page_size: Some(25),
        timeout_secs: Some(5),
    };

    let config = ExportConfig::try_from(args).expect("overrides should resolve");

    assert_eq!(config.source.endpoint, "http://localhost:4000/graphql");
    assert_eq!(config.source.user_agent, "tester/2.0");
    assert_eq!(config.source.timeout, Duration::from_secs(5));
    assert_eq!(config.output_dir, Utf8PathBuf::from("out"));
    assert_eq!(config.page_size, 25);
}

#[rstest]
fn converting_zero_page_size_errors() {
    let args = ExportArgs {
        page_size: Some(0),
        ..ExportArgs::default()
    };

    let err = ExportConfig::try_from(args).expect_err("zero page size should error");
    match err {
        CliError::InvalidPageSize { field, env } => {
            assert_eq!(field, ARG_PAGE_SIZE);
            assert_eq!(env, ENV_PAGE_SIZE);
        }
        other => panic!("expected InvalidPageSize, found {other:?}"),
    }
}

#[rstest]
fn validate_output_dir_rejects_files() {
    let workspace = Workspace::new();
    let file_path = workspace.root().join("data");
    std::fs::write(&file_path, b"not a directory").expect("write file");
    let config = ExportConfig::try_from(ExportArgs {
        output_dir: Some(file_path.clone()),
        ..ExportArgs::default()
    })
    .expect("config should resolve");

    let err = config
        .validate_output_dir()
        .expect_err("file output dir should error");
    match err {
        CliError::OutputDirectoryIsFile { path } => assert_eq!(path, file_path),
        other => panic!("expected OutputDirectoryIsFile, found {other:?}"),
    }
}

#[rstest]
fn validate_output_dir_accepts_missing_and_existing_directories() {
    let workspace = Workspace::new();
    for output_dir in [workspace.output_dir(), workspace.root().clone()] {
        let config = ExportConfig::try_from(ExportArgs {
            output_dir: Some(output_dir),
            ..ExportArgs::default()
        })
        .expect("config should resolve");

        config
            .validate_output_dir()
            .expect("directories should validate");
    }
}

#[rstest]
fn run_export_with_writes_shards() {
    let workspace = Workspace::new();
    let config = ExportConfig::try_from(ExportArgs {
        output_dir: Some(workspace.output_dir()),
        page_size: Some(10),
        ..ExportArgs::default()
    })
    .expect("config should resolve");
    let source = rogue_source();

    let summary = run_export_with(&config, &source).expect("export should succeed");

    assert_eq!(summary.rivers, 1);
    assert_eq!(summary.files, 1);
    assert!(workspace.output_dir().join("OR").join("Rogue.kml").is_file());
    let pages: Vec<u32> = source.requests().iter().map(|r| r.per_page).collect();
    assert_eq!(pages, vec![10]);
}

#[rstest]
fn run_export_with_maps_export_errors() {
    let workspace = Workspace::new();
    let config = ExportConfig::try_from(ExportArgs {
        output_dir: Some(workspace.output_dir()),
        ..ExportArgs::default()
    })
    .expect("config should resolve");
    let source = reachmap_core::test_support::StubReachSource::default();

    let err = run_export_with(&config, &source).expect_err("empty stub should fail");
    assert!(matches!(err, CliError::Export(_)), "unexpected {err:?}");
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "page_size": "many" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "endpoint": "http://from-file/graphql",
            "page_size": 10,
            "output_dir": "from-file",
        }),
        None,
    );
    composer.push_environment(json!({
        "page_size": 20,
        "output_dir": "from-env",
    }));
    composer.push_cli(json!({
        "output_dir": "from-cli",
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");

    assert_eq!(config.source.endpoint, "http://from-file/graphql");
    assert_eq!(config.page_size, 20);
    assert_eq!(config.output_dir, Utf8PathBuf::from("from-cli"));
}

#[rstest]
#[case(&["reachmap"], false)]
#[case(&["reachmap", "export"], true)]
#[case(&["reachmap", "export", "--page-size", "5"], true)]
fn parsing_accepts_optional_subcommand(#[case] argv: &[&str], #[case] has_command: bool) {
    let cli = Cli::try_parse_from(argv).expect("arguments should parse");
    assert_eq!(cli.command.is_some(), has_command);
}

#[rstest]
fn parsing_rejects_non_numeric_page_size() {
    let err = Cli::try_parse_from(["reachmap", "export", "--page-size", "lots"])
        .expect_err("non-numeric page size should fail");
    let mapped = CliError::ArgumentParsing(err);
    assert!(matches!(mapped, CliError::ArgumentParsing(_)));
}

#[rstest]
fn resolving_rejects_output_file() {
    let workspace = Workspace::new();
    let file_path = workspace.root().join("occupied");
    std::fs::write(&file_path, b"x").expect("write file");
    let args = ExportArgs {
        output_dir: Some(file_path),
        ..ExportArgs::default()
    };

    let err = resolve_export_config(args).expect_err("file output dir should error");
    assert!(matches!(err, CliError::OutputDirectoryIsFile { .. }));
}
