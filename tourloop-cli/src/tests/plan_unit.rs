//! Focused unit tests covering plan CLI configuration and address loading.

use super::helpers::{utf8_workspace, write_utf8};
use super::*;
use camino::Utf8PathBuf;
use crate::plan::{PlanArgs, PlanConfig, config_from_layers_for_test, load_addresses};
use rstest::rstest;
use tourloop_core::DEFAULT_MAX_STOPS;

fn config_for(addresses_path: Utf8PathBuf) -> PlanConfig {
    PlanConfig::try_from(PlanArgs {
        addresses_path: Some(addresses_path),
        ..PlanArgs::default()
    })
    .expect("config should build")
}

#[rstest]
fn converting_plan_without_addresses_errors() {
    let err = PlanConfig::try_from(PlanArgs::default()).expect_err("missing addresses");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_PLAN_ADDRESSES);
            assert_eq!(env, ENV_PLAN_ADDRESSES);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn plan_config_applies_service_defaults() {
    let config = config_for(Utf8PathBuf::from("stops.txt"));

    assert_eq!(config.osrm_base_url, "https://router.project-osrm.org");
    assert_eq!(config.nominatim_base_url, "https://nominatim.openstreetmap.org");
    assert_eq!(config.profile, "driving");
    assert_eq!(config.max_stops, DEFAULT_MAX_STOPS);
    assert!(config.allow_fallback);
    assert!(!config.geometry);
}

#[rstest]
fn flags_override_defaults() {
    let args = PlanArgs {
        addresses_path: Some(Utf8PathBuf::from("stops.txt")),
        profile: Some("foot".to_owned()),
        max_stops: Some(10),
        no_fallback: true,
        geometry: true,
        ..PlanArgs::default()
    };

    let config = PlanConfig::try_from(args).expect("config should build");

    assert_eq!(config.profile, "foot");
    assert_eq!(config.max_stops, 10);
    assert!(!config.allow_fallback);
    assert!(config.geometry);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(19)]
fn max_stops_outside_solver_range_is_rejected(#[case] max_stops: usize) {
    let args = PlanArgs {
        addresses_path: Some(Utf8PathBuf::from("stops.txt")),
        max_stops: Some(max_stops),
        ..PlanArgs::default()
    };

    let err = PlanConfig::try_from(args).expect_err("out of range");
    match err {
        CliError::OutOfRange {
            field, value, max, ..
        } => {
            assert_eq!(field, ARG_MAX_STOPS);
            assert_eq!(value, max_stops);
            assert_eq!(max, 18);
        }
        other => panic!("expected OutOfRange, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_missing_file() {
    let (_tmp, root) = utf8_workspace();
    let config = config_for(root.join("absent.txt"));

    let err = config.validate_sources().expect_err("expected failure");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_PLAN_ADDRESSES),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_not_file() {
    let (_tmp, root) = utf8_workspace();
    let path = root.join("stops");
    std::fs::create_dir(&path).expect("directory");

    let err = config_for(path.clone())
        .validate_sources()
        .expect_err("expected directory path to fail validation");
    match err {
        CliError::SourcePathNotFile { field, path: found } => {
            assert_eq!(field, ARG_PLAN_ADDRESSES);
            assert_eq!(found, path);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn load_addresses_skips_blank_lines() {
    let (_tmp, root) = utf8_workspace();
    let path = root.join("stops.txt");
    write_utf8(&path, b"  1 High St\n\n2 Low Rd  \r\n\n");

    let addresses = load_addresses(&path).expect("addresses");

    assert_eq!(addresses, vec!["1 High St".to_owned(), "2 Low Rd".to_owned()]);
}

#[rstest]
fn load_addresses_io_error_returns_read_error() {
    let (_tmp, root) = utf8_workspace();
    let path = root.join("absent.txt");

    let err = load_addresses(&path).expect_err("missing file should error");
    match err {
        CliError::ReadAddresses { path: found, .. } => assert_eq!(found, path),
        other => panic!("expected ReadAddresses, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "max_stops": "many" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "addresses_path": "from-file.txt",
            "osrm_base_url": "http://from-file:5000",
            "profile": "cycling",
        }),
        None,
    );
    composer.push_environment(json!({
        "addresses_path": "from-env.txt",
        "profile": "foot",
    }));
    composer.push_cli(json!({ "max_stops": 8 }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.addresses_path, Utf8PathBuf::from("from-env.txt"));
    assert_eq!(config.osrm_base_url, "http://from-file:5000");
    assert_eq!(config.profile, "foot");
    assert_eq!(config.max_stops, 8);
}
