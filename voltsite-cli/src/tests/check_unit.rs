//! Unit tests for the check command.

use super::helpers::{Workspace, point, write_utf8};
use super::*;
use crate::check::{CheckArgs, CheckConfig, CheckReport, execute_check, run_check_with};
use rstest::rstest;

fn config(lat: f64, lng: f64) -> CheckConfig {
    CheckConfig {
        point: point(lat, lng),
        areas: None,
        buffer: None,
    }
}

#[rstest]
#[case::yamuna(28.62, 77.231, vec!["Yamuna River and Floodplains"])]
#[case::okhla(28.563, 77.308, vec!["Okhla Bird Sanctuary"])]
#[case::connaught_place(28.6315, 77.2167, vec![])]
fn reports_restricting_areas(#[case] lat: f64, #[case] lng: f64, #[case] expected: Vec<&str>) {
    let report = execute_check(&config(lat, lng)).expect("check succeeds");
    assert_eq!(report.restricted_by, expected);
    assert_eq!(report.valid, expected.is_empty());
}

#[rstest]
fn wider_buffer_rejects_nearby_point() {
    // 0.0073 degrees east of the Yamuna's west bank.
    let narrow = execute_check(&config(28.6315, 77.2167)).expect("check succeeds");
    assert!(narrow.valid);

    let wide = CheckConfig {
        buffer: Some(0.01),
        ..config(28.6315, 77.2167)
    };
    let report = execute_check(&wide).expect("check succeeds");
    assert!(!report.valid);
}

#[rstest]
fn negative_buffer_is_rejected() {
    let bad = CheckConfig {
        buffer: Some(-0.1),
        ..config(28.6, 77.2)
    };
    assert!(matches!(execute_check(&bad), Err(CliError::InvalidBuffer(_))));
}

#[rstest]
fn missing_areas_file_is_reported() {
    let workspace = Workspace::new();
    let cfg = CheckConfig {
        areas: Some(workspace.path("absent.json")),
        ..config(28.6, 77.2)
    };
    match execute_check(&cfg) {
        Err(CliError::MissingSourceFile { field, .. }) => assert_eq!(field, ARG_AREAS),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn malformed_areas_file_is_a_load_error() {
    let workspace = Workspace::new();
    let areas = workspace.path("areas.json");
    write_utf8(&areas, b"[1, 2");
    let cfg = CheckConfig {
        areas: Some(areas),
        ..config(28.6, 77.2)
    };
    assert!(matches!(execute_check(&cfg), Err(CliError::LoadData(_))));
}

#[rstest]
#[case::lat(None, Some(77.2), ARG_LAT, ENV_CHECK_LAT)]
#[case::lng(Some(28.6), None, ARG_LNG, ENV_CHECK_LNG)]
fn missing_coordinates_are_named(
    #[case] lat: Option<f64>,
    #[case] lng: Option<f64>,
    #[case] expected_field: &'static str,
    #[case] expected_env: &'static str,
) {
    let args = CheckArgs {
        lat,
        lng,
        ..CheckArgs::default()
    };
    match CheckConfig::try_from(args) {
        Err(CliError::MissingArgument { field, env }) => {
            assert_eq!(field, expected_field);
            assert_eq!(env, expected_env);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn prints_report_as_json() {
    let args = CheckArgs {
        lat: Some(28.563),
        lng: Some(77.308),
        ..CheckArgs::default()
    };
    let mut buffer = Vec::new();
    run_check_with(args, &mut buffer).expect("check succeeds");

    let report: CheckReport = serde_json::from_slice(&buffer).expect("JSON report");
    assert!(!report.valid);
    assert_eq!(report.lat, 28.563);
    assert_eq!(report.restricted_by, vec!["Okhla Bird Sanctuary".to_owned()]);
}
