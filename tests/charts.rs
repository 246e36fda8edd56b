mod common;

use std::fs;

use assert_cmd::Command;
use encoding_rs::UTF_8;
use predicates::{prelude::PredicateBooleanExt, str::contains};

use salary_insights::{
    charts::{ChartKind, HISTOGRAM_BINS, manifest, render, series},
    dataset::Dataset,
};

use common::{DATASET_FILE, TestWorkspace, fixture_path};

fn load_fixture() -> Dataset {
    let path = fixture_path(DATASET_FILE);
    assert!(path.exists(), "fixture missing: {path:?}");
    Dataset::load(&path, b',', UTF_8).expect("load fixture")
}

#[test]
fn histogram_series_covers_every_salary() {
    let dataset = load_fixture();
    let values = series::present_values(&dataset, "Monthly_Salary").expect("salaries");
    let bins = series::histogram_bins(&values, HISTOGRAM_BINS);
    assert_eq!(bins.len(), HISTOGRAM_BINS);
    assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 12);
    assert_eq!(bins[0].lower, 5000.0);
    assert_eq!(bins[HISTOGRAM_BINS - 1].upper, 16000.0);
}

#[test]
fn department_means_are_sorted_descending() {
    let dataset = load_fixture();
    let means = series::means_by_group(&dataset, "Department", "Monthly_Salary").expect("means");
    let names: Vec<&str> = means.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["Finance", "IT", "Marketing", "HR"]);
    assert_eq!(means[0].1, 13000.0);
}

#[test]
fn city_counts_are_sorted_by_frequency_then_appearance() {
    let dataset = load_fixture();
    let counts = series::value_counts(&dataset, "City").expect("counts");
    let expected = [("Jakarta", 5), ("Bandung", 3), ("Surabaya", 2), ("Medan", 2)];
    let actual: Vec<(&str, usize)> = counts.iter().map(|(k, c)| (k.as_str(), *c)).collect();
    assert_eq!(actual, expected);
}

#[test]
fn box_plot_groups_follow_first_appearance() {
    let dataset = load_fixture();
    let groups = series::values_by_group(&dataset, "Department", "Monthly_Salary").expect("groups");
    let names: Vec<&str> = groups.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["IT", "Finance", "HR", "Marketing"]);
    assert_eq!(groups[0].1, vec![8000.0, 8000.0, 9000.0, 16000.0]);
}

#[test]
fn scatter_pairs_skip_incomplete_rows() {
    let dataset = Dataset::from_records(
        vec!["Experience_Years".to_string(), "Monthly_Salary".to_string()],
        vec![
            vec!["1".to_string(), "100".to_string()],
            vec!["".to_string(), "200".to_string()],
            vec!["3".to_string(), "NA".to_string()],
        ],
    );
    let points =
        series::paired_values(&dataset, "Experience_Years", "Monthly_Salary").expect("points");
    assert_eq!(points, vec![(1.0, 100.0)]);
}

#[test]
fn manifest_lists_every_entry_sorted_by_name() {
    let workspace = TestWorkspace::new();
    workspace.write("b.png", "bb");
    workspace.write("a.png", &"a".repeat(2048));
    fs::create_dir(workspace.path().join("nested")).expect("nested dir");

    let artifacts = manifest::list_artifacts(workspace.path()).expect("artifacts");
    let names: Vec<&str> = artifacts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["a.png", "b.png", "nested"]);
    assert_eq!(artifacts[0].size_bytes, 2048);

    let rendered = manifest::render_manifest(&artifacts);
    assert!(rendered.lines().next().unwrap().ends_with("(2.0 KB)"));
}

#[test]
fn charts_missing_input_aborts_before_creating_output() {
    let workspace = TestWorkspace::new();
    Command::cargo_bin("salary-insights")
        .expect("binary exists")
        .env("RUST_LOG", "off")
        .current_dir(workspace.path())
        .arg("charts")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Input file not found"));
    assert!(!workspace.path().join("Graph").exists());
}

#[test]
fn charts_writes_seven_non_empty_pngs_and_manifest() {
    if !render::font_available() {
        eprintln!("skipping chart rendering: no '{}' font installed", render::FONT);
        return;
    }
    let workspace = TestWorkspace::new().with_default_dataset();
    let assert = Command::cargo_bin("salary-insights")
        .expect("binary exists")
        .env("RUST_LOG", "off")
        .current_dir(workspace.path())
        .arg("charts")
        .assert()
        .success()
        .stdout(contains("Dataset: 12 rows, 8 columns").and(contains("Generated files:")));

    let graph_dir = workspace.path().join("Graph");
    let artifacts = manifest::list_artifacts(&graph_dir).expect("artifacts");
    let names: Vec<&str> = artifacts.iter().map(|a| a.name.as_str()).collect();
    let expected: Vec<&str> = ChartKind::ALL.iter().map(|k| k.file_name()).collect();
    assert_eq!(names, expected);
    assert!(artifacts.iter().all(|a| a.size_bytes > 0));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let manifest_lines: Vec<&str> = stdout
        .lines()
        .skip_while(|line| *line != "Generated files:")
        .skip(1)
        .collect();
    assert_eq!(manifest_lines.len(), 7);
    for (idx, (line, name)) in manifest_lines.iter().zip(&expected).enumerate() {
        assert!(line.starts_with(&format!("  {}. {name}", idx + 1)));
    }
}
