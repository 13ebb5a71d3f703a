use std::process::Command;

use featscope::sensitivity::{SensitivityMethod, SensitivityReport, save_report};
use tempfile::tempdir;

fn run_diagnose(args: &[&str], config_home: &std::path::Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_featscope-diagnose"))
        .args(args)
        .env("FEATSCOPE_CONFIG_HOME", config_home)
        .output()
        .expect("run featscope-diagnose")
}

#[test]
fn prints_json_scores() {
    let dir = tempdir().unwrap();
    let shuffled_path = dir.path().join("shuffled.json");
    let missing_path = dir.path().join("missing.json");
    save_report(
        &SensitivityReport::new(
            SensitivityMethod::Shuffled,
            [("a", 1.0), ("b", 0.0), ("c", 0.0)],
        ),
        &shuffled_path,
    )
    .unwrap();
    save_report(
        &SensitivityReport::new(
            SensitivityMethod::Missing,
            [("a", 0.0), ("b", 1.0), ("c", 0.0)],
        ),
        &missing_path,
    )
    .unwrap();

    let output = run_diagnose(
        &[
            "--shuffled",
            shuffled_path.to_str().unwrap(),
            "--missing",
            missing_path.to_str().unwrap(),
            "--json",
            "--no-log-file",
        ],
        dir.path(),
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let scores: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(scores["leakage"], 1.0);
    assert_eq!(scores["imputation"], 1.0);
    assert_eq!(scores["stats"]["n_zero"], 2);
    assert_eq!(scores["stats"]["method"], "shuffled");
}

#[test]
fn mismatched_reports_fail() {
    let dir = tempdir().unwrap();
    let shuffled_path = dir.path().join("shuffled.json");
    let missing_path = dir.path().join("missing.json");
    save_report(
        &SensitivityReport::new(SensitivityMethod::Shuffled, [("a", 1.0)]),
        &shuffled_path,
    )
    .unwrap();
    save_report(
        &SensitivityReport::new(SensitivityMethod::Missing, [("z", 1.0)]),
        &missing_path,
    )
    .unwrap();

    let output = run_diagnose(
        &[
            "--shuffled",
            shuffled_path.to_str().unwrap(),
            "--missing",
            missing_path.to_str().unwrap(),
            "--no-log-file",
        ],
        dir.path(),
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("different features"));
}
