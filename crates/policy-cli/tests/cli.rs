use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

const POLICY_TEXT: &str = "GROUP MEDICLAIM POLICY\n\
    Endt. No. 16 Ambulance Cover\n\
    Road ambulance charges up to a limit of Rs. 5,000 per hospitalization. Number of trips: 2\n\
    Endt. No. 17 Home Nursing Allowance\n\
    Following discharge, a daily allowance of Rs. 500 is payable for a maximum 30 days.\n";

fn policy() -> Command {
    Command::cargo_bin("policy").unwrap()
}

#[test]
fn test_process_text_file_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("policy.txt");
    fs::write(&input, POLICY_TEXT).unwrap();

    let output = policy().arg("process").arg(&input).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let coverages = json["addon_coverages"].as_object().unwrap();
    let names: Vec<&str> = coverages.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec![
            "Ambulance Cover",
            "Convalescence Benefit",
            "Critical Illness",
            "Daily Cash Cover",
            "Home Nursing Allowance",
        ]
    );

    let ambulance = &json["addon_coverages"]["Ambulance Cover"][0];
    assert_eq!(ambulance["Ambulance_Number_of_Trips"], 2);
    assert_eq!(ambulance["Ambulance_Limit_Amount"], 5000.0);
    assert_eq!(ambulance["Ambulance_Limit_Percentage"], 0.01);

    let convalescence = &json["addon_coverages"]["Convalescence Benefit"];
    assert_eq!(convalescence.as_array().unwrap().len(), 1);
    assert_eq!(convalescence[0]["Convalescence_Benefit_Amount"], "");

    assert_eq!(json["addon_covers"]["Ambulance Cover"], "Yes");
    assert_eq!(json["addon_covers"]["Cancer Cover"], "No");
}

#[test]
fn test_process_csv_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("policy.txt");
    let output = dir.path().join("report.csv");
    fs::write(&input, POLICY_TEXT).unwrap();

    policy()
        .args(["process", "-f", "csv", "-o"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("section,category,record,field,value"));
    assert!(csv.contains("addon_coverages,Home Nursing Allowance,0,Nursing_Days_Allowed,30"));
}

#[test]
fn test_process_missing_file() {
    policy()
        .args(["process", "/nonexistent/policy.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_process_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("policy.docx");
    fs::write(&input, POLICY_TEXT).unwrap();

    policy()
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn test_process_uses_config_reference() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("policy.txt");
    let config = dir.path().join("config.json");
    fs::write(&input, POLICY_TEXT).unwrap();
    fs::write(&config, r#"{"extraction": {"reference_sum_insured": "250000"}}"#).unwrap();

    let output = policy()
        .arg("--config")
        .arg(&config)
        .arg("process")
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json["addon_coverages"]["Ambulance Cover"][0]["Ambulance_Limit_Percentage"],
        0.02
    );
}

#[test]
fn test_batch_writes_dated_outputs_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    fs::write(dir.path().join("a.txt"), POLICY_TEXT).unwrap();
    fs::write(dir.path().join("b.txt"), "Endt. No. 20 maximum limit of Rs. 1,00,000").unwrap();

    let pattern = dir.path().join("*.txt");
    policy()
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .arg("-o")
        .arg(&out)
        .args(["--summary", "-j", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful"));

    let names: Vec<String> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert!(names.iter().any(|n| n.starts_with("a_") && n.ends_with(".json")));
    assert!(names.iter().any(|n| n.starts_with("b_") && n.ends_with(".json")));
    assert!(names.contains(&"summary.csv".to_string()));
}

#[test]
fn test_config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");

    policy()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "pdf.min_text_length", "50"])
        .assert()
        .success();

    policy()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "pdf.min_text_length"])
        .assert()
        .success()
        .stdout(predicate::str::contains("50"));

    policy()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "pdf.unknown_key", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}
