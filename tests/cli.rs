use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DUMP: &str = r#"
+++    HLR        2024-03-01 10:12:44
O&M    #1042
%%LST SUB:IMSI="001010000000001";%%
RETCODE = 0  Operation is successful

"GPRS Data"
    CNTXID = 5
    APNTPLID = 9
"EPS Data"
    CNTXID = 1
    APNTPLID = 11
---    END

%%LST OPTGPRS:IMSI="001010000000001";%%
RETCODE = 0  Operation is successful
    APNTPLID = 3
    QOSTPLID = 4
    EPS_QOSTPLID = 2
    APN_TYPE = internet
---    END

%%LST SUB:IMSI="001010000000002";%%
"GPRS Data"
    CNTXID = 6
    APNTPLID = 9
---    END

%%LST OPTGPRS:IMSI="001010000000002";%%
    APNTPLID = 3
    QOSTPLID = 4
    EPS_QOSTPLID = 2
    APN_TYPE = internet
---    END
"#;

fn workspace(dump: Option<&str>) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    if let Some(dump) = dump {
        fs::write(temp_dir.path().join("sub-list.txt"), dump).unwrap();
    }
    temp_dir
}

fn sublist(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sublist").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG").env_remove("SUBLIST_INPUT");
    cmd
}

fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn export_writes_both_csv_files() {
    let dir = workspace(Some(DUMP));

    sublist(dir.path())
        .args(["--output-format", "plain", "export"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SUB records: 2"))
        .stdout(predicate::str::contains("OPTGPRS records: 2"));

    let files = files_in(&dir.path().join("output"));
    assert_eq!(files.len(), 2);
    assert!(files[0].starts_with("subscriber_data_optgprs_"));
    assert!(files[1].starts_with("subscriber_data_sub_"));

    let sub = fs::read_to_string(dir.path().join("output").join(&files[1])).unwrap();
    let lines: Vec<&str> = sub.lines().collect();
    assert_eq!(
        lines,
        vec![
            "IMSI,GPRS_CNTXID,GPRS_APNTPLID,EPS_CNTXID,EPS_APNTPLID",
            "001010000000001,5,9,1,11",
            "001010000000002,6,9,N/A,N/A",
        ]
    );
}

#[test]
fn export_of_empty_dump_writes_headers_only() {
    let dir = workspace(Some(""));

    sublist(dir.path()).args(["-q", "export"]).assert().success();

    for name in files_in(&dir.path().join("output")) {
        let content = fs::read_to_string(dir.path().join("output").join(name)).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.starts_with("IMSI,"));
    }
}

#[test]
fn missing_input_is_reported() {
    let dir = workspace(None);

    sublist(dir.path())
        .arg("export")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("sub-list.txt file not found"));

    assert!(!dir.path().join("output").exists());
}

#[test]
fn input_flag_overrides_default_path() {
    let dir = workspace(None);
    fs::write(dir.path().join("hlr01.txt"), DUMP).unwrap();

    sublist(dir.path())
        .args(["--input", "hlr01.txt", "--output-format", "json", "export"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sub_records\":2"));
}

#[test]
fn compare_with_arguments_writes_report() {
    let dir = workspace(Some(DUMP));

    sublist(dir.path())
        .args(["compare", "001010000000001", "001010000000002"])
        .assert()
        .success()
        .stdout(predicate::str::contains("001010000000001_001010000000002_sub-list-comp.txt"));

    let report = fs::read_to_string(
        dir.path()
            .join("out-cmp")
            .join("001010000000001_001010000000002_sub-list-comp.txt"),
    )
    .unwrap();

    assert!(report.starts_with("Comparison between IMSI 001010000000001 and IMSI 001010000000002"));
    assert!(report.contains("GPRS_CNTXID:\n  IMSI 001010000000001: 5\n  IMSI 001010000000002: 6"));
    assert!(report.contains("EPS_APNTPLID:\n  IMSI 001010000000001: 11\n  IMSI 001010000000002: N/A"));
    assert!(report.contains("APN_TYPE: internet (same for both)"));
    assert!(report.contains("QOSTPLID: 4 (same for both)"));
}

#[test]
fn compare_prompts_for_missing_imsis() {
    let dir = workspace(Some(DUMP));

    sublist(dir.path())
        .arg("compare")
        .write_stdin("001010000000001\n001010000000009\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Enter first IMSI to compare:"));

    let report = fs::read_to_string(
        dir.path()
            .join("out-cmp")
            .join("001010000000001_001010000000009_sub-list-comp.txt"),
    )
    .unwrap();
    assert!(report.contains("APN_TYPE:\n  IMSI 001010000000001: internet\n  IMSI 001010000000009: N/A"));
}

#[test]
fn compare_without_answers_fails() {
    let dir = workspace(Some(DUMP));

    sublist(dir.path())
        .arg("compare")
        .write_stdin("")
        .assert()
        .code(2);

    assert!(!dir.path().join("out-cmp").exists());
}

#[test]
fn pattern_characters_in_imsi_match_literally() {
    let dir = workspace(Some(DUMP));

    sublist(dir.path())
        .args(["--output-format", "plain", "compare", "00101000000000.", "001010000000001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Differences: 8"));
}

#[test]
fn init_config_writes_sample() {
    let dir = workspace(None);

    sublist(dir.path())
        .args(["init-config", "custom.toml"])
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join("custom.toml")).unwrap();
    assert!(content.contains("compare_dir = \"out-cmp\""));
}

#[test]
fn config_file_controls_output_locations() {
    let dir = workspace(Some(DUMP));
    fs::write(
        dir.path().join("sublist.toml"),
        "[output]\ncompare_dir = \"diffs\"\n",
    )
    .unwrap();

    sublist(dir.path())
        .args(["compare", "001010000000001", "001010000000002"])
        .assert()
        .success();

    assert!(dir
        .path()
        .join("diffs")
        .join("001010000000001_001010000000002_sub-list-comp.txt")
        .exists());
}
