use std::fs;
use std::path::{Path, PathBuf};

use query_window::RequirementsError;
use query_window::requirements::{
    SyncMode, SyncOptions, SyncOutcome, read_current_requirements, sync_requirements,
};
use tempfile::TempDir;

const DESCRIPTOR: &str = r##"{
    "name": "msticpy",
    "install_requires": ["pandas>=1.1.5", "# optional below", "Keyring>=13.2.1"],
    "extras": {
        "all": ["vt-py>=0.6.1", "dnspython>=2.0.0", "pandas>=1.1.5"],
        "azure": ["azure-mgmt-core>=1.2.1"]
    }
}"##;

fn workspace() -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let descriptor = dir.path().join("setup.json");
    fs::write(&descriptor, DESCRIPTOR).expect("write descriptor");
    let output = dir.path().join("requirements-all.txt");
    (dir, descriptor, output)
}

fn options(descriptor: &Path, output: &Path, mode: SyncMode) -> SyncOptions {
    SyncOptions {
        descriptor: descriptor.to_path_buf(),
        output: output.to_path_buf(),
        mode,
        ..SyncOptions::default()
    }
}

#[test]
fn print_mode_returns_sorted_merged_requirements() {
    let (_dir, descriptor, output) = workspace();
    let outcome = sync_requirements(&options(&descriptor, &output, SyncMode::Print))
        .expect("sync succeeds");

    assert_eq!(
        outcome,
        SyncOutcome::Printed(vec![
            "dnspython>=2.0.0".to_owned(),
            "Keyring>=13.2.1".to_owned(),
            "pandas>=1.1.5".to_owned(),
            "vt-py>=0.6.1".to_owned(),
        ])
    );
    assert_eq!(outcome.exit_code(), 0);
    assert!(!output.exists());
}

#[test]
fn write_mode_creates_missing_file() {
    let (_dir, descriptor, output) = workspace();
    let outcome = sync_requirements(&options(&descriptor, &output, SyncMode::Write))
        .expect("sync succeeds");

    assert_eq!(
        outcome,
        SyncOutcome::Written {
            path: output.clone(),
            count: 4,
        }
    );
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(
        fs::read_to_string(&output).expect("written file"),
        "dnspython>=2.0.0\nKeyring>=13.2.1\npandas>=1.1.5\nvt-py>=0.6.1"
    );

    let again = sync_requirements(&options(&descriptor, &output, SyncMode::Write))
        .expect("second sync succeeds");
    assert_eq!(again, SyncOutcome::UpToDate);
    assert_eq!(again.exit_code(), 0);
}

#[test]
fn diff_mode_reports_without_writing() {
    let (_dir, descriptor, output) = workspace();
    let stale = "# generated\n\ndnspython>=2.0.0\nKeyring>=13.2.1\npandas>=1.0.0\nvt-py>=0.6.1\n";
    fs::write(&output, stale).expect("write stale file");

    let outcome = sync_requirements(&options(&descriptor, &output, SyncMode::Diff))
        .expect("sync succeeds");

    let SyncOutcome::DiffReported(diff) = &outcome else {
        panic!("expected diff, got {outcome:?}");
    };
    assert!(diff.iter().any(|line| line == "-pandas>=1.1.5"));
    assert!(diff.iter().any(|line| line == "+pandas>=1.0.0"));
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(fs::read_to_string(&output).expect("untouched"), stale);
}

#[test]
fn current_file_skips_comments_and_blanks() {
    let (dir, _descriptor, _output) = workspace();
    let path = dir.path().join("reqs.txt");
    fs::write(&path, "zeta\n  # note\n\nAlpha\nbeta\n").expect("write file");

    let current = read_current_requirements(&path).expect("readable");
    assert_eq!(current, vec!["Alpha", "beta", "zeta"]);

    let missing = read_current_requirements(&dir.path().join("absent.txt")).expect("missing ok");
    assert!(missing.is_empty());
}

#[test]
fn unknown_extra_and_bad_descriptor_are_errors() {
    let (dir, descriptor, output) = workspace();
    let mut unknown = options(&descriptor, &output, SyncMode::Print);
    unknown.extra = "splunk".to_owned();
    let err = sync_requirements(&unknown).expect_err("unknown extra must fail");
    assert!(matches!(err, RequirementsError::UnknownExtra(_)));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ not json").expect("write broken");
    let err = sync_requirements(&options(&broken, &output, SyncMode::Print))
        .expect_err("broken descriptor must fail");
    assert!(matches!(err, RequirementsError::Json { .. }));
}

#[test]
fn base_requirements_can_be_left_out() {
    let (_dir, descriptor, output) = workspace();
    let mut extra_only = options(&descriptor, &output, SyncMode::Print);
    extra_only.extra = "azure".to_owned();
    extra_only.include_base = false;

    let outcome = sync_requirements(&extra_only).expect("sync succeeds");
    assert_eq!(
        outcome,
        SyncOutcome::Printed(vec!["azure-mgmt-core>=1.2.1".to_owned()])
    );
}
