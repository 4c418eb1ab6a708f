//! CLI integration tests

use std::process::Command;

fn fsx_alarms() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fsx-alarms"))
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = fsx_alarms()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(
        stdout.contains("Create CloudWatch alarms for FSx"),
        "Should show description"
    );
    assert!(stdout.contains("--region"), "Should show region option");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = fsx_alarms()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("fsx-alarms"), "Should show binary name");
}

/// Test that a missing region is a usage error
#[test]
fn test_missing_region_fails() {
    let output = fsx_alarms().output().expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success(), "Missing region should fail");
    assert!(stderr.contains("--region"), "Should mention the region option");
}

/// Test that unknown flags are rejected
#[test]
fn test_unknown_flag_fails() {
    let output = fsx_alarms()
        .args(["--region", "us-east-1", "--dry-run"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Unknown flag should fail");
}
