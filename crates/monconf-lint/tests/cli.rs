//! Smoke tests for the monconf-lint binary.

use assert_cmd::Command;
use rstest::rstest;
use std::str;

#[expect(clippy::expect_used, reason = "the binary is built for tests")]
fn lint() -> Command {
    let mut cmd = Command::cargo_bin("monconf-lint").expect("binary exists");
    for name in [
        "MONCONF_LINT_LOG_LEVEL",
        "MONCONF_LINT_PREVIEW_LEN",
        "MONCONF_LINT_USER_MACROS",
        "MONCONF_LINT_LLD_MACROS",
    ] {
        cmd.env_remove(name);
    }
    cmd
}

#[test]
#[expect(clippy::expect_used, reason = "test asserts valid output")]
fn valid_trigger_exits_zero() {
    let output = lint()
        .args(["trigger", "{srv:agent.ping.last(0)}=1 and {$LIMIT}>5"])
        .output()
        .expect("runs");
    assert!(output.status.success());
    let stdout = str::from_utf8(&output.stdout).expect("utf8");
    assert!(stdout.starts_with("valid\n"), "{stdout}");
    assert!(stdout.contains("agent.ping"), "{stdout}");
}

#[test]
#[expect(clippy::expect_used, reason = "test asserts valid output")]
fn invalid_schedule_exits_one() {
    let output = lint().args(["schedule", "h5/1"]).output().expect("runs");
    assert_eq!(output.status.code(), Some(1));
    let stdout = str::from_utf8(&output.stdout).expect("utf8");
    assert_eq!(
        stdout,
        "invalid: incorrect syntax at byte 2 (zero-based) near \"/1\"\n"
    );
}

#[test]
#[expect(clippy::expect_used, reason = "test asserts valid output")]
fn json_report_is_emitted() {
    let output = lint()
        .args(["status-codes", "200,301-308", "--json"])
        .output()
        .expect("runs");
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(report.get("valid"), Some(&serde_json::Value::Bool(true)));
    assert_eq!(
        report.get("kind"),
        Some(&serde_json::Value::from("status-codes"))
    );
}

#[rstest]
#[case(&["trigger", "{#IF}=1"], 1)]
#[case(&["trigger", "{#IF}=1", "--lld-macros"], 0)]
#[case(&["trigger", "{$A}=1"], 0)]
#[case(&["trigger", "{$A}=1", "--no-user-macros"], 1)]
#[expect(clippy::expect_used, reason = "test asserts valid output")]
fn macro_flags_change_acceptance(#[case] args: &[&str], #[case] code: i32) {
    let output = lint().args(args).output().expect("runs");
    assert_eq!(output.status.code(), Some(code), "{args:?}");
}

#[test]
#[expect(clippy::expect_used, reason = "test asserts valid output")]
fn environment_enables_lld_macros() {
    let output = lint()
        .env("MONCONF_LINT_LLD_MACROS", "true")
        .args(["ranges", "{#MIN}-{#MAX}"])
        .output()
        .expect("runs");
    assert!(output.status.success());
}

#[test]
#[expect(clippy::expect_used, reason = "test asserts valid output")]
fn invalid_configuration_exits_two() {
    let output = lint()
        .env("MONCONF_LINT_PREVIEW_LEN", "lots")
        .args(["key", "system.cpu.load"])
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(2));
    let stderr = str::from_utf8(&output.stderr).expect("utf8");
    assert!(stderr.contains("invalid configuration"), "{stderr}");
}

#[test]
#[expect(clippy::expect_used, reason = "test asserts valid output")]
fn unknown_kind_is_a_usage_error() {
    let output = lint().args(["cron", "* * * * *"]).output().expect("runs");
    assert_eq!(output.status.code(), Some(2));
}
