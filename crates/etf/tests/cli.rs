use assert_cmd::Command;
use predicates::prelude::*;

fn etf_cmd() -> Command {
    Command::cargo_bin("etf").expect("binary should be built")
}

#[test]
fn help_lists_every_subcommand() {
    etf_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sectors"))
        .stdout(predicate::str::contains("dividends"))
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("compare"));
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    etf_cmd().assert().failure().code(2);
}

#[test]
fn unknown_chart_style_is_rejected() {
    etf_cmd()
        .args(["sectors", "VTI", "--chart", "scatter"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn compare_requires_at_least_one_ticker() {
    etf_cmd().arg("compare").assert().failure().code(2);
}

#[test]
fn alpha_vantage_without_a_key_exits_nonzero() {
    etf_cmd()
        .args(["dividends", "VYM", "--source", "alpha-vantage"])
        .env_remove("ALPHAVANTAGE_API")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("ALPHAVANTAGE_API"));
}
