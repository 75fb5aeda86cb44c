//! CLI integration tests.

mod support;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

use support::home::TempHome;

fn lndwarden() -> Command {
    let mut cmd = cargo_bin_cmd!("lndwarden");
    cmd.env_remove("LNDWARDEN_HOME");
    cmd
}

#[test]
fn test_help() {
    lndwarden()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("lndwarden"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("check-config"));
}

#[test]
fn test_version() {
    lndwarden()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lndwarden"));
}

#[test]
fn test_check_config_without_file_prints_defaults() {
    let home = TempHome::new();

    lndwarden()
        .arg("check-config")
        .arg("--home")
        .arg(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("not found, using defaults"))
        .stdout(predicate::str::contains("0 < amount < 16777215 sat"))
        .stdout(predicate::str::contains("https://localhost:8080"));
}

#[test]
fn test_check_config_reports_split_thresholds() {
    let home = TempHome::with_config(
        r#"
[channel_acceptor]
max_channel_size_private = 2000000
min_channel_size_public = 4000000
"#,
    );

    lndwarden()
        .arg("check-config")
        .arg("--home")
        .arg(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 < amount < 2000000 sat"))
        .stdout(predicate::str::contains("4000000 < amount < 16777215 sat"));
}

#[test]
fn test_check_config_with_explicit_file() {
    let home = TempHome::new();
    let file = home.write(
        "custom.toml",
        r#"
[channel_acceptor]
enabled = false

[supervisor]
cascade_on_failure = true
"#,
    );

    lndwarden()
        .arg("check-config")
        .arg("--home")
        .arg(home.path())
        .arg("--config")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"))
        .stdout(predicate::str::contains("disabled"))
        .stdout(predicate::str::contains("stop all units"));
}

#[test]
fn test_check_config_rejects_zero_queue_depth() {
    let home = TempHome::with_config("[channel_acceptor]\nqueue_depth = 0\n");

    lndwarden()
        .arg("check-config")
        .arg("--home")
        .arg(home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("queue_depth"));
}

#[test]
fn test_check_config_rejects_non_integer_threshold() {
    let home =
        TempHome::with_config("[channel_acceptor]\nmin_channel_size_private = \"lots\"\n");

    lndwarden()
        .arg("check-config")
        .arg("--home")
        .arg(home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));
}

#[test]
fn test_run_fails_on_invalid_config() {
    let home = TempHome::with_config("[supervisor]\nshutdown_timeout_secs = 0\n");

    lndwarden()
        .arg("run")
        .arg("--home")
        .arg(home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("shutdown_timeout_secs"));
}

#[test]
fn test_run_fails_without_node_credentials() {
    let home = TempHome::with_config(
        r#"
[node]
tls_cert = "missing/tls.cert"
macaroon = "missing/admin.macaroon"
"#,
    );

    lndwarden()
        .arg("run")
        .arg("--home")
        .arg(home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read TLS certificate"));
}
