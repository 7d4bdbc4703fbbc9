use assert_cmd::prelude::*;
use predicates::str::contains;
use std::process::Command;

#[test]
fn cli_lists_routes() {
    let mut cmd = Command::cargo_bin("scene-viewer").expect("binary exists");
    cmd.arg("--list-routes");
    cmd.assert()
        .success()
        .stdout(contains("/earth"))
        .stdout(contains("Earth"))
        .stdout(contains("/skeleton"));
}

#[test]
fn cli_runs_route_headless_and_prints_final_state() {
    let mut cmd = Command::cargo_bin("scene-viewer").expect("binary exists");
    cmd.arg("/base")
        .arg("--summary-only")
        .arg("--frames")
        .arg("10");
    cmd.assert()
        .success()
        .stdout(contains("Mounted Base (/base)"))
        .stdout(contains("Scene provides 2 mesh(es)"))
        .stdout(contains(" - cube pos="))
        .stdout(contains(" - ground pos="));
}

#[test]
fn cli_rejects_unknown_route() {
    let mut cmd = Command::cargo_bin("scene-viewer").expect("binary exists");
    cmd.arg("/missing").arg("--summary-only");
    cmd.assert()
        .failure()
        .stderr(contains("Unknown route: /missing"));
}

#[test]
fn cli_rejects_unknown_flag() {
    let mut cmd = Command::cargo_bin("scene-viewer").expect("binary exists");
    cmd.arg("--wat");
    cmd.assert()
        .failure()
        .stderr(contains("Unknown flag: --wat"));
}
