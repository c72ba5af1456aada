use crate::common::verifier_cmd;
use predicates::prelude::*;

#[test]
fn test_help_flag() {
    verifier_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("verify"))
        .stdout(predicate::str::contains("functions"));
}

#[test]
fn test_verify_help_lists_overrides() {
    verifier_cmd()
        .args(["verify", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--rpc-url"))
        .stdout(predicate::str::contains("--sender"))
        .stdout(predicate::str::contains("--any-chain"));
}

#[test]
fn test_unknown_subcommand_fails() {
    verifier_cmd().arg("deploy").assert().failure();
}

#[test]
fn test_chain_flags_conflict() {
    verifier_cmd()
        .args(["verify", "--expected-chain-id", "1", "--any-chain"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_completions_generate_script() {
    verifier_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("contract-verify"));
}
