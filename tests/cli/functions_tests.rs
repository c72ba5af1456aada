use crate::common::{marketplace_abi, verifier_cmd, TestContext};
use predicates::prelude::*;

#[test]
fn test_functions_lists_marketplace_abi() {
    verifier_cmd()
        .arg("functions")
        .arg("--abi")
        .arg(marketplace_abi())
        .assert()
        .success()
        .stdout(predicate::str::contains("admin() returns (address) [view]"))
        .stdout(predicate::str::contains(
            "createListing(string,string,uint256,string)",
        ));
}

#[test]
fn test_functions_accepts_artifact_wrapper() {
    let ctx = TestContext::new().unwrap();
    let abi = ctx
        .create_file(
            "Artifact.json",
            r#"{"contractName":"Tiny","abi":[{"type":"function","name":"ping","inputs":[],"outputs":[],"stateMutability":"nonpayable"}]}"#,
        )
        .unwrap();
    verifier_cmd()
        .arg("functions")
        .arg("--abi")
        .arg(&abi)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 functions"))
        .stdout(predicate::str::contains("ping()"));
}

#[test]
fn test_functions_missing_file_fails() {
    verifier_cmd()
        .args(["functions", "--abi", "does/not/exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does/not/exist.json"));
}

#[test]
fn test_functions_malformed_abi_fails() {
    let ctx = TestContext::new().unwrap();
    let abi = ctx.create_file("broken.json", "{ not json").unwrap();
    verifier_cmd()
        .arg("functions")
        .arg("--abi")
        .arg(&abi)
        .assert()
        .failure();
}
