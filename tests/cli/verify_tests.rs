use crate::common::{marketplace_abi, verifier_cmd, TestContext};
use predicates::prelude::*;

const CLOSED_PORT: &str = "http://127.0.0.1:1";

#[test]
fn test_unreachable_node_reports_connect_stage() {
    verifier_cmd()
        .args(["verify", "--rpc-url", CLOSED_PORT, "--any-chain", "--abi"])
        .arg(marketplace_abi())
        .assert()
        .success()
        .stdout(predicate::str::contains("[ERROR] Stage `connect` failed"))
        .stdout(predicate::str::contains("Overall: FAILED"))
        .stdout(predicate::str::contains("Reading contract state").not());
}

#[test]
fn test_rpc_url_from_environment() {
    verifier_cmd()
        .env("CONTRACT_VERIFY_RPC_URL", CLOSED_PORT)
        .args(["verify", "--any-chain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("127.0.0.1:1"));
}

#[test]
fn test_quiet_drops_banner() {
    verifier_cmd()
        .args(["-q", "verify", "--rpc-url", CLOSED_PORT])
        .assert()
        .success()
        .stdout(predicate::str::contains("FINISHED").not());
}

#[test]
fn test_missing_config_file_fails() {
    verifier_cmd()
        .args(["verify", "--config", "missing_config.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing_config.toml"));
}

#[test]
fn test_config_file_supplies_endpoint() {
    let ctx = TestContext::new().unwrap();
    let config = ctx
        .create_file(
            "verify.toml",
            "[network]\nrpc_url = \"http://127.0.0.1:1\"\nexpected_chain_id = 5\n",
        )
        .unwrap();
    verifier_cmd()
        .arg("verify")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("via http://127.0.0.1:1"));
}

#[test]
fn test_bad_price_in_config_fails() {
    let ctx = TestContext::new().unwrap();
    let config = ctx
        .create_file("verify.toml", "[simulation]\nprice_ether = \"free\"\n")
        .unwrap();
    verifier_cmd()
        .arg("verify")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("price_ether"));
}
