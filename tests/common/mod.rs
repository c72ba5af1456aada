//! Shared helpers for the integration tests.
#![allow(dead_code)]

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, U256};
use contract_verifier::network::{Endpoint, MockLedger};
use contract_verifier::pipeline::{SimulationPlan, VerifierSettings};
use std::path::PathBuf;

pub const CHAIN_ID: u64 = 11_155_111;
pub const CONTRACT: &str = "0x3FfAf5E999Fda995b7959249B2F2eFf494427457";
pub const CREATE_LISTING: &str = "createListing(string,string,uint256,string)";

/// The marketplace ABI shipped with the crate.
pub fn marketplace_abi() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("abi")
        .join("CampusMarketplace.json")
}

pub fn admin() -> Address {
    Address::repeat_byte(0xab)
}

pub fn settings() -> VerifierSettings {
    VerifierSettings {
        endpoint: Endpoint::new("mock://sepolia"),
        expected_chain_id: Some(CHAIN_ID),
        address: CONTRACT.to_string(),
        abi_path: marketplace_abi(),
        simulation: SimulationPlan {
            function: "createListing".to_string(),
            args: vec![
                "Test Item from Python".to_string(),
                "Testing via web3.py".to_string(),
                "10000000000000000".to_string(),
                "QmTestHash".to_string(),
            ],
            sender: None,
        },
    }
}

/// `(bool success, uint256 code, string message, bytes data)` as returned by `createListing`.
pub fn listing_response(success: bool, code: u64, message: &str) -> Vec<DynSolValue> {
    vec![DynSolValue::Tuple(vec![
        DynSolValue::Bool(success),
        DynSolValue::Uint(U256::from(code), 256),
        DynSolValue::String(message.to_string()),
        DynSolValue::Bytes(vec![0x01, 0x02]),
    ])]
}

/// A deployment answering every probe.
pub fn healthy_ledger() -> MockLedger {
    MockLedger::new(CHAIN_ID)
        .with_block_number(6_120_000)
        .returns("debugMode()", vec![DynSolValue::Bool(true)])
        .returns("listingCount()", vec![DynSolValue::Uint(U256::from(12), 256)])
        .returns("admin()", vec![DynSolValue::Address(admin())])
}

/// Render without ANSI colors so assertions can match plain text.
pub fn render(report: &contract_verifier::VerificationReport) -> String {
    contract_verifier::ui::Formatter::configure_colors(false);
    contract_verifier::report::Reporter::render(report).join("\n")
}
