//! Structured logging helpers for the verifier.
//!
//! Every stage logs through these functions so field names stay uniform
//! (`endpoint`, `chain_id`, `abi`, `probe`, `function`, `error`).

use crate::inspector::{CheckResult, Outcome};
use std::fmt;

pub fn log_connecting(endpoint: &str) {
    tracing::info!(endpoint, "Connecting to RPC");
}

pub fn log_connected(endpoint: &str, chain_id: u64) {
    tracing::info!(endpoint, chain_id, "Connected to ledger node");
}

pub fn log_block_height(height: u64) {
    tracing::info!(block = height, "Current block number");
}

pub fn log_loading_abi(path: &str) {
    tracing::info!(abi = path, "Loading ABI");
}

pub fn log_abi_loaded(path: &str, functions: usize) {
    tracing::info!(abi = path, functions, "ABI loaded");
}

pub fn log_contract_bound(address: &str) {
    tracing::info!(address, "Initialized contract binding");
}

/// Log a probe outcome at a level matching its severity.
pub fn log_probe_result(check: &CheckResult) {
    let detail = match check.outcome {
        Outcome::Success => check.display_value().unwrap_or_else(|| "-".to_string()),
        Outcome::Failure | Outcome::Skipped => check.error.clone().unwrap_or_default(),
    };
    match check.outcome {
        Outcome::Success => tracing::info!(probe = %check.name, value = %detail, "Probe succeeded"),
        Outcome::Failure => tracing::warn!(probe = %check.name, error = %detail, "Probe failed"),
        Outcome::Skipped => tracing::debug!(probe = %check.name, reason = %detail, "Probe skipped"),
    }
}

pub fn log_simulation_start(function: &str, sender: &str) {
    tracing::info!(function, sender, "Simulating call (dry run)");
}

pub fn log_simulation_response(success: bool, code: &str, message: &str) {
    tracing::info!(success, code, message, "Simulation response decoded");
}

/// Log a stage failure that ends the run.
pub fn log_fatal(stage: &str, error: &dyn fmt::Display) {
    tracing::error!(stage, error = %error, "Stage failed, aborting run");
}
