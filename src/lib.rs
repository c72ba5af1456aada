pub mod abi;
pub mod binding;
pub mod cli;
pub mod config;
pub mod inspector;
pub mod logging;
pub mod network;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod simulator;
pub mod ui;
use miette::Diagnostic;

pub use binding::{bind, ContractBinding};
pub use pipeline::{VerificationReport, Verifier};

/// Result type alias for the verifier
pub type Result<T> = miette::Result<T>;

/// Error types for the verifier
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum VerifierError {
    #[error("Failed to reach ledger node: {0}")]
    #[diagnostic(
        code(verifier::connectivity),
        help("Check your network connection and the RPC URL. Public endpoints are sometimes unstable; try another one with --rpc-url.")
    )]
    Connectivity(String),

    #[error("RPC request failed: {0}")]
    #[diagnostic(
        code(verifier::rpc),
        help("The node answered the liveness probe but rejected this request. Retry later or switch endpoints.")
    )]
    Rpc(String),

    #[error("ABI file not found: {0}")]
    #[diagnostic(
        code(verifier::abi_not_found),
        help("Pass the path of the contract ABI JSON with --abi or set contract.abi_path in .contract-verify.toml.")
    )]
    AbiNotFound(String),

    #[error("Failed to parse ABI: {0}")]
    #[diagnostic(
        code(verifier::abi_parse),
        help("The file must hold a JSON array of ABI entries, or a build artifact with an `abi` key.")
    )]
    AbiParse(String),

    #[error("Failed to bind contract: {0}")]
    #[diagnostic(
        code(verifier::binding),
        help("Use a 0x-prefixed 20-byte address. Mixed-case addresses must carry a valid EIP-55 checksum.")
    )]
    Binding(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(verifier::config),
        help("Review .contract-verify.toml and the command-line overrides.")
    )]
    Config(String),

    #[error("File operation failed: {0}")]
    #[diagnostic(
        code(verifier::file_error),
        help("Check if you have necessary permissions and that the path exists.")
    )]
    FileError(String),
}
