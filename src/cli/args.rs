use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Verbosity level for output control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    /// Convert verbosity to log level string for RUST_LOG
    pub fn to_log_level(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
        }
    }

    pub fn as_level(self) -> u8 {
        match self {
            Verbosity::Quiet => 0,
            Verbosity::Normal => 1,
            Verbosity::Verbose => 2,
        }
    }
}

#[derive(Parser)]
#[command(name = "contract-verify")]
#[command(
    about = "Check that a deployed contract is reachable, bound to the expected ABI and accepts a dry-run call",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Suppress informational logs and the closing banner
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show debug logs and every ABI signature
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full verification pipeline (default)
    Verify(VerifyArgs),

    /// List the functions declared by an ABI file, without touching the network
    Functions(FunctionsArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub struct VerifyArgs {
    /// JSON-RPC endpoint of the ledger node
    #[arg(long, env = "CONTRACT_VERIFY_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Deployed contract address (0x-prefixed, EIP-55 if mixed case)
    #[arg(short, long)]
    pub address: Option<String>,

    /// Path to the contract ABI JSON
    #[arg(long)]
    pub abi: Option<PathBuf>,

    /// Simulate as this address instead of the contract admin
    #[arg(long)]
    pub sender: Option<String>,

    /// Reject the node unless it reports this chain id
    #[arg(long, conflicts_with = "any_chain")]
    pub expected_chain_id: Option<u64>,

    /// Accept whatever chain the node is on
    #[arg(long)]
    pub any_chain: bool,

    /// Configuration file (default: .contract-verify.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Use ASCII-only output
    #[arg(long)]
    pub no_unicode: bool,
}

#[derive(Args)]
pub struct FunctionsArgs {
    /// Path to the contract ABI JSON
    #[arg(long)]
    pub abi: PathBuf,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
