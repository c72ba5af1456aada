use crate::{VerifierError, Result};
use alloy::primitives::utils::parse_ether;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".contract-verify.toml";

pub const DEFAULT_RPC_URL: &str = "https://ethereum-sepolia-rpc.publicnode.com";
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x3FfAf5E999Fda995b7959249B2F2eFf494427457";
pub const DEFAULT_ABI_PATH: &str = "abi/CampusMarketplace.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub contract: ContractConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint of the ledger node
    pub rpc_url: String,
    /// Reject nodes reporting another chain id
    pub expected_chain_id: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            expected_chain_id: Some(SEPOLIA_CHAIN_ID),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    pub address: String,
    pub abi_path: PathBuf,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            abi_path: PathBuf::from(DEFAULT_ABI_PATH),
        }
    }
}

/// Literal arguments of the dry-run `createListing` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub function: String,
    pub title: String,
    pub description: String,
    /// Price in ether, converted to wei before encoding
    pub price_ether: String,
    pub image_hash: String,
    /// Caller override; defaults to the contract admin
    pub sender: Option<String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            function: "createListing".to_string(),
            title: "Test Item from Python".to_string(),
            description: "Testing via web3.py".to_string(),
            price_ether: "0.01".to_string(),
            image_hash: "QmTestHash".to_string(),
            sender: None,
        }
    }
}

impl SimulationConfig {
    /// Arguments in `createListing(title, description, price, imageHash)` order.
    pub fn literal_args(&self) -> std::result::Result<Vec<String>, VerifierError> {
        let wei = parse_ether(&self.price_ether).map_err(|e| {
            VerifierError::Config(format!(
                "simulation.price_ether {:?} is not an ether amount: {}",
                self.price_ether, e
            ))
        })?;
        Ok(vec![
            self.title.clone(),
            self.description.clone(),
            wei.to_string(),
            self.image_hash.clone(),
        ])
    }
}

impl Config {
    /// Load configuration from the working directory, falling back to the
    /// user config directory.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load configuration from an explicit path. Errors if the file is missing.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(config_path).map_err(|e| {
            VerifierError::FileError(format!(
                "Failed to read config file {:?}: {}",
                config_path, e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            VerifierError::Config(format!(
                "Failed to parse TOML config from {:?}: {}",
                config_path, e
            ))
        })?;

        Ok(config)
    }

    /// Load default config if file is missing, otherwise warn on parse failure
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Warning: Failed to load config: {}. Using defaults.", e);
                Config::default()
            }
        }
    }

    fn default_path() -> Option<PathBuf> {
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|dir| dir.join("contract-verify").join("config.toml"))
            .filter(|path| path.exists())
    }
}
