use std::path::PathBuf;
use tempfile::TempDir;

/// Temporary directory holding files a CLI test feeds to the binary.
pub struct TestContext {
    pub temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Result<Self, std::io::Error> {
        Ok(TestContext {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn create_file(&self, name: &str, content: &str) -> Result<PathBuf, std::io::Error> {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, content)?;
        Ok(path)
    }
}

pub fn marketplace_abi() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("abi")
        .join("CampusMarketplace.json")
}

/// The binary with color and ambient overrides cleared.
pub fn verifier_cmd() -> assert_cmd::Command {
    let mut cmd =
        assert_cmd::Command::cargo_bin("contract-verify").expect("Failed to find binary");
    cmd.env("NO_COLOR", "1")
        .env_remove("CONTRACT_VERIFY_RPC_URL")
        .env_remove("CONTRACT_VERIFY_JSON")
        .env_remove("RUST_LOG");
    cmd
}
