use std::path::PathBuf;
use std::{env, fs};

use anyhow::{bail, Context};
use fund_me_deploy::config::is_development_chain;
use fund_me_deploy::verify::{etherscan_api_url, ContractSource, EtherscanVerifier};
use tracing::debug;

const HARDHAT_MNEMONIC: &str = "test test test test test test test test test test test junk";
const DEFAULT_LOCAL_RPC_URL: &str = "http://localhost:8545";
const DEFAULT_ARTIFACT_DIR: &str = "artifacts";
const DEFAULT_DEPLOYMENTS_DIR: &str = "deployments";
const DEFAULT_COMPILER_VERSION: &str = "v0.8.8+commit.dddeac2f";
const FUND_ME_QUALIFIED_NAME: &str = "contracts/FundMe.sol:FundMe";

pub fn chain_id_for(network: &str) -> Option<u64> {
    match network {
        "hardhat" | "localhost" => Some(31337),
        "goerli" => Some(5),
        "sepolia" => Some(11155111),
        "polygon" => Some(137),
        _ => None,
    }
}

/// All process-wide inputs, read from the environment exactly once at
/// startup. The deployment core only ever sees this struct, never env vars.
pub struct DeployerConfig {
    pub network_name: String,
    pub chain_id: u64,
    pub rpc_url: String,
    pub mnemonic: String,
    pub etherscan_api_key: Option<String>,
    pub artifact_dir: PathBuf,
    pub deployments_dir: PathBuf,
    pub flattened_source: Option<PathBuf>,
    pub compiler_version: String,
}

impl DeployerConfig {
    pub fn load(network: &str) -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let Some(chain_id) = chain_id_for(network) else {
            bail!("unknown network '{network}'");
        };
        let development = is_development_chain(network);

        let rpc_var = format!("{}_RPC_URL", network.to_uppercase());
        let rpc_url = match env::var(&rpc_var) {
            Ok(url) => url,
            Err(_) if development => DEFAULT_LOCAL_RPC_URL.to_owned(),
            Err(_) => bail!("{rpc_var} must be set to deploy to '{network}'"),
        };

        let mnemonic = match env::var("MNEMONIC") {
            Ok(m) => m,
            Err(_) if development => HARDHAT_MNEMONIC.to_owned(),
            Err(_) => bail!("MNEMONIC must be set to deploy to '{network}'"),
        };

        Ok(Self {
            network_name: network.to_owned(),
            chain_id,
            rpc_url,
            mnemonic,
            etherscan_api_key: env::var("ETHERSCAN_API_KEY").ok(),
            artifact_dir: env::var("ARTIFACT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_ARTIFACT_DIR)),
            deployments_dir: env::var("DEPLOYMENTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DEPLOYMENTS_DIR)),
            flattened_source: env::var("FLATTENED_SOURCE").map(PathBuf::from).ok(),
            compiler_version: env::var("COMPILER_VERSION")
                .unwrap_or_else(|_| DEFAULT_COMPILER_VERSION.to_owned()),
        })
    }

    /// Builds the Etherscan verifier when every ingredient is present: an
    /// API credential, an explorer endpoint for this network, and a
    /// flattened source file to submit. Anything missing disables
    /// verification; that is policy, not an error.
    pub fn verifier(&self) -> anyhow::Result<Option<EtherscanVerifier>> {
        let Some(api_key) = &self.etherscan_api_key else {
            debug!("no ETHERSCAN_API_KEY, verification disabled");
            return Ok(None);
        };
        let Some(api_url) = etherscan_api_url(&self.network_name) else {
            debug!(network = %self.network_name, "no explorer endpoint, verification disabled");
            return Ok(None);
        };
        let Some(source_path) = &self.flattened_source else {
            debug!("no FLATTENED_SOURCE, verification disabled");
            return Ok(None);
        };

        let flattened = fs::read_to_string(source_path)
            .with_context(|| format!("reading flattened source {}", source_path.display()))?;
        Ok(Some(EtherscanVerifier::new(
            api_url.to_owned(),
            api_key.clone(),
            ContractSource {
                qualified_name: FUND_ME_QUALIFIED_NAME.to_owned(),
                flattened,
                compiler_version: self.compiler_version.clone(),
            },
        )))
    }
}
