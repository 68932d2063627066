use async_trait::async_trait;
use ethers::abi::Token;
use ethers::types::Address;
use serde_json::Value;
use tracing::debug;

use crate::deploy::ContractVerifier;
use crate::error::VerifyError;

/// Etherscan API endpoints for the public networks we deploy to.
pub fn etherscan_api_url(network_name: &str) -> Option<&'static str> {
    match network_name {
        "mainnet" => Some("https://api.etherscan.io/api"),
        "goerli" => Some("https://api-goerli.etherscan.io/api"),
        "sepolia" => Some("https://api-sepolia.etherscan.io/api"),
        "polygon" => Some("https://api.polygonscan.com/api"),
        _ => None,
    }
}

/// The source submission payload: a single flattened file, its fully
/// qualified name (`contracts/FundMe.sol:FundMe`) and the solc version tag.
#[derive(Clone, Debug)]
pub struct ContractSource {
    pub qualified_name: String,
    pub flattened: String,
    pub compiler_version: String,
}

pub struct EtherscanVerifier {
    api_url: String,
    api_key: String,
    source: ContractSource,
    http: reqwest::Client,
}

impl EtherscanVerifier {
    pub fn new(api_url: String, api_key: String, source: ContractSource) -> Self {
        Self {
            api_url,
            api_key,
            source,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ContractVerifier for EtherscanVerifier {
    async fn verify(
        &self,
        address: Address,
        constructor_args: &[Token],
    ) -> Result<(), VerifyError> {
        let encoded_args = hex::encode(ethers::abi::encode(constructor_args));
        let contract_address = format!("{address:?}");
        debug!(address = %contract_address, "submitting source to explorer");

        let form = [
            ("apikey", self.api_key.as_str()),
            ("module", "contract"),
            ("action", "verifysourcecode"),
            ("codeformat", "solidity-single-file"),
            ("contractaddress", contract_address.as_str()),
            ("sourceCode", self.source.flattened.as_str()),
            ("contractname", self.source.qualified_name.as_str()),
            ("compilerversion", self.source.compiler_version.as_str()),
            ("optimizationUsed", "0"),
            // sic, the API spells it this way
            ("constructorArguements", encoded_args.as_str()),
        ];

        let response = self.http.post(&self.api_url).form(&form).send().await?;
        let body = response.json::<Value>().await?;
        interpret_response(&body)
    }
}

/// A `status` of "1" is accepted; resubmitting an already verified contract
/// comes back as a rejection we deliberately treat as success.
fn interpret_response(body: &Value) -> Result<(), VerifyError> {
    let status = body["status"].as_str().unwrap_or_default();
    if status == "1" {
        return Ok(());
    }
    let result = body["result"].as_str().unwrap_or("unknown explorer error");
    if result.to_lowercase().contains("already verified") {
        return Ok(());
    }
    Err(VerifyError::Rejected(result.to_owned()))
}
