use std::fs::File;
use std::path::Path;

use ethers::abi::Abi;
use ethers::types::Bytes;
use serde::Deserialize;

use crate::error::DeployError;

/// The subset of a Hardhat compilation artifact needed to deploy: the ABI
/// for constructor encoding and the creation bytecode.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    pub abi: Abi,
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Loads `<dir>/<name>.json`.
    pub fn load(dir: &Path, name: &str) -> Result<Self, DeployError> {
        let path = dir.join(format!("{name}.json"));
        let file = File::open(&path).map_err(|e| DeployError::MissingArtifact {
            name: name.to_owned(),
            reason: format!("{}: {e}", path.display()),
        })?;
        serde_json::from_reader(file).map_err(|e| DeployError::MissingArtifact {
            name: name.to_owned(),
            reason: format!("{}: {e}", path.display()),
        })
    }
}
