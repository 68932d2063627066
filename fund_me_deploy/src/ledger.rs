use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use ethers::types::{Address, H256};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// The outcome of one deployment. Created once at deploy time and never
/// mutated afterwards; the ledger persists it per network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub contract: String,
    pub address: Address,
    pub transaction_hash: H256,
    pub block_number: Option<u64>,
    pub constructor_args: Vec<String>,
    pub deployed_at: DateTime<Utc>,
}

/// Append-only name -> record map for a single network, stored as
/// `<dir>/<network>.json`. Recording the same contract name again replaces
/// the entry (a redeploy), but existing records are never edited in place.
#[derive(Debug)]
pub struct DeploymentLedger {
    path: PathBuf,
    records: BTreeMap<String, DeploymentRecord>,
}

impl DeploymentLedger {
    /// Opens the ledger for `network`, creating an empty one if no file
    /// exists yet.
    pub fn load(dir: &Path, network: &str) -> Result<Self, LedgerError> {
        let path = dir.join(format!("{network}.json"));
        let records = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            serde_json::from_str(&contents).map_err(|e| LedgerError::Malformed {
                path: path.display().to_string(),
                source: e,
            })?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, records })
    }

    pub fn get(&self, contract: &str) -> Option<&DeploymentRecord> {
        self.records.get(contract)
    }

    pub fn record(&mut self, record: DeploymentRecord) {
        self.records.insert(record.contract.clone(), record);
    }

    pub fn save(&self) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.records)
            .expect("deployment records always serialize");
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("ledger-{}", uuid::Uuid::new_v4()))
    }

    fn record(contract: &str, address: &str) -> DeploymentRecord {
        DeploymentRecord {
            contract: contract.to_owned(),
            address: address.parse().unwrap(),
            transaction_hash: H256::zero(),
            block_number: Some(1),
            constructor_args: vec![],
            deployed_at: Utc::now(),
        }
    }

    #[test]
    fn empty_ledger_for_fresh_network() {
        let ledger = DeploymentLedger::load(&scratch_dir(), "hardhat").unwrap();
        assert!(ledger.get("FundMe").is_none());
    }

    #[test]
    fn records_survive_a_reload() {
        let dir = scratch_dir();
        let mut ledger = DeploymentLedger::load(&dir, "localhost").unwrap();
        ledger.record(record(
            "MockV3Aggregator",
            "0x5FbDB2315678afecb367f032d93F642f64180aa3",
        ));
        ledger.save().unwrap();

        let reloaded = DeploymentLedger::load(&dir, "localhost").unwrap();
        let found = reloaded.get("MockV3Aggregator").unwrap();
        assert_eq!(
            found.address,
            "0x5FbDB2315678afecb367f032d93F642f64180aa3"
                .parse()
                .unwrap()
        );
    }

    #[test]
    fn networks_do_not_share_records() {
        let dir = scratch_dir();
        let mut ledger = DeploymentLedger::load(&dir, "localhost").unwrap();
        ledger.record(record(
            "FundMe",
            "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512",
        ));
        ledger.save().unwrap();

        let other = DeploymentLedger::load(&dir, "goerli").unwrap();
        assert!(other.get("FundMe").is_none());
    }
}
