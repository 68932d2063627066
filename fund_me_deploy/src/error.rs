use thiserror::Error;

/// Fatal deployment failures. Any of these aborts the run before (or at)
/// the deploy transaction; nothing is retried automatically.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("no network config entry for chain id {chain_id}")]
    MissingChainConfig { chain_id: u64 },

    #[error("MockV3Aggregator has not been deployed on this development network")]
    MockNotDeployed,

    #[error("missing or unreadable artifact for contract '{name}': {reason}")]
    MissingArtifact { name: String, reason: String },

    #[error("deploy transaction failed: {0}")]
    Transaction(String),

    #[error("deployment ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed ledger file {path}: {source}")]
    Malformed {
        path: String,
        source: serde_json::Error,
    },
}

/// Explorer submission failures. Non-fatal by policy: the orchestrator logs
/// these and leaves the deployment record untouched.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("explorer request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("explorer rejected verification: {0}")]
    Rejected(String),
}
