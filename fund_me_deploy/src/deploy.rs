use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use ethers::abi::Token;
use ethers::contract::ContractFactory;
use ethers::providers::Middleware;
use ethers::types::{Address, U256};
use tracing::{info, warn};

use crate::artifacts::ContractArtifact;
use crate::config::{
    is_development_chain, NetworkConfig, MOCK_DECIMALS, MOCK_INITIAL_ANSWER,
};
use crate::contracts::{FUND_ME, MOCK_V3_AGGREGATOR};
use crate::error::{DeployError, VerifyError};
use crate::ledger::{DeploymentLedger, DeploymentRecord};

#[derive(Clone, Debug)]
pub struct DeployOptions {
    pub from: Address,
    pub args: Vec<Token>,
    pub wait_confirmations: usize,
}

/// The deployment capability: submit a deploy transaction, wait for it, and
/// record the result under the contract's name; look up past deployments by
/// name. Backed by ethers in production, by fakes in tests.
#[async_trait]
pub trait Deployments: Send + Sync {
    async fn deploy(
        &self,
        name: &str,
        options: DeployOptions,
    ) -> Result<DeploymentRecord, DeployError>;

    async fn get(&self, name: &str) -> Option<DeploymentRecord>;
}

/// Block-explorer source registration. Best-effort: callers treat failures
/// as warnings and repeated submissions as idempotent.
#[async_trait]
pub trait ContractVerifier: Send + Sync {
    async fn verify(&self, address: Address, constructor_args: &[Token])
        -> Result<(), VerifyError>;
}

/// Everything the orchestration needs, resolved once at startup. The core
/// reads no environment variables and holds no globals.
pub struct DeployContext<'a> {
    pub network_name: &'a str,
    pub chain_id: u64,
    pub deployer: Address,
    pub network_config: &'a NetworkConfig,
    pub deployments: &'a dyn Deployments,
}

/// Picks the ETH/USD feed for this run. Development networks must already
/// have a mock in the ledger; real networks must appear in the static table.
/// Pure: the same inputs always select the same address.
pub fn select_price_feed(
    network_name: &str,
    chain_id: u64,
    mock: Option<Address>,
    config: &NetworkConfig,
) -> Result<Address, DeployError> {
    if is_development_chain(network_name) {
        mock.ok_or(DeployError::MockNotDeployed)
    } else {
        config
            .eth_usd_price_feed(chain_id)
            .ok_or(DeployError::MissingChainConfig { chain_id })
    }
}

/// Deploys `MockV3Aggregator` on development networks, reusing the ledger
/// entry if one exists from an earlier run. On real networks this is a no-op.
/// Must run before [`deploy_fund_me`] on development networks.
pub async fn deploy_mocks(ctx: &DeployContext<'_>) -> Result<Option<DeploymentRecord>, DeployError> {
    if !is_development_chain(ctx.network_name) {
        return Ok(None);
    }
    if let Some(existing) = ctx.deployments.get(MOCK_V3_AGGREGATOR).await {
        info!(address = ?existing.address, "reusing deployed MockV3Aggregator");
        return Ok(Some(existing));
    }

    info!(network = ctx.network_name, "local network detected, deploying mocks");
    let record = ctx
        .deployments
        .deploy(
            MOCK_V3_AGGREGATOR,
            DeployOptions {
                from: ctx.deployer,
                args: vec![
                    Token::Uint(U256::from(MOCK_DECIMALS)),
                    Token::Int(U256::from(MOCK_INITIAL_ANSWER)),
                ],
                wait_confirmations: ctx.network_config.wait_confirmations(ctx.chain_id),
            },
        )
        .await?;
    info!(address = ?record.address, "MockV3Aggregator deployed");
    Ok(Some(record))
}

/// Deploys the FundMe contract: resolve the price feed, deploy with it as
/// the sole constructor arg, then submit for source verification when the
/// network has an explorer and a credential was configured. Verification
/// failures never fail the run.
pub async fn deploy_fund_me(
    ctx: &DeployContext<'_>,
    verifier: Option<&dyn ContractVerifier>,
) -> Result<DeploymentRecord, DeployError> {
    let mock = if is_development_chain(ctx.network_name) {
        ctx.deployments
            .get(MOCK_V3_AGGREGATOR)
            .await
            .map(|r| r.address)
    } else {
        None
    };
    let price_feed = select_price_feed(ctx.network_name, ctx.chain_id, mock, ctx.network_config)?;

    let args = vec![Token::Address(price_feed)];
    let record = ctx
        .deployments
        .deploy(
            FUND_ME,
            DeployOptions {
                from: ctx.deployer,
                args: args.clone(),
                wait_confirmations: ctx.network_config.wait_confirmations(ctx.chain_id),
            },
        )
        .await?;
    info!(
        network = ctx.network_name,
        address = ?record.address,
        price_feed = ?price_feed,
        "FundMe deployed"
    );

    if !is_development_chain(ctx.network_name) {
        if let Some(verifier) = verifier {
            match verifier.verify(record.address, &args).await {
                Ok(()) => info!(address = ?record.address, "contract source verified"),
                Err(e) => {
                    warn!(address = ?record.address, error = %e, "verification failed, deployment unaffected")
                }
            }
        }
    }

    Ok(record)
}

/// Renders a constructor arg for the ledger record.
pub(crate) fn format_arg(token: &Token) -> String {
    match token {
        Token::Address(a) => format!("{a:?}"),
        Token::Uint(v) | Token::Int(v) => v.to_string(),
        other => format!("{other:?}"),
    }
}

/// Artifact-backed [`Deployments`] over an ethers signer.
pub struct EthersDeployments<M> {
    client: Arc<M>,
    artifact_dir: PathBuf,
    ledger: Mutex<DeploymentLedger>,
}

impl<M> EthersDeployments<M> {
    pub fn new(client: Arc<M>, artifact_dir: PathBuf, ledger: DeploymentLedger) -> Self {
        Self {
            client,
            artifact_dir,
            ledger: Mutex::new(ledger),
        }
    }
}

#[async_trait]
impl<M> Deployments for EthersDeployments<M>
where
    M: Middleware + 'static,
{
    async fn deploy(
        &self,
        name: &str,
        options: DeployOptions,
    ) -> Result<DeploymentRecord, DeployError> {
        let artifact = ContractArtifact::load(&self.artifact_dir, name)?;
        let factory = ContractFactory::new(artifact.abi, artifact.bytecode, self.client.clone());

        let deployer = factory
            .deploy_tokens(options.args.clone())
            .map_err(|e| DeployError::Transaction(e.to_string()))?
            .confirmations(options.wait_confirmations);
        let (contract, receipt) = deployer
            .send_with_receipt()
            .await
            .map_err(|e| DeployError::Transaction(e.to_string()))?;

        let record = DeploymentRecord {
            contract: name.to_owned(),
            address: contract.address(),
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number.map(|b| b.as_u64()),
            constructor_args: options.args.iter().map(format_arg).collect(),
            deployed_at: Utc::now(),
        };

        let mut ledger = self.ledger.lock().unwrap();
        ledger.record(record.clone());
        ledger.save()?;
        Ok(record)
    }

    async fn get(&self, name: &str) -> Option<DeploymentRecord> {
        self.ledger.lock().unwrap().get(name).cloned()
    }
}
