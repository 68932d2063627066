mod config;
mod ethers_client;

use clap::Parser;
use tracing::{info, subscriber::set_global_default};
use tracing_subscriber::FmtSubscriber;

use fund_me_deploy::config::NetworkConfig;
use fund_me_deploy::deploy::{
    deploy_fund_me, deploy_mocks, ContractVerifier, DeployContext, EthersDeployments,
};
use fund_me_deploy::ledger::DeploymentLedger;

use crate::config::DeployerConfig;

/// Deploys the FundMe contract (and its mock price feed on local networks),
/// recording addresses in the per-network deployment ledger.
#[derive(Debug, Parser)]
struct Cli {
    /// Target network
    #[clap(long, default_value = "hardhat", value_name = "NAME")]
    network: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    set_global_default(FmtSubscriber::new())?;

    let cli = Cli::parse();
    let config = DeployerConfig::load(&cli.network)?;
    info!(
        network = %config.network_name,
        chain_id = config.chain_id,
        "starting deployment"
    );

    let client = ethers_client::get_writer_ethers_client(0, &config)?;
    let deployer = client.address();

    let ledger = DeploymentLedger::load(&config.deployments_dir, &config.network_name)?;
    let deployments = EthersDeployments::new(client, config.artifact_dir.clone(), ledger);
    let network_config = NetworkConfig::hardcoded();

    let ctx = DeployContext {
        network_name: &config.network_name,
        chain_id: config.chain_id,
        deployer,
        network_config: &network_config,
        deployments: &deployments,
    };

    deploy_mocks(&ctx).await?;

    let verifier = config.verifier()?;
    let record = deploy_fund_me(
        &ctx,
        verifier.as_ref().map(|v| v as &dyn ContractVerifier),
    )
    .await?;

    info!(address = ?record.address, tx = ?record.transaction_hash, "deployment complete");
    Ok(())
}
