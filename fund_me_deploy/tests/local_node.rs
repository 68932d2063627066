//! Fund/withdraw flow against a running local node (`npx hardhat node`)
//! with compiled artifacts available. All tests here are `#[ignore]`d so the
//! default suite stays hermetic; run with `cargo test -- --ignored`.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use dotenv::dotenv;
use ethers::core::k256::ecdsa::SigningKey;
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::{coins_bip39::English, MnemonicBuilder, Signer, Wallet};
use ethers::types::{Address, U256};
use ethers::utils::parse_ether;

use fund_me_deploy::config::NetworkConfig;
use fund_me_deploy::contracts::fund_me::FundMe;
use fund_me_deploy::contracts::MOCK_V3_AGGREGATOR;
use fund_me_deploy::deploy::{deploy_fund_me, deploy_mocks, DeployContext, EthersDeployments};
use fund_me_deploy::ledger::DeploymentLedger;

type EtherSigner = SignerMiddleware<Provider<Http>, Wallet<SigningKey>>;

const HARDHAT_MNEMONIC: &str = "test test test test test test test test test test test junk";
const NETWORK: &str = "localhost";
const CHAIN_ID: u64 = 31337;

fn rpc_url() -> String {
    env::var("RPC_URL").unwrap_or_else(|_| "http://localhost:8545".to_owned())
}

fn signer(index: u32) -> Arc<EtherSigner> {
    dotenv().ok();
    let phrase = env::var("MNEMONIC").unwrap_or_else(|_| HARDHAT_MNEMONIC.to_owned());

    let wallet = MnemonicBuilder::<English>::default()
        .phrase(&*phrase)
        .index(index)
        .unwrap()
        .build()
        .unwrap()
        .with_chain_id(CHAIN_ID);

    let provider = Provider::<Http>::try_from(rpc_url()).unwrap();
    Arc::new(SignerMiddleware::new(provider, wallet))
}

fn artifact_dir() -> PathBuf {
    env::var("ARTIFACT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("artifacts"))
}

fn scratch_ledger() -> DeploymentLedger {
    let dir = env::temp_dir().join(format!("fund-me-test-{}", uuid::Uuid::new_v4()));
    DeploymentLedger::load(&dir, NETWORK).unwrap()
}

/// Deploys the mock and FundMe through the orchestrator, returning a
/// contract handle bound to the given signer.
async fn deploy_stack(client: Arc<EtherSigner>) -> (FundMe<EtherSigner>, EthersDeployments<EtherSigner>) {
    let deployments = EthersDeployments::new(client.clone(), artifact_dir(), scratch_ledger());
    let config = NetworkConfig::hardcoded();
    let ctx = DeployContext {
        network_name: NETWORK,
        chain_id: CHAIN_ID,
        deployer: client.address(),
        network_config: &config,
        deployments: &deployments,
    };

    deploy_mocks(&ctx).await.unwrap();
    let record = deploy_fund_me(&ctx, None).await.unwrap();
    (FundMe::new(record.address, client), deployments)
}

#[tokio::test]
#[ignore = "requires a local node with compiled artifacts"]
async fn constructor_wires_the_mock_aggregator() {
    let client = signer(0);
    let (fund_me, deployments) = deploy_stack(client).await;

    use fund_me_deploy::deploy::Deployments;
    let mock = deployments.get(MOCK_V3_AGGREGATOR).await.unwrap();
    let price_feed: Address = fund_me.get_price_feed().call().await.unwrap();
    assert_eq!(price_feed, mock.address);
}

#[tokio::test]
#[ignore = "requires a local node with compiled artifacts"]
async fn fund_rejects_contributions_below_minimum() {
    let client = signer(0);
    let (fund_me, _) = deploy_stack(client).await;

    // no value attached, well under the USD minimum
    let call = fund_me.fund();
    let result = call.send().await;
    assert!(result.is_err());
}

#[tokio::test]
#[ignore = "requires a local node with compiled artifacts"]
async fn fund_tracks_the_funder_and_amount() {
    let client = signer(0);
    let deployer = client.address();
    let (fund_me, _) = deploy_stack(client).await;
    let send_value = parse_ether(1u64).unwrap();

    fund_me
        .fund()
        .value(send_value)
        .send()
        .await
        .unwrap()
        .await
        .unwrap();

    let funded: U256 = fund_me
        .get_address_to_amount_funded(deployer)
        .call()
        .await
        .unwrap();
    assert_eq!(funded, send_value);

    let first_funder: Address = fund_me.get_funder(U256::zero()).call().await.unwrap();
    assert_eq!(first_funder, deployer);
}

#[tokio::test]
#[ignore = "requires a local node with compiled artifacts"]
async fn withdraw_zeroes_the_contract_balance() {
    let client = signer(0);
    let deployer = client.address();
    let (fund_me, _) = deploy_stack(client.clone()).await;
    let send_value = parse_ether(1u64).unwrap();

    fund_me
        .fund()
        .value(send_value)
        .send()
        .await
        .unwrap()
        .await
        .unwrap();

    let starting_contract = client.get_balance(fund_me.address(), None).await.unwrap();
    let starting_deployer = client.get_balance(deployer, None).await.unwrap();

    let receipt = fund_me
        .withdraw()
        .send()
        .await
        .unwrap()
        .await
        .unwrap()
        .unwrap();
    let gas_cost = receipt.gas_used.unwrap() * receipt.effective_gas_price.unwrap();

    let ending_contract = client.get_balance(fund_me.address(), None).await.unwrap();
    let ending_deployer = client.get_balance(deployer, None).await.unwrap();

    assert_eq!(ending_contract, U256::zero());
    assert_eq!(
        starting_contract + starting_deployer,
        ending_deployer + gas_cost
    );
}

#[tokio::test]
#[ignore = "requires a local node with compiled artifacts"]
async fn withdraw_with_multiple_funders_resets_their_balances() {
    let client = signer(0);
    let deployer = client.address();
    let (fund_me, _) = deploy_stack(client.clone()).await;
    let send_value = parse_ether(1u64).unwrap();

    // index 0 is the deployer
    let mut funders = Vec::new();
    for index in 1..4u32 {
        let funder = signer(index);
        funders.push(funder.address());
        let connected = FundMe::new(fund_me.address(), funder);
        connected
            .fund()
            .value(send_value)
            .send()
            .await
            .unwrap()
            .await
            .unwrap();
    }

    let starting_contract = client.get_balance(fund_me.address(), None).await.unwrap();
    let starting_deployer = client.get_balance(deployer, None).await.unwrap();

    let receipt = fund_me
        .cheaper_withdraw()
        .send()
        .await
        .unwrap()
        .await
        .unwrap()
        .unwrap();
    let gas_cost = receipt.gas_used.unwrap() * receipt.effective_gas_price.unwrap();

    let ending_contract = client.get_balance(fund_me.address(), None).await.unwrap();
    let ending_deployer = client.get_balance(deployer, None).await.unwrap();
    assert_eq!(ending_contract, U256::zero());
    assert_eq!(
        starting_contract + starting_deployer,
        ending_deployer + gas_cost
    );

    // funder list and balances are reset
    assert!(fund_me.get_funder(U256::zero()).call().await.is_err());
    for funder in funders {
        let amount: U256 = fund_me
            .get_address_to_amount_funded(funder)
            .call()
            .await
            .unwrap();
        assert_eq!(amount, U256::zero());
    }
}

#[tokio::test]
#[ignore = "requires a local node with compiled artifacts"]
async fn only_the_owner_can_withdraw() {
    let deployer_client = signer(0);
    let (fund_me, _) = deploy_stack(deployer_client).await;

    let attacker = signer(1);
    let attacker_contract = FundMe::new(fund_me.address(), attacker);
    let call = attacker_contract.withdraw();
    let result = call.send().await;
    assert!(result.is_err());
}
