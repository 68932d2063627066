use std::sync::Arc;

use ethers::core::k256::ecdsa::SigningKey;
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Provider};
use ethers::signers::{coins_bip39::English, MnemonicBuilder, Signer, Wallet};

use crate::config::DeployerConfig;

pub type EtherSigner = SignerMiddleware<Provider<Http>, Wallet<SigningKey>>;

pub fn get_writer_ethers_client(id: u32, config: &DeployerConfig) -> anyhow::Result<Arc<EtherSigner>> {
    let wallet = MnemonicBuilder::<English>::default()
        .phrase(&*config.mnemonic)
        .index(id)?
        .build()?
        .with_chain_id(config.chain_id);

    let provider = Provider::<Http>::try_from(config.rpc_url.as_str())?;
    Ok(Arc::new(SignerMiddleware::new(provider, wallet)))
}
