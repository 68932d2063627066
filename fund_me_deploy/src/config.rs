use std::collections::BTreeMap;

use ethers::types::Address;

/// Networks with no real oracle infrastructure. Deployments against these
/// use a locally deployed mock aggregator instead of a chainlink feed.
pub const DEVELOPMENT_CHAINS: &[&str] = &["hardhat", "localhost"];

/// Constructor args for the mock aggregator: 8 decimals, 2000 USD.
pub const MOCK_DECIMALS: u8 = 8;
pub const MOCK_INITIAL_ANSWER: u64 = 200_000_000_000;

pub fn is_development_chain(network_name: &str) -> bool {
    DEVELOPMENT_CHAINS.contains(&network_name)
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChainEntry {
    pub name: String,
    pub eth_usd_price_feed: Address,
    pub block_confirmations: usize,
}

/// Static per-chain deployment parameters, keyed by chain id.
#[derive(Clone, Debug, Default)]
pub struct NetworkConfig {
    chains: BTreeMap<u64, ChainEntry>,
}

impl NetworkConfig {
    /// The known public networks and their chainlink ETH/USD feeds.
    pub fn hardcoded() -> Self {
        let mut config = Self::default();
        config.insert(
            11155111,
            ChainEntry {
                name: "sepolia".to_owned(),
                eth_usd_price_feed: "0x694AA1769357215DE4FAC081bf1f309aDC325306"
                    .parse()
                    .unwrap(),
                block_confirmations: 3,
            },
        );
        config.insert(
            5,
            ChainEntry {
                name: "goerli".to_owned(),
                eth_usd_price_feed: "0xD4a33860578De61DBAbDc8BFdb98FD742fA7028e"
                    .parse()
                    .unwrap(),
                block_confirmations: 3,
            },
        );
        config.insert(
            137,
            ChainEntry {
                name: "polygon".to_owned(),
                eth_usd_price_feed: "0xF9680D99D6C9589e2a93a78A04A279e509205945"
                    .parse()
                    .unwrap(),
                block_confirmations: 3,
            },
        );
        config
    }

    pub fn insert(&mut self, chain_id: u64, entry: ChainEntry) {
        self.chains.insert(chain_id, entry);
    }

    pub fn entry(&self, chain_id: u64) -> Option<&ChainEntry> {
        self.chains.get(&chain_id)
    }

    pub fn eth_usd_price_feed(&self, chain_id: u64) -> Option<Address> {
        self.chains.get(&chain_id).map(|e| e.eth_usd_price_feed)
    }

    /// Confirmations to wait on before trusting a deployment address.
    /// Unlisted chains (the local simulators) settle for a single block.
    pub fn wait_confirmations(&self, chain_id: u64) -> usize {
        self.chains
            .get(&chain_id)
            .map(|e| e.block_confirmations)
            .unwrap_or(1)
    }
}
