pub mod fund_me;
pub mod mock_v3_aggregator;

/// Ledger keys. Deployments are recorded and looked up under these names,
/// which also name the artifact files on disk.
pub const FUND_ME: &str = "FundMe";
pub const MOCK_V3_AGGREGATOR: &str = "MockV3Aggregator";
