use ethers::contract::abigen;

abigen!(
    MockV3Aggregator,
    r#"[
        constructor(uint8 decimals, int256 initialAnswer)
        function decimals() external view returns (uint8)
        function latestRoundData() external view returns (uint80, int256, uint256, uint256, uint80)
        function updateAnswer(int256 answer) external
    ]"#
);
