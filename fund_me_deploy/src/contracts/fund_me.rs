use ethers::contract::abigen;

abigen!(
    FundMe,
    r#"[
        constructor(address priceFeed)
        function fund() external payable
        function withdraw() external
        function cheaperWithdraw() external
        function getPriceFeed() external view returns (address)
        function getOwner() external view returns (address)
        function getFunder(uint256 index) external view returns (address)
        function getAddressToAmountFunded(address funder) external view returns (uint256)
        function MINIMUM_USD() external view returns (uint256)
        error FundMe__NotOwner()
    ]"#
);
