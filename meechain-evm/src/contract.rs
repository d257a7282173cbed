//! Solidity interface for the MeeToken contract.

use alloy_sol_types::sol;

sol! {
    /// ERC20-style MeeToken surface.
    ///
    /// Only the functions actually invoked through connection handles are
    /// declared; the full interface description referenced by the
    /// configuration's `abiPath` stays with the deployment artifacts.
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IMeeToken {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function getOwner() external view returns (address);
        function transfer(address to, uint256 value) external returns (bool);
        function mint(address to, uint256 value) external;
        function burn(uint256 value) external;
    }
}
