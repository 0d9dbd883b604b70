#![no_std]

//! # Protocol Interfaces
//!
//! Narrow cross-contract interfaces consumed by the bond depository and the
//! staking engine, plus the few `#[contracttype]`s shared between contracts.
//!
//! Contracts depend on these traits instead of on each other's crates so that
//! each one links into its own wasm without pulling in another contract's
//! exported entry points.

use protocol_errors::ContractError;
use soroban_sdk::{contractclient, contracttype, Address, Env};

/// Kind of approval the treasury grants to an asset or a contract.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DepositorKind {
    /// Asset accepted as reserve, valued at its declared floor.
    ReserveToken,
    /// May deposit reserve tokens.
    ReserveDepositor,
    /// Asset accepted as liquidity, valued by its bonding calculator.
    LiquidityToken,
    /// May deposit liquidity tokens.
    LiquidityDepositor,
    /// May mint protocol-token rewards without depositing reserves.
    RewardManager,
}

/// Reserve treasury, as seen by depositors and the distributor.
#[contractclient(name = "TreasuryClient")]
pub trait TreasuryInterface {
    /// Value `amount` of `asset` in protocol-token base units.
    fn value_of(env: Env, asset: Address, amount: i128) -> Result<i128, ContractError>;

    /// Pull `amount` of `asset` from `depositor`, which must have approved
    /// the treasury as spender, and mint `mint_amount` protocol tokens back
    /// to it.
    fn deposit(
        env: Env,
        depositor: Address,
        asset: Address,
        amount: i128,
        mint_amount: i128,
    ) -> Result<i128, ContractError>;

    /// Mint unbacked rewards; restricted to approved reward managers.
    fn mint_rewards(
        env: Env,
        caller: Address,
        recipient: Address,
        amount: i128,
    ) -> Result<(), ContractError>;

    /// Total protocol-token supply minted through the treasury.
    fn total_supply(env: Env) -> i128;

    /// Declared floor for a reserve asset.
    fn get_floor(env: Env, asset: Address) -> Result<i128, ContractError>;

    fn manager(env: Env) -> Result<Address, ContractError>;

    fn protocol_token(env: Env) -> Result<Address, ContractError>;
}

/// Values non-trivial principal such as liquidity-pool shares.
#[contractclient(name = "BondingCalculatorClient")]
pub trait BondingCalculatorInterface {
    /// Value of `amount` of `pair` in protocol-token base units.
    fn valuation(env: Env, pair: Address, amount: i128) -> i128;
}

/// Reward distributor, as seen by the staking engine.
#[contractclient(name = "DistributorClient")]
pub trait DistributorInterface {
    /// Mint this epoch's reward to `recipient` and return the amount minted.
    /// Returns 0 when the recipient has already been paid for the epoch.
    fn distribute(env: Env, recipient: Address) -> Result<i128, ContractError>;

    /// Reward `recipient` would receive on its next distribution.
    fn next_reward_for(env: Env, recipient: Address) -> Result<i128, ContractError>;
}

/// Staking engine, as seen by the bond depository's auto-stake path and by
/// a successor instance checking index continuity.
#[contractclient(name = "StakingClient")]
pub trait StakingInterface {
    /// Pull `amount` protocol tokens from `from` into warmup for `recipient`.
    fn stake(env: Env, from: Address, amount: i128, recipient: Address)
        -> Result<i128, ContractError>;

    /// Release a matured warmup entry into `recipient`'s receipt balance.
    fn claim(env: Env, recipient: Address) -> Result<i128, ContractError>;

    /// Number of epochs a stake spends in warmup.
    fn warmup_period(env: Env) -> u32;

    /// Current index, 9 decimals.
    fn index(env: Env) -> Result<i128, ContractError>;

    /// Number of the epoch currently running.
    fn epoch_number(env: Env) -> Result<u32, ContractError>;
}
