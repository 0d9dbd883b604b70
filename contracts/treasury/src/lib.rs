//! Reserve Treasury Contract
//!
//! Holds the reserves deposited by bond depositories and is the sole minter of
//! the protocol token. Reserve assets are valued at a manager-declared floor;
//! liquidity tokens are valued by the bonding calculator registered for them.
//!
//! ## Key design decisions
//!
//! - **Queued approvals**: enabling a depositor, token or reward manager
//!   requires a `queue` followed by a `toggle` no earlier than `queue_delay`
//!   seconds later. Revoking an approval is immediate.
//! - **Mint against backing**: `deposit` never mints more than the value of
//!   the reserves it receives.
//! - **Pull transfers**: the treasury pulls deposited reserves with
//!   `transfer_from`, so a depositor cannot claim reserves it did not send.

#![no_std]

mod events;
mod types;

pub use types::QueuedApproval;
use types::DataKey;

use protocol_errors::ContractError;
use protocol_interfaces::{BondingCalculatorClient, DepositorKind};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{contract, contractimpl, Address, Env};

#[cfg(test)]
mod test_helpers;


/// Protocol token decimals; floors are expressed per whole protocol token.
pub const PROTOCOL_DECIMALS: u32 = 9;

const ONE_PROTOCOL_TOKEN: i128 = 10_i128.pow(PROTOCOL_DECIMALS);

// ─── Helpers ───────────────────────────────────────────────────────────────

fn require_manager(e: &Env, caller: &Address) -> Result<(), ContractError> {
    caller.require_auth();
    let stored: Address = e
        .storage()
        .instance()
        .get(&DataKey::Manager)
        .ok_or(ContractError::NotInitialized)?;
    if stored != *caller {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

fn load_protocol_token(e: &Env) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::ProtocolToken)
        .ok_or(ContractError::NotInitialized)
}

fn approval_of(e: &Env, kind: DepositorKind, who: &Address) -> bool {
    e.storage()
        .persistent()
        .get(&DataKey::Approved(kind, who.clone()))
        .unwrap_or(false)
}

fn read_i128(e: &Env, key: &DataKey) -> i128 {
    e.storage().instance().get(key).unwrap_or(0)
}

fn add_to(e: &Env, key: &DataKey, amount: i128) -> Result<i128, ContractError> {
    let total = read_i128(e, key)
        .checked_add(amount)
        .ok_or(ContractError::Overflow)?;
    e.storage().instance().set(key, &total);
    Ok(total)
}

fn mint_protocol(e: &Env, to: &Address, amount: i128) -> Result<(), ContractError> {
    let token = load_protocol_token(e)?;
    StellarAssetClient::new(e, &token).mint(to, &amount);
    add_to(e, &DataKey::TotalSupply, amount)?;
    Ok(())
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct Treasury;

#[contractimpl]
impl Treasury {
    // ── Admin setup ────────────────────────────────────────────────────────

    /// One-time initialization. The treasury must be the admin of
    /// `protocol_token` for minting to succeed.
    pub fn initialize(
        e: Env,
        manager: Address,
        protocol_token: Address,
        queue_delay: u64,
    ) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Manager) {
            return Err(ContractError::AlreadyInitialized);
        }
        manager.require_auth();
        e.storage().instance().set(&DataKey::Manager, &manager);
        e.storage()
            .instance()
            .set(&DataKey::ProtocolToken, &protocol_token);
        e.storage().instance().set(&DataKey::QueueDelay, &queue_delay);
        e.storage().instance().set(&DataKey::TotalSupply, &0_i128);
        e.storage().instance().set(&DataKey::TotalReserves, &0_i128);
        Ok(())
    }

    /// Declare the floor of a reserve asset: how many asset base units back
    /// one whole protocol token.
    pub fn set_floor(
        e: Env,
        manager: Address,
        asset: Address,
        floor: i128,
    ) -> Result<(), ContractError> {
        require_manager(&e, &manager)?;
        if floor <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        e.storage()
            .persistent()
            .set(&DataKey::Floor(asset.clone()), &floor);
        events::emit_floor_set(&e, &asset, floor);
        Ok(())
    }

    /// Queue an approval change for `who`. Returns the ETA.
    pub fn queue(
        e: Env,
        manager: Address,
        kind: DepositorKind,
        who: Address,
    ) -> Result<u64, ContractError> {
        require_manager(&e, &manager)?;
        let delay: u64 = e
            .storage()
            .instance()
            .get(&DataKey::QueueDelay)
            .unwrap_or(0);
        let now = e.ledger().timestamp();
        let eta = now.checked_add(delay).ok_or(ContractError::Overflow)?;
        let entry = QueuedApproval {
            kind,
            who: who.clone(),
            queued_at: now,
            eta,
        };
        e.storage()
            .persistent()
            .set(&DataKey::Queue(kind, who.clone()), &entry);
        events::emit_depositor_queued(&e, kind, &who, eta);
        Ok(eta)
    }

    /// Flip the approval of `who`. Enabling requires a queue entry whose ETA
    /// has passed; disabling is immediate. For `LiquidityToken`, `calculator`
    /// is registered as the token's bonding calculator.
    ///
    /// Returns the new approval status.
    pub fn toggle(
        e: Env,
        manager: Address,
        kind: DepositorKind,
        who: Address,
        calculator: Option<Address>,
    ) -> Result<bool, ContractError> {
        require_manager(&e, &manager)?;
        let approved_key = DataKey::Approved(kind, who.clone());
        let queue_key = DataKey::Queue(kind, who.clone());
        let currently = approval_of(&e, kind, &who);

        if currently {
            e.storage().persistent().set(&approved_key, &false);
            if kind == DepositorKind::LiquidityToken {
                e.storage()
                    .persistent()
                    .remove(&DataKey::Calculator(who.clone()));
            }
        } else {
            let entry: QueuedApproval = e
                .storage()
                .persistent()
                .get(&queue_key)
                .ok_or(ContractError::QueueNotElapsed)?;
            if e.ledger().timestamp() < entry.eta {
                return Err(ContractError::QueueNotElapsed);
            }
            e.storage().persistent().remove(&queue_key);
            e.storage().persistent().set(&approved_key, &true);
            if kind == DepositorKind::LiquidityToken {
                let calc = calculator.ok_or(ContractError::InvalidTerms)?;
                e.storage()
                    .persistent()
                    .set(&DataKey::Calculator(who.clone()), &calc);
            }
        }

        events::emit_depositor_toggled(&e, kind, &who, !currently);
        Ok(!currently)
    }

    // ── Reserves and minting ───────────────────────────────────────────────

    /// Value `amount` of `asset` in protocol-token base units.
    ///
    /// Reserve tokens are valued at their floor, liquidity tokens through
    /// their registered bonding calculator.
    pub fn value_of(e: Env, asset: Address, amount: i128) -> Result<i128, ContractError> {
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }
        if approval_of(&e, DepositorKind::ReserveToken, &asset) {
            let floor = Self::get_floor(e.clone(), asset)?;
            amount
                .checked_mul(ONE_PROTOCOL_TOKEN)
                .ok_or(ContractError::Overflow)?
                .checked_div(floor)
                .ok_or(ContractError::DivisionByZero)
        } else if approval_of(&e, DepositorKind::LiquidityToken, &asset) {
            let calc: Address = e
                .storage()
                .persistent()
                .get(&DataKey::Calculator(asset.clone()))
                .ok_or(ContractError::DepositorNotApproved)?;
            Ok(BondingCalculatorClient::new(&e, &calc).valuation(&asset, &amount))
        } else {
            Err(ContractError::DepositorNotApproved)
        }
    }

    /// Pull `amount` of `asset` from `depositor` (which must have approved the
    /// treasury as spender) and mint `mint_amount` protocol tokens to it.
    ///
    /// Returns the value of the deposit.
    pub fn deposit(
        e: Env,
        depositor: Address,
        asset: Address,
        amount: i128,
        mint_amount: i128,
    ) -> Result<i128, ContractError> {
        depositor.require_auth();
        if amount <= 0 || mint_amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let allowed = (approval_of(&e, DepositorKind::ReserveToken, &asset)
            && approval_of(&e, DepositorKind::ReserveDepositor, &depositor))
            || (approval_of(&e, DepositorKind::LiquidityToken, &asset)
                && approval_of(&e, DepositorKind::LiquidityDepositor, &depositor));
        if !allowed {
            return Err(ContractError::DepositorNotApproved);
        }

        let value = Self::value_of(e.clone(), asset.clone(), amount)?;
        if mint_amount > value {
            return Err(ContractError::InsufficientReserves);
        }

        let this = e.current_contract_address();
        TokenClient::new(&e, &asset).transfer_from(&this, &depositor, &this, &amount);

        add_to(&e, &DataKey::TotalReserves, value)?;
        if mint_amount > 0 {
            mint_protocol(&e, &depositor, mint_amount)?;
        }

        events::emit_reserves_deposited(&e, &depositor, &asset, amount, value, mint_amount);
        Ok(value)
    }

    /// Mint `amount` protocol tokens to `recipient` on behalf of an approved
    /// reward manager (the distributor).
    pub fn mint_rewards(
        e: Env,
        caller: Address,
        recipient: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        if !approval_of(&e, DepositorKind::RewardManager, &caller) {
            return Err(ContractError::DepositorNotApproved);
        }
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }
        if amount > 0 {
            mint_protocol(&e, &recipient, amount)?;
        }
        events::emit_rewards_minted(&e, &caller, &recipient, amount);
        Ok(())
    }

    // ── Queries ────────────────────────────────────────────────────────────

    pub fn total_supply(e: Env) -> i128 {
        read_i128(&e, &DataKey::TotalSupply)
    }

    pub fn total_reserves(e: Env) -> i128 {
        read_i128(&e, &DataKey::TotalReserves)
    }

    pub fn get_floor(e: Env, asset: Address) -> Result<i128, ContractError> {
        e.storage()
            .persistent()
            .get(&DataKey::Floor(asset))
            .ok_or(ContractError::FloorNotSet)
    }

    pub fn is_approved(e: Env, kind: DepositorKind, who: Address) -> bool {
        approval_of(&e, kind, &who)
    }

    pub fn queued(e: Env, kind: DepositorKind, who: Address) -> Option<QueuedApproval> {
        e.storage().persistent().get(&DataKey::Queue(kind, who))
    }

    pub fn manager(e: Env) -> Result<Address, ContractError> {
        e.storage()
            .instance()
            .get(&DataKey::Manager)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn protocol_token(e: Env) -> Result<Address, ContractError> {
        load_protocol_token(&e)
    }
}
