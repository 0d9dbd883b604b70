//! Reward Distributor Contract
//!
//! Keeps the list of reward recipients (staking engines) with their reward
//! rates and mints each recipient's per-epoch reward through the treasury.
//!
//! ## Key design decisions
//!
//! - **Per-recipient epoch boundary**: a recipient is paid at most once per
//!   `epoch_length`, no matter how often it calls `distribute`.
//! - **Atomic replacement**: `replace_recipient` swaps a deprecated recipient
//!   for its successor in one state transition and carries the next payment
//!   boundary over, so no epoch is minted twice or skipped during migration.

#![no_std]

mod events;
mod types;

use types::DataKey;
pub use types::RecipientInfo;

use protocol_errors::ContractError;
use protocol_interfaces::TreasuryClient;
use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

#[cfg(test)]
mod test_helpers;


/// Reward rates are expressed in millionths of protocol-token supply.
pub const RATE_DENOMINATOR: i128 = 1_000_000;

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

fn load_recipients(e: &Env) -> Vec<RecipientInfo> {
    e.storage()
        .instance()
        .get(&DataKey::Recipients)
        .unwrap_or_else(|| Vec::new(e))
}

fn store_recipients(e: &Env, list: &Vec<RecipientInfo>) {
    e.storage().instance().set(&DataKey::Recipients, list);
}

fn position_of(list: &Vec<RecipientInfo>, who: &Address) -> Option<u32> {
    list.iter()
        .position(|info| info.recipient == *who)
        .map(|i| i as u32)
}

fn treasury(e: &Env) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Treasury)
        .ok_or(ContractError::NotInitialized)
}

fn validate_rate(rate: u32) -> Result<(), ContractError> {
    if rate == 0 || i128::from(rate) > RATE_DENOMINATOR {
        return Err(ContractError::InvalidRate);
    }
    Ok(())
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct Distributor;

#[contractimpl]
impl Distributor {
    /// One-time initialization. The distributor must be approved by the
    /// treasury as a `RewardManager` before `distribute` can mint.
    pub fn initialize(
        e: Env,
        manager: Address,
        treasury: Address,
        epoch_length: u64,
        first_epoch_time: u64,
    ) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Manager) {
            return Err(ContractError::AlreadyInitialized);
        }
        if epoch_length == 0 {
            return Err(ContractError::InvalidTerms);
        }
        manager.require_auth();
        e.storage().instance().set(&DataKey::Manager, &manager);
        e.storage().instance().set(&DataKey::Treasury, &treasury);
        e.storage()
            .instance()
            .set(&DataKey::EpochLength, &epoch_length);
        e.storage()
            .instance()
            .set(&DataKey::FirstEpochTime, &first_epoch_time);
        store_recipients(&e, &Vec::new(&e));
        Ok(())
    }

    // ── Recipient management ───────────────────────────────────────────────

    pub fn add_recipient(
        e: Env,
        manager: Address,
        recipient: Address,
        rate: u32,
    ) -> Result<(), ContractError> {
        require_manager(&e, &manager)?;
        validate_rate(rate)?;
        let mut list = load_recipients(&e);
        if position_of(&list, &recipient).is_some() {
            return Err(ContractError::RecipientExists);
        }
        let first: u64 = e
            .storage()
            .instance()
            .get(&DataKey::FirstEpochTime)
            .unwrap_or(0);
        list.push_back(RecipientInfo {
            recipient: recipient.clone(),
            rate,
            next_epoch_time: first.max(e.ledger().timestamp()),
        });
        store_recipients(&e, &list);
        events::emit_recipient_added(&e, &recipient, rate);
        Ok(())
    }

    pub fn remove_recipient(
        e: Env,
        manager: Address,
        recipient: Address,
    ) -> Result<(), ContractError> {
        require_manager(&e, &manager)?;
        let mut list = load_recipients(&e);
        let idx = position_of(&list, &recipient).ok_or(ContractError::RecipientNotFound)?;
        list.remove(idx);
        store_recipients(&e, &list);
        events::emit_recipient_removed(&e, &recipient);
        Ok(())
    }

    /// Swap `old` for `new` in place. The successor inherits `old`'s next
    /// payment boundary.
    pub fn replace_recipient(
        e: Env,
        manager: Address,
        old: Address,
        new: Address,
        rate: u32,
    ) -> Result<RecipientInfo, ContractError> {
        require_manager(&e, &manager)?;
        validate_rate(rate)?;
        let mut list = load_recipients(&e);
        let idx = position_of(&list, &old).ok_or(ContractError::RecipientNotFound)?;
        if position_of(&list, &new).is_some() {
            return Err(ContractError::RecipientExists);
        }
        let previous = list.get_unchecked(idx);
        let info = RecipientInfo {
            recipient: new.clone(),
            rate,
            next_epoch_time: previous.next_epoch_time,
        };
        list.set(idx, info.clone());
        store_recipients(&e, &list);
        events::emit_recipient_replaced(&e, &old, &new, rate, info.next_epoch_time);
        Ok(info)
    }

    // ── Distribution ───────────────────────────────────────────────────────

    /// Mint `recipient`'s reward for the current epoch. Returns 0 when the
    /// recipient was already paid for it or is not (or no longer) listed.
    pub fn distribute(e: Env, recipient: Address) -> Result<i128, ContractError> {
        recipient.require_auth();
        let mut list = load_recipients(&e);
        let Some(idx) = position_of(&list, &recipient) else {
            return Ok(0);
        };
        let mut info = list.get_unchecked(idx);

        if e.ledger().timestamp() < info.next_epoch_time {
            return Ok(0);
        }

        let epoch_length: u64 = e
            .storage()
            .instance()
            .get(&DataKey::EpochLength)
            .ok_or(ContractError::NotInitialized)?;
        let reward = Self::next_reward_at(e.clone(), info.rate)?;

        info.next_epoch_time = info
            .next_epoch_time
            .checked_add(epoch_length)
            .ok_or(ContractError::Overflow)?;
        list.set(idx, info.clone());
        store_recipients(&e, &list);

        if reward > 0 {
            let this = e.current_contract_address();
            TreasuryClient::new(&e, &treasury(&e)?).mint_rewards(&this, &recipient, &reward);
        }

        events::emit_distributed(&e, &recipient, reward, info.next_epoch_time);
        Ok(reward)
    }

    // ── Queries ────────────────────────────────────────────────────────────

    /// Reward for `rate` millionths of the current protocol-token supply.
    pub fn next_reward_at(e: Env, rate: u32) -> Result<i128, ContractError> {
        let supply = TreasuryClient::new(&e, &treasury(&e)?).total_supply();
        supply
            .checked_mul(i128::from(rate))
            .ok_or(ContractError::Overflow)
            .map(|v| v / RATE_DENOMINATOR)
    }

    pub fn next_reward_for(e: Env, recipient: Address) -> Result<i128, ContractError> {
        let list = load_recipients(&e);
        let idx = position_of(&list, &recipient).ok_or(ContractError::RecipientNotFound)?;
        Self::next_reward_at(e, list.get_unchecked(idx).rate)
    }

    pub fn recipients(e: Env) -> Vec<RecipientInfo> {
        load_recipients(&e)
    }

    pub fn epoch_length(e: Env) -> u64 {
        e.storage()
            .instance()
            .get(&DataKey::EpochLength)
            .unwrap_or(0)
    }
}
