//! Rebasing Staking Contract
//!
//! Holders lock the protocol token and receive an auto-compounding receipt
//! balance. Every epoch the pool asks the distributor for its reward and
//! spreads it over all claimed balances through the gons/index ledger.
//!
//! ## Key design decisions
//!
//! - **Warmup**: stakes first sit in a warmup entry that does not earn
//!   rebases; `claim` converts them at the current index once
//!   `warmup_period` epochs have passed.
//! - **Permissionless rebase**: anyone may poke `rebase`; before the epoch
//!   boundary it returns `false` and changes nothing.
//! - **Migration**: a successor instance is constructed from a
//!   `MigrationSnapshot` and seeds its index from the closed-form
//!   compounding formula, refusing to start when it disagrees with the
//!   deprecated instance's index.

#![no_std]

mod epoch;
mod events;
mod migration;
mod rebase_index;
mod types;

pub use epoch::Epoch;
pub use migration::{compound_index, within_tolerance};
pub use rebase_index::{GonsLedger, INDEX_PRECISION};
pub use types::{ContractSlot, MigrationSnapshot, WarmupInfo};
use types::DataKey;

use protocol_errors::ContractError;
use protocol_interfaces::DistributorClient;
use protocol_interfaces::StakingClient as PredecessorClient;
use soroban_sdk::token::TokenClient;
use soroban_sdk::{contract, contractimpl, Address, Env};

#[cfg(test)]
mod test_helpers;


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

fn load_epoch(e: &Env) -> Result<Epoch, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Epoch)
        .ok_or(ContractError::NotInitialized)
}

fn load_ledger(e: &Env) -> Result<GonsLedger, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Ledger)
        .ok_or(ContractError::NotInitialized)
}

fn store_ledger(e: &Env, ledger: &GonsLedger) {
    e.storage().instance().set(&DataKey::Ledger, ledger);
}

fn contract_in(e: &Env, slot: ContractSlot) -> Option<Address> {
    e.storage().instance().get(&DataKey::Contract(slot))
}

fn held_gons(e: &Env, holder: &Address) -> u128 {
    e.storage()
        .persistent()
        .get(&DataKey::Gons(holder.clone()))
        .unwrap_or(0)
}

fn store_gons(e: &Env, holder: &Address, gons: u128) {
    let key = DataKey::Gons(holder.clone());
    if gons == 0 {
        e.storage().persistent().remove(&key);
    } else {
        e.storage().persistent().set(&key, &gons);
    }
}

fn warmup_of(e: &Env, recipient: &Address) -> Option<WarmupInfo> {
    e.storage()
        .persistent()
        .get(&DataKey::Warmup(recipient.clone()))
}

fn adjust_total_warmup(e: &Env, delta: i128) -> Result<(), ContractError> {
    let total: i128 = e
        .storage()
        .instance()
        .get(&DataKey::TotalWarmup)
        .unwrap_or(0);
    let total = total.checked_add(delta).ok_or(ContractError::Overflow)?;
    e.storage().instance().set(&DataKey::TotalWarmup, &total);
    Ok(())
}

fn positive_amount(amount: i128) -> Result<u128, ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    Ok(amount as u128)
}

fn to_i128(value: u128) -> Result<i128, ContractError> {
    i128::try_from(value).map_err(|_| ContractError::Overflow)
}

fn store_config(e: &Env, manager: &Address, protocol_token: &Address, epoch: &Epoch) {
    e.storage().instance().set(&DataKey::Manager, manager);
    e.storage()
        .instance()
        .set(&DataKey::ProtocolToken, protocol_token);
    e.storage().instance().set(&DataKey::Epoch, epoch);
    e.storage().instance().set(&DataKey::TotalWarmup, &0_i128);
}

/// Close the current epoch if it is over. Returns whether a rebase happened.
fn rebase_if_due(e: &Env) -> Result<bool, ContractError> {
    let mut epoch = load_epoch(e)?;
    if !epoch.is_due(e.ledger().timestamp()) {
        return Ok(false);
    }

    let mut ledger = load_ledger(e)?;
    let mut profit: i128 = 0;
    if ledger.circulating() > 0 {
        if let Some(distributor) = contract_in(e, ContractSlot::Distributor) {
            profit = DistributorClient::new(e, &distributor).distribute(&e.current_contract_address());
        }
    }
    let profit_units = u128::try_from(profit).map_err(|_| ContractError::Underflow)?;
    ledger.rebase(e, profit_units)?;
    store_ledger(e, &ledger);

    let closed = epoch.number;
    epoch.advance(profit)?;
    e.storage().instance().set(&DataKey::Epoch, &epoch);

    events::emit_rebased(e, closed, profit, ledger.index(), ledger.total_supply);
    Ok(true)
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct Staking;

#[contractimpl]
impl Staking {
    // ── Setup ──────────────────────────────────────────────────────────────

    /// One-time initialization of a first-generation pool.
    pub fn initialize(
        e: Env,
        manager: Address,
        protocol_token: Address,
        epoch_length: u64,
        first_epoch_number: u32,
        first_epoch_end: u64,
        initial_index: i128,
    ) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Manager) {
            return Err(ContractError::AlreadyInitialized);
        }
        manager.require_auth();
        let epoch = Epoch::new(first_epoch_number, epoch_length, first_epoch_end)?;
        let ledger = GonsLedger::new(positive_amount(initial_index)?)?;

        store_config(&e, &manager, &protocol_token, &epoch);
        store_ledger(&e, &ledger);
        e.storage().instance().set(&DataKey::WarmupPeriod, &0_u32);
        e.storage().instance().set(&DataKey::Version, &1_u32);
        Ok(())
    }

    /// One-time initialization of a successor pool from the snapshot of the
    /// instance it replaces. The predecessor's live index is read back and
    /// must match the seed. Returns the seeded index.
    pub fn initialize_successor(
        e: Env,
        manager: Address,
        protocol_token: Address,
        snapshot: MigrationSnapshot,
    ) -> Result<i128, ContractError> {
        if e.storage().instance().has(&DataKey::Manager) {
            return Err(ContractError::AlreadyInitialized);
        }
        manager.require_auth();
        let predecessor = PredecessorClient::new(&e, &snapshot.predecessor);
        let seeded = migration::seed_index(
            &e,
            &snapshot,
            predecessor.index(),
            predecessor.epoch_number(),
        )?;
        let ledger = GonsLedger::new(seeded)?;

        store_config(&e, &manager, &protocol_token, &snapshot.epoch);
        store_ledger(&e, &ledger);
        e.storage()
            .instance()
            .set(&DataKey::WarmupPeriod, &snapshot.warmup_period);
        e.storage()
            .instance()
            .set(&DataKey::Version, &snapshot.version);

        events::emit_index_seeded(&e, &manager, ledger.index(), snapshot.version, snapshot.epoch.number);
        to_i128(ledger.index())
    }

    /// Snapshot this instance for a successor that compounds `reward_rate`
    /// per epoch from `base_index` at `first_epoch`.
    pub fn snapshot(
        e: Env,
        reward_rate: u32,
        base_index: i128,
        first_epoch: u32,
    ) -> Result<MigrationSnapshot, ContractError> {
        let version: u32 = e.storage().instance().get(&DataKey::Version).unwrap_or(1);
        Ok(MigrationSnapshot {
            version: version.checked_add(1).ok_or(ContractError::Overflow)?,
            predecessor: e.current_contract_address(),
            epoch: load_epoch(&e)?,
            warmup_period: Self::warmup_period(e.clone()),
            reward_rate,
            base_index,
            first_epoch,
        })
    }

    pub fn set_contract(
        e: Env,
        manager: Address,
        slot: ContractSlot,
        address: Address,
    ) -> Result<(), ContractError> {
        require_manager(&e, &manager)?;
        e.storage()
            .instance()
            .set(&DataKey::Contract(slot), &address);
        Ok(())
    }

    pub fn set_warmup(e: Env, manager: Address, epochs: u32) -> Result<(), ContractError> {
        require_manager(&e, &manager)?;
        e.storage().instance().set(&DataKey::WarmupPeriod, &epochs);
        Ok(())
    }

    // ── Warmup ─────────────────────────────────────────────────────────────

    /// Pull `amount` protocol tokens from `from` (which must have approved
    /// the pool as spender) into `recipient`'s warmup entry. A further stake
    /// tops the entry up and restarts its warmup.
    ///
    /// Returns the recipient's total warmup deposit.
    pub fn stake(
        e: Env,
        from: Address,
        amount: i128,
        recipient: Address,
    ) -> Result<i128, ContractError> {
        from.require_auth();
        positive_amount(amount)?;

        let locked: bool = e
            .storage()
            .persistent()
            .get(&DataKey::DepositLock(recipient.clone()))
            .unwrap_or(false);
        let from_depository = contract_in(&e, ContractSlot::Depository).as_ref() == Some(&from);
        if locked && from != recipient && !from_depository {
            return Err(ContractError::DepositsLocked);
        }

        let epoch = load_epoch(&e)?;
        let expiry = epoch
            .number
            .checked_add(Self::warmup_period(e.clone()))
            .ok_or(ContractError::Overflow)?;

        let this = e.current_contract_address();
        TokenClient::new(&e, &load_protocol_token(&e)?).transfer_from(&this, &from, &this, &amount);

        let previous = warmup_of(&e, &recipient).map(|w| w.deposit).unwrap_or(0);
        let info = WarmupInfo {
            deposit: previous.checked_add(amount).ok_or(ContractError::Overflow)?,
            deposit_epoch: epoch.number,
            expiry,
        };
        e.storage()
            .persistent()
            .set(&DataKey::Warmup(recipient.clone()), &info);
        adjust_total_warmup(&e, amount)?;

        events::emit_staked(&e, &recipient, &from, amount, expiry);
        Ok(info.deposit)
    }

    /// Convert `recipient`'s matured warmup into receipt balance at the
    /// current index. Returns the receipt amount credited.
    pub fn claim(e: Env, recipient: Address) -> Result<i128, ContractError> {
        let info = warmup_of(&e, &recipient).ok_or(ContractError::NoWarmupDeposit)?;
        if load_epoch(&e)?.number < info.expiry {
            return Err(ContractError::StillWarming);
        }

        e.storage()
            .persistent()
            .remove(&DataKey::Warmup(recipient.clone()));
        adjust_total_warmup(&e, -info.deposit)?;

        let mut ledger = load_ledger(&e)?;
        let gons = ledger.credit(positive_amount(info.deposit)?)?;
        let held = held_gons(&e, &recipient)
            .checked_add(gons)
            .ok_or(ContractError::Overflow)?;
        store_gons(&e, &recipient, held);
        store_ledger(&e, &ledger);

        events::emit_claimed(&e, &recipient, info.deposit, gons);
        Ok(info.deposit)
    }

    /// Withdraw a warmup entry, matured or not, without rewards.
    pub fn forfeit(e: Env, holder: Address) -> Result<i128, ContractError> {
        holder.require_auth();
        let info = warmup_of(&e, &holder).ok_or(ContractError::NoWarmupDeposit)?;
        e.storage()
            .persistent()
            .remove(&DataKey::Warmup(holder.clone()));
        adjust_total_warmup(&e, -info.deposit)?;

        let this = e.current_contract_address();
        TokenClient::new(&e, &load_protocol_token(&e)?).transfer(&this, &holder, &info.deposit);

        events::emit_forfeited(&e, &holder, info.deposit);
        Ok(info.deposit)
    }

    /// Refuse (or accept again) stakes that third parties send into the
    /// holder's warmup. Returns the new lock state.
    pub fn toggle_deposit_lock(e: Env, holder: Address) -> bool {
        holder.require_auth();
        let key = DataKey::DepositLock(holder.clone());
        let locked = !e.storage().persistent().get(&key).unwrap_or(false);
        e.storage().persistent().set(&key, &locked);
        events::emit_deposit_lock_toggled(&e, &holder, locked);
        locked
    }

    // ── Receipt balance ────────────────────────────────────────────────────

    /// Redeem `amount` of receipt balance for protocol tokens. With `trigger`
    /// a due rebase runs first, so the holder exits at the post-rebase index.
    pub fn unstake(
        e: Env,
        holder: Address,
        amount: i128,
        trigger: bool,
    ) -> Result<i128, ContractError> {
        holder.require_auth();
        let units = positive_amount(amount)?;
        if trigger {
            rebase_if_due(&e)?;
        }

        let mut ledger = load_ledger(&e)?;
        let gons = ledger.gons_for_balance(units)?;
        let held = held_gons(&e, &holder);
        if held < gons {
            return Err(ContractError::InsufficientStake);
        }
        store_gons(&e, &holder, held - gons);
        ledger.debit(gons)?;
        store_ledger(&e, &ledger);

        let this = e.current_contract_address();
        TokenClient::new(&e, &load_protocol_token(&e)?).transfer(&this, &holder, &amount);

        events::emit_unstaked(&e, &holder, amount, gons);
        Ok(amount)
    }

    pub fn transfer(e: Env, from: Address, to: Address, amount: i128) -> Result<(), ContractError> {
        from.require_auth();
        let ledger = load_ledger(&e)?;
        let gons = ledger.gons_for_balance(positive_amount(amount)?)?;
        let held = held_gons(&e, &from);
        if held < gons {
            return Err(ContractError::InsufficientStake);
        }
        store_gons(&e, &from, held - gons);
        let credited = held_gons(&e, &to)
            .checked_add(gons)
            .ok_or(ContractError::Overflow)?;
        store_gons(&e, &to, credited);
        Ok(())
    }

    // ── Rebase ─────────────────────────────────────────────────────────────

    /// Close the current epoch if its boundary has passed. Returns `false`
    /// (a no-op) when called too early.
    pub fn rebase(e: Env) -> Result<bool, ContractError> {
        rebase_if_due(&e)
    }

    // ── Queries ────────────────────────────────────────────────────────────

    pub fn epoch(e: Env) -> Result<Epoch, ContractError> {
        load_epoch(&e)
    }

    pub fn epoch_number(e: Env) -> Result<u32, ContractError> {
        Ok(load_epoch(&e)?.number)
    }

    /// Current index, 9 decimals.
    pub fn index(e: Env) -> Result<i128, ContractError> {
        to_i128(load_ledger(&e)?.index())
    }

    pub fn balance(e: Env, holder: Address) -> Result<i128, ContractError> {
        let ledger = load_ledger(&e)?;
        to_i128(ledger.balance_for_gons(held_gons(&e, &holder)))
    }

    pub fn gons_of(e: Env, holder: Address) -> u128 {
        held_gons(&e, &holder)
    }

    pub fn total_supply(e: Env) -> Result<i128, ContractError> {
        to_i128(load_ledger(&e)?.total_supply)
    }

    pub fn circulating_supply(e: Env) -> Result<i128, ContractError> {
        to_i128(load_ledger(&e)?.circulating())
    }

    pub fn warmup_info(e: Env, holder: Address) -> Option<WarmupInfo> {
        warmup_of(&e, &holder)
    }

    pub fn warmup_period(e: Env) -> u32 {
        e.storage()
            .instance()
            .get(&DataKey::WarmupPeriod)
            .unwrap_or(0)
    }

    pub fn total_warmup(e: Env) -> i128 {
        e.storage()
            .instance()
            .get(&DataKey::TotalWarmup)
            .unwrap_or(0)
    }

    /// Protocol tokens held by the pool.
    pub fn contract_balance(e: Env) -> Result<i128, ContractError> {
        let token = load_protocol_token(&e)?;
        Ok(TokenClient::new(&e, &token).balance(&e.current_contract_address()))
    }

    pub fn contract_for(e: Env, slot: ContractSlot) -> Option<Address> {
        contract_in(&e, slot)
    }

    pub fn version(e: Env) -> u32 {
        e.storage().instance().get(&DataKey::Version).unwrap_or(0)
    }
}
