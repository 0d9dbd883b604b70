//! Bond Depository Contract
//!
//! Sells the protocol token against a single principal asset. The price is
//! driven by the debt ratio (protocol tokens still owed to bonders over
//! supply), payouts vest linearly, and the principal goes straight into the
//! treasury, which mints the payout against it.
//!
//! ## Key design decisions
//!
//! - **Lazy debt decay**: total debt decays linearly over one vesting term
//!   and every read realizes the decay first.
//! - **One bond per depositor**: a further deposit sets the vested part of
//!   the existing record aside as claimable and vests the rest together with
//!   the new payout over a full term.
//! - **Fee out of the payout**: the fee share of each payout goes to the fee
//!   recipient; the depositor vests the rest.
//! - **Tithe out of the principal**: a share of each deposit's principal
//!   goes to the tithe recipient; the treasury receives the rest.
//! - **Auto-stake**: a redeem can route the payout into the staking pool
//!   instead of the recipient's wallet.

#![no_std]

mod events;
mod ledger;
mod math;
mod pricing;
mod types;

pub use ledger::PERCENT_VESTED_PRECISION;
pub use pricing::{
    FEE_CAP, FEE_DENOMINATOR, MAX_PAYOUT_CAP, MAX_PAYOUT_DENOMINATOR, MIN_BOND_PAYOUT,
    MIN_VESTING_TERM, PRICE_PRECISION, TITHE_CAP, TITHE_DENOMINATOR,
};
pub use types::{Adjustment, BondInfo, BondParameter, BondTerms};
use types::DataKey;

use protocol_errors::ContractError;
use protocol_interfaces::{BondingCalculatorClient, StakingClient, TreasuryClient};
use soroban_sdk::token::TokenClient;
use soroban_sdk::{contract, contractimpl, Address, Env};

#[cfg(test)]
mod test_helpers;


/// Protocol-token base units per whole token.
const ONE_PROTOCOL_TOKEN: i128 = 1_000_000_000;

/// Principal amount used to quote the price in principal units.
const PRINCIPAL_SAMPLE: i128 = 1_000 * ONE_PROTOCOL_TOKEN;

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

fn address_at(e: &Env, key: &DataKey) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(key)
        .ok_or(ContractError::NotInitialized)
}

fn load_terms(e: &Env) -> Result<BondTerms, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Terms)
        .ok_or(ContractError::NotInitialized)
}

fn treasury(e: &Env) -> Result<TreasuryClient<'_>, ContractError> {
    Ok(TreasuryClient::new(e, &address_at(e, &DataKey::Treasury)?))
}

fn supply(e: &Env) -> Result<i128, ContractError> {
    Ok(treasury(e)?.total_supply())
}

/// Stored debt and the decay pending on it at `now`.
fn debt_and_decay(e: &Env, terms: &BondTerms) -> Result<(i128, i128), ContractError> {
    let debt: i128 = e
        .storage()
        .instance()
        .get(&DataKey::TotalDebt)
        .unwrap_or(0);
    let last: u64 = e
        .storage()
        .instance()
        .get(&DataKey::LastDecay)
        .unwrap_or(0);
    let elapsed = math::elapsed(e.ledger().timestamp(), last);
    let decay = pricing::debt_decay(debt, elapsed, terms.vesting_term)?;
    Ok((debt, decay))
}

/// Realize pending decay. Returns the decayed total debt.
fn decay_debt(e: &Env, terms: &BondTerms) -> Result<i128, ContractError> {
    let (debt, decay) = debt_and_decay(e, terms)?;
    let current = math::sub(debt, decay)?;
    e.storage().instance().set(&DataKey::TotalDebt, &current);
    e.storage()
        .instance()
        .set(&DataKey::LastDecay, &e.ledger().timestamp());
    Ok(current)
}

fn decayed_debt(e: &Env, terms: &BondTerms) -> Result<i128, ContractError> {
    let (debt, decay) = debt_and_decay(e, terms)?;
    math::sub(debt, decay)
}

fn price_at_debt(e: &Env, terms: &BondTerms, debt: i128) -> Result<(i128, i128), ContractError> {
    let ratio = pricing::debt_ratio(debt, supply(e)?)?;
    Ok((pricing::bond_price(terms, ratio)?, ratio))
}

/// Value `amount` of principal in protocol-token base units.
fn value_of(e: &Env, amount: i128) -> Result<i128, ContractError> {
    let principal = address_at(e, &DataKey::Principal)?;
    let calculator: Option<Address> = e.storage().instance().get(&DataKey::Calculator);
    match calculator {
        Some(calc) => Ok(BondingCalculatorClient::new(e, &calc).valuation(&principal, &amount)),
        None => Ok(treasury(e)?.value_of(&principal, &amount)),
    }
}

fn approve(e: &Env, token: &Address, spender: &Address, amount: i128) {
    let this = e.current_contract_address();
    let expiry = e.ledger().sequence().saturating_add(1);
    TokenClient::new(e, token).approve(&this, spender, &amount, &expiry);
}

/// Step the control variable if a scheduled adjustment is due.
fn adjust(e: &Env, terms: &mut BondTerms) -> Result<(), ContractError> {
    let Some(mut adjustment) = e
        .storage()
        .instance()
        .get::<_, Adjustment>(&DataKey::Adjustment)
    else {
        return Ok(());
    };
    let initial = terms.control_variable;
    let before = adjustment.clone();
    let moved = adjustment.apply(initial, e.ledger().timestamp())?;
    if adjustment != before {
        e.storage()
            .instance()
            .set(&DataKey::Adjustment, &adjustment);
    }
    if let Some(adjusted) = moved {
        terms.control_variable = adjusted;
        e.storage().instance().set(&DataKey::Terms, &*terms);
        events::emit_control_variable_adjusted(
            e,
            &address_at(e, &DataKey::Principal)?,
            initial,
            adjusted,
            adjustment.increment,
            adjustment.add,
        );
    }
    Ok(())
}

/// Pay `amount` protocol tokens to `recipient`, either directly or through
/// the staking pool.
fn stake_or_send(e: &Env, recipient: &Address, amount: i128, stake: bool) -> Result<(), ContractError> {
    let token = address_at(e, &DataKey::ProtocolToken)?;
    let this = e.current_contract_address();
    if !stake {
        TokenClient::new(e, &token).transfer(&this, recipient, &amount);
        return Ok(());
    }

    let staking_id: Address = e
        .storage()
        .instance()
        .get(&DataKey::Staking)
        .ok_or(ContractError::ContractNotSet)?;
    approve(e, &token, &staking_id, amount);
    let staking = StakingClient::new(e, &staking_id);
    staking.stake(&this, &amount, recipient);
    if staking.warmup_period() == 0 {
        staking.claim(recipient);
    }
    Ok(())
}

fn validate_terms(terms: &BondTerms) -> Result<(), ContractError> {
    let valid = terms.control_variable >= 0
        && terms.vesting_term >= MIN_VESTING_TERM
        && terms.minimum_price >= 0
        && terms.max_payout > 0
        && terms.max_payout <= MAX_PAYOUT_CAP
        && terms.fee >= 0
        && terms.fee <= FEE_CAP
        && terms.tithe >= 0
        && terms.tithe <= TITHE_CAP
        && terms.max_debt > 0;
    if !valid {
        return Err(ContractError::InvalidTerms);
    }
    Ok(())
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct BondDepository;

#[contractimpl]
impl BondDepository {
    // ── Setup ──────────────────────────────────────────────────────────────

    /// One-time wiring. Pass `bond_calculator` for a liquidity bond; reserve
    /// bonds are valued by the treasury.
    pub fn initialize(
        e: Env,
        manager: Address,
        protocol_token: Address,
        principal: Address,
        treasury: Address,
        fee_recipient: Address,
        tithe_recipient: Address,
        bond_calculator: Option<Address>,
    ) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Manager) {
            return Err(ContractError::AlreadyInitialized);
        }
        manager.require_auth();
        let store = e.storage().instance();
        store.set(&DataKey::Manager, &manager);
        store.set(&DataKey::ProtocolToken, &protocol_token);
        store.set(&DataKey::Principal, &principal);
        store.set(&DataKey::Treasury, &treasury);
        store.set(&DataKey::FeeRecipient, &fee_recipient);
        store.set(&DataKey::TitheRecipient, &tithe_recipient);
        if let Some(calc) = bond_calculator {
            store.set(&DataKey::Calculator, &calc);
        }
        Ok(())
    }

    pub fn initialize_bond_terms(
        e: Env,
        manager: Address,
        terms: BondTerms,
        initial_debt: i128,
    ) -> Result<(), ContractError> {
        require_manager(&e, &manager)?;
        if e.storage().instance().has(&DataKey::Terms) {
            return Err(ContractError::AlreadyInitialized);
        }
        validate_terms(&terms)?;
        if initial_debt < 0 {
            return Err(ContractError::InvalidTerms);
        }
        e.storage().instance().set(&DataKey::Terms, &terms);
        e.storage()
            .instance()
            .set(&DataKey::TotalDebt, &initial_debt);
        e.storage()
            .instance()
            .set(&DataKey::LastDecay, &e.ledger().timestamp());
        events::emit_terms_initialized(&e, &manager, &terms, initial_debt);
        Ok(())
    }

    /// Change one term after initialization, within the same bounds.
    pub fn set_bond_term(
        e: Env,
        manager: Address,
        parameter: BondParameter,
        value: i128,
    ) -> Result<(), ContractError> {
        require_manager(&e, &manager)?;
        let mut terms = load_terms(&e)?;
        match parameter {
            BondParameter::Vesting => {
                terms.vesting_term = u64::try_from(value).map_err(|_| ContractError::InvalidTerms)?
            }
            BondParameter::Payout => terms.max_payout = value,
            BondParameter::Fee => terms.fee = value,
            BondParameter::Debt => terms.max_debt = value,
            BondParameter::Tithe => terms.tithe = value,
        }
        validate_terms(&terms)?;
        e.storage().instance().set(&DataKey::Terms, &terms);
        Ok(())
    }

    /// Schedule the control variable to move by `increment` every `buffer`
    /// seconds until it reaches `target`. `add` must point from the current
    /// control variable toward `target`.
    pub fn set_adjustment(
        e: Env,
        manager: Address,
        add: bool,
        increment: i128,
        target: i128,
        buffer: u64,
    ) -> Result<(), ContractError> {
        require_manager(&e, &manager)?;
        let terms = load_terms(&e)?;
        if increment <= 0
            || increment > pricing::max_adjustment(terms.control_variable)?
            || target < 0
            || !Adjustment::points_toward(add, terms.control_variable, target)
        {
            return Err(ContractError::InvalidAdjustment);
        }
        let adjustment = Adjustment {
            active: true,
            add,
            increment,
            target,
            buffer,
            last_time: e.ledger().timestamp(),
        };
        e.storage()
            .instance()
            .set(&DataKey::Adjustment, &adjustment);
        events::emit_adjustment_set(&e, &manager, add, increment, target, buffer);
        Ok(())
    }

    pub fn set_staking(e: Env, manager: Address, staking: Address) -> Result<(), ContractError> {
        require_manager(&e, &manager)?;
        e.storage().instance().set(&DataKey::Staking, &staking);
        Ok(())
    }

    // ── Bonding ────────────────────────────────────────────────────────────

    /// Bond `amount` of principal at no more than `max_price`.
    ///
    /// The depositor must have approved the depository for `amount`.
    /// Returns the payout vesting to the depositor, net of fee.
    pub fn deposit(
        e: Env,
        depositor: Address,
        amount: i128,
        max_price: i128,
    ) -> Result<i128, ContractError> {
        depositor.require_auth();
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let mut terms = load_terms(&e)?;
        let total_debt = decay_debt(&e, &terms)?;

        let (price, _) = price_at_debt(&e, &terms, total_debt)?;
        if price > max_price {
            return Err(ContractError::SlippageExceeded);
        }

        let value = value_of(&e, amount)?;
        let payout = pricing::payout_for(value, price)?;
        if payout < MIN_BOND_PAYOUT {
            return Err(ContractError::BondTooSmall);
        }
        if payout > pricing::max_payout(&terms, supply(&e)?)? {
            return Err(ContractError::MaxPayoutExceeded);
        }
        let fee = pricing::fee_for(&terms, payout)?;
        let new_debt = math::add(total_debt, value)?;
        if new_debt > terms.max_debt {
            return Err(ContractError::MaxDebtExceeded);
        }

        // Principal moves depositor -> depository -> treasury, less the
        // tithe; the treasury mints the full payout back to the depository.
        let this = e.current_contract_address();
        let principal = address_at(&e, &DataKey::Principal)?;
        let treasury_id = address_at(&e, &DataKey::Treasury)?;
        let principal_token = TokenClient::new(&e, &principal);
        principal_token.transfer_from(&this, &depositor, &this, &amount);
        let tithe = pricing::tithe_for(&terms, amount)?;
        if tithe > 0 {
            let tithe_recipient = address_at(&e, &DataKey::TitheRecipient)?;
            principal_token.transfer(&this, &tithe_recipient, &tithe);
        }
        let reserves = math::sub(amount, tithe)?;
        approve(&e, &principal, &treasury_id, reserves);
        TreasuryClient::new(&e, &treasury_id).deposit(&this, &principal, &reserves, &payout);
        if fee > 0 {
            let token = address_at(&e, &DataKey::ProtocolToken)?;
            let fee_recipient = address_at(&e, &DataKey::FeeRecipient)?;
            TokenClient::new(&e, &token).transfer(&this, &fee_recipient, &fee);
        }

        e.storage().instance().set(&DataKey::TotalDebt, &new_debt);

        let net = math::sub(payout, fee)?;
        let now = e.ledger().timestamp();
        let key = DataKey::Bond(depositor.clone());
        let existing: Option<BondInfo> = e.storage().persistent().get(&key);
        let bond = ledger::record_deposit(existing, net, terms.vesting_term, price, now)?;
        e.storage().persistent().set(&key, &bond);

        events::emit_bond_created(&e, &depositor, amount, net, now.saturating_add(bond.vesting), price);
        let (next_price, ratio) = price_at_debt(&e, &terms, new_debt)?;
        events::emit_price_changed(&e, &principal, next_price, ratio);

        adjust(&e, &mut terms)?;
        Ok(net)
    }

    /// Redeem the vested part of `recipient`'s bond, optionally staking it.
    /// Returns the amount paid; 0 leaves the bond untouched.
    pub fn redeem(e: Env, recipient: Address, stake: bool) -> Result<i128, ContractError> {
        recipient.require_auth();
        let key = DataKey::Bond(recipient.clone());
        let bond: BondInfo = e
            .storage()
            .persistent()
            .get(&key)
            .ok_or(ContractError::NoActiveBond)?;

        let redemption = ledger::redeem(&bond, e.ledger().timestamp())?;
        if redemption.paid == 0 {
            return Ok(0);
        }
        let remaining = match &redemption.remaining {
            Some(rest) => {
                e.storage().persistent().set(&key, rest);
                rest.payout
            }
            None => {
                e.storage().persistent().remove(&key);
                0
            }
        };

        stake_or_send(&e, &recipient, redemption.paid, stake)?;
        events::emit_bond_redeemed(&e, &recipient, redemption.paid, remaining, stake);
        Ok(redemption.paid)
    }

    // ── Queries ────────────────────────────────────────────────────────────

    /// Price the next depositor pays, in `PRICE_PRECISION`.
    pub fn bond_price(e: Env) -> Result<i128, ContractError> {
        let terms = load_terms(&e)?;
        let debt = decayed_debt(&e, &terms)?;
        Ok(price_at_debt(&e, &terms, debt)?.0)
    }

    /// Principal base units paid per whole protocol token at the current
    /// price.
    pub fn bond_price_in_principal(e: Env) -> Result<i128, ContractError> {
        let price = Self::bond_price(e.clone())?;
        let value_per_token = math::mul_div(price, ONE_PROTOCOL_TOKEN, PRICE_PRECISION)?;
        let sample_value = value_of(&e, PRINCIPAL_SAMPLE)?;
        math::mul_div(value_per_token, PRINCIPAL_SAMPLE, sample_value)
    }

    pub fn max_payout(e: Env) -> Result<i128, ContractError> {
        pricing::max_payout(&load_terms(&e)?, supply(&e)?)
    }

    /// Gross payout (fee included) for principal worth `value`.
    pub fn payout_for(e: Env, value: i128) -> Result<i128, ContractError> {
        pricing::payout_for(value, Self::bond_price(e)?)
    }

    pub fn debt_ratio(e: Env) -> Result<i128, ContractError> {
        let terms = load_terms(&e)?;
        pricing::debt_ratio(decayed_debt(&e, &terms)?, supply(&e)?)
    }

    /// Total debt with pending decay applied.
    pub fn current_debt(e: Env) -> Result<i128, ContractError> {
        decayed_debt(&e, &load_terms(&e)?)
    }

    /// Same as `current_debt`.
    pub fn total_debt(e: Env) -> Result<i128, ContractError> {
        Self::current_debt(e)
    }

    /// Decay accrued since it was last realized.
    pub fn debt_decay(e: Env) -> Result<i128, ContractError> {
        Ok(debt_and_decay(&e, &load_terms(&e)?)?.1)
    }

    pub fn percent_vested_for(e: Env, depositor: Address) -> i128 {
        Self::bond_info(e.clone(), depositor)
            .map(|bond| ledger::percent_vested(&bond, e.ledger().timestamp()))
            .unwrap_or(0)
    }

    pub fn pending_payout_for(e: Env, depositor: Address) -> Result<i128, ContractError> {
        match Self::bond_info(e.clone(), depositor) {
            Some(bond) => ledger::pending_payout(&bond, e.ledger().timestamp()),
            None => Ok(0),
        }
    }

    pub fn bond_info(e: Env, depositor: Address) -> Option<BondInfo> {
        e.storage().persistent().get(&DataKey::Bond(depositor))
    }

    pub fn terms(e: Env) -> Result<BondTerms, ContractError> {
        load_terms(&e)
    }

    pub fn adjustment(e: Env) -> Option<Adjustment> {
        e.storage().instance().get(&DataKey::Adjustment)
    }

    pub fn staking(e: Env) -> Option<Address> {
        e.storage().instance().get(&DataKey::Staking)
    }
}
