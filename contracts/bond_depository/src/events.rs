use crate::types::BondTerms;
use soroban_sdk::{Address, Env, Symbol};

/// Emitted once, when the bond terms are set.
///
/// # Topics
/// * `Symbol` - "terms_initialized"
/// * `Address` - The manager
///
/// # Data
/// * `BondTerms` - The terms
/// * `i128` - Initial debt
pub fn emit_terms_initialized(e: &Env, manager: &Address, terms: &BondTerms, initial_debt: i128) {
    let topics = (Symbol::new(e, "terms_initialized"), manager.clone());
    e.events().publish(topics, (terms.clone(), initial_debt));
}

/// Emitted on every deposit.
///
/// # Topics
/// * `Symbol` - "bond_created"
/// * `Address` - The depositor
///
/// # Data
/// * `i128` - Principal deposited
/// * `i128` - Payout vesting to the depositor (net of fee)
/// * `u64` - Timestamp at which the merged bond is fully vested
/// * `i128` - Price paid
pub fn emit_bond_created(
    e: &Env,
    depositor: &Address,
    amount: i128,
    payout: i128,
    expires: u64,
    price: i128,
) {
    let topics = (Symbol::new(e, "bond_created"), depositor.clone());
    e.events().publish(topics, (amount, payout, expires, price));
}

/// Emitted on every redeem.
///
/// # Topics
/// * `Symbol` - "bond_redeemed"
/// * `Address` - The recipient
///
/// # Data
/// * `i128` - Amount paid out
/// * `i128` - Payout still vesting
/// * `bool` - Whether the payout was staked
pub fn emit_bond_redeemed(e: &Env, recipient: &Address, paid: i128, remaining: i128, staked: bool) {
    let topics = (Symbol::new(e, "bond_redeemed"), recipient.clone());
    e.events().publish(topics, (paid, remaining, staked));
}

/// Emitted after every deposit with the price the next depositor faces.
///
/// # Topics
/// * `Symbol` - "price_changed"
/// * `Address` - The principal asset
///
/// # Data
/// * `i128` - Bond price
/// * `i128` - Debt ratio
pub fn emit_price_changed(e: &Env, principal: &Address, price: i128, debt_ratio: i128) {
    let topics = (Symbol::new(e, "price_changed"), principal.clone());
    e.events().publish(topics, (price, debt_ratio));
}

pub fn emit_control_variable_adjusted(
    e: &Env,
    principal: &Address,
    initial: i128,
    adjusted: i128,
    increment: i128,
    add: bool,
) {
    let topics = (Symbol::new(e, "control_variable_adjusted"), principal.clone());
    e.events().publish(topics, (initial, adjusted, increment, add));
}

/// Emitted when the manager schedules a control-variable adjustment.
///
/// # Topics
/// * `Symbol` - "adjustment_set"
/// * `Address` - The manager
///
/// # Data
/// * `bool` - Direction (`true` = up)
/// * `i128` - Increment per step
/// * `i128` - Target
/// * `u64` - Buffer in seconds
pub fn emit_adjustment_set(
    e: &Env,
    manager: &Address,
    add: bool,
    increment: i128,
    target: i128,
    buffer: u64,
) {
    let topics = (Symbol::new(e, "adjustment_set"), manager.clone());
    e.events().publish(topics, (add, increment, target, buffer));
}
