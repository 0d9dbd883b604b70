use protocol_interfaces::DepositorKind;
use soroban_sdk::{Address, Env, Symbol};

/// Emitted when reserves are deposited and protocol tokens minted against them.
///
/// # Topics
/// * `Symbol` - "reserves_deposited"
/// * `Address` - The depositor contract
///
/// # Data
/// * `Address` - The reserve asset
/// * `i128` - Asset amount deposited
/// * `i128` - Value of the deposit in protocol-token units
/// * `i128` - Protocol tokens minted to the depositor
pub fn emit_reserves_deposited(
    e: &Env,
    depositor: &Address,
    asset: &Address,
    amount: i128,
    value: i128,
    minted: i128,
) {
    let topics = (Symbol::new(e, "reserves_deposited"), depositor.clone());
    e.events().publish(topics, (asset.clone(), amount, value, minted));
}

/// Emitted when an approved reward manager mints rewards.
///
/// # Topics
/// * `Symbol` - "rewards_minted"
/// * `Address` - The reward manager
///
/// # Data
/// * `Address` - Recipient of the rewards
/// * `i128` - Amount minted
pub fn emit_rewards_minted(e: &Env, caller: &Address, recipient: &Address, amount: i128) {
    let topics = (Symbol::new(e, "rewards_minted"), caller.clone());
    e.events().publish(topics, (recipient.clone(), amount));
}

pub fn emit_depositor_queued(e: &Env, kind: DepositorKind, who: &Address, eta: u64) {
    let topics = (Symbol::new(e, "depositor_queued"), who.clone());
    e.events().publish(topics, (kind, eta));
}

pub fn emit_depositor_toggled(e: &Env, kind: DepositorKind, who: &Address, approved: bool) {
    let topics = (Symbol::new(e, "depositor_toggled"), who.clone());
    e.events().publish(topics, (kind, approved));
}

pub fn emit_floor_set(e: &Env, asset: &Address, floor: i128) {
    let topics = (Symbol::new(e, "floor_set"), asset.clone());
    e.events().publish(topics, floor);
}
