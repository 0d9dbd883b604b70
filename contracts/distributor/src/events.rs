use soroban_sdk::{Address, Env, Symbol};

/// Emitted when a recipient is added.
///
/// # Topics
/// * `Symbol` - "recipient_added"
/// * `Address` - The recipient
///
/// # Data
/// * `u32` - Reward rate in millionths of supply
pub fn emit_recipient_added(e: &Env, recipient: &Address, rate: u32) {
    let topics = (Symbol::new(e, "recipient_added"), recipient.clone());
    e.events().publish(topics, rate);
}

pub fn emit_recipient_removed(e: &Env, recipient: &Address) {
    let topics = (Symbol::new(e, "recipient_removed"), recipient.clone());
    e.events().publish(topics, ());
}

/// Emitted when one recipient is swapped for another in a single step.
///
/// # Topics
/// * `Symbol` - "recipient_replaced"
/// * `Address` - The new recipient
///
/// # Data
/// * `Address` - The replaced recipient
/// * `u32` - Reward rate of the new recipient
/// * `u64` - Next distribution time carried over from the replaced recipient
pub fn emit_recipient_replaced(
    e: &Env,
    old: &Address,
    new: &Address,
    rate: u32,
    next_epoch_time: u64,
) {
    let topics = (Symbol::new(e, "recipient_replaced"), new.clone());
    e.events().publish(topics, (old.clone(), rate, next_epoch_time));
}

/// Emitted on every paid distribution.
///
/// # Topics
/// * `Symbol` - "distributed"
/// * `Address` - The recipient
///
/// # Data
/// * `i128` - Amount minted
/// * `u64` - Next distribution time
pub fn emit_distributed(e: &Env, recipient: &Address, amount: i128, next_epoch_time: u64) {
    let topics = (Symbol::new(e, "distributed"), recipient.clone());
    e.events().publish(topics, (amount, next_epoch_time));
}
