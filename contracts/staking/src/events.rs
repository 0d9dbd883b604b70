use soroban_sdk::{Address, Env, Symbol};

/// Emitted when protocol tokens enter warmup.
///
/// # Topics
/// * `Symbol` - "staked"
/// * `Address` - The warmup recipient
///
/// # Data
/// * `Address` - Who paid the tokens in
/// * `i128` - Amount staked
/// * `u32` - Epoch at which the warmup can be claimed
pub fn emit_staked(e: &Env, recipient: &Address, from: &Address, amount: i128, expiry: u32) {
    let topics = (Symbol::new(e, "staked"), recipient.clone());
    e.events().publish(topics, (from.clone(), amount, expiry));
}

/// Emitted when a matured warmup is converted into receipt balance.
///
/// # Topics
/// * `Symbol` - "claimed"
/// * `Address` - The recipient
///
/// # Data
/// * `i128` - Receipt amount credited
/// * `u128` - Gons credited
pub fn emit_claimed(e: &Env, recipient: &Address, amount: i128, gons: u128) {
    let topics = (Symbol::new(e, "claimed"), recipient.clone());
    e.events().publish(topics, (amount, gons));
}

/// Emitted when a holder abandons their warmup and takes the deposit back.
///
/// # Topics
/// * `Symbol` - "forfeited"
/// * `Address` - The holder
///
/// # Data
/// * `i128` - Protocol tokens returned
pub fn emit_forfeited(e: &Env, holder: &Address, amount: i128) {
    let topics = (Symbol::new(e, "forfeited"), holder.clone());
    e.events().publish(topics, amount);
}

/// Emitted when receipt balance is redeemed for protocol tokens.
///
/// # Topics
/// * `Symbol` - "unstaked"
/// * `Address` - The holder
///
/// # Data
/// * `i128` - Protocol tokens paid out
/// * `u128` - Gons burned
pub fn emit_unstaked(e: &Env, holder: &Address, amount: i128, gons: u128) {
    let topics = (Symbol::new(e, "unstaked"), holder.clone());
    e.events().publish(topics, (amount, gons));
}

/// Emitted once per closed epoch.
///
/// # Topics
/// * `Symbol` - "rebased"
/// * `u32` - Number of the epoch that was closed
///
/// # Data
/// * `i128` - Profit distributed
/// * `u128` - Index after the rebase
/// * `u128` - Receipt total supply after the rebase
pub fn emit_rebased(e: &Env, epoch: u32, profit: i128, index: u128, total_supply: u128) {
    let topics = (Symbol::new(e, "rebased"), epoch);
    e.events().publish(topics, (profit, index, total_supply));
}

/// Emitted when a successor instance seeds its index from a snapshot.
///
/// # Topics
/// * `Symbol` - "index_seeded"
/// * `Address` - The manager
///
/// # Data
/// * `u128` - Seeded index
/// * `u32` - Snapshot version
/// * `u32` - Epoch number the instance resumes at
pub fn emit_index_seeded(e: &Env, manager: &Address, index: u128, version: u32, epoch: u32) {
    let topics = (Symbol::new(e, "index_seeded"), manager.clone());
    e.events().publish(topics, (index, version, epoch));
}

pub fn emit_deposit_lock_toggled(e: &Env, holder: &Address, locked: bool) {
    let topics = (Symbol::new(e, "deposit_lock_toggled"), holder.clone());
    e.events().publish(topics, locked);
}
