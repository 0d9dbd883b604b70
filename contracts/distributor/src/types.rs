use soroban_sdk::{contracttype, Address};

/// A reward recipient and its per-epoch reward rate.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecipientInfo {
    pub recipient: Address,
    /// Reward per epoch as a fraction of protocol-token supply, in
    /// millionths (`RATE_DENOMINATOR`).
    pub rate: u32,
    /// Earliest ledger timestamp at which the recipient can be paid again.
    pub next_epoch_time: u64,
}

#[contracttype]
pub enum DataKey {
    /// Manager address.
    Manager,
    /// Treasury that mints the rewards.
    Treasury,
    /// Seconds between two distributions to the same recipient.
    EpochLength,
    /// Timestamp of the first distribution for newly added recipients.
    FirstEpochTime,
    /// Ordered list of `RecipientInfo`.
    Recipients,
}
