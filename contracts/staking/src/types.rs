use crate::epoch::Epoch;
use soroban_sdk::{contracttype, Address};

/// Collaborator slots configurable through `set_contract`.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContractSlot {
    /// Reward distributor polled on every rebase.
    Distributor,
    /// Bond depository; exempt from recipients' deposit locks.
    Depository,
}

/// Stake waiting out the warmup period. Does not earn rebases.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WarmupInfo {
    /// Protocol tokens deposited, in base units.
    pub deposit: i128,
    /// Epoch number of the most recent deposit.
    pub deposit_epoch: u32,
    /// First epoch number at which `claim` succeeds.
    pub expiry: u32,
}

/// Versioned state handed from a deprecated staking instance to its
/// successor.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MigrationSnapshot {
    /// Generation of the successor instance (the first deployment is 1).
    pub version: u32,
    /// Deprecated instance whose index the successor must continue.
    pub predecessor: Address,
    pub epoch: Epoch,
    pub warmup_period: u32,
    /// Per-epoch growth of the index, in millionths.
    pub reward_rate: u32,
    /// Index at `first_epoch`, 9 decimals.
    pub base_index: i128,
    pub first_epoch: u32,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
pub enum DataKey {
    /// Manager address.
    Manager,
    /// Protocol token held by the pool.
    ProtocolToken,
    /// Current `Epoch`.
    Epoch,
    /// `GonsLedger` of the receipt token.
    Ledger,
    /// Number of epochs a stake spends in warmup.
    WarmupPeriod,
    /// Deployment generation.
    Version,
    /// Sum of all warmup deposits.
    TotalWarmup,
    Contract(ContractSlot),
    /// Receipt balance of a holder, in gons.
    Gons(Address),
    /// Pending warmup stake of a recipient.
    Warmup(Address),
    /// Recipient refuses third-party stakes into its warmup.
    DepositLock(Address),
}
