use protocol_interfaces::DepositorKind;
use soroban_sdk::{contracttype, Address};

// ─── Approvals ─────────────────────────────────────────────────────────────

/// A queued approval change. The toggle may only enable the approval once
/// the ledger timestamp reaches `eta`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueuedApproval {
    pub kind: DepositorKind,
    pub who: Address,
    /// Ledger timestamp at which the change was queued.
    pub queued_at: u64,
    /// Earliest timestamp at which `toggle` may enable the approval.
    pub eta: u64,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
pub enum DataKey {
    /// Manager address (role holder for every restricted setter).
    Manager,
    /// Protocol token minted by the treasury (Stellar asset, treasury is admin).
    ProtocolToken,
    /// Seconds between `queue` and the earliest enabling `toggle`.
    QueueDelay,
    /// Protocol-token supply minted through the treasury.
    TotalSupply,
    /// Sum of deposited reserve value, in protocol-token base units.
    TotalReserves,
    /// Per-asset floor: asset base units backing one whole protocol token.
    Floor(Address),
    /// Approval flag per (kind, address).
    Approved(DepositorKind, Address),
    /// Pending queue entry per (kind, address).
    Queue(DepositorKind, Address),
    /// Bonding calculator for an approved liquidity token.
    Calculator(Address),
}
