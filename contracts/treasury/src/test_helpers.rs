//! Shared test helpers for treasury tests.

#![cfg(test)]

use crate::{Treasury, TreasuryClient};
use protocol_interfaces::DepositorKind;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env};

/// Seconds between `queue` and the enabling `toggle`.
pub const QUEUE_DELAY: u64 = 3_600;

/// Default principal mint for depositors.
pub const DEFAULT_MINT: i128 = 100_000_000_000_000_000;

/// Deploys the treasury and a protocol token administered by it.
/// Returns `(client, manager, protocol_token, treasury_id)`.
pub fn setup(e: &Env) -> (TreasuryClient<'_>, Address, Address, Address) {
    e.mock_all_auths();

    let treasury_id = e.register(Treasury, ());
    let client = TreasuryClient::new(e, &treasury_id);
    let manager = Address::generate(e);

    let protocol_token = e
        .register_stellar_asset_contract_v2(treasury_id.clone())
        .address();

    client.initialize(&manager, &protocol_token, &QUEUE_DELAY);

    (client, manager, protocol_token, treasury_id)
}

/// Queue, wait out the delay, and toggle an approval on.
pub fn approve(
    e: &Env,
    client: &TreasuryClient<'_>,
    manager: &Address,
    kind: DepositorKind,
    who: &Address,
    calculator: Option<Address>,
) {
    client.queue(manager, &kind, who);
    e.ledger().with_mut(|li| li.timestamp += QUEUE_DELAY);
    assert!(client.toggle(manager, &kind, who, &calculator));
}

/// Registers a principal asset and mints `amount` of it to `holder`,
/// approving `spender` for the full amount.
pub fn principal_with_balance(
    e: &Env,
    holder: &Address,
    spender: &Address,
    amount: i128,
) -> Address {
    let issuer = Address::generate(e);
    let asset = e.register_stellar_asset_contract_v2(issuer).address();
    StellarAssetClient::new(e, &asset).mint(holder, &amount);
    let expiry = e.ledger().sequence().saturating_add(10_000);
    TokenClient::new(e, &asset).approve(holder, spender, &amount, &expiry);
    asset
}
