//! Full protocol wiring shared by the integration tests: treasury,
//! distributor, staking pool and a reserve bond depository.

#![allow(dead_code)]

use bond_depository::{BondDepository, BondDepositoryClient, BondTerms};
use distributor::{Distributor, DistributorClient};
use protocol_interfaces::DepositorKind;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env};
use staking::{ContractSlot, Staking, StakingClient};
use treasury::{Treasury, TreasuryClient};

pub const START: u64 = 1_000;
pub const EPOCH_LENGTH: u64 = 28_800;
pub const REWARD_RATE: u32 = 3_000;
pub const ONE: i128 = 1_000_000_000;
pub const FLOOR: i128 = 5_275_000_000;
pub const INITIAL_SUPPLY: i128 = 1_000_000 * ONE;
pub const DEPOSIT: i128 = 1_000 * ONE;
pub const NET_PAYOUT: i128 = 104_318_062_138;
/// Principal share sent to the tithe recipient, in millionths.
pub const TITHE: i128 = 500;

pub struct Protocol<'a> {
    pub env: &'a Env,
    pub manager: Address,
    pub treasury: TreasuryClient<'a>,
    pub distributor: DistributorClient<'a>,
    pub staking: StakingClient<'a>,
    pub depository: BondDepositoryClient<'a>,
    pub protocol: TokenClient<'a>,
    pub principal: TokenClient<'a>,
    pub tithe_recipient: Address,
    /// Holds the whole initial protocol-token supply.
    pub whale: Address,
}

pub fn terms() -> BondTerms {
    BondTerms {
        control_variable: 665,
        vesting_term: 33_110,
        minimum_price: 180_000,
        max_payout: 100,
        fee: 9_500,
        max_debt: INITIAL_SUPPLY,
        tithe: TITHE,
    }
}

pub fn deploy(env: &Env) -> Protocol<'_> {
    env.mock_all_auths();
    env.cost_estimate().budget().reset_unlimited();
    env.ledger().with_mut(|li| li.timestamp = START);

    let manager = Address::generate(env);
    let treasury_id = env.register(Treasury, ());
    let treasury = TreasuryClient::new(env, &treasury_id);
    let protocol = env
        .register_stellar_asset_contract_v2(treasury_id.clone())
        .address();
    let principal = env
        .register_stellar_asset_contract_v2(Address::generate(env))
        .address();
    treasury.initialize(&manager, &protocol, &0);

    let first_epoch_end = START + EPOCH_LENGTH;
    let distributor_id = env.register(Distributor, ());
    let distributor = DistributorClient::new(env, &distributor_id);
    distributor.initialize(&manager, &treasury_id, &EPOCH_LENGTH, &first_epoch_end);

    let staking_id = env.register(Staking, ());
    let staking = StakingClient::new(env, &staking_id);
    staking.initialize(&manager, &protocol, &EPOCH_LENGTH, &1, &first_epoch_end, &ONE);

    let depository_id = env.register(BondDepository, ());
    let depository = BondDepositoryClient::new(env, &depository_id);
    let tithe_recipient = Address::generate(env);
    depository.initialize(
        &manager,
        &protocol,
        &principal,
        &treasury_id,
        &Address::generate(env),
        &tithe_recipient,
        &None,
    );
    depository.initialize_bond_terms(&manager, &terms(), &0);

    let seeder = Address::generate(env);
    for (kind, who) in [
        (DepositorKind::RewardManager, &seeder),
        (DepositorKind::RewardManager, &distributor_id),
        (DepositorKind::ReserveToken, &principal),
        (DepositorKind::ReserveDepositor, &depository_id),
    ] {
        treasury.queue(&manager, &kind, who);
        treasury.toggle(&manager, &kind, who, &None);
    }
    treasury.set_floor(&manager, &principal, &FLOOR);
    let whale = Address::generate(env);
    treasury.mint_rewards(&seeder, &whale, &INITIAL_SUPPLY);

    distributor.add_recipient(&manager, &staking_id, &REWARD_RATE);
    staking.set_contract(&manager, &ContractSlot::Distributor, &distributor_id);
    staking.set_contract(&manager, &ContractSlot::Depository, &depository_id);
    depository.set_staking(&manager, &staking_id);

    Protocol {
        env,
        manager,
        treasury,
        distributor,
        staking,
        depository,
        protocol: TokenClient::new(env, &protocol),
        principal: TokenClient::new(env, &principal),
        tithe_recipient,
        whale,
    }
}

impl Protocol<'_> {
    /// A new depositor bonds `DEPOSIT` principal at the minimum price.
    pub fn bond(&self) -> Address {
        let depositor = Address::generate(self.env);
        StellarAssetClient::new(self.env, &self.principal.address).mint(&depositor, &DEPOSIT);
        let expiry = self.env.ledger().sequence().saturating_add(10_000);
        self.principal
            .approve(&depositor, &self.depository.address, &DEPOSIT, &expiry);
        self.depository.deposit(&depositor, &DEPOSIT, &300_000);
        depositor
    }

    pub fn advance(&self, seconds: u64) {
        self.env.ledger().with_mut(|li| li.timestamp += seconds);
    }

    /// Move the clock to the end of `staking`'s current epoch, unless it is
    /// already past it.
    pub fn to_epoch_end(&self, staking: &StakingClient<'_>) {
        let end = staking.epoch().end;
        self.env
            .ledger()
            .with_mut(|li| li.timestamp = li.timestamp.max(end));
    }
}
