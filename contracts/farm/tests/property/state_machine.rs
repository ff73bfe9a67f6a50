#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based state machine tests for the farm contract.
//!
//! Random sequences of user and owner actions are replayed against a live
//! contract over two pools.
//!
//! Invariants tested after every step:
//! - Σ `user_info(..).amount` over users equals the pool's `total_staked`
//! - `acc_reward_per_share` never decreases
//! - `pending_reward` equals what `harvest` pays at the same instant
//! - A second settlement at the same timestamp changes nothing

use farm::{UltraFarm, UltraFarmClient};
use proptest::prelude::*;
use proptest_derive::Arbitrary;
use referral::ReferralProgram;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{Address, Env, I256};

const UNIT: i128 = 1_000_000;
const USERS: usize = 3;
const POOLS: u32 = 2;

#[derive(Arbitrary, Clone, Debug)]
enum Action {
    Deposit { user: u8, pool: u8, amount: u8 },
    Withdraw { user: u8, pool: u8, amount: u8 },
    Harvest { user: u8, pool: u8 },
    Advance { seconds: u16 },
    SetRate { rate: u8, mass_update: bool },
    SetAlloc { pool: u8, alloc: u8, mass_update: bool },
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn setup() -> (Env, UltraFarmClient<'static>, Address, [Address; USERS]) {
    let env = Env::default();
    env.mock_all_auths();
    env.cost_estimate().budget().reset_unlimited();
    env.ledger().set_timestamp(1_000);

    let owner = Address::generate(&env);
    let reward_id = env
        .register_stellar_asset_contract_v2(owner.clone())
        .address();
    let stake_id = env
        .register_stellar_asset_contract_v2(owner.clone())
        .address();
    let users = [
        Address::generate(&env),
        Address::generate(&env),
        Address::generate(&env),
    ];
    for user in users.iter() {
        StellarAssetClient::new(&env, &reward_id).mint(user, &(1_000_000 * UNIT));
        StellarAssetClient::new(&env, &stake_id).mint(user, &(1_000_000 * UNIT));
    }

    let referral_id = env.register(ReferralProgram, ());
    let farm_id = env.register(UltraFarm, ());
    let client = UltraFarmClient::new(&env, &farm_id);
    client.initialize(
        &owner,
        &reward_id,
        &referral_id,
        &UNIT,
        &1_000,
        &1,
        &300,
        &Address::generate(&env),
    );
    StellarAssetClient::new(&env, &reward_id).set_admin(&farm_id);

    client.add_pool(&owner, &stake_id, &1, &100, &true);
    client.set_referral_percent(&owner, &400);
    client.set_lock_duration(&owner, &0);

    (env, client, owner, users)
}

fn check_invariants(
    client: &UltraFarmClient<'static>,
    users: &[Address; USERS],
    last_acc: &mut [I256],
) -> Result<(), TestCaseError> {
    for pool_id in 0..POOLS {
        let pool = client.pool_info(&pool_id);
        let staked: i128 = users
            .iter()
            .map(|u| client.user_info(&pool_id, u).amount)
            .sum();
        prop_assert_eq!(staked, pool.total_staked);
        prop_assert!(pool.acc_reward_per_share >= last_acc[pool_id as usize]);
        last_acc[pool_id as usize] = pool.acc_reward_per_share.clone();
    }
    Ok(())
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_random_actions_keep_ledger_consistent(
        actions in prop::collection::vec(any::<Action>(), 1..40),
    ) {
        let (env, client, owner, users) = setup();
        let mut last_acc = vec![I256::from_i32(&env, 0); POOLS as usize];

        for action in actions {
            match action {
                Action::Deposit { user, pool, amount } => {
                    let user = &users[user as usize % USERS];
                    let amount = (amount as i128 + 1) * UNIT;
                    client.deposit(user, &(pool as u32 % POOLS), &amount, &None);
                }
                Action::Withdraw { user, pool, amount } => {
                    let user = &users[user as usize % USERS];
                    let pool_id = pool as u32 % POOLS;
                    let staked = client.user_info(&pool_id, user).amount;
                    let amount = (amount as i128 * UNIT).min(staked);
                    client.withdraw(user, &pool_id, &amount, &None);
                }
                Action::Harvest { user, pool } => {
                    let user = &users[user as usize % USERS];
                    let pool_id = pool as u32 % POOLS;
                    let preview = client.pending_reward(&pool_id, user);
                    let paid = client.harvest(user, &pool_id, &None);
                    prop_assert_eq!(preview, paid);
                    prop_assert_eq!(client.pending_reward(&pool_id, user), 0);
                }
                Action::Advance { seconds } => {
                    let now = env.ledger().timestamp();
                    env.ledger().set_timestamp(now + seconds as u64);
                }
                Action::SetRate { rate, mass_update } => {
                    client.set_reward_per_second(&owner, &(rate as i128 * UNIT), &mass_update);
                }
                Action::SetAlloc { pool, alloc, mass_update } => {
                    client.set_pool_alloc_point(
                        &owner,
                        &(pool as u32 % POOLS),
                        &(alloc as u64),
                        &mass_update,
                    );
                }
            }
            check_invariants(&client, &users, &mut last_acc)?;
        }
    }

    /// Settling twice at one instant is the same as settling once.
    #[test]
    fn prop_settlement_idempotent(
        stake in 1u16..=u16::MAX,
        wait in 1u16..=u16::MAX,
    ) {
        let (env, client, owner, users) = setup();
        client.deposit(&users[0], &0, &(stake as i128 * UNIT), &None);
        env.ledger().set_timestamp(1_000 + wait as u64);

        client.set_reward_per_second(&owner, &UNIT, &true);
        let once = client.pool_info(&0);
        client.set_reward_per_second(&owner, &UNIT, &true);
        let twice = client.pool_info(&0);

        prop_assert_eq!(once, twice);
    }
}
