#![no_main]

use arbitrary::Arbitrary;
use farm::{UltraFarm, UltraFarmClient};
use libfuzzer_sys::fuzz_target;
use referral::ReferralProgram;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { user: u8, amount: u64 },
    Withdraw { user: u8, amount: u64 },
    Harvest { user: u8 },
    Advance { seconds: u32 },
    SetRate { rate: u64 },
    SetAlloc { alloc: u32 },
    SetFee { bps: u16 },
    ClaimReferral { user: u8 },
    SweepProtocol,
    GetFees,
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.cost_estimate().budget().reset_unlimited();

    let owner = Address::generate(&env);
    let reward = env
        .register_stellar_asset_contract_v2(owner.clone())
        .address();
    let mut users = vec![];
    for _ in 0..4 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &reward).mint(&user, &i64::MAX.into());
        users.push(user);
    }

    let referral_id = env.register(ReferralProgram, ());
    let contract_id = env.register(UltraFarm, ());
    let client = UltraFarmClient::new(&env, &contract_id);
    client.initialize(
        &owner,
        &reward,
        &referral_id,
        &1_000,
        &0,
        &1,
        &300,
        &Address::generate(&env),
    );
    StellarAssetClient::new(&env, &reward).set_admin(&contract_id);
    let _ = client.try_set_referral_percent(&owner, &400);

    // Errors are expected; host panics and ledger drift are not.
    for action in actions.into_iter() {
        match action {
            FuzzAction::Deposit { user, amount } => {
                let user = &users[user as usize % users.len()];
                let _ = client.try_deposit(user, &0, &(amount as i128), &None);
            }
            FuzzAction::Withdraw { user, amount } => {
                let user = &users[user as usize % users.len()];
                let _ = client.try_withdraw(user, &0, &(amount as i128), &None);
            }
            FuzzAction::Harvest { user } => {
                let user = &users[user as usize % users.len()];
                let _ = client.try_harvest(user, &0, &None);
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now.saturating_add(seconds as u64));
            }
            FuzzAction::SetRate { rate } => {
                let _ = client.try_set_reward_per_second(&owner, &(rate as i128), &true);
            }
            FuzzAction::SetAlloc { alloc } => {
                let _ = client.try_set_pool_alloc_point(&owner, &0, &(alloc as u64), &true);
            }
            FuzzAction::SetFee { bps } => {
                let _ = client.try_set_pool_fee_percentage(&owner, &0, &(bps as u32));
            }
            FuzzAction::ClaimReferral { user } => {
                let user = &users[user as usize % users.len()];
                let _ = client.try_get_referral_reward(user);
            }
            FuzzAction::SweepProtocol => {
                let _ = client.try_get_referral_reward_for(&owner, &None);
            }
            FuzzAction::GetFees => {
                let _ = client.try_get_fees(&owner);
            }
        }

        let pool = client.pool_info(&0);
        let staked: i128 = users
            .iter()
            .map(|u| client.user_info(&0, u).amount)
            .sum();
        assert_eq!(staked, pool.total_staked);
    }
});
