#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property tests for the pure reward arithmetic.
//!
//! Invariants tested:
//! - Emitted reward is never over-distributed, and truncation loss is bounded
//! - The accumulator never decreases
//! - `net + fee == gross` and the fee halves never exceed the fee

use farm::accumulator::{self, ACC_PRECISION};
use farm::payout::Payout;
use proptest::prelude::*;
use soroban_sdk::{Env, I256};

/// Reward paid to `amount` staked units from a fresh position at `acc`.
fn reward_of(env: &Env, amount: i128, acc: &I256) -> i128 {
    accumulator::pending(env, amount, acc, &accumulator::zero(env))
        .to_i128()
        .unwrap()
}

proptest! {
    /// A lone staker receives the whole emission, minus at most
    /// `amount / ACC_PRECISION + 1` units of truncation.
    #[test]
    fn prop_single_staker_gets_emission(
        elapsed in 1u64..=1_000_000,
        rate in 0i128..=100_000_000_000_000_000_000,
        amount in 1i128..=1_000_000_000_000_000_000_000_000,
    ) {
        let env = Env::default();
        let reward = accumulator::pool_reward(elapsed, rate, 1, 1).unwrap();
        let acc = accumulator::advance(&env, &accumulator::zero(&env), reward, amount);
        let paid = reward_of(&env, amount, &acc);

        prop_assert!(paid <= reward);
        prop_assert!(reward - paid <= amount / ACC_PRECISION + 1);
    }

    /// Two stakers together never receive more than was emitted.
    #[test]
    fn prop_two_stakers_conserve_emission(
        elapsed in 1u64..=1_000_000,
        rate in 1i128..=1_000_000_000_000_000_000,
        a in 1i128..=1_000_000_000_000_000_000_000,
        b in 1i128..=1_000_000_000_000_000_000_000,
    ) {
        let env = Env::default();
        let reward = accumulator::pool_reward(elapsed, rate, 1, 1).unwrap();
        let acc = accumulator::advance(&env, &accumulator::zero(&env), reward, a + b);
        let paid = reward_of(&env, a, &acc) + reward_of(&env, b, &acc);

        prop_assert!(paid <= reward);
        prop_assert!(reward - paid <= (a + b) / ACC_PRECISION + 2);
    }

    /// Folding any non-negative reward keeps the accumulator monotone.
    #[test]
    fn prop_accumulator_monotone(
        acc in 0i128..=1_000_000_000_000_000_000,
        reward in 0i128..=1_000_000_000_000_000_000_000_000,
        total in 0i128..=1_000_000_000_000_000_000_000,
    ) {
        let env = Env::default();
        let acc = I256::from_i128(&env, acc);
        prop_assert!(accumulator::advance(&env, &acc, reward, total) >= acc);
    }

    /// A dust staker followed by a large one: the large stake's debt can
    /// exceed `i128`, yet its pending reward stays exact.
    #[test]
    fn prop_debt_beyond_i128_settles_exactly(
        reward in 1i128..=100_000_000_000_000_000_000_000_000,
        dust in 1i128..=1_000,
        stake in 1i128..=1_000_000_000_000_000_000_000,
        later in 0i128..=1_000_000_000_000_000_000_000_000,
    ) {
        let env = Env::default();
        let acc = accumulator::advance(&env, &accumulator::zero(&env), reward, dust);
        let debt = accumulator::accrued(&env, stake, &acc);
        prop_assert_eq!(accumulator::pending(&env, stake, &acc, &debt), accumulator::zero(&env));

        let next = accumulator::advance(&env, &acc, later, dust + stake);
        let owed = accumulator::pending(&env, stake, &next, &debt).to_i128().unwrap();
        prop_assert!(owed <= later);
    }

    /// Splitting along the weight never emits more than the full rate.
    #[test]
    fn prop_pool_share_bounded_by_rate(
        elapsed in 0u64..=1_000_000,
        rate in 0i128..=1_000_000_000_000_000_000,
        alloc in 0u64..=1_000,
        extra in 0u64..=1_000,
    ) {
        let total = alloc + extra;
        let share = accumulator::pool_reward(elapsed, rate, alloc, total).unwrap();
        prop_assert!(share <= elapsed as i128 * rate);
        prop_assert!(share >= 0);
    }

    #[test]
    fn prop_split_conserves_gross(
        gross in 0i128..=1_000_000_000_000_000_000_000_000,
        fee_bps in 0u32..=10_000,
        referral_bps in 0u32..=10_000,
        exempt in any::<bool>(),
    ) {
        let p = Payout::split(gross, fee_bps, referral_bps, exempt).unwrap();

        prop_assert_eq!(p.net + p.fee, gross);
        prop_assert!(p.burned + p.treasury <= p.fee);
        prop_assert!(p.fee - (p.burned + p.treasury) <= 1);
        prop_assert!(p.referral_bonus <= gross);
        if exempt {
            prop_assert_eq!(p.net, gross);
            prop_assert_eq!(p.referral_bonus, 0);
        }
    }
}
