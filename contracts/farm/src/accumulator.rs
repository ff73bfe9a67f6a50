use soroban_sdk::{Env, I256};

/// Fixed-point scaling factor for `acc_reward_per_share`.
///
/// Per-share values are multiplied by this constant before storage so that
/// sub-unit reward per staked unit survives integer division.
pub const ACC_PRECISION: i128 = 1_000_000_000_000;

// ── Core reward engine ──────────────────────────────────────────────────────
//
// The accumulator and every `amount × acc` product live in 256 bits. A dust
// stake can push `acc` far past what `amount × acc` tolerates in `i128`, and
// a long idle interval does the same to `reward × ACC_PRECISION`. Only the
// final per-user reward is narrowed back to `i128`.

pub fn zero(env: &Env) -> I256 {
    I256::from_i32(env, 0)
}

fn precision(env: &Env) -> I256 {
    I256::from_i128(env, ACC_PRECISION)
}

/// Reward emitted to one pool over `elapsed` seconds.
///
/// ```text
/// reward = elapsed × reward_per_second × alloc_point / total_alloc_point
/// ```
///
/// A zero `total_alloc_point` means no pool carries weight, so nothing is
/// emitted. Returns `None` on overflow.
pub fn pool_reward(
    elapsed: u64,
    reward_per_second: i128,
    alloc_point: u64,
    total_alloc_point: u64,
) -> Option<i128> {
    if total_alloc_point == 0 || elapsed == 0 {
        return Some(0);
    }
    (elapsed as i128)
        .checked_mul(reward_per_second)?
        .checked_mul(alloc_point as i128)?
        .checked_div(total_alloc_point as i128)
}

/// Fold `reward` into the per-share accumulator.
///
/// ```text
/// acc' = acc + reward × ACC_PRECISION / total_staked
/// ```
///
/// With nothing staked the accumulator is returned unchanged: the interval
/// is simply skipped rather than divided by zero.
pub fn advance(env: &Env, acc: &I256, reward: i128, total_staked: i128) -> I256 {
    if total_staked <= 0 {
        return acc.clone();
    }
    let delta = I256::from_i128(env, reward)
        .mul(&precision(env))
        .div(&I256::from_i128(env, total_staked));
    acc.add(&delta)
}

/// Reward attributable to `amount` staked units at accumulator value `acc`.
/// This is also the `reward_debt` snapshot taken after every interaction.
pub fn accrued(env: &Env, amount: i128, acc: &I256) -> I256 {
    I256::from_i128(env, amount).mul(acc).div(&precision(env))
}

/// Reward earned since the position's last snapshot.
///
/// ```text
/// pending = amount × acc / ACC_PRECISION − reward_debt
/// ```
///
/// The result is signed. A negative value means the position was mutated
/// without settling first; callers reject it.
pub fn pending(env: &Env, amount: i128, acc: &I256, reward_debt: &I256) -> I256 {
    accrued(env, amount, acc).sub(reward_debt)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
