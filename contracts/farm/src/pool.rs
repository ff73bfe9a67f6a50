use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, I256};

use crate::{accumulator, ContractError};

// ── Storage keys ─────────────────────────────────────────────────────────────

const POOL: Symbol = symbol_short!("POOL");
const POOL_TOKEN: Symbol = symbol_short!("POOL_TOK");
const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");
const REWARD_RATE: Symbol = symbol_short!("RWD_RATE");
const TOTAL_ALLOC: Symbol = symbol_short!("TOT_ALOC");
const START_TIME: Symbol = symbol_short!("START");

const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 1_036_800;

// ── Types ────────────────────────────────────────────────────────────────────

/// One staking pool. Pools are append-only; `id` is the pool's index.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub id: u32,
    pub stake_token: Address,
    pub alloc_point: u64,
    pub last_reward_time: u64,
    pub acc_reward_per_share: I256,
    pub total_staked: i128,
    pub fee_bps: u32,
}

/// The global emission parameters every pool is priced against.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Emission {
    pub reward_per_second: i128,
    pub total_alloc_point: u64,
}

impl Emission {
    pub fn load(env: &Env) -> Self {
        Emission {
            reward_per_second: env.storage().instance().get(&REWARD_RATE).unwrap_or(0),
            total_alloc_point: env.storage().instance().get(&TOTAL_ALLOC).unwrap_or(0),
        }
    }

    pub fn save(&self, env: &Env) {
        env.storage()
            .instance()
            .set(&REWARD_RATE, &self.reward_per_second);
        env.storage()
            .instance()
            .set(&TOTAL_ALLOC, &self.total_alloc_point);
    }
}

impl Pool {
    /// Accumulator value a settlement at `now` would produce, without
    /// writing anything. Views and settlement both go through here.
    pub fn projected_acc(
        &self,
        env: &Env,
        now: u64,
        emission: &Emission,
    ) -> Result<I256, ContractError> {
        if now <= self.last_reward_time || self.total_staked == 0 {
            return Ok(self.acc_reward_per_share.clone());
        }
        let elapsed = now.saturating_sub(self.last_reward_time);
        let reward = accumulator::pool_reward(
            elapsed,
            emission.reward_per_second,
            self.alloc_point,
            emission.total_alloc_point,
        )
        .ok_or(ContractError::MathOverflow)?;
        Ok(accumulator::advance(
            env,
            &self.acc_reward_per_share,
            reward,
            self.total_staked,
        ))
    }

    /// Price the interval `(last_reward_time, now]` into the accumulator.
    /// Calling twice at the same instant is a no-op.
    pub fn settle(
        &mut self,
        env: &Env,
        now: u64,
        emission: &Emission,
    ) -> Result<(), ContractError> {
        if now <= self.last_reward_time {
            return Ok(());
        }
        self.acc_reward_per_share = self.projected_acc(env, now, emission)?;
        self.last_reward_time = now;
        Ok(())
    }
}

// ── Registry ─────────────────────────────────────────────────────────────────

fn pool_key(id: u32) -> (Symbol, u32) {
    (POOL, id)
}

pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

pub fn start_time(env: &Env) -> u64 {
    env.storage().instance().get(&START_TIME).unwrap_or(0)
}

pub fn set_start_time(env: &Env, start: u64) {
    env.storage().instance().set(&START_TIME, &start);
}

pub fn load(env: &Env, id: u32) -> Result<Pool, ContractError> {
    let key = pool_key(id);
    let pool: Pool = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(ContractError::PoolNotFound)?;
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(pool)
}

pub fn save(env: &Env, pool: &Pool) {
    let key = pool_key(pool.id);
    env.storage().persistent().set(&key, pool);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Pool id backed by `token`, if any.
pub fn id_for_token(env: &Env, token: &Address) -> Option<u32> {
    env.storage().persistent().get(&(POOL_TOKEN, token.clone()))
}

/// Append a pool at the next index and index it by stake token.
pub fn push(
    env: &Env,
    stake_token: Address,
    alloc_point: u64,
    fee_bps: u32,
    last_reward_time: u64,
) -> Result<Pool, ContractError> {
    if id_for_token(env, &stake_token).is_some() {
        return Err(ContractError::DuplicatePool);
    }
    let id = count(env);
    let pool = Pool {
        id,
        stake_token: stake_token.clone(),
        alloc_point,
        last_reward_time,
        acc_reward_per_share: accumulator::zero(env),
        total_staked: 0,
        fee_bps,
    };
    save(env, &pool);

    let token_key = (POOL_TOKEN, stake_token);
    env.storage().persistent().set(&token_key, &id);
    env.storage()
        .persistent()
        .extend_ttl(&token_key, TTL_THRESHOLD, TTL_EXTEND_TO);

    let next = id.checked_add(1).ok_or(ContractError::MathOverflow)?;
    env.storage().instance().set(&POOL_COUNT, &next);
    Ok(pool)
}

/// Settle every pool at `now` against the current emission parameters.
pub fn settle_all(env: &Env, now: u64, emission: &Emission) -> Result<(), ContractError> {
    for id in 0..count(env) {
        let mut pool = load(env, id)?;
        pool.settle(env, now, emission)?;
        save(env, &pool);
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
