use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, I256};

use crate::{accumulator, ContractError};

const POSITION: Symbol = symbol_short!("POS");

const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 1_036_800;

/// A user's stake in one pool. Absent entries read as the zero position.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserPosition {
    pub amount: i128,
    pub reward_debt: I256,
    pub last_action_time: u64,
}

impl UserPosition {
    pub fn zero(env: &Env) -> Self {
        UserPosition {
            amount: 0,
            reward_debt: accumulator::zero(env),
            last_action_time: 0,
        }
    }

    /// First instant at which withdraw and harvest are allowed again.
    pub fn unlock_time(&self, lock_duration: u64) -> u64 {
        self.last_action_time.saturating_add(lock_duration)
    }

    pub fn is_locked(&self, now: u64, lock_duration: u64) -> bool {
        now < self.unlock_time(lock_duration)
    }

    /// Gross reward owed at accumulator value `acc`.
    pub fn pending(&self, env: &Env, acc: &I256) -> Result<i128, ContractError> {
        let pending = accumulator::pending(env, self.amount, acc, &self.reward_debt);
        if pending < accumulator::zero(env) {
            return Err(ContractError::NegativePending);
        }
        pending.to_i128().ok_or(ContractError::MathOverflow)
    }

    /// Snapshot the debt against `acc` and restart the lock at `anchor`.
    pub fn checkpoint(&mut self, env: &Env, acc: &I256, anchor: u64) {
        self.reward_debt = accumulator::accrued(env, self.amount, acc);
        self.last_action_time = anchor;
    }
}

fn position_key(pool_id: u32, user: &Address) -> (Symbol, u32, Address) {
    (POSITION, pool_id, user.clone())
}

pub fn load(env: &Env, pool_id: u32, user: &Address) -> UserPosition {
    let key = position_key(pool_id, user);
    match env.storage().persistent().get::<_, UserPosition>(&key) {
        Some(position) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
            position
        }
        None => UserPosition::zero(env),
    }
}

pub fn save(env: &Env, pool_id: u32, user: &Address, position: &UserPosition) {
    let key = position_key(pool_id, user);
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
