#![no_std]

pub mod accumulator;
pub mod events;
pub mod payout;
pub mod pool;
pub mod position;
pub mod referral;

use common::{ownable, validate_bps, SECONDS_PER_DAY};
use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env, Symbol, Vec};

use payout::Payout;
use pool::{Emission, Pool};
use position::UserPosition;
use referral::ReferralBucket;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const LOCK_DURATION: Symbol = symbol_short!("LOCK_DUR");
const MIN_REFERRAL: Symbol = symbol_short!("REF_MIN");
const REFERRAL_AWAIT: Symbol = symbol_short!("REF_WAIT");

// ── Contract errors ──────────────────────────────────────────────────────────

/// Failure reasons. Codes are grouped by class and never reused.
///
/// | Range | Class         |
/// |-------|---------------|
/// | 1–9   | Lifecycle/auth|
/// | 10–19 | Validation    |
/// | 20–29 | State gates   |
/// | 30–39 | Arithmetic    |
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    PoolNotFound = 10,
    InvalidAmount = 11,
    InsufficientStake = 12,
    InvalidBasisPoints = 13,
    DuplicatePool = 14,
    Locked = 20,
    TooEarly = 21,
    BelowThreshold = 22,
    MathOverflow = 30,
    NegativePending = 31,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct UltraFarm;

#[contractimpl]
impl UltraFarm {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the farm and create pool 0, which stakes the reward token.
    ///
    /// * `reward_token`     – SAC the farm mints rewards from; the farm must
    ///                        be its admin before the first payout.
    /// * `referral_program` – contract implementing `ReferralDirectory`.
    /// * `start_time`       – ledger time at which emission begins.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        owner: Address,
        reward_token: Address,
        referral_program: Address,
        reward_per_second: i128,
        start_time: u64,
        first_pool_alloc_point: u64,
        first_pool_fee_bps: u32,
        burn_address: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if reward_per_second < 0 {
            return Err(ContractError::InvalidAmount);
        }
        if !validate_bps(first_pool_fee_bps) {
            return Err(ContractError::InvalidBasisPoints);
        }

        ownable::set_owner(&env, &owner);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage()
            .instance()
            .set(&LOCK_DURATION, &SECONDS_PER_DAY);
        payout::set_reward_token(&env, &reward_token);
        payout::set_burn_address(&env, &burn_address);
        referral::set_program(&env, &referral_program);
        pool::set_start_time(&env, start_time);

        let first_reward_time = env.ledger().timestamp().max(start_time);
        pool::push(
            &env,
            reward_token.clone(),
            first_pool_alloc_point,
            first_pool_fee_bps,
            first_reward_time,
        )?;
        Emission {
            reward_per_second,
            total_alloc_point: first_pool_alloc_point,
        }
        .save(&env);

        events::publish_initialized(
            &env,
            owner,
            reward_token.clone(),
            referral_program,
            reward_per_second,
            start_time,
        );
        events::publish_pool_added(
            &env,
            0,
            reward_token,
            first_pool_alloc_point,
            first_pool_fee_bps,
            first_pool_alloc_point,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Stake `amount` of the pool's token.
    ///
    /// Reward accrued so far is paid to `recipient` (default `user`) before
    /// the stake changes. Deposits are never lock-gated but restart the lock.
    pub fn deposit(
        env: Env,
        user: Address,
        pool_id: u32,
        amount: i128,
        recipient: Option<Address>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let now = env.ledger().timestamp();
        let mut pool = pool::load(&env, pool_id)?;
        pool.settle(&env, now, &Emission::load(&env))?;

        let mut position = position::load(&env, pool_id, &user);
        let gross = position.pending(&env, &pool.acc_reward_per_share)?;
        Self::realize(&env, &pool, &user, recipient, gross)?;

        token::Client::new(&env, &pool.stake_token).transfer(
            &user,
            &env.current_contract_address(),
            &amount,
        );

        position.amount = position
            .amount
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;
        pool.total_staked = pool
            .total_staked
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;
        position.checkpoint(&env, &pool.acc_reward_per_share, Self::lock_anchor(&env, now));

        pool::save(&env, &pool);
        position::save(&env, pool_id, &user, &position);

        events::publish_deposit(&env, pool_id, user, amount, pool.total_staked);

        Ok(())
    }

    /// Unstake `amount` and pay accrued reward to `recipient`.
    ///
    /// Principal always returns to `user`. `amount == 0` harvests through
    /// the same path, and is a no-op for an address with nothing staked.
    pub fn withdraw(
        env: Env,
        user: Address,
        pool_id: u32,
        amount: i128,
        recipient: Option<Address>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();

        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let now = env.ledger().timestamp();
        let mut pool = pool::load(&env, pool_id)?;
        let mut position = position::load(&env, pool_id, &user);
        if position.is_locked(now, Self::lock_duration(env.clone())) {
            return Err(ContractError::Locked);
        }
        if amount > position.amount {
            return Err(ContractError::InsufficientStake);
        }

        pool.settle(&env, now, &Emission::load(&env))?;
        let gross = position.pending(&env, &pool.acc_reward_per_share)?;
        if position.amount == 0 && gross == 0 {
            return Ok(());
        }
        Self::realize(&env, &pool, &user, recipient, gross)?;

        position.amount = position
            .amount
            .checked_sub(amount)
            .ok_or(ContractError::MathOverflow)?;
        pool.total_staked = pool
            .total_staked
            .checked_sub(amount)
            .ok_or(ContractError::MathOverflow)?;
        position.checkpoint(&env, &pool.acc_reward_per_share, Self::lock_anchor(&env, now));

        pool::save(&env, &pool);
        position::save(&env, pool_id, &user, &position);

        if amount > 0 {
            token::Client::new(&env, &pool.stake_token).transfer(
                &env.current_contract_address(),
                &user,
                &amount,
            );
        }

        events::publish_withdraw(&env, pool_id, user, amount, pool.total_staked);

        Ok(())
    }

    /// Pay accrued reward without touching the stake. Lock-gated like
    /// `withdraw`, and restarts the lock. An address with nothing staked
    /// gets 0 and no ledger entry.
    pub fn harvest(
        env: Env,
        user: Address,
        pool_id: u32,
        recipient: Option<Address>,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();

        let now = env.ledger().timestamp();
        let mut pool = pool::load(&env, pool_id)?;
        let mut position = position::load(&env, pool_id, &user);
        if position.is_locked(now, Self::lock_duration(env.clone())) {
            return Err(ContractError::Locked);
        }

        pool.settle(&env, now, &Emission::load(&env))?;
        let gross = position.pending(&env, &pool.acc_reward_per_share)?;
        if position.amount == 0 && gross == 0 {
            return Ok(0);
        }
        Self::realize(&env, &pool, &user, recipient, gross)?;

        position.checkpoint(&env, &pool.acc_reward_per_share, Self::lock_anchor(&env, now));
        pool::save(&env, &pool);
        position::save(&env, pool_id, &user, &position);

        Ok(gross)
    }

    // ── Referral rewards ────────────────────────────────────────────────────

    /// Claim every referral bonus credited to `referrer` across all pools.
    ///
    /// Fails with `BelowThreshold` when the total is under
    /// `min_referral_reward`.
    pub fn get_referral_reward(env: Env, referrer: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        referrer.require_auth();

        let bucket = ReferralBucket::Referrer(referrer.clone());
        let pools = pool::count(&env);
        let amount = referral::total(&env, &bucket, pools)?;
        if amount < Self::min_referral_reward(env.clone()) {
            return Err(ContractError::BelowThreshold);
        }

        referral::clear(&env, &bucket, pools);
        if amount > 0 {
            payout::pay_out(&env, &referrer, amount)?;
        }

        events::publish_referral_claimed(&env, referrer, amount);

        Ok(amount)
    }

    /// Sweep a referral bucket to the owner.
    ///
    /// `None` selects the protocol bucket, which has no claimant and can be
    /// swept at any time. A real referrer's bucket is only sweepable once
    /// `referral_owner_withdraw_await` has passed since its latest credit.
    pub fn get_referral_reward_for(
        env: Env,
        caller: Address,
        referrer: Option<Address>,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let bucket = ReferralBucket::from_referrer(referrer);
        let pools = pool::count(&env);
        if let ReferralBucket::Referrer(_) = bucket {
            if let Some(last) = referral::last_accrual(&env, &bucket, pools) {
                let wait = Self::referral_owner_withdraw_await(env.clone());
                if env.ledger().timestamp() < last.saturating_add(wait) {
                    return Err(ContractError::TooEarly);
                }
            }
        }

        let amount = referral::total(&env, &bucket, pools)?;
        referral::clear(&env, &bucket, pools);
        if amount > 0 {
            payout::pay_out(&env, &caller, amount)?;
        }

        events::publish_referral_swept(&env, bucket, caller, amount);

        Ok(amount)
    }

    // ── Admin: pools ────────────────────────────────────────────────────────

    /// Append a pool staking `stake_token`. Returns the new pool id.
    ///
    /// With `mass_update` every existing pool is settled first, so their
    /// accrual up to now is priced at the old total weight.
    pub fn add_pool(
        env: Env,
        caller: Address,
        stake_token: Address,
        alloc_point: u64,
        fee_bps: u32,
        mass_update: bool,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if !validate_bps(fee_bps) {
            return Err(ContractError::InvalidBasisPoints);
        }

        let now = env.ledger().timestamp();
        let mut emission = Emission::load(&env);
        if mass_update {
            pool::settle_all(&env, now, &emission)?;
        }

        let start = pool::start_time(&env);
        let pool = pool::push(&env, stake_token.clone(), alloc_point, fee_bps, now.max(start))?;
        emission.total_alloc_point = emission
            .total_alloc_point
            .checked_add(alloc_point)
            .ok_or(ContractError::MathOverflow)?;
        emission.save(&env);

        events::publish_pool_added(
            &env,
            pool.id,
            stake_token,
            alloc_point,
            fee_bps,
            emission.total_alloc_point,
        );

        Ok(pool.id)
    }

    /// Reweight a pool. With `mass_update` all pools are settled first,
    /// otherwise only the target pool.
    pub fn set_pool_alloc_point(
        env: Env,
        caller: Address,
        pool_id: u32,
        alloc_point: u64,
        mass_update: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let now = env.ledger().timestamp();
        let mut emission = Emission::load(&env);
        let mut pool = pool::load(&env, pool_id)?;
        if mass_update {
            pool::settle_all(&env, now, &emission)?;
            pool = pool::load(&env, pool_id)?;
        } else {
            pool.settle(&env, now, &emission)?;
        }

        emission.total_alloc_point = emission
            .total_alloc_point
            .checked_sub(pool.alloc_point)
            .and_then(|t| t.checked_add(alloc_point))
            .ok_or(ContractError::MathOverflow)?;
        pool.alloc_point = alloc_point;

        pool::save(&env, &pool);
        emission.save(&env);

        events::publish_alloc_point_set(&env, pool_id, alloc_point, emission.total_alloc_point);

        Ok(())
    }

    /// Change the harvest fee of one pool. The fee does not enter the
    /// accumulator, so no settlement is needed.
    pub fn set_pool_fee_percentage(
        env: Env,
        caller: Address,
        pool_id: u32,
        fee_bps: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if !validate_bps(fee_bps) {
            return Err(ContractError::InvalidBasisPoints);
        }

        let mut pool = pool::load(&env, pool_id)?;
        pool.fee_bps = fee_bps;
        pool::save(&env, &pool);

        events::publish_pool_fee_set(&env, pool_id, fee_bps);

        Ok(())
    }

    /// Update the global emission rate.
    ///
    /// With `mass_update` every pool is flushed at the old rate first.
    pub fn set_reward_per_second(
        env: Env,
        caller: Address,
        reward_per_second: i128,
        mass_update: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if reward_per_second < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut emission = Emission::load(&env);
        if mass_update {
            pool::settle_all(&env, env.ledger().timestamp(), &emission)?;
        }
        emission.reward_per_second = reward_per_second;
        emission.save(&env);

        events::publish_reward_rate_set(&env, reward_per_second);

        Ok(())
    }

    // ── Admin: parameters ───────────────────────────────────────────────────

    pub fn set_referral_percent(env: Env, caller: Address, bps: u32) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if !validate_bps(bps) {
            return Err(ContractError::InvalidBasisPoints);
        }
        payout::set_referral_bps(&env, bps);

        events::publish_param_set(&env, symbol_short!("REF_BPS"), bps as i128);
        Ok(())
    }

    pub fn set_min_referral_reward(
        env: Env,
        caller: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }
        env.storage().instance().set(&MIN_REFERRAL, &amount);

        events::publish_param_set(&env, MIN_REFERRAL, amount);
        Ok(())
    }

    pub fn set_ref_withdraw_await(
        env: Env,
        caller: Address,
        seconds: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        env.storage().instance().set(&REFERRAL_AWAIT, &seconds);

        events::publish_param_set(&env, REFERRAL_AWAIT, seconds as i128);
        Ok(())
    }

    /// Change the lock window. Existing positions are measured against the
    /// new value from the next call on.
    pub fn set_lock_duration(env: Env, caller: Address, seconds: u64) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        env.storage().instance().set(&LOCK_DURATION, &seconds);

        events::publish_param_set(&env, LOCK_DURATION, seconds as i128);
        Ok(())
    }

    // ── Admin: fees ─────────────────────────────────────────────────────────

    /// Transfer the whole treasury share of harvest fees to the owner.
    pub fn get_fees(env: Env, caller: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let amount = payout::fees_collected(&env);
        payout::set_fees_collected(&env, 0);
        if amount > 0 {
            payout::pay_out(&env, &caller, amount)?;
        }

        events::publish_fees_claimed(&env, caller, amount);

        Ok(amount)
    }

    /// Exempt depositors from harvest fees and referral bonuses.
    pub fn exclude_from_fee(
        env: Env,
        caller: Address,
        accounts: Vec<Address>,
    ) -> Result<(), ContractError> {
        Self::set_fee_exemption(&env, &caller, accounts, true)
    }

    pub fn include_in_fee(
        env: Env,
        caller: Address,
        accounts: Vec<Address>,
    ) -> Result<(), ContractError> {
        Self::set_fee_exemption(&env, &caller, accounts, false)
    }

    // ── Ownership ───────────────────────────────────────────────────────────

    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let previous = ownable::transfer_ownership(&env, &caller, &new_owner)
            .ok_or(ContractError::Unauthorized)?;

        events::publish_ownership_transferred(&env, previous, new_owner);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Gross reward `user` would realise in `pool_id` right now, before fees.
    pub fn pending_reward(env: Env, pool_id: u32, user: Address) -> Result<i128, ContractError> {
        let pool = pool::load(&env, pool_id)?;
        let acc = pool.projected_acc(&env, env.ledger().timestamp(), &Emission::load(&env))?;
        position::load(&env, pool_id, &user).pending(&env, &acc)
    }

    pub fn pool_info(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        pool::load(&env, pool_id)
    }

    pub fn pool_length(env: Env) -> u32 {
        pool::count(&env)
    }

    pub fn stake_token(env: Env, pool_id: u32) -> Result<Address, ContractError> {
        Ok(pool::load(&env, pool_id)?.stake_token)
    }

    pub fn user_info(env: Env, pool_id: u32, user: Address) -> UserPosition {
        position::load(&env, pool_id, &user)
    }

    /// First ledger time at which `user` may withdraw from or harvest `pool_id`.
    pub fn unlock_time(env: Env, pool_id: u32, user: Address) -> u64 {
        position::load(&env, pool_id, &user).unlock_time(Self::lock_duration(env))
    }

    /// Bonus held for `referrer` (or the protocol bucket) in one pool.
    pub fn referral_details(env: Env, referrer: Option<Address>, pool_id: u32) -> i128 {
        referral::load(&env, &ReferralBucket::from_referrer(referrer), pool_id).amount
    }

    pub fn fees_collected(env: Env) -> i128 {
        payout::fees_collected(&env)
    }

    pub fn total_alloc_point(env: Env) -> u64 {
        Emission::load(&env).total_alloc_point
    }

    pub fn reward_per_second(env: Env) -> i128 {
        Emission::load(&env).reward_per_second
    }

    pub fn start_time(env: Env) -> u64 {
        pool::start_time(&env)
    }

    pub fn burn_address(env: Env) -> Result<Address, ContractError> {
        payout::burn_address(&env)
    }

    pub fn reward_token(env: Env) -> Result<Address, ContractError> {
        payout::reward_token(&env)
    }

    pub fn referral_program(env: Env) -> Result<Address, ContractError> {
        referral::program(&env)
    }

    pub fn referral_percent(env: Env) -> u32 {
        payout::referral_bps(&env)
    }

    pub fn min_referral_reward(env: Env) -> i128 {
        env.storage().instance().get(&MIN_REFERRAL).unwrap_or(0)
    }

    pub fn referral_owner_withdraw_await(env: Env) -> u64 {
        env.storage().instance().get(&REFERRAL_AWAIT).unwrap_or(0)
    }

    pub fn lock_duration(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&LOCK_DURATION)
            .unwrap_or(SECONDS_PER_DAY)
    }

    pub fn is_excluded_from_fee(env: Env, account: Address) -> bool {
        payout::is_exempt(&env, &account)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn owner(env: Env) -> Result<Address, ContractError> {
        ownable::get_owner(&env).ok_or(ContractError::NotInitialized)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` is not the owner. Auth is checked by the caller.
    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        if !ownable::is_owner(env, caller) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Actions taken before emission starts lock until `start + lock`.
    fn lock_anchor(env: &Env, now: u64) -> u64 {
        now.max(pool::start_time(env))
    }

    /// Route a gross reward through the fee/referral pipeline.
    fn realize(
        env: &Env,
        pool: &Pool,
        user: &Address,
        recipient: Option<Address>,
        gross: i128,
    ) -> Result<Payout, ContractError> {
        if gross == 0 {
            return Ok(Payout::default());
        }
        let to = recipient.unwrap_or_else(|| user.clone());
        let (payout, bucket) = payout::distribute(env, pool.id, pool.fee_bps, user, &to, gross)?;

        if let Some(b) = bucket {
            events::publish_referral_credited(env, b, pool.id, payout.referral_bonus);
        }
        events::publish_harvest(env, pool.id, user.clone(), to, payout.clone());

        Ok(payout)
    }

    fn set_fee_exemption(
        env: &Env,
        caller: &Address,
        accounts: Vec<Address>,
        exempt: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        Self::require_owner(env, caller)?;

        for account in accounts.iter() {
            payout::set_exempt(env, &account, exempt);
            events::publish_fee_exemption(env, account, exempt);
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin;
