#![no_std]

//! Auto-compounding vault over one farm pool.
//!
//! Depositors receive shares of everything the vault holds in the pool.
//! Anyone may call [`AutoStaking::restake`] to harvest the vault's reward
//! and stake it again, earning a small bounty for the gas. The farm pool
//! must stake its own reward token, and the farm owner must put the vault
//! on the fee-exempt list so the full reward arrives here.

pub mod events;

use common::{bps_of, mul_div_wide, ownable, StakingFarmClient};
use soroban_sdk::{
    auth::{ContractContext, InvokerContractAuthEntry, SubContractInvocation},
    contract, contractimpl, symbol_short, token, vec, Address, Env, IntoVal, Symbol,
};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const FARM: Symbol = symbol_short!("FARM");
const POOL_ID: Symbol = symbol_short!("POOL_ID");
const TOKEN: Symbol = symbol_short!("TOKEN");
const STAKED: Symbol = symbol_short!("STAKED");
const TOTAL_SHARES: Symbol = symbol_short!("SHARES");
const FEES: Symbol = symbol_short!("FEES");
const PERFORMANCE_FEE: Symbol = symbol_short!("PERF_FEE");
const RESTAKE_REWARD: Symbol = symbol_short!("RSTK_RWD");
const WITHDRAW_FEE: Symbol = symbol_short!("WDRW_FEE");

// Per-user persistent storage uses tuple keys: (prefix, address)
const SHARE: Symbol = symbol_short!("SHARE");

const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 1_036_800;

// ── Fee schedule ─────────────────────────────────────────────────────────────

/// Cut of every harvest kept for the owner.
pub const DEFAULT_PERFORMANCE_FEE_BPS: u32 = 200;
/// Cut of every harvest paid to whoever called `restake`.
pub const DEFAULT_RESTAKE_REWARD_BPS: u32 = 25;
/// Cut of every withdrawal kept for the owner.
pub const DEFAULT_WITHDRAW_FEE_BPS: u32 = 10;

pub const MAX_PERFORMANCE_FEE_BPS: u32 = 1_000;
pub const MAX_RESTAKE_REWARD_BPS: u32 = 500;
pub const MAX_WITHDRAW_FEE_BPS: u32 = 500;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 10,
    InsufficientShares = 11,
    FeeTooHigh = 12,
    NothingToRestake = 20,
    NotFeeExempt = 21,
    MathOverflow = 30,
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn amount_of(env: &Env, key: &Symbol) -> i128 {
    env.storage().instance().get(key).unwrap_or(0)
}

fn set_amount(env: &Env, key: &Symbol, value: i128) {
    env.storage().instance().set(key, &value);
}

fn bps_setting(env: &Env, key: &Symbol, default: u32) -> u32 {
    env.storage().instance().get(key).unwrap_or(default)
}

fn load_shares(env: &Env, user: &Address) -> i128 {
    let key = (SHARE, user.clone());
    match env.storage().persistent().get::<_, i128>(&key) {
        Some(shares) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
            shares
        }
        None => 0,
    }
}

fn save_shares(env: &Env, user: &Address, shares: i128) {
    let key = (SHARE, user.clone());
    env.storage().persistent().set(&key, &shares);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct AutoStaking;

#[contractimpl]
impl AutoStaking {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bind the vault to `pool_id` of `farm`. The vault token is the pool's
    /// stake token.
    pub fn initialize(
        env: Env,
        owner: Address,
        farm: Address,
        pool_id: u32,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        let token = StakingFarmClient::new(&env, &farm).stake_token(&pool_id);

        ownable::set_owner(&env, &owner);
        env.storage().instance().set(&FARM, &farm);
        env.storage().instance().set(&POOL_ID, &pool_id);
        env.storage().instance().set(&TOKEN, &token);
        env.storage().instance().set(&INITIALIZED, &true);

        events::publish_initialized(&env, owner, farm, pool_id, token);

        Ok(())
    }

    // ── Depositors ──────────────────────────────────────────────────────────

    /// Move `amount` tokens into the farm and mint shares against the
    /// vault's current `total`. Returns the shares minted.
    pub fn deposit(env: Env, user: Address, amount: i128) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let total = Self::total(env.clone())?;
        let total_shares = amount_of(&env, &TOTAL_SHARES);
        let shares = if total_shares == 0 || total == 0 {
            amount
        } else {
            mul_div_wide(&env, amount, total_shares, total).ok_or(ContractError::MathOverflow)?
        };
        if shares <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        token::Client::new(&env, &Self::token(env.clone())?).transfer(
            &user,
            &env.current_contract_address(),
            &amount,
        );
        Self::stake(&env, amount)?;

        let user_shares = load_shares(&env, &user)
            .checked_add(shares)
            .ok_or(ContractError::MathOverflow)?;
        save_shares(&env, &user, user_shares);
        set_amount(
            &env,
            &TOTAL_SHARES,
            total_shares
                .checked_add(shares)
                .ok_or(ContractError::MathOverflow)?,
        );

        events::publish_deposit(&env, user, amount, shares);

        Ok(shares)
    }

    /// Burn `shares` and pay out their slice of `total`, less the withdraw
    /// fee. Idle balance is used first; the rest is pulled from the farm,
    /// so the farm's lock applies. Returns the amount sent to `user`.
    pub fn withdraw(env: Env, user: Address, shares: i128) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();

        if shares <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let user_shares = load_shares(&env, &user);
        if shares > user_shares {
            return Err(ContractError::InsufficientShares);
        }

        let total_shares = amount_of(&env, &TOTAL_SHARES);
        let amount = mul_div_wide(&env, shares, Self::total(env.clone())?, total_shares)
            .ok_or(ContractError::MathOverflow)?;
        let fee = bps_of(amount, Self::withdraw_fee(env.clone()))
            .ok_or(ContractError::MathOverflow)?;

        let idle = Self::idle(&env)?;
        if amount > idle {
            Self::unstake(&env, amount - idle)?;
        }

        save_shares(&env, &user, user_shares - shares);
        set_amount(&env, &TOTAL_SHARES, total_shares - shares);
        set_amount(
            &env,
            &FEES,
            amount_of(&env, &FEES)
                .checked_add(fee)
                .ok_or(ContractError::MathOverflow)?,
        );

        let paid = amount - fee;
        if paid > 0 {
            token::Client::new(&env, &Self::token(env.clone())?).transfer(
                &env.current_contract_address(),
                &user,
                &paid,
            );
        }

        events::publish_withdraw(&env, user, shares, paid, fee);

        Ok(paid)
    }

    // ── Compounding ─────────────────────────────────────────────────────────

    /// Harvest the vault's pending reward and stake it again together with
    /// any idle balance. The caller receives the restake bounty, which is
    /// also the return value.
    pub fn restake(env: Env, caller: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let farm = Self::farm_client(&env)?;
        let vault = env.current_contract_address();
        if !farm.is_excluded_from_fee(&vault) {
            return Err(ContractError::NotFeeExempt);
        }

        let harvested = farm.pending_reward(&Self::pool_id(env.clone())?, &vault);
        let idle = Self::idle(&env)?;
        if harvested <= 0 && idle <= 0 {
            return Err(ContractError::NothingToRestake);
        }

        let bounty = bps_of(harvested, Self::restake_reward(env.clone()))
            .ok_or(ContractError::MathOverflow)?;
        let performance_fee = bps_of(harvested, Self::performance_fee(env.clone()))
            .ok_or(ContractError::MathOverflow)?;
        let restaked = idle
            .checked_add(harvested)
            .and_then(|v| v.checked_sub(bounty))
            .and_then(|v| v.checked_sub(performance_fee))
            .ok_or(ContractError::MathOverflow)?;

        // The farm pays `harvested` out before pulling `restaked` in.
        Self::stake(&env, restaked)?;

        set_amount(
            &env,
            &FEES,
            amount_of(&env, &FEES)
                .checked_add(performance_fee)
                .ok_or(ContractError::MathOverflow)?,
        );
        if bounty > 0 {
            token::Client::new(&env, &Self::token(env.clone())?).transfer(&vault, &caller, &bounty);
        }

        events::publish_restake(&env, caller, harvested, restaked, bounty, performance_fee);

        Ok(bounty)
    }

    /// Bounty a `restake` call would pay right now.
    pub fn calculate_restake_reward(env: Env) -> Result<i128, ContractError> {
        let pending = Self::farm_client(&env)?
            .pending_reward(&Self::pool_id(env.clone())?, &env.current_contract_address());
        bps_of(pending, Self::restake_reward(env)).ok_or(ContractError::MathOverflow)
    }

    // ── Admin ───────────────────────────────────────────────────────────────

    pub fn set_performance_fee(env: Env, caller: Address, bps: u32) -> Result<(), ContractError> {
        Self::set_fee(&env, &caller, PERFORMANCE_FEE, bps, MAX_PERFORMANCE_FEE_BPS)
    }

    pub fn set_restake_reward(env: Env, caller: Address, bps: u32) -> Result<(), ContractError> {
        Self::set_fee(&env, &caller, RESTAKE_REWARD, bps, MAX_RESTAKE_REWARD_BPS)
    }

    pub fn set_withdraw_fee(env: Env, caller: Address, bps: u32) -> Result<(), ContractError> {
        Self::set_fee(&env, &caller, WITHDRAW_FEE, bps, MAX_WITHDRAW_FEE_BPS)
    }

    /// Send `token` held by the vault to the owner.
    ///
    /// For the vault's own token only the accumulated fees leave; depositor
    /// funds stay put. Any other token is swept in full.
    pub fn get_token(env: Env, caller: Address, token: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let vault = env.current_contract_address();
        let client = token::Client::new(&env, &token);
        let amount = if token == Self::token(env.clone())? {
            let fees = amount_of(&env, &FEES);
            set_amount(&env, &FEES, 0);
            fees
        } else {
            client.balance(&vault)
        };
        if amount > 0 {
            client.transfer(&vault, &caller, &amount);
        }

        events::publish_token_recovered(&env, token, caller, amount);

        Ok(amount)
    }

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

    /// Tokens backing all shares: the vault's stake in the farm plus its
    /// idle balance, excluding owner fees. Unharvested reward is not counted.
    pub fn total(env: Env) -> Result<i128, ContractError> {
        amount_of(&env, &STAKED)
            .checked_add(Self::idle(&env)?)
            .ok_or(ContractError::MathOverflow)
    }

    pub fn total_shares(env: Env) -> i128 {
        amount_of(&env, &TOTAL_SHARES)
    }

    pub fn shares_of(env: Env, user: Address) -> i128 {
        load_shares(&env, &user)
    }

    /// Amount the vault holds in the farm pool.
    pub fn staked(env: Env) -> i128 {
        amount_of(&env, &STAKED)
    }

    /// Performance and withdraw fees awaiting `get_token`.
    pub fn fees(env: Env) -> i128 {
        amount_of(&env, &FEES)
    }

    pub fn token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn farm(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&FARM)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn pool_id(env: Env) -> Result<u32, ContractError> {
        env.storage()
            .instance()
            .get(&POOL_ID)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn performance_fee(env: Env) -> u32 {
        bps_setting(&env, &PERFORMANCE_FEE, DEFAULT_PERFORMANCE_FEE_BPS)
    }

    pub fn restake_reward(env: Env) -> u32 {
        bps_setting(&env, &RESTAKE_REWARD, DEFAULT_RESTAKE_REWARD_BPS)
    }

    pub fn withdraw_fee(env: Env) -> u32 {
        bps_setting(&env, &WITHDRAW_FEE, DEFAULT_WITHDRAW_FEE_BPS)
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

    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        if !ownable::is_owner(env, caller) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn farm_client(env: &Env) -> Result<StakingFarmClient<'_>, ContractError> {
        Ok(StakingFarmClient::new(env, &Self::farm(env.clone())?))
    }

    /// Vault token balance not owed to the owner.
    fn idle(env: &Env) -> Result<i128, ContractError> {
        let balance = token::Client::new(env, &Self::token(env.clone())?)
            .balance(&env.current_contract_address());
        balance
            .checked_sub(amount_of(env, &FEES))
            .ok_or(ContractError::MathOverflow)
    }

    /// Deposit `amount` from the vault into the farm pool. The farm pulls
    /// the tokens itself, so the vault pre-authorises that transfer.
    fn stake(env: &Env, amount: i128) -> Result<(), ContractError> {
        let farm = Self::farm_client(env)?;
        let vault = env.current_contract_address();

        env.authorize_as_current_contract(vec![
            env,
            InvokerContractAuthEntry::Contract(SubContractInvocation {
                context: ContractContext {
                    contract: Self::token(env.clone())?,
                    fn_name: Symbol::new(env, "transfer"),
                    args: (vault.clone(), farm.address.clone(), amount).into_val(env),
                },
                sub_invocations: vec![env],
            }),
        ]);
        farm.deposit(&vault, &Self::pool_id(env.clone())?, &amount, &None);

        let staked = amount_of(env, &STAKED)
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;
        set_amount(env, &STAKED, staked);
        Ok(())
    }

    fn unstake(env: &Env, amount: i128) -> Result<(), ContractError> {
        let farm = Self::farm_client(env)?;
        farm.withdraw(
            &env.current_contract_address(),
            &Self::pool_id(env.clone())?,
            &amount,
            &None,
        );

        let staked = amount_of(env, &STAKED)
            .checked_sub(amount)
            .ok_or(ContractError::MathOverflow)?;
        set_amount(env, &STAKED, staked);
        Ok(())
    }

    fn set_fee(
        env: &Env,
        caller: &Address,
        key: Symbol,
        bps: u32,
        max: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        Self::require_owner(env, caller)?;

        if bps > max {
            return Err(ContractError::FeeTooHigh);
        }
        env.storage().instance().set(&key, &bps);

        events::publish_fee_set(env, key, bps);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
