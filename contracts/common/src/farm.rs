use soroban_sdk::{contractclient, Address, Env};

/// The slice of the farm's interface an aggregator needs to compound a
/// single pool on behalf of its own depositors.
///
/// Errors raised by the farm abort the calling transaction.
#[contractclient(name = "StakingFarmClient")]
pub trait StakingFarm {
    fn deposit(env: Env, user: Address, pool_id: u32, amount: i128, recipient: Option<Address>);

    fn withdraw(env: Env, user: Address, pool_id: u32, amount: i128, recipient: Option<Address>);

    /// Gross reward `user` would realise in `pool_id` right now.
    fn pending_reward(env: Env, pool_id: u32, user: Address) -> i128;

    fn stake_token(env: Env, pool_id: u32) -> Address;

    fn is_excluded_from_fee(env: Env, account: Address) -> bool;
}
