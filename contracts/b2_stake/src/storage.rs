use b2::{
    ttl::{
        INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT,
        PERSISTENT_LIFETIME_THRESHOLD,
    },
    utils::AdminChange,
};
use soroban_sdk::{
    contracttype, log, panic_with_error, symbol_short, Address, ConversionError, Env, Symbol,
    TryFromVal, Val, Vec,
};

use crate::error::ContractError;

pub const ADMIN: Symbol = symbol_short!("ADMIN");
pub const PENDING_ADMIN: Symbol = symbol_short!("p_admin");

/// The native asset pool always lives at this id.
pub const NATIVE_POOL_ID: u32 = 0;

#[derive(Clone, Copy)]
#[repr(u32)]
pub enum DataKey {
    Config = 0,
    PoolSize = 1,
    TotalPoolWeight = 2,
}

impl TryFromVal<Env, DataKey> for Val {
    type Error = ConversionError;

    fn try_from_val(_env: &Env, v: &DataKey) -> Result<Self, Self::Error> {
        Ok((*v as u32).into())
    }
}

/// Keys of the per pool and per position entries kept in persistent storage.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LedgerKey {
    Pool(u32),
    Position(u32, Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Token paid out on claim. The contract holds a balance of it.
    pub reward_token: Address,
    /// Stellar Asset Contract of the native asset, the custody token of pool 0.
    pub native_token: Address,
    /// First block of the emission window, inclusive.
    pub start_block: u32,
    /// Last block of the emission window, inclusive.
    pub end_block: u32,
    pub reward_per_block: i128,
    pub withdraw_paused: bool,
    pub claim_paused: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StakeAsset {
    Native,
    Token(Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub stake_asset: StakeAsset,
    pub weight: u64,
    /// Block up to which `acc_reward_per_share` has been computed.
    pub last_reward_block: u32,
    pub min_deposit_amount: i128,
    pub unstake_locked_blocks: u32,
    /// Reward earned per staked unit since the pool was added, scaled by `PRECISION`.
    pub acc_reward_per_share: i128,
    pub total_staked: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakeRequest {
    pub amount: i128,
    pub unlock_block: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserPosition {
    pub staked_amount: i128,
    /// Reward already accounted for `staked_amount` at the last settlement.
    pub reward_debt: i128,
    /// Settled reward waiting to be claimed.
    pub pending_reward: i128,
    /// Locked principal in request order.
    pub unstake_requests: Vec<UnstakeRequest>,
}

impl UserPosition {
    pub fn new(env: &Env) -> Self {
        UserPosition {
            staked_amount: 0,
            reward_debt: 0,
            pending_reward: 0,
            unstake_requests: Vec::new(env),
        }
    }
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &LedgerKey) {
    env.storage().persistent().extend_ttl(
        key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_config(env: &Env) -> Config {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .unwrap_or_else(|| {
            log!(env, "B2Stake: Config not set");
            panic_with_error!(env, ContractError::ConfigNotSet)
        });
    bump_instance(env);

    config
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

pub fn get_admin(env: &Env) -> Address {
    let admin = env.storage().instance().get(&ADMIN).unwrap_or_else(|| {
        log!(env, "B2Stake: Admin not set");
        panic_with_error!(env, ContractError::AdminNotSet)
    });
    bump_instance(env);

    admin
}

pub fn save_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&ADMIN, admin);
    bump_instance(env);
}

pub fn get_pending_admin(env: &Env) -> Option<AdminChange> {
    env.storage().instance().get(&PENDING_ADMIN)
}

pub fn save_pending_admin(env: &Env, change: &AdminChange) {
    env.storage().instance().set(&PENDING_ADMIN, change);
    bump_instance(env);
}

pub fn remove_pending_admin(env: &Env) {
    env.storage().instance().remove(&PENDING_ADMIN);
}

pub fn get_pool_size(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::PoolSize)
        .unwrap_or(0)
}

pub fn get_total_pool_weight(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::TotalPoolWeight)
        .unwrap_or(0)
}

pub fn save_total_pool_weight(env: &Env, total: u64) {
    env.storage()
        .instance()
        .set(&DataKey::TotalPoolWeight, &total);
    bump_instance(env);
}

pub fn get_pool(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
    let key = LedgerKey::Pool(pool_id);
    match env.storage().persistent().get::<_, Pool>(&key) {
        Some(pool) => {
            bump_persistent(env, &key);
            Ok(pool)
        }
        None => {
            log!(
                env,
                "B2Stake: Pool {} does not exist, pool size is {}",
                pool_id,
                get_pool_size(env)
            );
            Err(ContractError::PoolIdNotExist)
        }
    }
}

pub fn save_pool(env: &Env, pool_id: u32, pool: &Pool) {
    let key = LedgerKey::Pool(pool_id);
    env.storage().persistent().set(&key, pool);
    bump_persistent(env, &key);
}

/// Stores `pool` under the next free id and returns that id.
pub fn push_pool(env: &Env, pool: &Pool) -> Result<u32, ContractError> {
    let pool_id = get_pool_size(env);
    let next = pool_id
        .checked_add(1)
        .ok_or(ContractError::ContractMathError)?;

    save_pool(env, pool_id, pool);
    env.storage().instance().set(&DataKey::PoolSize, &next);
    bump_instance(env);

    Ok(pool_id)
}

pub fn get_position(env: &Env, pool_id: u32, user: &Address) -> UserPosition {
    let key = LedgerKey::Position(pool_id, user.clone());
    match env.storage().persistent().get::<_, UserPosition>(&key) {
        Some(position) => {
            bump_persistent(env, &key);
            position
        }
        None => UserPosition::new(env),
    }
}

pub fn save_position(env: &Env, pool_id: u32, user: &Address, position: &UserPosition) {
    let key = LedgerKey::Position(pool_id, user.clone());
    env.storage().persistent().set(&key, position);
    bump_persistent(env, &key);
}
