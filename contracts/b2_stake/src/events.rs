use soroban_sdk::{contracttype, Address, Env};

use crate::storage::{Pool, StakeAsset};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAdded {
    pub pool_id: u32,
    pub stake_asset: StakeAsset,
    pub weight: u64,
    pub last_reward_block: u32,
    pub min_deposit_amount: i128,
    pub unstake_locked_blocks: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolUpdated {
    pub pool_id: u32,
    pub min_deposit_amount: i128,
    pub unstake_locked_blocks: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SetPoolWeight {
    pub pool_id: u32,
    pub weight: u64,
    pub total_pool_weight: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpdatePoolReward {
    pub pool_id: u32,
    pub last_reward_block: u32,
    pub acc_reward_per_share: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deposit {
    pub user: Address,
    pub pool_id: u32,
    pub amount: i128,
    /// Pool total after the deposit.
    pub total_staked: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Unstake {
    pub user: Address,
    pub pool_id: u32,
    pub amount: i128,
    /// User stake left after the request.
    pub staked_amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdraw {
    pub user: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub block: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Claim {
    pub user: Address,
    pub pool_id: u32,
    pub amount: i128,
}

pub fn pool_added(env: &Env, pool_id: u32, pool: &Pool) {
    env.events().publish(
        ("pool", "added"),
        PoolAdded {
            pool_id,
            stake_asset: pool.stake_asset.clone(),
            weight: pool.weight,
            last_reward_block: pool.last_reward_block,
            min_deposit_amount: pool.min_deposit_amount,
            unstake_locked_blocks: pool.unstake_locked_blocks,
        },
    );
}

pub fn pool_updated(env: &Env, pool_id: u32, pool: &Pool) {
    env.events().publish(
        ("pool", "updated"),
        PoolUpdated {
            pool_id,
            min_deposit_amount: pool.min_deposit_amount,
            unstake_locked_blocks: pool.unstake_locked_blocks,
        },
    );
}

pub fn set_pool_weight(env: &Env, pool_id: u32, weight: u64, total_pool_weight: u64) {
    env.events().publish(
        ("pool", "set_weight"),
        SetPoolWeight {
            pool_id,
            weight,
            total_pool_weight,
        },
    );
}

pub fn update_pool_reward(env: &Env, pool_id: u32, pool: &Pool) {
    env.events().publish(
        ("pool", "update_reward"),
        UpdatePoolReward {
            pool_id,
            last_reward_block: pool.last_reward_block,
            acc_reward_per_share: pool.acc_reward_per_share,
        },
    );
}

pub fn deposit(env: &Env, user: &Address, pool_id: u32, amount: i128, total_staked: i128) {
    env.events().publish(
        ("stake", "deposit"),
        Deposit {
            user: user.clone(),
            pool_id,
            amount,
            total_staked,
        },
    );
}

pub fn unstake(env: &Env, user: &Address, pool_id: u32, amount: i128, staked_amount: i128) {
    env.events().publish(
        ("stake", "unstake"),
        Unstake {
            user: user.clone(),
            pool_id,
            amount,
            staked_amount,
        },
    );
}

pub fn withdraw(env: &Env, user: &Address, pool_id: u32, amount: i128, block: u32) {
    env.events().publish(
        ("stake", "withdraw"),
        Withdraw {
            user: user.clone(),
            pool_id,
            amount,
            block,
        },
    );
}

pub fn claim(env: &Env, user: &Address, pool_id: u32, amount: i128) {
    env.events().publish(
        ("stake", "claim"),
        Claim {
            user: user.clone(),
            pool_id,
            amount,
        },
    );
}
