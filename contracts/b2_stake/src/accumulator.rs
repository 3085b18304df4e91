use b2::utils::{scale_div, unscale_mul};
use soroban_sdk::{log, Env};

use crate::{
    error::ContractError,
    events,
    storage::{get_config, get_pool, get_pool_size, get_total_pool_weight, save_pool, Pool},
};

/// Emission credited to a pool for `elapsed` blocks. Truncates toward zero.
pub fn pool_reward(
    elapsed: u32,
    reward_per_block: i128,
    weight: u64,
    total_pool_weight: u64,
) -> Result<i128, ContractError> {
    i128::from(elapsed)
        .checked_mul(reward_per_block)
        .and_then(|v| v.checked_mul(i128::from(weight)))
        .and_then(|v| v.checked_div(i128::from(total_pool_weight)))
        .ok_or(ContractError::ContractMathError)
}

/// Reward implied by `staked` units at accumulator value `acc_reward_per_share`.
pub fn accrued_reward(staked: i128, acc_reward_per_share: i128) -> Result<i128, ContractError> {
    unscale_mul(staked, acc_reward_per_share).ok_or(ContractError::ContractMathError)
}

/// Moves the pool accumulator forward to `current_block`, capped at `end_block`.
///
/// Blocks that pass while nothing is staked are skipped, their emission is
/// never credited to anyone.
pub fn advance(
    pool: &mut Pool,
    current_block: u32,
    end_block: u32,
    reward_per_block: i128,
    total_pool_weight: u64,
) -> Result<(), ContractError> {
    if current_block < pool.last_reward_block {
        return Err(ContractError::PoolRewardAlreadyComputed);
    }
    if current_block == pool.last_reward_block {
        return Ok(());
    }

    let effective_end = current_block.min(end_block);
    if effective_end <= pool.last_reward_block {
        return Ok(());
    }

    if pool.total_staked == 0 {
        pool.last_reward_block = effective_end;
        return Ok(());
    }

    let elapsed = effective_end - pool.last_reward_block;
    let reward = pool_reward(elapsed, reward_per_block, pool.weight, total_pool_weight)?;
    let increment = scale_div(reward, pool.total_staked).ok_or(ContractError::ContractMathError)?;

    pool.acc_reward_per_share = pool
        .acc_reward_per_share
        .checked_add(increment)
        .ok_or(ContractError::ContractMathError)?;
    pool.last_reward_block = effective_end;

    Ok(())
}

/// Brings `pool` up to the current ledger. The caller persists the pool.
pub fn refresh(env: &Env, pool_id: u32, pool: &mut Pool) -> Result<(), ContractError> {
    let current_block = env.ledger().sequence();
    let config = get_config(env);
    advance(
        pool,
        current_block,
        config.end_block,
        config.reward_per_block,
        get_total_pool_weight(env),
    )
    .inspect_err(|error| {
        if *error == ContractError::PoolRewardAlreadyComputed {
            log!(
                env,
                "B2Stake: Refresh pool: pool {} starts rewarding at block {}, current block is {}",
                pool_id,
                pool.last_reward_block,
                current_block
            );
        }
    })?;

    events::update_pool_reward(env, pool_id, pool);

    Ok(())
}

/// Loads, refreshes and stores a single pool.
pub fn refresh_stored(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
    let mut pool = get_pool(env, pool_id)?;
    refresh(env, pool_id, &mut pool)?;
    save_pool(env, pool_id, &pool);

    Ok(pool)
}

pub fn mass_update_pools(env: &Env) -> Result<(), ContractError> {
    for pool_id in 0..get_pool_size(env) {
        refresh_stored(env, pool_id)?;
    }

    Ok(())
}
