use crate::{
    accumulator::accrued_reward,
    error::ContractError,
    storage::{Pool, UserPosition},
};

/// Moves the reward earned since the last settlement into `pending_reward`.
/// Must be called after the pool was refreshed and before the stake changes.
pub fn settle(position: &mut UserPosition, acc_reward_per_share: i128) -> Result<(), ContractError> {
    position.pending_reward = pending_at(position, acc_reward_per_share)?;

    Ok(())
}

/// The claimable reward of `position` at accumulator value `acc_reward_per_share`.
pub fn pending_at(position: &UserPosition, acc_reward_per_share: i128) -> Result<i128, ContractError> {
    accrued_reward(position.staked_amount, acc_reward_per_share)?
        .checked_sub(position.reward_debt)
        .and_then(|delta| position.pending_reward.checked_add(delta))
        .ok_or(ContractError::ContractMathError)
}

pub fn sync_reward_debt(
    position: &mut UserPosition,
    acc_reward_per_share: i128,
) -> Result<(), ContractError> {
    position.reward_debt = accrued_reward(position.staked_amount, acc_reward_per_share)?;

    Ok(())
}

/// Adds `amount` to both the position and the pool and re-syncs the debt.
pub fn credit(position: &mut UserPosition, pool: &mut Pool, amount: i128) -> Result<(), ContractError> {
    position.staked_amount = position
        .staked_amount
        .checked_add(amount)
        .ok_or(ContractError::ContractMathError)?;
    pool.total_staked = pool
        .total_staked
        .checked_add(amount)
        .ok_or(ContractError::ContractMathError)?;

    sync_reward_debt(position, pool.acc_reward_per_share)
}

/// Removes `amount` from both the position and the pool and re-syncs the debt.
pub fn debit(position: &mut UserPosition, pool: &mut Pool, amount: i128) -> Result<(), ContractError> {
    position.staked_amount = position
        .staked_amount
        .checked_sub(amount)
        .filter(|left| *left >= 0)
        .ok_or(ContractError::UnstakeExceedStakeAmount)?;
    pool.total_staked = pool
        .total_staked
        .checked_sub(amount)
        .filter(|left| *left >= 0)
        .ok_or(ContractError::ContractMathError)?;

    sync_reward_debt(position, pool.acc_reward_per_share)
}
