use soroban_sdk::{Env, Vec};

use crate::{
    error::ContractError,
    storage::{UnstakeRequest, UserPosition},
};

/// First block at which principal unstaked at `current_block` can be withdrawn.
pub fn unlock_block(current_block: u32, unstake_locked_blocks: u32) -> Result<u32, ContractError> {
    current_block
        .checked_add(1)
        .and_then(|block| block.checked_add(unstake_locked_blocks))
        .ok_or(ContractError::ContractMathError)
}

pub fn enqueue(position: &mut UserPosition, amount: i128, unlock_block: u32) {
    position.unstake_requests.push_back(UnstakeRequest {
        amount,
        unlock_block,
    });
}

/// Splits `requests` into the still locked ones, in request order, and
/// the summed amount of every request unlocked at `current_block`.
pub fn drain_matured(
    env: &Env,
    requests: &Vec<UnstakeRequest>,
    current_block: u32,
) -> Result<(Vec<UnstakeRequest>, i128), ContractError> {
    let mut locked = Vec::new(env);
    let mut matured: i128 = 0;

    for request in requests.iter() {
        if request.unlock_block <= current_block {
            matured = matured
                .checked_add(request.amount)
                .ok_or(ContractError::ContractMathError)?;
        } else {
            locked.push_back(request);
        }
    }

    Ok((locked, matured))
}
