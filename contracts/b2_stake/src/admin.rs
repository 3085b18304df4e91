use soroban_sdk::{log, Address, Env};

use crate::{
    error::ContractError,
    storage::{get_admin, Config},
};

/// `sender` must sign the call and hold the admin role.
pub fn require_admin(env: &Env, sender: &Address) -> Result<(), ContractError> {
    sender.require_auth();

    if *sender != get_admin(env) {
        log!(env, "B2Stake: {} is not the admin", sender.clone());
        return Err(ContractError::Unauthorized);
    }

    Ok(())
}

// Unstake and withdraw share the withdraw switch.
pub fn ensure_withdraw_enabled(env: &Env, config: &Config) -> Result<(), ContractError> {
    if config.withdraw_paused {
        log!(env, "B2Stake: Withdraw is paused");
        return Err(ContractError::WithdrawAlreadyPaused);
    }

    Ok(())
}

pub fn ensure_claim_enabled(env: &Env, config: &Config) -> Result<(), ContractError> {
    if config.claim_paused {
        log!(env, "B2Stake: Claim is paused");
        return Err(ContractError::ClaimAlreadyPaused);
    }

    Ok(())
}
