use soroban_sdk::{log, Address, Env};

use crate::{
    error::ContractError,
    storage::{Config, StakeAsset},
};

pub fn validate_weight(env: &Env, weight: u64) -> Result<(), ContractError> {
    if weight == 0 {
        log!(env, "B2Stake: Pool weight must be bigger than 0");
        return Err(ContractError::InvalidPoolWeight);
    }

    Ok(())
}

pub fn validate_pool_params(
    env: &Env,
    min_deposit_amount: i128,
    unstake_locked_blocks: u32,
) -> Result<(), ContractError> {
    if min_deposit_amount <= 0 {
        log!(
            env,
            "B2Stake: Minimum deposit must be bigger than 0, got {}",
            min_deposit_amount
        );
        return Err(ContractError::InvalidMinDepositAmount);
    }
    if unstake_locked_blocks == 0 {
        log!(env, "B2Stake: Unstake lock must be at least one block");
        return Err(ContractError::InvalidUnstakeLockedBlock);
    }

    Ok(())
}

/// Pool 0 is reserved for the native asset and only pool 0 may hold it.
pub fn validate_stake_asset(
    env: &Env,
    config: &Config,
    pool_size: u32,
    stake_asset: &StakeAsset,
) -> Result<(), ContractError> {
    let is_native = match stake_asset {
        StakeAsset::Native => true,
        StakeAsset::Token(address) => *address == config.native_token,
    };

    if pool_size == 0 && *stake_asset != StakeAsset::Native {
        log!(env, "B2Stake: Add pool: the first pool must stake the native asset");
        return Err(ContractError::FirstStakePoolNotNative);
    }
    if pool_size > 0 && is_native {
        log!(env, "B2Stake: Add pool: the native asset is reserved for pool 0");
        return Err(ContractError::InvalidStakeAddress);
    }

    Ok(())
}

/// Reward accounting of a new pool starts on the next block, or at the start
/// of the emission window if that is later.
pub fn first_reward_block(current_block: u32, start_block: u32) -> Result<u32, ContractError> {
    current_block
        .checked_add(1)
        .map(|next| next.max(start_block))
        .ok_or(ContractError::ContractMathError)
}

/// `total - old_weight + new_weight`.
pub fn reweigh(total_pool_weight: u64, old_weight: u64, new_weight: u64) -> Result<u64, ContractError> {
    total_pool_weight
        .checked_sub(old_weight)
        .and_then(|rest| rest.checked_add(new_weight))
        .ok_or(ContractError::ContractMathError)
}

/// Token contract holding the principal of a pool.
pub fn custody_token(config: &Config, stake_asset: &StakeAsset) -> Address {
    match stake_asset {
        StakeAsset::Native => config.native_token.clone(),
        StakeAsset::Token(address) => address.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Address as _;
    use test_case::test_case;

    fn config(env: &Env) -> Config {
        Config {
            reward_token: Address::generate(env),
            native_token: Address::generate(env),
            start_block: 1,
            end_block: 10_000,
            reward_per_block: 50,
            withdraw_paused: false,
            claim_paused: false,
        }
    }

    #[test_case(0, 2, Err(ContractError::InvalidMinDepositAmount) ; "zero minimum deposit")]
    #[test_case(-5, 2, Err(ContractError::InvalidMinDepositAmount) ; "negative minimum deposit")]
    #[test_case(5, 0, Err(ContractError::InvalidUnstakeLockedBlock) ; "zero lock")]
    #[test_case(0, 0, Err(ContractError::InvalidMinDepositAmount) ; "minimum deposit checked before lock")]
    #[test_case(5, 2, Ok(()) ; "valid")]
    fn pool_params(min_deposit: i128, lock: u32, expected: Result<(), ContractError>) {
        let env = Env::default();
        assert_eq!(validate_pool_params(&env, min_deposit, lock), expected);
    }

    #[test]
    fn zero_weight_is_rejected() {
        let env = Env::default();
        assert_eq!(
            validate_weight(&env, 0),
            Err(ContractError::InvalidPoolWeight)
        );
        assert_eq!(validate_weight(&env, 1), Ok(()));
    }

    #[test]
    fn first_pool_must_be_native() {
        let env = Env::default();
        let config = config(&env);
        let token = StakeAsset::Token(Address::generate(&env));

        assert_eq!(
            validate_stake_asset(&env, &config, 0, &token),
            Err(ContractError::FirstStakePoolNotNative)
        );
        assert_eq!(
            validate_stake_asset(&env, &config, 0, &StakeAsset::Native),
            Ok(())
        );
        assert_eq!(validate_stake_asset(&env, &config, 1, &token), Ok(()));
    }

    #[test]
    fn native_asset_is_reserved_for_pool_zero() {
        let env = Env::default();
        let config = config(&env);
        let native_as_token = StakeAsset::Token(config.native_token.clone());

        assert_eq!(
            validate_stake_asset(&env, &config, 1, &StakeAsset::Native),
            Err(ContractError::InvalidStakeAddress)
        );
        assert_eq!(
            validate_stake_asset(&env, &config, 3, &native_as_token),
            Err(ContractError::InvalidStakeAddress)
        );
    }

    #[test_case(100, 1, 101 ; "window already open")]
    #[test_case(100, 150, 150 ; "window opens later")]
    #[test_case(100, 101, 101 ; "window opens next block")]
    fn first_reward_block_seeding(current: u32, start: u32, expected: u32) {
        assert_eq!(first_reward_block(current, start), Ok(expected));
    }

    #[test]
    fn reweigh_replaces_old_weight() {
        assert_eq!(reweigh(100, 80, 20), Ok(40));
        assert_eq!(reweigh(100, 20, 21), Ok(101));
        assert_eq!(reweigh(10, 20, 1), Err(ContractError::ContractMathError));
    }
}
