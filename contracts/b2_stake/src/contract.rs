use b2::utils::AdminChange;
use soroban_sdk::{
    contract, contractimpl, contractmeta, log, panic_with_error, token, Address, BytesN, Env,
};

use crate::{
    accumulator, admin,
    error::ContractError,
    events, ledger, queue, registry,
    storage::{
        get_admin, get_config, get_pending_admin, get_pool, get_pool_size, get_position,
        get_total_pool_weight, push_pool, remove_pending_admin, save_admin, save_config,
        save_pending_admin, save_pool, save_position, save_total_pool_weight, Config, Pool,
        StakeAsset, UserPosition, NATIVE_POOL_ID,
    },
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "B2 multi pool staking with block based rewards"
);

#[contract]
pub struct B2Stake;

pub trait B2StakeTrait {
    // ADMIN

    fn add_pool(
        env: Env,
        sender: Address,
        stake_asset: StakeAsset,
        weight: u64,
        min_deposit_amount: i128,
        unstake_locked_blocks: u32,
        with_update: bool,
    ) -> Result<u32, ContractError>;

    fn update_pool(
        env: Env,
        sender: Address,
        pool_id: u32,
        min_deposit_amount: i128,
        unstake_locked_blocks: u32,
    ) -> Result<(), ContractError>;

    fn set_pool_weight(
        env: Env,
        sender: Address,
        pool_id: u32,
        weight: u64,
        with_update: bool,
    ) -> Result<(), ContractError>;

    fn set_reward_token(env: Env, sender: Address, reward_token: Address)
        -> Result<(), ContractError>;

    fn set_start_block(env: Env, sender: Address, start_block: u32) -> Result<(), ContractError>;

    fn set_end_block(env: Env, sender: Address, end_block: u32) -> Result<(), ContractError>;

    fn set_reward_per_block(
        env: Env,
        sender: Address,
        reward_per_block: i128,
    ) -> Result<(), ContractError>;

    fn pause_withdraw(env: Env, sender: Address) -> Result<(), ContractError>;

    fn unpause_withdraw(env: Env, sender: Address) -> Result<(), ContractError>;

    fn pause_claim(env: Env, sender: Address) -> Result<(), ContractError>;

    fn unpause_claim(env: Env, sender: Address) -> Result<(), ContractError>;

    fn propose_admin(
        env: Env,
        new_admin: Address,
        time_limit: Option<u64>,
    ) -> Result<Address, ContractError>;

    fn revoke_admin_change(env: Env) -> Result<(), ContractError>;

    fn accept_admin(env: Env) -> Result<Address, ContractError>;

    fn upgrade(env: Env, new_wasm_hash: BytesN<32>);

    // POOL REWARDS

    fn update_pool_reward(env: Env, pool_id: u32) -> Result<(), ContractError>;

    fn mass_update_pools(env: Env) -> Result<(), ContractError>;

    // STAKING

    fn deposit(env: Env, sender: Address, pool_id: u32, amount: i128) -> Result<(), ContractError>;

    fn deposit_native(env: Env, sender: Address, amount: i128) -> Result<(), ContractError>;

    fn unstake(env: Env, sender: Address, pool_id: u32, amount: i128) -> Result<(), ContractError>;

    fn withdraw(env: Env, sender: Address, pool_id: u32) -> Result<(), ContractError>;

    fn claim(env: Env, sender: Address, pool_id: u32) -> Result<(), ContractError>;

    // QUERIES

    fn query_config(env: Env) -> Config;

    fn query_admin(env: Env) -> Address;

    fn query_reward_token(env: Env) -> Address;

    fn query_start_block(env: Env) -> u32;

    fn query_end_block(env: Env) -> u32;

    fn query_reward_per_block(env: Env) -> i128;

    fn query_withdraw_paused(env: Env) -> bool;

    fn query_claim_paused(env: Env) -> bool;

    fn query_pool(env: Env, pool_id: u32) -> Result<Pool, ContractError>;

    fn query_pool_size(env: Env) -> u32;

    fn query_total_pool_weight(env: Env) -> u64;

    fn query_stake_amount(
        env: Env,
        caller: Address,
        pool_id: u32,
        account: Address,
    ) -> Result<UserPosition, ContractError>;

    fn query_pending_reward(
        env: Env,
        caller: Address,
        pool_id: u32,
        account: Address,
    ) -> Result<i128, ContractError>;
}

#[contractimpl]
impl B2Stake {
    pub fn __constructor(
        env: Env,
        admin: Address,
        reward_token: Address,
        native_token: Address,
        start_block: u32,
        end_block: u32,
        reward_per_block: i128,
    ) {
        if start_block > end_block {
            log!(
                &env,
                "B2Stake: Initialize: start block {} is after end block {}",
                start_block,
                end_block
            );
            panic_with_error!(&env, ContractError::EndLessThanStart);
        }
        if reward_per_block <= 0 {
            log!(&env, "B2Stake: Initialize: reward per block must be bigger than 0");
            panic_with_error!(&env, ContractError::InvalidB2PerBlock);
        }

        save_admin(&env, &admin);
        save_config(
            &env,
            &Config {
                reward_token: reward_token.clone(),
                native_token,
                start_block,
                end_block,
                reward_per_block,
                withdraw_paused: false,
                claim_paused: false,
            },
        );
        save_total_pool_weight(&env, 0);

        env.events()
            .publish(("initialize", "B2 staking contract"), reward_token);
    }
}

#[contractimpl]
impl B2StakeTrait for B2Stake {
    fn add_pool(
        env: Env,
        sender: Address,
        stake_asset: StakeAsset,
        weight: u64,
        min_deposit_amount: i128,
        unstake_locked_blocks: u32,
        with_update: bool,
    ) -> Result<u32, ContractError> {
        admin::require_admin(&env, &sender)?;

        registry::validate_weight(&env, weight)?;
        registry::validate_pool_params(&env, min_deposit_amount, unstake_locked_blocks)?;

        let config = get_config(&env);
        let current_block = env.ledger().sequence();
        if current_block > config.end_block {
            log!(
                &env,
                "B2Stake: Add pool: current block {} is past the end block {}",
                current_block,
                config.end_block
            );
            return Err(ContractError::ExceedEndBlock);
        }

        registry::validate_stake_asset(&env, &config, get_pool_size(&env), &stake_asset)?;

        if with_update {
            accumulator::mass_update_pools(&env)?;
        }

        let pool = Pool {
            stake_asset,
            weight,
            last_reward_block: registry::first_reward_block(current_block, config.start_block)?,
            min_deposit_amount,
            unstake_locked_blocks,
            acc_reward_per_share: 0,
            total_staked: 0,
        };
        let pool_id = push_pool(&env, &pool)?;

        let total_pool_weight = get_total_pool_weight(&env)
            .checked_add(weight)
            .ok_or(ContractError::ContractMathError)?;
        save_total_pool_weight(&env, total_pool_weight);

        events::pool_added(&env, pool_id, &pool);

        Ok(pool_id)
    }

    fn update_pool(
        env: Env,
        sender: Address,
        pool_id: u32,
        min_deposit_amount: i128,
        unstake_locked_blocks: u32,
    ) -> Result<(), ContractError> {
        admin::require_admin(&env, &sender)?;

        let mut pool = get_pool(&env, pool_id)?;
        registry::validate_pool_params(&env, min_deposit_amount, unstake_locked_blocks)?;

        pool.min_deposit_amount = min_deposit_amount;
        pool.unstake_locked_blocks = unstake_locked_blocks;
        save_pool(&env, pool_id, &pool);

        events::pool_updated(&env, pool_id, &pool);

        Ok(())
    }

    fn set_pool_weight(
        env: Env,
        sender: Address,
        pool_id: u32,
        weight: u64,
        with_update: bool,
    ) -> Result<(), ContractError> {
        admin::require_admin(&env, &sender)?;

        let mut pool = get_pool(&env, pool_id)?;
        registry::validate_weight(&env, weight)?;

        // past blocks are credited at the old weight
        if with_update {
            accumulator::refresh(&env, pool_id, &mut pool)?;
        }

        let total_pool_weight = registry::reweigh(get_total_pool_weight(&env), pool.weight, weight)?;
        pool.weight = weight;

        save_pool(&env, pool_id, &pool);
        save_total_pool_weight(&env, total_pool_weight);

        events::set_pool_weight(&env, pool_id, weight, total_pool_weight);

        Ok(())
    }

    fn set_reward_token(
        env: Env,
        sender: Address,
        reward_token: Address,
    ) -> Result<(), ContractError> {
        admin::require_admin(&env, &sender)?;

        let mut config = get_config(&env);
        config.reward_token = reward_token.clone();
        save_config(&env, &config);

        env.events().publish(("set", "reward_token"), reward_token);

        Ok(())
    }

    fn set_start_block(env: Env, sender: Address, start_block: u32) -> Result<(), ContractError> {
        admin::require_admin(&env, &sender)?;

        let mut config = get_config(&env);
        if start_block > config.end_block {
            log!(
                &env,
                "B2Stake: Set start block: {} is after end block {}",
                start_block,
                config.end_block
            );
            return Err(ContractError::EndLessThanStart);
        }
        config.start_block = start_block;
        save_config(&env, &config);

        env.events().publish(("set", "start_block"), start_block);

        Ok(())
    }

    fn set_end_block(env: Env, sender: Address, end_block: u32) -> Result<(), ContractError> {
        admin::require_admin(&env, &sender)?;

        let mut config = get_config(&env);
        if config.start_block > end_block {
            log!(
                &env,
                "B2Stake: Set end block: {} is before start block {}",
                end_block,
                config.start_block
            );
            return Err(ContractError::EndLessThanStart);
        }
        config.end_block = end_block;
        save_config(&env, &config);

        env.events().publish(("set", "end_block"), end_block);

        Ok(())
    }

    fn set_reward_per_block(
        env: Env,
        sender: Address,
        reward_per_block: i128,
    ) -> Result<(), ContractError> {
        admin::require_admin(&env, &sender)?;

        if reward_per_block <= 0 {
            log!(
                &env,
                "B2Stake: Set reward per block: must be bigger than 0, got {}",
                reward_per_block
            );
            return Err(ContractError::InvalidB2PerBlock);
        }

        let mut config = get_config(&env);
        config.reward_per_block = reward_per_block;
        save_config(&env, &config);

        env.events()
            .publish(("set", "reward_per_block"), reward_per_block);

        Ok(())
    }

    fn pause_withdraw(env: Env, sender: Address) -> Result<(), ContractError> {
        set_switches(&env, &sender, Some(true), None)
    }

    fn unpause_withdraw(env: Env, sender: Address) -> Result<(), ContractError> {
        set_switches(&env, &sender, Some(false), None)
    }

    fn pause_claim(env: Env, sender: Address) -> Result<(), ContractError> {
        set_switches(&env, &sender, None, Some(true))
    }

    fn unpause_claim(env: Env, sender: Address) -> Result<(), ContractError> {
        set_switches(&env, &sender, None, Some(false))
    }

    fn propose_admin(
        env: Env,
        new_admin: Address,
        time_limit: Option<u64>,
    ) -> Result<Address, ContractError> {
        let current_admin = get_admin(&env);
        current_admin.require_auth();

        if current_admin == new_admin {
            log!(&env, "B2Stake: Propose admin: new admin is the current admin");
            return Err(ContractError::SameAdmin);
        }

        save_pending_admin(
            &env,
            &AdminChange {
                new_admin: new_admin.clone(),
                time_limit,
            },
        );

        env.events()
            .publish(("propose_admin", "new_admin"), new_admin.clone());

        Ok(new_admin)
    }

    fn revoke_admin_change(env: Env) -> Result<(), ContractError> {
        let current_admin = get_admin(&env);
        current_admin.require_auth();

        if get_pending_admin(&env).is_none() {
            log!(&env, "B2Stake: Revoke admin change: no admin change in place");
            return Err(ContractError::NoAdminChangeInPlace);
        }
        remove_pending_admin(&env);

        env.events()
            .publish(("revoke_admin_change", "current_admin"), current_admin);

        Ok(())
    }

    fn accept_admin(env: Env) -> Result<Address, ContractError> {
        let Some(change) = get_pending_admin(&env) else {
            log!(&env, "B2Stake: Accept admin: no admin change in place");
            return Err(ContractError::NoAdminChangeInPlace);
        };
        change.new_admin.require_auth();

        if change.is_expired(env.ledger().timestamp()) {
            log!(&env, "B2Stake: Accept admin: admin change expired");
            return Err(ContractError::AdminChangeExpired);
        }

        remove_pending_admin(&env);
        save_admin(&env, &change.new_admin);

        env.events()
            .publish(("accept_admin", "new_admin"), change.new_admin.clone());

        Ok(change.new_admin)
    }

    fn upgrade(env: Env, new_wasm_hash: BytesN<32>) {
        let admin = get_admin(&env);
        admin.require_auth();

        env.deployer().update_current_contract_wasm(new_wasm_hash);
    }

    fn update_pool_reward(env: Env, pool_id: u32) -> Result<(), ContractError> {
        accumulator::refresh_stored(&env, pool_id)?;

        Ok(())
    }

    fn mass_update_pools(env: Env) -> Result<(), ContractError> {
        accumulator::mass_update_pools(&env)
    }

    fn deposit(env: Env, sender: Address, pool_id: u32, amount: i128) -> Result<(), ContractError> {
        sender.require_auth();

        let pool = get_pool(&env, pool_id)?;
        if pool_id == NATIVE_POOL_ID {
            log!(&env, "B2Stake: Deposit: use deposit_native for the native pool");
            return Err(ContractError::DepositNotSupportNative);
        }

        stake_into_pool(&env, &sender, pool_id, pool, amount)
    }

    fn deposit_native(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        sender.require_auth();

        let pool = get_pool(&env, NATIVE_POOL_ID)?;

        stake_into_pool(&env, &sender, NATIVE_POOL_ID, pool, amount)
    }

    fn unstake(env: Env, sender: Address, pool_id: u32, amount: i128) -> Result<(), ContractError> {
        sender.require_auth();

        let mut pool = get_pool(&env, pool_id)?;
        admin::ensure_withdraw_enabled(&env, &get_config(&env))?;

        if amount < 0 {
            log!(&env, "B2Stake: Unstake: amount {} is negative", amount);
            return Err(ContractError::NegativeInputProvided);
        }

        let mut position = get_position(&env, pool_id, &sender);
        if position.staked_amount == 0 {
            log!(&env, "B2Stake: Unstake: nothing staked in pool {}", pool_id);
            return Err(ContractError::NotStaked);
        }
        if amount > position.staked_amount {
            log!(
                &env,
                "B2Stake: Unstake: trying to unstake {} with only {} staked",
                amount,
                position.staked_amount
            );
            return Err(ContractError::UnstakeExceedStakeAmount);
        }

        accumulator::refresh(&env, pool_id, &mut pool)?;
        ledger::settle(&mut position, pool.acc_reward_per_share)?;
        ledger::debit(&mut position, &mut pool, amount)?;

        let unlock_block =
            queue::unlock_block(env.ledger().sequence(), pool.unstake_locked_blocks)?;
        queue::enqueue(&mut position, amount, unlock_block);

        save_pool(&env, pool_id, &pool);
        save_position(&env, pool_id, &sender, &position);

        events::unstake(&env, &sender, pool_id, amount, position.staked_amount);

        Ok(())
    }

    fn withdraw(env: Env, sender: Address, pool_id: u32) -> Result<(), ContractError> {
        sender.require_auth();

        let pool = get_pool(&env, pool_id)?;
        let config = get_config(&env);
        admin::ensure_withdraw_enabled(&env, &config)?;

        let mut position = get_position(&env, pool_id, &sender);
        if position.unstake_requests.is_empty() {
            log!(&env, "B2Stake: Withdraw: no unstake request in pool {}", pool_id);
            return Err(ContractError::NoUnstakeRequest);
        }

        // requests that are still locked stay queued, an early call moves nothing
        let current_block = env.ledger().sequence();
        let (locked, amount) =
            queue::drain_matured(&env, &position.unstake_requests, current_block)?;
        position.unstake_requests = locked;
        save_position(&env, pool_id, &sender, &position);

        if amount > 0 {
            token::Client::new(&env, &registry::custody_token(&config, &pool.stake_asset))
                .transfer(&env.current_contract_address(), &sender, &amount);
        }

        events::withdraw(&env, &sender, pool_id, amount, current_block);

        Ok(())
    }

    fn claim(env: Env, sender: Address, pool_id: u32) -> Result<(), ContractError> {
        sender.require_auth();

        let mut pool = get_pool(&env, pool_id)?;
        let config = get_config(&env);
        admin::ensure_claim_enabled(&env, &config)?;

        accumulator::refresh(&env, pool_id, &mut pool)?;

        let mut position = get_position(&env, pool_id, &sender);
        ledger::settle(&mut position, pool.acc_reward_per_share)?;
        ledger::sync_reward_debt(&mut position, pool.acc_reward_per_share)?;

        let amount = position.pending_reward;
        if amount <= 0 {
            log!(&env, "B2Stake: Claim: no reward in pool {}", pool_id);
            return Err(ContractError::NoReward);
        }
        position.pending_reward = 0;

        save_pool(&env, pool_id, &pool);
        save_position(&env, pool_id, &sender, &position);

        token::Client::new(&env, &config.reward_token).transfer(
            &env.current_contract_address(),
            &sender,
            &amount,
        );

        events::claim(&env, &sender, pool_id, amount);

        Ok(())
    }

    fn query_config(env: Env) -> Config {
        get_config(&env)
    }

    fn query_admin(env: Env) -> Address {
        get_admin(&env)
    }

    fn query_reward_token(env: Env) -> Address {
        get_config(&env).reward_token
    }

    fn query_start_block(env: Env) -> u32 {
        get_config(&env).start_block
    }

    fn query_end_block(env: Env) -> u32 {
        get_config(&env).end_block
    }

    fn query_reward_per_block(env: Env) -> i128 {
        get_config(&env).reward_per_block
    }

    fn query_withdraw_paused(env: Env) -> bool {
        get_config(&env).withdraw_paused
    }

    fn query_claim_paused(env: Env) -> bool {
        get_config(&env).claim_paused
    }

    fn query_pool(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        get_pool(&env, pool_id)
    }

    fn query_pool_size(env: Env) -> u32 {
        get_pool_size(&env)
    }

    fn query_total_pool_weight(env: Env) -> u64 {
        get_total_pool_weight(&env)
    }

    fn query_stake_amount(
        env: Env,
        caller: Address,
        pool_id: u32,
        account: Address,
    ) -> Result<UserPosition, ContractError> {
        ensure_account_self(&env, &caller, &account)?;
        get_pool(&env, pool_id)?;

        Ok(get_position(&env, pool_id, &account))
    }

    fn query_pending_reward(
        env: Env,
        caller: Address,
        pool_id: u32,
        account: Address,
    ) -> Result<i128, ContractError> {
        ensure_account_self(&env, &caller, &account)?;
        let mut pool = get_pool(&env, pool_id)?;

        // a pool whose rewards start in the future has nothing new to add
        let current_block = env.ledger().sequence();
        if current_block >= pool.last_reward_block {
            let config = get_config(&env);
            accumulator::advance(
                &mut pool,
                current_block,
                config.end_block,
                config.reward_per_block,
                get_total_pool_weight(&env),
            )?;
        }

        ledger::pending_at(
            &get_position(&env, pool_id, &account),
            pool.acc_reward_per_share,
        )
    }
}

/// Shared tail of `deposit` and `deposit_native`.
fn stake_into_pool(
    env: &Env,
    sender: &Address,
    pool_id: u32,
    mut pool: Pool,
    amount: i128,
) -> Result<(), ContractError> {
    if amount < pool.min_deposit_amount {
        log!(
            env,
            "B2Stake: Deposit: trying to deposit {} which is less than the minimum {}",
            amount,
            pool.min_deposit_amount
        );
        return Err(ContractError::DepositTooSmall);
    }

    accumulator::refresh(env, pool_id, &mut pool)?;

    let mut position = get_position(env, pool_id, sender);
    ledger::settle(&mut position, pool.acc_reward_per_share)?;

    let config = get_config(env);
    token::Client::new(env, &registry::custody_token(&config, &pool.stake_asset)).transfer(
        sender,
        &env.current_contract_address(),
        &amount,
    );

    ledger::credit(&mut position, &mut pool, amount)?;

    save_pool(env, pool_id, &pool);
    save_position(env, pool_id, sender, &position);

    events::deposit(env, sender, pool_id, amount, pool.total_staked);

    Ok(())
}

fn set_switches(
    env: &Env,
    sender: &Address,
    withdraw_paused: Option<bool>,
    claim_paused: Option<bool>,
) -> Result<(), ContractError> {
    admin::require_admin(env, sender)?;

    let mut config = get_config(env);
    if let Some(paused) = withdraw_paused {
        config.withdraw_paused = paused;
        env.events().publish(("switch", "withdraw_paused"), paused);
    }
    if let Some(paused) = claim_paused {
        config.claim_paused = paused;
        env.events().publish(("switch", "claim_paused"), paused);
    }
    save_config(env, &config);

    Ok(())
}

fn ensure_account_self(env: &Env, caller: &Address, account: &Address) -> Result<(), ContractError> {
    caller.require_auth();

    if caller != account {
        log!(env, "B2Stake: Positions can only be read by their owner");
        return Err(ContractError::NotAccountSelf);
    }

    Ok(())
}
