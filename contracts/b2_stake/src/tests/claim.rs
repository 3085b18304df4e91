use pretty_assertions::assert_eq;
use soroban_sdk::{testutils::Address as _, Address};

use super::setup::{last_event, Setup, DEPOSIT_AMOUNT, REWARD_FUNDING};
use crate::{error::ContractError, events::Claim};

#[test]
fn claim_pays_out_pending_reward() {
    let (setup, token_b) = Setup::with_pools();
    let user = setup.funded_user(&token_b);
    setup.advance_blocks(1);
    setup.stake.deposit(&user, &1, &DEPOSIT_AMOUNT);
    setup.advance_blocks(10);

    setup.stake.claim(&user, &1);

    assert_eq!(
        last_event::<Claim>(&setup.env),
        Claim {
            user: user.clone(),
            pool_id: 1,
            amount: 400,
        }
    );
    assert_eq!(setup.balance(&setup.reward_token.address, &user), 400);
    assert_eq!(
        setup.balance(&setup.reward_token.address, &setup.stake.address),
        REWARD_FUNDING - 400
    );

    let position = setup.stake.query_stake_amount(&user, &1, &user);
    assert_eq!(position.pending_reward, 0);
    assert_eq!(position.reward_debt, 400);
    assert_eq!(position.staked_amount, DEPOSIT_AMOUNT);
}

#[test]
fn claiming_twice_in_one_block() {
    let (setup, token_b) = Setup::with_pools();
    let user = setup.funded_user(&token_b);
    setup.advance_blocks(1);
    setup.stake.deposit(&user, &1, &DEPOSIT_AMOUNT);
    setup.advance_blocks(10);

    setup.stake.claim(&user, &1);
    assert_eq!(
        setup.stake.try_claim(&user, &1),
        Err(Ok(ContractError::NoReward))
    );

    setup.advance_blocks(1);
    setup.stake.claim(&user, &1);
    assert_eq!(setup.balance(&setup.reward_token.address, &user), 440);
}

#[test]
fn claim_without_stake() {
    let (setup, _) = Setup::with_pools();
    let user = Address::generate(&setup.env);
    setup.advance_blocks(5);

    assert_eq!(
        setup.stake.try_claim(&user, &1),
        Err(Ok(ContractError::NoReward))
    );
}

#[test]
fn claim_unknown_pool() {
    let (setup, _) = Setup::with_pools();
    let user = Address::generate(&setup.env);

    assert_eq!(
        setup.stake.try_claim(&user, &7),
        Err(Ok(ContractError::PoolIdNotExist))
    );
}

#[test]
fn claim_while_paused() {
    let (setup, token_b) = Setup::with_pools();
    let user = setup.funded_user(&token_b);
    setup.advance_blocks(1);
    setup.stake.deposit(&user, &1, &DEPOSIT_AMOUNT);
    setup.advance_blocks(10);

    setup.stake.pause_claim(&setup.admin);
    assert_eq!(
        setup.stake.try_claim(&user, &1),
        Err(Ok(ContractError::ClaimAlreadyPaused))
    );

    // pausing claims leaves the rest of the staking flow alone
    setup.stake.unstake(&user, &1, &DEPOSIT_AMOUNT);

    setup.stake.unpause_claim(&setup.admin);
    setup.stake.claim(&user, &1);
    assert_eq!(setup.balance(&setup.reward_token.address, &user), 400);
}

#[test]
fn reward_survives_full_unstake() {
    let (setup, token_b) = Setup::with_pools();
    let user = setup.funded_user(&token_b);
    setup.advance_blocks(1);
    setup.stake.deposit(&user, &1, &DEPOSIT_AMOUNT);
    setup.advance_blocks(5);
    setup.stake.unstake(&user, &1, &DEPOSIT_AMOUNT);
    setup.advance_blocks(5);

    setup.stake.claim(&user, &1);

    assert_eq!(setup.balance(&setup.reward_token.address, &user), 200);
}

#[test]
fn claim_pays_the_current_reward_token() {
    let (setup, token_b) = Setup::with_pools();
    let user = setup.funded_user(&token_b);
    setup.advance_blocks(1);
    setup.stake.deposit(&user, &1, &DEPOSIT_AMOUNT);
    setup.advance_blocks(10);

    let new_reward = super::setup::deploy_token_contract(&setup.env, &setup.token_admin);
    new_reward.mint(&setup.stake.address, &REWARD_FUNDING);
    setup
        .stake
        .set_reward_token(&setup.admin, &new_reward.address);

    setup.stake.claim(&user, &1);

    assert_eq!(setup.balance(&new_reward.address, &user), 400);
    assert_eq!(setup.balance(&setup.reward_token.address, &user), 0);
}
