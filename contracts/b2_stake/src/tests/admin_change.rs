use b2::utils::AdminChange;
use pretty_assertions::assert_eq;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    Address,
};

use super::setup::{Setup, MIN_DEPOSIT_AMOUNT, POOL_WEIGHT, UNSTAKE_LOCKED_BLOCKS};
use crate::{
    error::ContractError,
    storage::{StakeAsset, PENDING_ADMIN},
};

fn pending_admin(setup: &Setup) -> Option<AdminChange> {
    setup.env.as_contract(&setup.stake.address, || {
        setup.env.storage().instance().get(&PENDING_ADMIN)
    })
}

#[test]
fn propose_admin() {
    let setup = Setup::new();
    let new_admin = Address::generate(&setup.env);

    let result = setup.stake.propose_admin(&new_admin, &None);
    assert_eq!(result, new_admin);

    let pending = pending_admin(&setup).unwrap();
    assert_eq!(pending.new_admin, new_admin);
    assert_eq!(pending.time_limit, None);
    assert_eq!(setup.stake.query_admin(), setup.admin);
}

#[test]
fn propose_current_admin_fails() {
    let setup = Setup::new();

    assert_eq!(
        setup.stake.try_propose_admin(&setup.admin, &None),
        Err(Ok(ContractError::SameAdmin))
    );
    assert!(pending_admin(&setup).is_none());
}

#[test]
fn accept_admin_hands_over_admin_rights() {
    let setup = Setup::new();
    let new_admin = Address::generate(&setup.env);

    setup.stake.propose_admin(&new_admin, &None);
    assert_eq!(setup.stake.accept_admin(), new_admin);

    assert_eq!(setup.stake.query_admin(), new_admin);
    assert!(pending_admin(&setup).is_none());

    assert_eq!(
        setup.stake.try_add_pool(
            &setup.admin,
            &StakeAsset::Native,
            &POOL_WEIGHT,
            &MIN_DEPOSIT_AMOUNT,
            &UNSTAKE_LOCKED_BLOCKS,
            &false,
        ),
        Err(Ok(ContractError::Unauthorized))
    );
    setup.stake.add_pool(
        &new_admin,
        &StakeAsset::Native,
        &POOL_WEIGHT,
        &MIN_DEPOSIT_AMOUNT,
        &UNSTAKE_LOCKED_BLOCKS,
        &false,
    );
}

#[test]
fn accept_admin_without_proposal() {
    let setup = Setup::new();

    assert_eq!(
        setup.stake.try_accept_admin(),
        Err(Ok(ContractError::NoAdminChangeInPlace))
    );
    assert_eq!(setup.stake.query_admin(), setup.admin);
}

#[test]
fn accept_admin_after_time_limit() {
    let setup = Setup::new();
    let new_admin = Address::generate(&setup.env);

    let time_limit = 1_000u64;
    setup.stake.propose_admin(&new_admin, &Some(time_limit));
    setup.env.ledger().set_timestamp(time_limit + 100);

    assert_eq!(
        setup.stake.try_accept_admin(),
        Err(Ok(ContractError::AdminChangeExpired))
    );
    assert_eq!(setup.stake.query_admin(), setup.admin);
}

#[test]
fn accept_admin_within_time_limit() {
    let setup = Setup::new();
    let new_admin = Address::generate(&setup.env);

    setup.stake.propose_admin(&new_admin, &Some(1_500));
    setup.env.ledger().set_timestamp(1_500);

    assert_eq!(setup.stake.accept_admin(), new_admin);
    assert_eq!(setup.stake.query_admin(), new_admin);
}

#[test]
fn revoke_admin_change() {
    let setup = Setup::new();
    let new_admin = Address::generate(&setup.env);

    setup.stake.propose_admin(&new_admin, &None);
    setup.stake.revoke_admin_change();

    assert!(pending_admin(&setup).is_none());
    assert_eq!(
        setup.stake.try_accept_admin(),
        Err(Ok(ContractError::NoAdminChangeInPlace))
    );
}

#[test]
fn revoke_without_proposal() {
    let setup = Setup::new();

    assert_eq!(
        setup.stake.try_revoke_admin_change(),
        Err(Ok(ContractError::NoAdminChangeInPlace))
    );
}
