//! Claim-token ledger.
//!
//! Claim tokens are minted once to the creator and represent a pro-rata share
//! of whatever collateral is left when the campaign finalizes.

use soroban_sdk::{Address, Env};

use crate::errors::KpiError;
use crate::storage;

pub fn balance(env: &Env, holder: &Address) -> i128 {
    storage::balance(env, holder)
}

pub fn mint(env: &Env, to: &Address, amount: i128) -> Result<(), KpiError> {
    if amount <= 0 {
        return Err(KpiError::InvalidAmount);
    }
    let balance = storage::balance(env, to)
        .checked_add(amount)
        .ok_or(KpiError::MathOverflow)?;
    let supply = storage::total_supply(env)
        .checked_add(amount)
        .ok_or(KpiError::MathOverflow)?;

    storage::set_balance(env, to, balance);
    storage::set_total_supply(env, supply);
    Ok(())
}

pub fn burn(env: &Env, from: &Address, amount: i128) -> Result<(), KpiError> {
    if amount <= 0 {
        return Err(KpiError::InvalidAmount);
    }
    let balance = storage::balance(env, from);
    if balance < amount {
        return Err(KpiError::InsufficientBalance);
    }

    storage::set_balance(env, from, balance - amount);
    storage::set_total_supply(env, storage::total_supply(env) - amount);
    Ok(())
}

pub fn transfer(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), KpiError> {
    if amount < 0 {
        return Err(KpiError::InvalidAmount);
    }
    let from_balance = storage::balance(env, from);
    if from_balance < amount {
        return Err(KpiError::InsufficientBalance);
    }
    if from == to || amount == 0 {
        return Ok(());
    }

    let to_balance = storage::balance(env, to)
        .checked_add(amount)
        .ok_or(KpiError::MathOverflow)?;
    storage::set_balance(env, from, from_balance - amount);
    storage::set_balance(env, to, to_balance);
    Ok(())
}
