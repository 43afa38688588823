//! Value-transfer service adapter over SEP-41 token contracts.
//!
//! A rejected transfer surfaces as `TransferFailed`; the host rolls the whole
//! invocation back, so ledger writes made before the transfer never persist.

use soroban_sdk::{token, Address, Env};

use crate::errors::KpiError;

/// Pull `amount` of `asset` from `from` into this contract.
pub fn pull(env: &Env, asset: &Address, from: &Address, amount: i128) -> Result<(), KpiError> {
    let client = token::Client::new(env, asset);
    match client.try_transfer(from, &env.current_contract_address(), &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(KpiError::TransferFailed),
    }
}

/// Send `amount` of `asset` held by this contract to `to`.
pub fn push(env: &Env, asset: &Address, to: &Address, amount: i128) -> Result<(), KpiError> {
    let client = token::Client::new(env, asset);
    match client.try_transfer(&env.current_contract_address(), to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(KpiError::TransferFailed),
    }
}
