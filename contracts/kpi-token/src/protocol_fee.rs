use soroban_sdk::{Address, Env};

use crate::collateral;
use crate::errors::KpiError;
use crate::events;
use crate::storage;

/// Take the one-time protocol fee out of every collateral, in ledger order.
///
/// Only possible while the campaign is still open. Redemption pays holders
/// against the collateral amounts frozen at finalization, so a fee taken
/// afterwards would come out of what those payouts were computed on.
pub fn collect(env: &Env, receiver: &Address) -> Result<(), KpiError> {
    let mut state = storage::state(env)?;
    if !state.oracles_initialized {
        return Err(KpiError::OraclesNotInitialized);
    }
    if state.fee_collected {
        return Err(KpiError::FeeAlreadyCollected);
    }
    if state.finalized {
        return Err(KpiError::Forbidden);
    }

    let mut ledger = storage::collaterals(env);
    for i in 0..ledger.len() {
        let entry = ledger.get(i).ok_or(KpiError::InvalidCollateral)?;
        let fee = entry.protocol_fee(env)?;
        if fee == 0 {
            continue;
        }
        collateral::release(env, &mut ledger, i, receiver, fee)?;
        events::fee_collected(env, &entry.asset, receiver, fee);
    }

    state.fee_collected = true;
    storage::set_collaterals(env, &ledger);
    storage::set_state(env, &state);
    Ok(())
}
