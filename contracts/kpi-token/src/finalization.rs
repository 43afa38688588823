//! Finalization state machine.
//!
//! `Pending` stays pending while oracles are outstanding and moves to
//! `Finalized` once the last one reports, or immediately when an oracle of an
//! AND-campaign fails. A finalized campaign rejects every further report.

use soroban_sdk::{log, Address, Env};

use crate::collateral;
use crate::errors::KpiError;
use crate::events;
use crate::oracles;
use crate::outcome::{self, Verdict};
use crate::storage;

pub fn report(env: &Env, oracle: &Address, result: u128) -> Result<(), KpiError> {
    let mut state = storage::state(env)?;
    if !state.oracles_initialized {
        return Err(KpiError::OraclesNotInitialized);
    }
    if state.finalized {
        return Err(KpiError::Forbidden);
    }

    let mut registry = storage::oracles(env);
    let index = oracles::find_pending(&registry, oracle).ok_or(KpiError::Forbidden)?;
    let mut record = registry.get(index).ok_or(KpiError::Forbidden)?;

    let creator = storage::creator(env)?;
    let mut ledger = storage::collaterals(env);
    let settlement = outcome::settle(
        env,
        &record,
        result,
        state.and_relationship,
        state.total_weight,
        &ledger,
    )?;

    for (i, amount) in settlement.reimbursements.iter().enumerate() {
        if amount == 0 {
            continue;
        }
        collateral::release(env, &mut ledger, i as u32, &creator, amount)?;
        if let Some(c) = ledger.get(i as u32) {
            events::reimbursed(env, &c.asset, &creator, amount);
        }
    }
    storage::set_collaterals(env, &ledger);

    if settlement.short_circuit {
        // the failing record is left untouched and the counter keeps its value
        state.finalized = true;
        storage::set_state(env, &state);
        log!(env, "and-campaign failed early", result, state.to_be_finalized);
        events::campaign_finalized(env, true);
        return Ok(());
    }

    if let Verdict::Progress { final_progress, .. } = settlement.verdict {
        record.final_progress = final_progress;
    }
    record.finalized = true;
    registry.set(index, record.clone());
    storage::set_oracles(env, &registry);
    events::oracle_finalized(env, &record.addr, result, record.final_progress);

    state.to_be_finalized = state
        .to_be_finalized
        .checked_sub(1)
        .ok_or(KpiError::Forbidden)?;
    if state.to_be_finalized == 0 {
        state.finalized = true;
        log!(env, "last oracle reported", result);
        events::campaign_finalized(env, false);
    }
    storage::set_state(env, &state);

    Ok(())
}
