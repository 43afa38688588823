//! Redemption of claim tokens against the collateral left after
//! finalization.

use soroban_sdk::{Address, Env, Vec};

use crate::claim_token;
use crate::errors::KpiError;
use crate::events;
use crate::math;
use crate::storage;
use crate::transfers;
use crate::types::Redemption;

/// Burn the holder's whole balance and pay out its share of every collateral.
///
/// Collateral amounts are frozen once the campaign is finalized, so each
/// holder is paid `amount * burned / initial_supply` against the same base.
pub fn redeem(env: &Env, holder: &Address) -> Result<Redemption, KpiError> {
    let state = storage::state(env)?;
    if !state.finalized {
        return Err(KpiError::Forbidden);
    }

    let burned = claim_token::balance(env, holder);
    if burned <= 0 {
        return Err(KpiError::Forbidden);
    }

    let meta = storage::claim_token(env)?;
    claim_token::burn(env, holder, burned)?;

    let mut payouts = Vec::new(env);
    for collateral in storage::collaterals(env).iter() {
        let payout = math::scale(
            env,
            collateral.amount,
            (burned as u128, 1),
            (meta.initial_supply as u128, 1),
        )?;
        if payout > 0 {
            transfers::push(env, &collateral.asset, holder, payout)?;
        }
        payouts.push_back(payout);
    }

    let redemption = Redemption {
        holder: holder.clone(),
        burned,
        payouts,
    };
    events::redeemed(env, &redemption);
    Ok(redemption)
}
