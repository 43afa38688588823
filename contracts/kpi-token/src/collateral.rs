//! Collateral ledger: escrowed assets and the amounts still held for
//! redemption.

use soroban_sdk::{Address, Env, Vec};

use crate::constants::{BPS_DENOMINATOR, PROTOCOL_FEE_BPS};
use crate::errors::KpiError;
use crate::math;
use crate::transfers;
use crate::types::{Collateral, CollateralSpec};

/// Validate the creator's parallel collateral lists and build the ledger.
///
/// Nothing is written or transferred here.
pub fn from_spec(env: &Env, spec: &CollateralSpec) -> Result<Vec<Collateral>, KpiError> {
    let len = spec.assets.len();
    if len == 0 || spec.amounts.len() != len || spec.minimum_payouts.len() != len {
        return Err(KpiError::InconsistentCollaterals);
    }

    let mut ledger: Vec<Collateral> = Vec::new(env);
    for i in 0..len {
        let asset = spec.assets.get(i).ok_or(KpiError::InconsistentCollaterals)?;
        let amount = spec.amounts.get(i).ok_or(KpiError::InconsistentCollaterals)?;
        let minimum_payout = spec
            .minimum_payouts
            .get(i)
            .ok_or(KpiError::InconsistentCollaterals)?;

        if amount <= 0 || minimum_payout < 0 || minimum_payout >= amount {
            return Err(KpiError::InvalidCollateral);
        }
        if ledger.iter().any(|c| c.asset == asset) {
            return Err(KpiError::DuplicatedCollateral);
        }

        ledger.push_back(Collateral {
            asset,
            amount,
            minimum_payout,
        });
    }

    Ok(ledger)
}

impl Collateral {
    /// Part of `amount` that may still be released to the creator.
    pub fn excess(&self) -> i128 {
        self.amount - self.minimum_payout
    }

    /// One-time protocol fee, capped so the floor is never touched.
    pub fn protocol_fee(&self, env: &Env) -> Result<i128, KpiError> {
        let fee = math::scale(env, self.amount, (PROTOCOL_FEE_BPS, 1), (BPS_DENOMINATOR, 1))?;
        Ok(fee.min(self.excess()))
    }
}

/// Move `amount` out of collateral `index` to `to`.
///
/// Zero amounts are skipped. Amounts above the entry's excess are rejected.
pub fn release(
    env: &Env,
    ledger: &mut Vec<Collateral>,
    index: u32,
    to: &Address,
    amount: i128,
) -> Result<(), KpiError> {
    if amount == 0 {
        return Ok(());
    }

    let mut collateral = ledger.get(index).ok_or(KpiError::InvalidCollateral)?;
    if amount < 0 || amount > collateral.excess() {
        return Err(KpiError::InvalidAmount);
    }

    collateral.amount -= amount;
    ledger.set(index, collateral.clone());

    transfers::push(env, &collateral.asset, to, amount)
}
