//! Oracle registry: the oracles expected to report and their settlement
//! status.

use soroban_sdk::{Address, Env, IntoVal, Symbol, Val, Vec};

use crate::errors::KpiError;
use crate::types::{FinalizableOracle, OracleSpecs};

/// Check list lengths and every entry. Returns the number of oracles and
/// their total weight.
pub fn validate(specs: &OracleSpecs) -> Result<(u32, u64), KpiError> {
    let len = specs.templates.len();
    if len == 0
        || specs.lower_bounds.len() != len
        || specs.higher_bounds.len() != len
        || specs.funding_assets.len() != len
        || specs.funding_amounts.len() != len
        || specs.init_data.len() != len
    {
        return Err(KpiError::InconsistentArrayLengths);
    }
    if specs.weights.len() != len {
        return Err(KpiError::InconsistentWeights);
    }

    let mut total_weight: u64 = 0;
    for i in 0..len {
        let lower = specs.lower_bounds.get(i).ok_or(KpiError::InconsistentArrayLengths)?;
        let higher = specs.higher_bounds.get(i).ok_or(KpiError::InconsistentArrayLengths)?;
        if higher <= lower {
            return Err(KpiError::InvalidOracleBounds);
        }

        let weight = specs.weights.get(i).ok_or(KpiError::InconsistentWeights)?;
        if weight == 0 {
            return Err(KpiError::InvalidOracleWeights);
        }
        // Settlement multiplies the collateral excess by range * weight.
        if (higher - lower).checked_mul(weight as u128).is_none() {
            return Err(KpiError::InvalidOracleBounds);
        }
        total_weight = total_weight
            .checked_add(weight as u64)
            .ok_or(KpiError::MathOverflow)?;

        let funding = specs.funding_amounts.get(i).ok_or(KpiError::InconsistentArrayLengths)?;
        if funding < 0 {
            return Err(KpiError::InvalidAmount);
        }
    }

    Ok((len, total_weight))
}

/// Instantiate every oracle through the factory and build the registry.
///
/// `specs` must already have passed [`validate`].
pub fn instantiate_all(
    env: &Env,
    factory: &Address,
    creator: &Address,
    specs: &OracleSpecs,
) -> Result<Vec<FinalizableOracle>, KpiError> {
    let campaign = env.current_contract_address();
    let mut registry: Vec<FinalizableOracle> = Vec::new(env);

    for i in 0..specs.templates.len() {
        let template = specs.templates.get(i).ok_or(KpiError::InconsistentArrayLengths)?;
        let funding_asset = specs.funding_assets.get(i).ok_or(KpiError::InconsistentArrayLengths)?;
        let funding_amount = specs.funding_amounts.get(i).ok_or(KpiError::InconsistentArrayLengths)?;
        let init_data = specs.init_data.get(i).ok_or(KpiError::InconsistentArrayLengths)?;

        let args: Vec<Val> = Vec::from_array(
            env,
            [
                campaign.into_val(env),
                creator.into_val(env),
                template.into_val(env),
                funding_asset.into_val(env),
                funding_amount.into_val(env),
                init_data.into_val(env),
            ],
        );
        let addr: Address = env.invoke_contract(factory, &Symbol::new(env, "instantiate"), args);

        if registry.iter().any(|o| o.addr == addr) {
            return Err(KpiError::DuplicatedOracle);
        }

        registry.push_back(FinalizableOracle {
            addr,
            lower_bound: specs.lower_bounds.get(i).ok_or(KpiError::InconsistentArrayLengths)?,
            higher_bound: specs.higher_bounds.get(i).ok_or(KpiError::InconsistentArrayLengths)?,
            final_progress: 0,
            weight: specs.weights.get(i).ok_or(KpiError::InconsistentWeights)?,
            finalized: false,
        });
    }

    Ok(registry)
}

/// Index of the not-yet-finalized record belonging to `addr`.
pub fn find_pending(registry: &Vec<FinalizableOracle>, addr: &Address) -> Option<u32> {
    registry
        .iter()
        .position(|o| !o.finalized && o.addr == *addr)
        .map(|i| i as u32)
}

pub fn addresses(env: &Env, registry: &Vec<FinalizableOracle>) -> Vec<Address> {
    let mut out = Vec::new(env);
    for oracle in registry.iter() {
        out.push_back(oracle.addr);
    }
    out
}
