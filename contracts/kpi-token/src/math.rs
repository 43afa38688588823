//! 256-bit fixed-point helpers.
//!
//! Reimbursement and payout formulas multiply up to three 128-bit factors
//! before dividing, so intermediates are carried in host `U256`. Truncation
//! happens once, in the final division.

use soroban_sdk::{Env, U256};

use crate::errors::KpiError;

/// `value * (num_a * num_b) / (den_a * den_b)`, evaluated as
/// `((value * num_a) * num_b) / (den_a * den_b)`.
///
/// Callers guarantee the fraction is at most one, so the quotient always fits
/// back into `i128`. The numerator factors must fit in 256 bits together:
/// when their bit lengths add up past 256 the call fails with `MathOverflow`
/// instead of trapping in the host.
pub fn scale(
    env: &Env,
    value: i128,
    numerators: (u128, u128),
    denominators: (u128, u128),
) -> Result<i128, KpiError> {
    let value = u128::try_from(value).map_err(|_| KpiError::MathOverflow)?;
    if denominators.0 == 0 || denominators.1 == 0 {
        return Err(KpiError::MathOverflow);
    }

    if bits(value) + bits(numerators.0) + bits(numerators.1) > 256 {
        return Err(KpiError::MathOverflow);
    }

    let numerator = U256::from_u128(env, value)
        .mul(&U256::from_u128(env, numerators.0))
        .mul(&U256::from_u128(env, numerators.1));
    let denominator =
        U256::from_u128(env, denominators.0).mul(&U256::from_u128(env, denominators.1));

    numerator
        .div(&denominator)
        .to_u128()
        .and_then(|q| i128::try_from(q).ok())
        .ok_or(KpiError::MathOverflow)
}

fn bits(x: u128) -> u32 {
    u128::BITS - x.leading_zeros()
}
