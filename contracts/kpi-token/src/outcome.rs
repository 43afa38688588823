//! Outcome combinator.
//!
//! Turns one oracle's answer into the amount of each collateral released back
//! to the creator. All formulas work on `amount - minimum_payout`, so the
//! floor of a collateral can never be reimbursed away.

use soroban_sdk::{Env, Vec};

use crate::constants::INVALID_ANSWER;
use crate::errors::KpiError;
use crate::math;
use crate::types::{Collateral, FinalizableOracle};

/// How an oracle's answer is read against its range.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verdict {
    /// Below the lower bound, or the oracle could not answer.
    Failed,
    /// Progress inside `[0, full_range]`, saturated at the higher bound.
    Progress { final_progress: u128, full_range: u128 },
}

impl Verdict {
    pub fn of(oracle: &FinalizableOracle, result: u128) -> Self {
        if result == INVALID_ANSWER || result < oracle.lower_bound {
            return Verdict::Failed;
        }
        let full_range = oracle.higher_bound - oracle.lower_bound;
        let final_progress = result.min(oracle.higher_bound) - oracle.lower_bound;
        Verdict::Progress {
            final_progress,
            full_range,
        }
    }
}

/// What a single report does to the campaign.
#[derive(Clone, Debug)]
pub struct Settlement {
    pub verdict: Verdict,
    /// Amount released to the creator per collateral, in ledger order.
    pub reimbursements: Vec<i128>,
    /// An AND-campaign failure that ends the campaign on the spot.
    pub short_circuit: bool,
}

pub fn settle(
    env: &Env,
    oracle: &FinalizableOracle,
    result: u128,
    and_relationship: bool,
    total_weight: u64,
    ledger: &Vec<Collateral>,
) -> Result<Settlement, KpiError> {
    let verdict = Verdict::of(oracle, result);
    let weight = oracle.weight as u128;
    let total_weight = total_weight as u128;
    let short_circuit = verdict == Verdict::Failed && and_relationship;

    let mut reimbursements = Vec::new(env);
    for collateral in ledger.iter() {
        let excess = collateral.excess();
        let amount = match verdict {
            Verdict::Failed if and_relationship => excess,
            Verdict::Failed => math::scale(env, excess, (weight, 1), (1, total_weight))?,
            Verdict::Progress {
                final_progress,
                full_range,
            } if final_progress < full_range => math::scale(
                env,
                excess,
                (weight, full_range - final_progress),
                (full_range, total_weight),
            )?,
            Verdict::Progress { .. } => 0,
        };
        reimbursements.push_back(amount);
    }

    Ok(Settlement {
        verdict,
        reimbursements,
        short_circuit,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::{testutils::Address as _, vec, Address};

    fn oracle(env: &Env, lower: u128, higher: u128, weight: u32) -> FinalizableOracle {
        FinalizableOracle {
            addr: Address::generate(env),
            lower_bound: lower,
            higher_bound: higher,
            final_progress: 0,
            weight,
            finalized: false,
        }
    }

    fn ledger(env: &Env, amount: i128, minimum_payout: i128) -> Vec<Collateral> {
        vec![
            env,
            Collateral {
                asset: Address::generate(env),
                amount,
                minimum_payout,
            },
        ]
    }

    #[test]
    fn reads_verdicts() {
        let env = Env::default();
        let o = oracle(&env, 10, 110, 1);

        assert_eq!(Verdict::of(&o, 9), Verdict::Failed);
        assert_eq!(Verdict::of(&o, INVALID_ANSWER), Verdict::Failed);
        assert_eq!(
            Verdict::of(&o, 10),
            Verdict::Progress { final_progress: 0, full_range: 100 }
        );
        assert_eq!(
            Verdict::of(&o, 60),
            Verdict::Progress { final_progress: 50, full_range: 100 }
        );
        assert_eq!(
            Verdict::of(&o, 5_000),
            Verdict::Progress { final_progress: 100, full_range: 100 }
        );
    }

    #[test]
    fn partial_progress_releases_the_missing_fraction() {
        let env = Env::default();
        let s = settle(&env, &oracle(&env, 0, 100, 1), 50, false, 1, &ledger(&env, 1000, 100)).unwrap();

        assert_eq!(s.reimbursements, vec![&env, 450]);
        assert!(!s.short_circuit);
    }

    #[test]
    fn progress_at_lower_bound_releases_the_whole_weighted_share() {
        let env = Env::default();
        let s = settle(&env, &oracle(&env, 0, 100, 1), 0, false, 4, &ledger(&env, 1000, 100)).unwrap();

        // 900 * 1 * 100 / (100 * 4)
        assert_eq!(s.reimbursements, vec![&env, 225]);
    }

    #[test]
    fn full_success_releases_nothing() {
        let env = Env::default();
        let s = settle(&env, &oracle(&env, 0, 100, 3), 100, true, 4, &ledger(&env, 1000, 100)).unwrap();

        assert_eq!(s.reimbursements, vec![&env, 0]);
        assert!(!s.short_circuit);
    }

    #[test]
    fn or_failure_releases_the_weighted_share() {
        let env = Env::default();
        let s = settle(&env, &oracle(&env, 0, 100, 1), INVALID_ANSWER, false, 3, &ledger(&env, 1000, 100)).unwrap();

        assert_eq!(s.reimbursements, vec![&env, 300]);
        assert_eq!(s.verdict, Verdict::Failed);
        assert!(!s.short_circuit);
    }

    #[test]
    fn and_failure_releases_everything_above_the_floor() {
        let env = Env::default();
        let s = settle(&env, &oracle(&env, 10, 100, 1), 3, true, 4, &ledger(&env, 1000, 100)).unwrap();

        assert_eq!(s.reimbursements, vec![&env, 900]);
        assert!(s.short_circuit);
    }

    #[test]
    fn truncates_after_multiplying() {
        let env = Env::default();
        // 999 * 2 * 2 / (3 * 5) = 266.4
        let s = settle(&env, &oracle(&env, 0, 3, 2), 1, false, 5, &ledger(&env, 1000, 1)).unwrap();

        assert_eq!(s.reimbursements, vec![&env, 266]);
    }
}
