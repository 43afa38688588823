//! KPI Token Contract
//!
//! A creator escrows collateral behind a set of oracles, each measuring one
//! key performance indicator. When the oracles report, the shortfall against
//! each indicator's target range is reimbursed to the creator and the rest
//! stays in the contract. Claim tokens minted to the creator at setup redeem
//! pro rata against what remains once every oracle has reported.

#![no_std]

mod claim_token;
mod collateral;
mod constants;
mod errors;
mod events;
mod finalization;
mod math;
mod oracles;
mod outcome;
mod protocol_fee;
mod redemption;
mod storage;
mod transfers;
mod types;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;


use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};

pub use constants::{BPS_DENOMINATOR, CLAIM_TOKEN_DECIMALS, INVALID_ANSWER, PROTOCOL_FEE_BPS};
pub use errors::KpiError;
pub use types::{
    CampaignSnapshot, ClaimTokenSpec, Collateral, CollateralSpec, FinalizableOracle, Managers,
    OracleSpecs, Redemption, Template,
};

use types::{CampaignState, ClaimTokenMeta};

#[contract]
pub struct KpiToken;

#[contractimpl]
impl KpiToken {
    /// Set the campaign up: escrow the creator's collateral and mint the
    /// whole claim-token supply to them.
    ///
    /// # Arguments
    /// * `creator` - Campaign owner, funds the collateral (must authorize)
    /// * `managers` - Oracle factory and protocol fee authority
    /// * `template` - Template the campaign was created from
    /// * `description` - Human-readable goal, must not be empty
    /// * `collaterals` - Parallel lists of assets, amounts and minimum payouts
    /// * `claim` - Claim-token name, symbol and supply
    pub fn initialize(
        env: Env,
        creator: Address,
        managers: Managers,
        template: Template,
        description: String,
        collaterals: CollateralSpec,
        claim: ClaimTokenSpec,
    ) -> Result<(), KpiError> {
        if storage::is_initialized(&env) {
            return Err(KpiError::AlreadyInitialized);
        }
        creator.require_auth();

        if description.len() == 0 {
            return Err(KpiError::InvalidDescription);
        }
        if claim.supply <= 0 || claim.name.len() == 0 || claim.symbol.len() == 0 {
            return Err(KpiError::InvalidClaimToken);
        }
        let ledger = collateral::from_spec(&env, &collaterals)?;

        for entry in ledger.iter() {
            transfers::pull(&env, &entry.asset, &creator, entry.amount)?;
        }

        storage::set_creator(&env, &creator);
        storage::set_managers(&env, &managers);
        storage::set_template(&env, &template);
        storage::set_description(&env, &description);
        storage::set_collaterals(&env, &ledger);
        storage::set_claim_token(
            &env,
            &ClaimTokenMeta {
                name: claim.name,
                symbol: claim.symbol,
                initial_supply: claim.supply,
            },
        );
        storage::set_state(
            &env,
            &CampaignState {
                oracles_initialized: false,
                and_relationship: false,
                total_weight: 0,
                to_be_finalized: 0,
                finalized: false,
                fee_collected: false,
            },
        );
        claim_token::mint(&env, &creator, claim.supply)?;
        storage::bump_instance(&env);

        events::initialized(&env, &creator, &description, claim.supply);
        Ok(())
    }

    /// Instantiate the campaign's oracles. One-time and all-or-nothing.
    ///
    /// `and_relationship` selects how outcomes combine: with AND a single
    /// failing oracle releases everything above the floors and ends the
    /// campaign, with OR each oracle only settles its weighted share.
    pub fn register_oracles(
        env: Env,
        specs: OracleSpecs,
        and_relationship: bool,
    ) -> Result<(), KpiError> {
        let mut state = storage::state(&env)?;
        if state.oracles_initialized {
            return Err(KpiError::AlreadyInitialized);
        }
        let creator = storage::creator(&env)?;
        creator.require_auth();

        let (count, total_weight) = oracles::validate(&specs)?;
        let managers = storage::managers(&env)?;
        let registry = oracles::instantiate_all(&env, &managers.oracle_factory, &creator, &specs)?;

        state.oracles_initialized = true;
        state.and_relationship = and_relationship;
        state.total_weight = total_weight;
        state.to_be_finalized = count;
        storage::set_oracles(&env, &registry);
        storage::set_state(&env, &state);
        storage::bump_instance(&env);

        events::oracles_registered(&env, count, total_weight, and_relationship);
        Ok(())
    }

    /// Collect the one-time protocol fee into `fee_receiver`.
    pub fn collect_protocol_fee(env: Env, fee_receiver: Address) -> Result<(), KpiError> {
        let managers = storage::managers(&env)?;
        managers.fee_authority.require_auth();

        protocol_fee::collect(&env, &fee_receiver)?;
        storage::bump_instance(&env);
        Ok(())
    }

    /// Report the final answer of `oracle`. Only callable once per registered
    /// oracle and only while the campaign is pending.
    pub fn report(env: Env, oracle: Address, result: u128) -> Result<(), KpiError> {
        oracle.require_auth();

        finalization::report(&env, &oracle, result)?;
        storage::bump_instance(&env);
        Ok(())
    }

    /// Burn the holder's claim tokens for their share of the remaining
    /// collateral.
    pub fn redeem(env: Env, holder: Address) -> Result<Redemption, KpiError> {
        holder.require_auth();

        let redemption = redemption::redeem(&env, &holder)?;
        storage::bump_instance(&env);
        Ok(redemption)
    }

    // -----------------------------------------------------------------------
    // Claim token
    // -----------------------------------------------------------------------

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), KpiError> {
        from.require_auth();
        storage::state(&env)?;

        claim_token::transfer(&env, &from, &to, amount)?;
        events::transferred(&env, &from, &to, amount);
        Ok(())
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        claim_token::balance(&env, &id)
    }

    pub fn total_supply(env: Env) -> i128 {
        storage::total_supply(&env)
    }

    pub fn initial_supply(env: Env) -> Result<i128, KpiError> {
        Ok(storage::claim_token(&env)?.initial_supply)
    }

    pub fn decimals(_env: Env) -> u32 {
        CLAIM_TOKEN_DECIMALS
    }

    pub fn name(env: Env) -> Result<String, KpiError> {
        Ok(storage::claim_token(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, KpiError> {
        Ok(storage::claim_token(&env)?.symbol)
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    /// Addresses of the registered oracle instances, in registration order.
    pub fn oracles(env: Env) -> Vec<Address> {
        oracles::addresses(&env, &storage::oracles(&env))
    }

    pub fn collaterals(env: Env) -> Vec<Collateral> {
        storage::collaterals(&env)
    }

    pub fn snapshot_data(env: Env) -> Result<CampaignSnapshot, KpiError> {
        let state = storage::state(&env)?;
        let meta = storage::claim_token(&env)?;

        Ok(CampaignSnapshot {
            creator: storage::creator(&env)?,
            description: storage::description(&env)?,
            collaterals: storage::collaterals(&env),
            oracles: storage::oracles(&env),
            and_relationship: state.and_relationship,
            to_be_finalized: state.to_be_finalized,
            finalized: state.finalized,
            initial_supply: meta.initial_supply,
            total_supply: storage::total_supply(&env),
            name: meta.name,
            symbol: meta.symbol,
        })
    }

    pub fn creator(env: Env) -> Result<Address, KpiError> {
        storage::creator(&env)
    }

    pub fn description(env: Env) -> Result<String, KpiError> {
        storage::description(&env)
    }

    pub fn template(env: Env) -> Result<Template, KpiError> {
        storage::template(&env)
    }

    pub fn is_finalized(env: Env) -> bool {
        storage::state(&env).map(|s| s.finalized).unwrap_or(false)
    }

    pub fn to_be_finalized(env: Env) -> u32 {
        storage::state(&env).map(|s| s.to_be_finalized).unwrap_or(0)
    }

    pub fn total_weight(env: Env) -> u64 {
        storage::state(&env).map(|s| s.total_weight).unwrap_or(0)
    }

    pub fn fee_collected(env: Env) -> bool {
        storage::state(&env).map(|s| s.fee_collected).unwrap_or(false)
    }
}
