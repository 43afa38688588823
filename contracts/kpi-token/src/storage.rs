use soroban_sdk::{contracttype, Address, Env, String, Vec};

use crate::constants::{
    BALANCE_BUMP_AMOUNT, BALANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT,
    INSTANCE_LIFETIME_THRESHOLD,
};
use crate::errors::KpiError;
use crate::types::{CampaignState, ClaimTokenMeta, Collateral, FinalizableOracle, Managers, Template};

/// Storage keys.
///
/// The campaign record lives in instance storage, claim-token balances are
/// persistent entries keyed by holder.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Creator,
    Managers,
    Template,
    Description,
    ClaimToken,
    TotalSupply,
    Collaterals,
    Oracles,
    State,
    Balance(Address),
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::State)
}

pub fn creator(env: &Env) -> Result<Address, KpiError> {
    env.storage()
        .instance()
        .get(&DataKey::Creator)
        .ok_or(KpiError::NotInitialized)
}

pub fn set_creator(env: &Env, creator: &Address) {
    env.storage().instance().set(&DataKey::Creator, creator);
}

pub fn managers(env: &Env) -> Result<Managers, KpiError> {
    env.storage()
        .instance()
        .get(&DataKey::Managers)
        .ok_or(KpiError::NotInitialized)
}

pub fn set_managers(env: &Env, managers: &Managers) {
    env.storage().instance().set(&DataKey::Managers, managers);
}

pub fn template(env: &Env) -> Result<Template, KpiError> {
    env.storage()
        .instance()
        .get(&DataKey::Template)
        .ok_or(KpiError::NotInitialized)
}

pub fn set_template(env: &Env, template: &Template) {
    env.storage().instance().set(&DataKey::Template, template);
}

pub fn description(env: &Env) -> Result<String, KpiError> {
    env.storage()
        .instance()
        .get(&DataKey::Description)
        .ok_or(KpiError::NotInitialized)
}

pub fn set_description(env: &Env, description: &String) {
    env.storage()
        .instance()
        .set(&DataKey::Description, description);
}

pub fn claim_token(env: &Env) -> Result<ClaimTokenMeta, KpiError> {
    env.storage()
        .instance()
        .get(&DataKey::ClaimToken)
        .ok_or(KpiError::NotInitialized)
}

pub fn set_claim_token(env: &Env, meta: &ClaimTokenMeta) {
    env.storage().instance().set(&DataKey::ClaimToken, meta);
}

pub fn total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn set_total_supply(env: &Env, supply: i128) {
    env.storage().instance().set(&DataKey::TotalSupply, &supply);
}

pub fn collaterals(env: &Env) -> Vec<Collateral> {
    env.storage()
        .instance()
        .get(&DataKey::Collaterals)
        .unwrap_or(Vec::new(env))
}

pub fn set_collaterals(env: &Env, collaterals: &Vec<Collateral>) {
    env.storage()
        .instance()
        .set(&DataKey::Collaterals, collaterals);
}

pub fn oracles(env: &Env) -> Vec<FinalizableOracle> {
    env.storage()
        .instance()
        .get(&DataKey::Oracles)
        .unwrap_or(Vec::new(env))
}

pub fn set_oracles(env: &Env, oracles: &Vec<FinalizableOracle>) {
    env.storage().instance().set(&DataKey::Oracles, oracles);
}

pub fn state(env: &Env) -> Result<CampaignState, KpiError> {
    env.storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(KpiError::NotInitialized)
}

pub fn set_state(env: &Env, state: &CampaignState) {
    env.storage().instance().set(&DataKey::State, state);
}

pub fn balance(env: &Env, holder: &Address) -> i128 {
    let key = DataKey::Balance(holder.clone());
    match env.storage().persistent().get::<_, i128>(&key) {
        Some(balance) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
            balance
        }
        None => 0,
    }
}

pub fn set_balance(env: &Env, holder: &Address, amount: i128) {
    let key = DataKey::Balance(holder.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
}
