use soroban_sdk::{symbol_short, Address, Env, String};

use crate::types::Redemption;

pub fn initialized(env: &Env, creator: &Address, description: &String, supply: i128) {
    env.events().publish(
        (symbol_short!("init"),),
        (creator.clone(), description.clone(), supply),
    );
}

pub fn oracles_registered(env: &Env, count: u32, total_weight: u64, and_relationship: bool) {
    env.events().publish(
        (symbol_short!("orc_reg"),),
        (count, total_weight, and_relationship),
    );
}

pub fn fee_collected(env: &Env, asset: &Address, receiver: &Address, fee: i128) {
    env.events().publish(
        (symbol_short!("fee_col"), asset.clone()),
        (receiver.clone(), fee),
    );
}

pub fn reimbursed(env: &Env, asset: &Address, creator: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("reimburse"), asset.clone()),
        (creator.clone(), amount),
    );
}

pub fn oracle_finalized(env: &Env, oracle: &Address, result: u128, final_progress: u128) {
    env.events().publish(
        (symbol_short!("orc_fin"), oracle.clone()),
        (result, final_progress),
    );
}

pub fn campaign_finalized(env: &Env, short_circuit: bool) {
    env.events()
        .publish((symbol_short!("finalized"),), (short_circuit,));
}

pub fn redeemed(env: &Env, redemption: &Redemption) {
    env.events().publish(
        (symbol_short!("redeem"), redemption.holder.clone()),
        redemption.clone(),
    );
}

pub fn transferred(env: &Env, from: &Address, to: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("transfer"), from.clone(), to.clone()),
        amount,
    );
}
