//! Test doubles for the campaign's collaborators: the oracle factory and a
//! collateral token that can refuse transfers.

use soroban_sdk::{contract, contractimpl, contracttype, Address, Bytes, Env, Vec};

#[contracttype]
#[derive(Clone)]
enum MockKey {
    Queue,
    Calls,
    Frozen,
    Balance(Address),
}

/// One `instantiate` call as seen by the mock factory.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InstantiateCall {
    pub campaign: Address,
    pub creator: Address,
    pub template_id: u32,
    pub funding_asset: Address,
    pub funding_amount: i128,
}

/// Oracle factory handing out pre-queued oracle addresses in order.
#[contract]
pub struct MockOracleFactory;

#[contractimpl]
impl MockOracleFactory {
    /// Queue the addresses the next `instantiate` calls will return.
    pub fn enqueue(env: Env, oracles: Vec<Address>) {
        let mut queue: Vec<Address> = env
            .storage()
            .instance()
            .get(&MockKey::Queue)
            .unwrap_or(Vec::new(&env));
        queue.append(&oracles);
        env.storage().instance().set(&MockKey::Queue, &queue);
    }

    pub fn instantiate(
        env: Env,
        campaign: Address,
        creator: Address,
        template_id: u32,
        funding_asset: Address,
        funding_amount: i128,
        _init_data: Bytes,
    ) -> Address {
        let mut queue: Vec<Address> = env
            .storage()
            .instance()
            .get(&MockKey::Queue)
            .unwrap_or(Vec::new(&env));
        let oracle = queue.pop_front().expect("no oracle queued");
        env.storage().instance().set(&MockKey::Queue, &queue);

        let mut calls: Vec<InstantiateCall> = env
            .storage()
            .instance()
            .get(&MockKey::Calls)
            .unwrap_or(Vec::new(&env));
        calls.push_back(InstantiateCall {
            campaign,
            creator,
            template_id,
            funding_asset,
            funding_amount,
        });
        env.storage().instance().set(&MockKey::Calls, &calls);

        oracle
    }

    pub fn calls(env: Env) -> Vec<InstantiateCall> {
        env.storage()
            .instance()
            .get(&MockKey::Calls)
            .unwrap_or(Vec::new(&env))
    }
}

/// Token holding plain balances whose transfers can be switched off.
#[contract]
pub struct MockToken;

#[contractimpl]
impl MockToken {
    pub fn mint(env: Env, to: Address, amount: i128) {
        let balance = Self::balance(env.clone(), to.clone());
        env.storage()
            .instance()
            .set(&MockKey::Balance(to), &(balance + amount));
    }

    /// While frozen every `transfer` panics.
    pub fn set_frozen(env: Env, frozen: bool) {
        env.storage().instance().set(&MockKey::Frozen, &frozen);
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .instance()
            .get(&MockKey::Balance(id))
            .unwrap_or(0)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        let frozen: bool = env
            .storage()
            .instance()
            .get(&MockKey::Frozen)
            .unwrap_or(false);
        if frozen {
            panic!("token frozen");
        }

        let from_balance = Self::balance(env.clone(), from.clone());
        if from_balance < amount {
            panic!("insufficient balance");
        }
        env.storage()
            .instance()
            .set(&MockKey::Balance(from), &(from_balance - amount));
        let to_balance = Self::balance(env.clone(), to.clone());
        env.storage()
            .instance()
            .set(&MockKey::Balance(to), &(to_balance + amount));
    }
}
