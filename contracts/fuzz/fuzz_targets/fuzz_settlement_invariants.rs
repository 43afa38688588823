//! Drives a campaign through arbitrary oracle answers, in arbitrary order,
//! and checks the ledger invariants after every step.

#![no_main]

use arbitrary::Arbitrary;
use kpi_token::testutils::{MockOracleFactory, MockOracleFactoryClient};
use kpi_token::{
    ClaimTokenSpec, CollateralSpec, KpiError, KpiToken, KpiTokenClient, Managers, OracleSpecs,
    Template, INVALID_ANSWER,
};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{testutils::Address as _, token, Address, Bytes, Env, String, Vec};

#[derive(Arbitrary, Debug)]
struct FuzzCollateral {
    amount: u32,
    floor_pct: u8,
}

#[derive(Arbitrary, Debug)]
struct FuzzOracle {
    lower: u16,
    range: u16,
    weight: u8,
}

#[derive(Arbitrary, Debug)]
enum Step {
    Report { oracle: u8, answer: u32 },
    Fail { oracle: u8 },
    Redeem,
    CollectFee,
}

#[derive(Arbitrary, Debug)]
struct Input {
    collaterals: std::vec::Vec<FuzzCollateral>,
    oracles: std::vec::Vec<FuzzOracle>,
    and_relationship: bool,
    steps: std::vec::Vec<Step>,
}

fuzz_target!(|input: Input| {
    let collaterals: std::vec::Vec<(i128, i128)> = input
        .collaterals
        .iter()
        .take(3)
        .filter(|c| c.amount > 0)
        .map(|c| {
            let amount = c.amount as i128;
            (amount, amount * (c.floor_pct % 100) as i128 / 100)
        })
        .collect();
    let oracles: std::vec::Vec<(u128, u128, u32)> = input
        .oracles
        .iter()
        .take(4)
        .map(|o| (o.lower as u128, o.range.max(1) as u128, o.weight.max(1) as u32))
        .collect();
    if collaterals.is_empty() || oracles.is_empty() {
        return;
    }

    let env = Env::default();
    env.mock_all_auths();

    let contract = env.register(KpiToken, ());
    let factory = env.register(MockOracleFactory, ());
    let creator = Address::generate(&env);
    let fee_authority = Address::generate(&env);
    let client = KpiTokenClient::new(&env, &contract);

    let mut spec = CollateralSpec {
        assets: Vec::new(&env),
        amounts: Vec::new(&env),
        minimum_payouts: Vec::new(&env),
    };
    for (amount, floor) in &collaterals {
        let asset = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();
        token::StellarAssetClient::new(&env, &asset).mint(&creator, amount);
        spec.assets.push_back(asset);
        spec.amounts.push_back(*amount);
        spec.minimum_payouts.push_back(*floor);
    }

    client.initialize(
        &creator,
        &Managers {
            oracle_factory: factory.clone(),
            fee_authority,
        },
        &Template {
            id: 1,
            version: 1,
            specification: String::from_str(&env, "fuzz"),
        },
        &String::from_str(&env, "fuzz campaign"),
        &spec,
        &ClaimTokenSpec {
            name: String::from_str(&env, "Fuzz"),
            symbol: String::from_str(&env, "FZ"),
            supply: 1_000,
        },
    );

    let mut specs = OracleSpecs {
        templates: Vec::new(&env),
        lower_bounds: Vec::new(&env),
        higher_bounds: Vec::new(&env),
        funding_assets: Vec::new(&env),
        funding_amounts: Vec::new(&env),
        weights: Vec::new(&env),
        init_data: Vec::new(&env),
    };
    let mut addrs = Vec::new(&env);
    for (lower, range, weight) in &oracles {
        addrs.push_back(Address::generate(&env));
        specs.templates.push_back(1);
        specs.lower_bounds.push_back(*lower);
        specs.higher_bounds.push_back(lower + range);
        specs.funding_assets.push_back(factory.clone());
        specs.funding_amounts.push_back(0);
        specs.weights.push_back(*weight);
        specs.init_data.push_back(Bytes::new(&env));
    }
    MockOracleFactoryClient::new(&env, &factory).enqueue(&addrs);
    client.register_oracles(&specs, &input.and_relationship);

    let expected_weight: u64 = oracles.iter().map(|(_, _, w)| *w as u64).sum();
    assert_eq!(client.total_weight(), expected_weight);

    let mut was_finalized = false;
    let mut pending = client.to_be_finalized();
    for step in input.steps.iter().take(16) {
        let outcome = match step {
            Step::Report { oracle, answer } => {
                let addr = addrs.get(*oracle as u32 % addrs.len()).unwrap();
                client.try_report(&addr, &(*answer as u128)).map(|_| ())
            }
            Step::Fail { oracle } => {
                let addr = addrs.get(*oracle as u32 % addrs.len()).unwrap();
                client.try_report(&addr, &INVALID_ANSWER).map(|_| ())
            }
            Step::Redeem => client.try_redeem(&creator).map(|_| ()),
            Step::CollectFee => client
                .try_collect_protocol_fee(&Address::generate(&env))
                .map(|_| ()),
        };

        // every rejection is a named failure kind
        if let Err(err) = outcome {
            assert!(matches!(
                err,
                Ok(KpiError::Forbidden) | Ok(KpiError::FeeAlreadyCollected)
            ));
        }

        for c in client.collaterals().iter() {
            assert!(c.amount >= c.minimum_payout);
        }

        let finalized = client.is_finalized();
        assert!(!was_finalized || finalized);
        was_finalized = finalized;

        let now = client.to_be_finalized();
        assert!(now <= pending);
        pending = now;
    }
});
