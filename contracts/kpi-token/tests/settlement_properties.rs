//! Property tests over whole campaigns: floors hold, OR settlements do not
//! depend on report order, AND failures end the campaign exactly once.

use kpi_token::testutils::{MockOracleFactory, MockOracleFactoryClient};
use kpi_token::{
    ClaimTokenSpec, CollateralSpec, KpiError, KpiToken, KpiTokenClient, Managers, OracleSpecs,
    Template, INVALID_ANSWER,
};
use proptest::prelude::*;
use soroban_sdk::{
    testutils::Address as _, token, Address, Bytes, Env, String, Vec as SorobanVec,
};

// -- Harness ------------------------------------------------------------------

/// `(lower_bound, full_range, weight)`
type OracleRange = (u128, u128, u32);

struct Harness {
    env: Env,
    contract: Address,
    creator: Address,
    assets: Vec<Address>,
    oracles: Vec<Address>,
}

impl Harness {
    fn launch(collaterals: &[(i128, i128)], oracles: &[OracleRange], and_relationship: bool) -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let contract = env.register(KpiToken, ());
        let factory = env.register(MockOracleFactory, ());
        let creator = Address::generate(&env);

        let mut spec = CollateralSpec {
            assets: SorobanVec::new(&env),
            amounts: SorobanVec::new(&env),
            minimum_payouts: SorobanVec::new(&env),
        };
        let mut assets = Vec::new();
        for (amount, minimum_payout) in collaterals {
            let asset = env
                .register_stellar_asset_contract_v2(Address::generate(&env))
                .address();
            token::StellarAssetClient::new(&env, &asset).mint(&creator, amount);
            spec.assets.push_back(asset.clone());
            spec.amounts.push_back(*amount);
            spec.minimum_payouts.push_back(*minimum_payout);
            assets.push(asset);
        }

        let client = KpiTokenClient::new(&env, &contract);
        client.initialize(
            &creator,
            &Managers {
                oracle_factory: factory.clone(),
                fee_authority: Address::generate(&env),
            },
            &Template {
                id: 1,
                version: 1,
                specification: String::from_str(&env, "ipfs://template"),
            },
            &String::from_str(&env, "campaign"),
            &spec,
            &ClaimTokenSpec {
                name: String::from_str(&env, "KPI"),
                symbol: String::from_str(&env, "KPI"),
                supply: 1_000_000,
            },
        );

        let mut queue = SorobanVec::new(&env);
        let mut specs = OracleSpecs {
            templates: SorobanVec::new(&env),
            lower_bounds: SorobanVec::new(&env),
            higher_bounds: SorobanVec::new(&env),
            funding_assets: SorobanVec::new(&env),
            funding_amounts: SorobanVec::new(&env),
            weights: SorobanVec::new(&env),
            init_data: SorobanVec::new(&env),
        };
        let mut addrs = Vec::new();
        for (lower, range, weight) in oracles {
            let oracle = Address::generate(&env);
            queue.push_back(oracle.clone());
            addrs.push(oracle);
            specs.templates.push_back(1);
            specs.lower_bounds.push_back(*lower);
            specs.higher_bounds.push_back(lower + range);
            specs.funding_assets.push_back(factory.clone());
            specs.funding_amounts.push_back(0);
            specs.weights.push_back(*weight);
            specs.init_data.push_back(Bytes::new(&env));
        }
        MockOracleFactoryClient::new(&env, &factory).enqueue(&queue);
        client.register_oracles(&specs, &and_relationship);

        Harness {
            env,
            contract,
            creator,
            assets,
            oracles: addrs,
        }
    }

    fn client(&self) -> KpiTokenClient<'_> {
        KpiTokenClient::new(&self.env, &self.contract)
    }

    fn amounts(&self) -> Vec<i128> {
        self.client().collaterals().iter().map(|c| c.amount).collect()
    }

    fn creator_balances(&self) -> Vec<i128> {
        self.assets
            .iter()
            .map(|a| token::Client::new(&self.env, a).balance(&self.creator))
            .collect()
    }

    fn assert_floors(&self) {
        for c in self.client().collaterals().iter() {
            assert!(c.amount >= c.minimum_payout, "amount {} below floor {}", c.amount, c.minimum_payout);
        }
    }
}

// -- Strategies ---------------------------------------------------------------

fn collateral_set() -> impl Strategy<Value = Vec<(i128, i128)>> {
    prop::collection::vec(
        (1i128..1_000_000_000_000, 0i128..100).prop_map(|(amount, pct)| (amount, amount * pct / 100)),
        1..=2,
    )
}

fn oracle_range() -> impl Strategy<Value = OracleRange> {
    (0u128..1_000, 1u128..1_000, 1u32..=10)
}

fn answer() -> impl Strategy<Value = u128> {
    prop_oneof![1 => Just(INVALID_ANSWER), 6 => 0u128..2_500]
}

fn or_plan() -> impl Strategy<Value = (Vec<(i128, i128)>, Vec<(OracleRange, u128)>)> {
    (collateral_set(), prop::collection::vec((oracle_range(), answer()), 1..=4))
}

// -- Properties ---------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn or_settlement_is_order_independent((collaterals, plan) in or_plan()) {
        let ranges: Vec<OracleRange> = plan.iter().map(|(r, _)| *r).collect();
        let forward = Harness::launch(&collaterals, &ranges, false);
        let reverse = Harness::launch(&collaterals, &ranges, false);

        let expected_weight: u64 = ranges.iter().map(|(_, _, w)| *w as u64).sum();
        prop_assert_eq!(forward.client().total_weight(), expected_weight);

        let mut pending = forward.client().to_be_finalized();
        for (i, (_, answer)) in plan.iter().enumerate() {
            forward.client().report(&forward.oracles[i], answer);
            forward.assert_floors();
            let now = forward.client().to_be_finalized();
            prop_assert!(now < pending);
            pending = now;
        }
        for (i, (_, answer)) in plan.iter().enumerate().rev() {
            reverse.client().report(&reverse.oracles[i], answer);
            reverse.assert_floors();
        }

        prop_assert!(forward.client().is_finalized());
        prop_assert!(reverse.client().is_finalized());

        // each report truncates once, so two orders drift by less than one
        // unit per oracle
        let n = plan.len() as i128;
        for (a, b) in forward.amounts().iter().zip(reverse.amounts().iter()) {
            prop_assert!((a - b).abs() < n, "forward {} reverse {}", a, b);
        }
    }

    #[test]
    fn and_failure_finalizes_exactly_once(
        collaterals in collateral_set(),
        ranges in prop::collection::vec(oracle_range(), 2..=4),
        failing in 0usize..4,
        passed_progress in 0u128..1_000,
    ) {
        let failing = failing % ranges.len();
        let h = Harness::launch(&collaterals, &ranges, true);

        for (i, (lower, _, _)) in ranges.iter().enumerate().take(failing) {
            h.client().report(&h.oracles[i], &(lower + passed_progress));
            prop_assert!(!h.client().is_finalized());
        }
        h.client().report(&h.oracles[failing], &INVALID_ANSWER);
        prop_assert!(h.client().is_finalized());
        prop_assert_eq!(h.client().to_be_finalized(), (ranges.len() - failing) as u32);

        // everything above the floors went back to the creator
        for c in h.client().collaterals().iter() {
            prop_assert_eq!(c.amount, c.minimum_payout);
        }

        for (i, (lower, _, _)) in ranges.iter().enumerate() {
            prop_assert_eq!(
                h.client().try_report(&h.oracles[i], lower),
                Err(Ok(KpiError::Forbidden))
            );
        }
    }

    #[test]
    fn full_success_reimburses_nothing(
        collaterals in collateral_set(),
        ranges in prop::collection::vec(oracle_range(), 1..=4),
        overshoot in 0u128..1_000,
        and_relationship in any::<bool>(),
    ) {
        let h = Harness::launch(&collaterals, &ranges, and_relationship);

        for (i, (lower, range, _)) in ranges.iter().enumerate() {
            h.client().report(&h.oracles[i], &(lower + range + overshoot));
        }

        prop_assert!(h.client().is_finalized());
        prop_assert!(h.creator_balances().iter().all(|b| *b == 0));
        let expected: Vec<i128> = collaterals.iter().map(|(amount, _)| *amount).collect();
        prop_assert_eq!(h.amounts(), expected);
    }
}

#[test]
fn or_settlement_matches_exactly_on_divisible_inputs() {
    let collaterals = [(1_700, 100)];
    let ranges = [(0, 100, 1), (0, 100, 1)];

    let forward = Harness::launch(&collaterals, &ranges, false);
    forward.client().report(&forward.oracles[0], &50);
    forward.client().report(&forward.oracles[1], &0);

    let reverse = Harness::launch(&collaterals, &ranges, false);
    reverse.client().report(&reverse.oracles[1], &0);
    reverse.client().report(&reverse.oracles[0], &50);

    assert_eq!(forward.amounts(), vec![700]);
    assert_eq!(reverse.amounts(), vec![700]);
    assert_eq!(forward.creator_balances(), vec![1_000]);
}

#[test]
fn redemptions_never_exceed_what_is_left() {
    let h = Harness::launch(&[(999_999, 1), (77, 0)], &[(0, 3, 2), (0, 7, 5)], false);
    h.client().report(&h.oracles[0], &1);
    h.client().report(&h.oracles[1], &INVALID_ANSWER);

    let left = h.amounts();
    let holders: Vec<Address> = (0..3).map(|_| Address::generate(&h.env)).collect();
    for holder in &holders {
        h.client().transfer(&h.creator, holder, &333_333);
    }

    let mut paid = vec![0i128; left.len()];
    for who in holders.iter().chain(core::iter::once(&h.creator)) {
        let redemption = h.client().redeem(who);
        for (i, payout) in redemption.payouts.iter().enumerate() {
            paid[i] += payout;
        }
    }

    for (i, asset) in h.assets.iter().enumerate() {
        assert!(paid[i] <= left[i]);
        assert!(left[i] - paid[i] < 4);
        assert_eq!(token::Client::new(&h.env, asset).balance(&h.contract), left[i] - paid[i]);
    }
    assert_eq!(h.client().total_supply(), 0);
}
