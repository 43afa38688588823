use soroban_sdk::{contracttype, Address, Bytes, String, Vec};

// ---------------------------------------------------------------------------
// Persisted records
// ---------------------------------------------------------------------------

/// One escrowed asset.
///
/// `amount` never drops below `minimum_payout` and never grows after
/// initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Collateral {
    pub asset: Address,
    pub amount: i128,
    pub minimum_payout: i128,
}

/// A registered oracle and its settlement state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FinalizableOracle {
    pub addr: Address,
    pub lower_bound: u128,
    /// Results at or above this bound saturate to full progress.
    pub higher_bound: u128,
    pub final_progress: u128,
    pub weight: u32,
    pub finalized: bool,
}

/// Campaign-wide settlement state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignState {
    pub oracles_initialized: bool,
    pub and_relationship: bool,
    pub total_weight: u64,
    pub to_be_finalized: u32,
    pub finalized: bool,
    pub fee_collected: bool,
}

/// Collaborators a campaign talks to.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Managers {
    /// Contract instantiating oracle instances from templates.
    pub oracle_factory: Address,
    /// Protocol account allowed to trigger fee collection.
    pub fee_authority: Address,
}

/// Template the campaign was created from.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Template {
    pub id: u32,
    pub version: u32,
    pub specification: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimTokenMeta {
    pub name: String,
    pub symbol: String,
    pub initial_supply: i128,
}

// ---------------------------------------------------------------------------
// Call arguments
// ---------------------------------------------------------------------------

/// Parallel collateral lists supplied by the creator.
#[contracttype]
#[derive(Clone, Debug)]
pub struct CollateralSpec {
    pub assets: Vec<Address>,
    pub amounts: Vec<i128>,
    pub minimum_payouts: Vec<i128>,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ClaimTokenSpec {
    pub name: String,
    pub symbol: String,
    pub supply: i128,
}

/// Parallel oracle lists; entry `i` of every list describes oracle `i`.
#[contracttype]
#[derive(Clone, Debug)]
pub struct OracleSpecs {
    pub templates: Vec<u32>,
    pub lower_bounds: Vec<u128>,
    pub higher_bounds: Vec<u128>,
    pub funding_assets: Vec<Address>,
    pub funding_amounts: Vec<i128>,
    pub weights: Vec<u32>,
    pub init_data: Vec<Bytes>,
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Serialized view of a campaign.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignSnapshot {
    pub creator: Address,
    pub description: String,
    pub collaterals: Vec<Collateral>,
    pub oracles: Vec<FinalizableOracle>,
    pub and_relationship: bool,
    pub to_be_finalized: u32,
    pub finalized: bool,
    pub initial_supply: i128,
    pub total_supply: i128,
    pub name: String,
    pub symbol: String,
}

/// Record of one redemption: what was burned and what each collateral paid.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Redemption {
    pub holder: Address,
    pub burned: i128,
    /// Payout per collateral, in ledger order.
    pub payouts: Vec<i128>,
}
