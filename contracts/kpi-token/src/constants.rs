// Protocol constants

/// Reserved oracle answer meaning "the condition could not be determined".
/// Treated exactly like a result below the oracle's lower bound.
pub const INVALID_ANSWER: u128 = u128::MAX;

/// Protocol fee charged once on every collateral, in basis points. 30 = 0.3%.
pub const PROTOCOL_FEE_BPS: u128 = 30;

/// Basis points denominator (100% = 10_000 bps).
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Claim tokens use the Stellar native precision.
pub const CLAIM_TOKEN_DECIMALS: u32 = 7;

// Storage TTL
// ===========

pub const DAY_IN_LEDGERS: u32 = 17_280;

/// Campaigns can stay pending for a long time, keep them alive for a month
/// past the last interaction.
pub const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const BALANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const BALANCE_LIFETIME_THRESHOLD: u32 = BALANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
