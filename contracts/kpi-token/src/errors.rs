use soroban_sdk::contracterror;

/// Failure kinds surfaced to callers as `Error(Contract, #n)`.
///
/// Every kind aborts the whole invocation; no partial state is committed.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum KpiError {
    /// Unauthorized caller or an invalid state transition.
    Forbidden = 1,
    InconsistentWeights = 2,
    InconsistentCollaterals = 3,
    InconsistentArrayLengths = 4,
    InvalidCollateral = 5,
    InvalidOracleBounds = 6,
    InvalidOracleWeights = 7,
    AlreadyInitialized = 8,
    NotInitialized = 9,
    OraclesNotInitialized = 10,
    InvalidDescription = 11,
    FeeAlreadyCollected = 12,
    DuplicatedCollateral = 13,
    DuplicatedOracle = 14,
    InvalidClaimToken = 15,
    InsufficientBalance = 16,
    InvalidAmount = 17,
    /// The value-transfer service rejected a movement of funds.
    TransferFailed = 18,
    MathOverflow = 19,
}
