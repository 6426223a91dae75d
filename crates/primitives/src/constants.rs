//! Default chain parameters of the vector fee market.
//!
//! These are the values a chain uses unless its configuration overrides them.

/// Minimum price of a unit of gas in any dimension.
pub const MIN_GAS_PRICE: u64 = 1;

/// Controls how fast base fees react to excess gas.
///
/// The denominator of the fee exponent is `target * BASE_FEE_UPDATE_FRACTION`.
pub const BASE_FEE_UPDATE_FRACTION: u64 = 8;

/// Ratio between the gas limit and the gas target, per dimension
/// (execution, blob, calldata).
pub const LIMIT_TARGET_RATIOS: [u64; 3] = [2, 2, 4];

/// Number of calldata tokens charged for a non-zero byte. A zero byte is one token.
pub const CALLDATA_TOKENS_PER_NON_ZERO_BYTE: u64 = 4;

/// Calldata gas charged per calldata token.
pub const CALLDATA_GAS_PER_TOKEN: u64 = 4;

/// Ratio between the execution gas limit and the calldata gas limit.
pub const CALLDATA_GAS_LIMIT_RATIO: u64 = 4;

/// Minimum execution gas limit of a block.
pub const MIN_GAS_LIMIT: u64 = 5000;

/// Bound divisor of the execution gas limit.
///
/// A block may move its gas limit by less than `parent_limit / GAS_LIMIT_BOUND_DIVISOR`.
pub const GAS_LIMIT_BOUND_DIVISOR: u64 = 1024;

/// Gas limit of the genesis block.
pub const GENESIS_GAS_LIMIT: u64 = 4_712_388;
