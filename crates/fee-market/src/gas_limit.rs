//! Gas limit policy for blocks built on top of a parent.
use crate::VectorFeeConfig;
use primitives::{GasVector, GAS_LIMIT_BOUND_DIVISOR, MIN_GAS_LIMIT};

/// Execution gas limit of a block built on a parent with `parent_gas_limit`.
///
/// The limit moves toward `desired_limit` by less than `parent_gas_limit / 1024` per block
/// and never targets less than the minimum gas limit.
pub fn calc_gas_limit(parent_gas_limit: u64, desired_limit: u64) -> u64 {
    let delta = (parent_gas_limit / GAS_LIMIT_BOUND_DIVISOR).saturating_sub(1);
    let desired_limit = desired_limit.max(MIN_GAS_LIMIT);

    if parent_gas_limit < desired_limit {
        return parent_gas_limit.saturating_add(delta).min(desired_limit);
    }
    if parent_gas_limit > desired_limit {
        return (parent_gas_limit - delta).max(desired_limit);
    }
    parent_gas_limit
}

/// Gas limits of all dimensions for a block built on a parent whose execution gas limit
/// is `parent_execution_limit`.
///
/// The blob limit is fixed by the configuration and the calldata limit is the
/// execution limit divided by [`VectorFeeConfig::calldata_gas_limit_ratio`].
pub fn calc_gas_limits(
    config: &VectorFeeConfig,
    parent_execution_limit: u64,
    gas_ceil: u64,
) -> GasVector {
    let execution = calc_gas_limit(parent_execution_limit, gas_ceil);
    let calldata = execution
        .checked_div(config.calldata_gas_limit_ratio)
        .unwrap_or_default();
    GasVector::new(execution, config.max_blob_gas_per_block, calldata)
}
