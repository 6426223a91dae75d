//! Block over block recurrence of the vector fee market.
//!
//! For a block `n` with parent `n - 1`:
//!
//! ```text
//! excess_gas[n] = next_excess_gas(gas_used[n - 1], excess_gas[n - 1], gas_limits[n - 1])
//! base_fees[n]  = next_base_fees(excess_gas[n - 1], gas_limits[n - 1])
//! ```
//!
//! Base fees derive from the excess gas of the parent, not from the excess gas of the block.
use crate::VectorFeeConfig;
use num_traits::{Signed, Zero};
use primitives::{eip4844::MIN_BLOB_GASPRICE, BigInt, Dimension, GasVector, PriceVector};

/// Per-dimension gas targets: `gas_limits[i] / ratios[i]`, or zero where the ratio is zero.
pub fn targets(gas_limits: &GasVector, ratios: &[u64; 3]) -> GasVector {
    GasVector::from_fn(|dimension| {
        let ratio = ratios[dimension.index()];
        if ratio == 0 {
            0
        } else {
            gas_limits[dimension] / ratio
        }
    })
}

/// Excess gas of a block given the vectors of its parent.
///
/// Usage above target grows the excess, usage below target shrinks it, and the excess
/// never drops below zero.
pub fn next_excess_gas(
    config: &VectorFeeConfig,
    parent_gas_used: &GasVector,
    parent_excess_gas: &GasVector,
    parent_gas_limits: &GasVector,
) -> GasVector {
    parent_excess_gas
        .wrapping_add(parent_gas_used)
        .saturating_sub(&targets(parent_gas_limits, &config.limit_target_ratios))
}

/// Base fees of a block given the excess gas and gas limits of its parent.
///
/// Every dimension is priced at
/// `fake_exponential(min_gas_price, excess, target * base_fee_update_fraction)`, or at
/// `min_gas_price` where that denominator is zero. The result is always fully present.
pub fn next_base_fees(
    config: &VectorFeeConfig,
    parent_excess_gas: &GasVector,
    parent_gas_limits: &GasVector,
) -> PriceVector {
    let targets = targets(parent_gas_limits, &config.limit_target_ratios);
    let min_price = BigInt::from(config.min_gas_price);

    PriceVector::from_fn(|dimension: Dimension| {
        let denominator = BigInt::from(targets[dimension]) * config.base_fee_update_fraction;
        if denominator.is_zero() {
            return Some(min_price.clone());
        }
        Some(fake_exponential(
            &min_price,
            &BigInt::from(parent_excess_gas[dimension]),
            &denominator,
        ))
    })
}

/// Legacy blob base fee for the given excess blob gas.
///
/// A zero update fraction prices blobs at the minimum blob gas price.
pub fn blob_base_fee(config: &VectorFeeConfig, excess_blob_gas: u64) -> BigInt {
    let min_price = BigInt::from(MIN_BLOB_GASPRICE);
    if config.blob_base_fee_update_fraction == 0 {
        return min_price;
    }
    fake_exponential(
        &min_price,
        &BigInt::from(excess_blob_gas),
        &BigInt::from(config.blob_base_fee_update_fraction),
    )
}

/// Approximates `factor * e ** (numerator / denominator)` using Taylor expansion.
///
/// All intermediate values are arbitrary precision, so the result is exact for any input.
///
/// # Panics
///
/// This function panics if `denominator` is zero.
pub fn fake_exponential(factor: &BigInt, numerator: &BigInt, denominator: &BigInt) -> BigInt {
    assert!(!denominator.is_zero(), "attempt to divide by zero");

    let mut i = 1u64;
    let mut output = BigInt::zero();
    let mut numerator_accum = factor * denominator;
    while numerator_accum.is_positive() {
        output += &numerator_accum;

        numerator_accum = numerator_accum * numerator / denominator / i;
        i += 1;
    }
    output / denominator
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitives::eip4844::BLOB_BASE_FEE_UPDATE_FRACTION;
    use rstest::rstest;

    #[rstest]
    #[case([10_000_000, 20_000_000, 40_000_000], [2, 2, 4], [5_000_000, 10_000_000, 10_000_000])]
    #[case([10_000_000, 20_000_000, 40_000_000], [0, 0, 0], [0, 0, 0])]
    #[case([10_000_000, 20_000_000, 40_000_000], [1, 2, 0], [10_000_000, 10_000_000, 0])]
    #[case([0, 0, 0], [2, 2, 4], [0, 0, 0])]
    fn block_targets(#[case] limits: [u64; 3], #[case] ratios: [u64; 3], #[case] expected: [u64; 3]) {
        assert_eq!(targets(&limits.into(), &ratios), GasVector::from(expected));
    }

    #[rstest]
    // usage above target grows the excess
    #[case(
        [10_000_000, 15_000_000, 20_000_000],
        [5_000_000, 10_000_000, 15_000_000],
        [20_000_000, 40_000_000, 80_000_000],
        [5_000_000, 5_000_000, 15_000_000]
    )]
    // usage below target is clamped at zero
    #[case(
        [10_000_000, 15_000_000, 2_000],
        [5_000_000, 10_000_000, 1_500],
        [20_000_000, 40_000_000, 80_000_000],
        [5_000_000, 5_000_000, 0]
    )]
    #[case([0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0])]
    #[case([0, 0, 0], [0, 0, 0], [20_000_000, 20_000_000, 40_000_000], [0, 0, 0])]
    // usage equal to target keeps the excess unchanged
    #[case(
        [10_000_000, 10_000_000, 10_000_000],
        [0, 0, 0],
        [20_000_000, 20_000_000, 40_000_000],
        [0, 0, 0]
    )]
    fn excess_gas(
        #[case] used: [u64; 3],
        #[case] excess: [u64; 3],
        #[case] limits: [u64; 3],
        #[case] expected: [u64; 3],
    ) {
        let config = VectorFeeConfig::default();
        let actual = next_excess_gas(&config, &used.into(), &excess.into(), &limits.into());
        assert_eq!(actual, GasVector::from(expected));
    }

    #[test]
    fn excess_gas_is_monotonic_in_usage() {
        let config = VectorFeeConfig::default();
        let limits = GasVector::new(20_000_000, 20_000_000, 40_000_000);
        let excess = GasVector::new(1_000, 0, 5);

        let mut previous = GasVector::ZERO;
        for step in 0..40u64 {
            let used = GasVector::new(step * 500_000, step * 250_000, step * 1_000_000);
            let next = next_excess_gas(&config, &used, &excess, &limits);
            for dimension in Dimension::ALL {
                assert!(next[dimension] >= previous[dimension]);
            }
            previous = next;
        }
    }

    #[rstest]
    #[case([0, 0, 0], [0, 0, 0], [1, 1, 1])]
    #[case([10_000_000, 10_000_000, 10_000_000], [20_000_000, 20_000_000, 40_000_000], [1, 1, 1])]
    #[case([9_000_000, 9_000_000, 9_000_000], [20_000_000, 20_000_000, 40_000_000], [1, 1, 1])]
    #[case([60_000_000, 80_000_000, 80_000_000], [20_000_000, 20_000_000, 40_000_000], [2, 2, 2])]
    fn base_fees(#[case] excess: [u64; 3], #[case] limits: [u64; 3], #[case] expected: [u64; 3]) {
        let config = VectorFeeConfig::default();
        let actual = next_base_fees(&config, &excess.into(), &limits.into());
        assert_eq!(actual, PriceVector::from_u64s(expected[0], expected[1], expected[2]));
        assert!(!actual.contains_absent());
    }

    #[test]
    fn base_fees_with_zero_ratio_fall_back_to_min_price() {
        let config = VectorFeeConfig::default().with_limit_target_ratios([2, 0, 4]);
        let fees = next_base_fees(
            &config,
            &GasVector::new(60_000_000, u64::MAX, 0),
            &GasVector::new(20_000_000, 20_000_000, 40_000_000),
        );
        assert_eq!(fees, PriceVector::from_u64s(2, 1, 1));
    }

    #[rstest]
    #[case(1, 0, 1, 1)]
    #[case(38493, 0, 1000, 38493)]
    #[case(0, 1234, 2345, 0)]
    #[case(1, 2, 1, 6)] // approximate 7.389
    #[case(1, 4, 2, 6)]
    #[case(1, 3, 1, 16)] // approximate 20.09
    #[case(1, 6, 2, 18)]
    #[case(1, 4, 1, 49)] // approximate 54.60
    #[case(1, 8, 2, 50)]
    #[case(10, 8, 2, 542)] // approximate 540.598
    #[case(11, 8, 2, 596)] // approximate 600.58
    #[case(1, 5, 1, 136)] // approximate 148.4
    #[case(1, 5, 2, 11)] // approximate 12.18
    #[case(2, 5, 2, 23)] // approximate 24.36
    #[case(1, 50_000_000, 2_225_652, 5_709_098_764)]
    #[case(1, 380_928, BLOB_BASE_FEE_UPDATE_FRACTION, 1)]
    fn fake_exp(
        #[case] factor: u64,
        #[case] numerator: u64,
        #[case] denominator: u64,
        #[case] expected: u64,
    ) {
        let actual = fake_exponential(
            &BigInt::from(factor),
            &BigInt::from(numerator),
            &BigInt::from(denominator),
        );
        assert_eq!(actual, BigInt::from(expected));
    }

    #[test]
    fn fake_exp_without_excess_is_min_price() {
        for denominator in [1u64, 7, 80_000_000, u64::MAX] {
            let fee = fake_exponential(&BigInt::from(1), &BigInt::zero(), &BigInt::from(denominator));
            assert_eq!(fee, BigInt::from(1));
        }
    }

    #[test]
    fn fake_exp_does_not_overflow_u128() {
        // e^100 is far above u128::MAX / 2^64
        let fee = fake_exponential(
            &(BigInt::from(1u8) << 64usize),
            &BigInt::from(100),
            &BigInt::from(1),
        );
        assert!(fee.bits() > 128);
    }

    #[test]
    fn legacy_blob_base_fee() {
        let config = VectorFeeConfig::default();
        assert_eq!(blob_base_fee(&config, 0), BigInt::from(1));
        assert_eq!(blob_base_fee(&config, 2_314_057), BigInt::from(1));
        assert_eq!(blob_base_fee(&config, 10 * 1024 * 1024), BigInt::from(23));
    }

    #[test]
    fn legacy_blob_base_fee_with_zero_fraction() {
        let config = VectorFeeConfig {
            blob_base_fee_update_fraction: 0,
            ..Default::default()
        };
        assert_eq!(blob_base_fee(&config, 0), BigInt::from(MIN_BLOB_GASPRICE));
        assert_eq!(blob_base_fee(&config, u64::MAX), BigInt::from(MIN_BLOB_GASPRICE));
    }
}
