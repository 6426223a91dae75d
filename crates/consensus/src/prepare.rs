//! Vector gas fields of a block under construction.
use crate::sanitize_parent;
use fee_market::{calc_gas_limits, next_base_fees, next_excess_gas, VectorFeeConfig};
use header::{Header, HeaderGas, VectorGas};
use primitives::{Dimension, GasVector, PriceVector};

/// Vector gas fields a builder sets on a new header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorHeaderFields {
    /// Gas limits of the new block.
    pub gas_limits: GasVector,
    /// Excess gas derived from the parent.
    pub excess_gas: GasVector,
    /// Base fees derived from the parent. Always fully present.
    pub base_fees: PriceVector,
}

impl VectorHeaderFields {
    /// Sets the fields on `header`, turning it into a vector-active header with no gas
    /// used yet.
    pub fn apply(self, header: &mut Header) {
        header.gas = HeaderGas::Vector(VectorGas::new(
            self.gas_limits,
            GasVector::ZERO,
            self.excess_gas,
        ));
        header.base_fees = Some(self.base_fees);
    }
}

/// Derives the vector gas fields of a block built on `parent`.
///
/// The execution gas limit moves from the parent execution limit toward `gas_ceil`; see
/// [`calc_gas_limits`].
pub fn prepare_vector_fields(
    config: &VectorFeeConfig,
    parent: &Header,
    gas_ceil: u64,
) -> VectorHeaderFields {
    let parent = sanitize_parent(config, parent);
    VectorHeaderFields {
        gas_limits: calc_gas_limits(config, parent.gas_limits[Dimension::Execution], gas_ceil),
        excess_gas: next_excess_gas(
            config,
            &parent.gas_used,
            &parent.excess_gas,
            &parent.gas_limits,
        ),
        base_fees: next_base_fees(config, &parent.excess_gas, &parent.gas_limits),
    }
}

/// Creates the vector-active child of `parent` with the given timestamp.
///
/// Only the chain linkage and gas fields are set; the remaining fields are left for the
/// builder to fill in once the block is executed.
pub fn vector_child_header(
    config: &VectorFeeConfig,
    parent: &Header,
    timestamp: u64,
    gas_ceil: u64,
) -> Header {
    let mut header = Header {
        parent_hash: parent.hash_slow(),
        number: parent.number.saturating_add(1),
        timestamp,
        ..Default::default()
    };
    prepare_vector_fields(config, parent, gas_ceil).apply(&mut header);
    header
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify_vector_header;
    use header::LegacyGas;
    use primitives::BigInt;

    #[test]
    fn child_of_legacy_parent() {
        let config = VectorFeeConfig::activated_at(1_000);
        let parent = Header {
            number: 41,
            timestamp: 990,
            gas: HeaderGas::Legacy(LegacyGas {
                gas_limit: 30_000_000,
                gas_used: 30_000_000,
                base_fee_per_gas: Some(1_000_000_000),
                blob_gas_used: Some(0),
                excess_blob_gas: Some(0),
            }),
            ..Default::default()
        };

        let header = vector_child_header(&config, &parent, 1_002, 30_000_000);
        assert_eq!(header.number, 42);
        assert_eq!(header.parent_hash, parent.hash_slow());
        assert_eq!(
            header.gas_limits(),
            Some(&GasVector::new(30_000_000, 786_432, 7_500_000))
        );
        assert_eq!(header.gas_used_vector(), Some(&GasVector::ZERO));
        assert_eq!(
            header.excess_gas(),
            Some(&GasVector::new(15_000_000, 0, 5_625_000))
        );
        // base fees come from the parent excess, which is still zero
        assert_eq!(header.base_fees, Some(PriceVector::from_u64s(1, 1, 1)));
        assert_eq!(verify_vector_header(&config, &parent, &header), Ok(()));
    }

    #[test]
    fn prepared_fields_pass_verification_over_many_blocks() {
        let config = VectorFeeConfig::activated_at(0);
        let mut parent = Header {
            gas: HeaderGas::Vector(VectorGas::new(
                GasVector::new(30_000_000, 786_432, 7_500_000),
                GasVector::ZERO,
                GasVector::ZERO,
            )),
            ..Default::default()
        };

        for block in 1..=20u64 {
            let mut header = vector_child_header(&config, &parent, block * 12, 36_000_000);
            assert_eq!(verify_vector_header(&config, &parent, &header), Ok(()));

            // fill every block well above target
            let execution_limit = header.gas_limits().unwrap()[Dimension::Execution];
            header.add_execution_gas_used(execution_limit);
            if let HeaderGas::Vector(gas) = &mut header.gas {
                gas.gas_used[Dimension::Blob] = 786_432;
                gas.gas_used[Dimension::Calldata] = 4_000_000;
            }
            parent = header;
        }

        let fees = parent.base_fees.clone().unwrap_or_default();
        for dimension in Dimension::ALL {
            assert!(fees[dimension] > Some(BigInt::from(1)), "{dimension}");
        }
        assert!(parent.gas_limits().unwrap()[Dimension::Execution] > 30_000_000);
    }
}
