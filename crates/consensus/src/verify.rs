//! Verification of the vector gas fields of a header against its parent.
use crate::InvalidHeader;
use fee_market::{next_base_fees, next_excess_gas, VectorFeeConfig};
use header::{Header, HeaderGas};
use primitives::{Dimension, GasVector, PriceVector};
use tracing::debug;

/// Gas vectors of a parent header, as the vector rules see them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParentGas {
    /// Gas used per dimension.
    pub gas_used: GasVector,
    /// Excess gas per dimension.
    pub excess_gas: GasVector,
    /// Gas limits per dimension.
    pub gas_limits: GasVector,
}

/// Returns the gas vectors of `parent`.
///
/// A vector-active parent yields its own vectors. A legacy parent, such as the last block
/// before activation, is mapped onto equivalent vectors:
///
/// * used: `[gas_used, blob_gas_used, gas_used / calldata_gas_limit_ratio]`
/// * excess: `[0, excess_blob_gas, 0]`
/// * limits: `[gas_limit, max_blob_gas_per_block, gas_limit / calldata_gas_limit_ratio]`
///
/// Missing legacy blob fields count as zero.
pub fn sanitize_parent(config: &VectorFeeConfig, parent: &Header) -> ParentGas {
    match &parent.gas {
        HeaderGas::Vector(gas) => ParentGas {
            gas_used: gas.gas_used,
            excess_gas: gas.excess_gas,
            gas_limits: gas.gas_limits,
        },
        HeaderGas::Legacy(gas) => {
            let calldata_share = |gas: u64| {
                gas.checked_div(config.calldata_gas_limit_ratio)
                    .unwrap_or_default()
            };
            ParentGas {
                gas_used: GasVector::new(
                    gas.gas_used,
                    gas.blob_gas_used.unwrap_or_default(),
                    calldata_share(gas.gas_used),
                ),
                excess_gas: GasVector::new(0, gas.excess_blob_gas.unwrap_or_default(), 0),
                gas_limits: GasVector::new(
                    gas.gas_limit,
                    config.max_blob_gas_per_block,
                    calldata_share(gas.gas_limit),
                ),
            }
        }
    }
}

/// Base fees of a block whose parent is `parent`.
pub fn base_fees_from_parent(config: &VectorFeeConfig, parent: &Header) -> PriceVector {
    let parent = sanitize_parent(config, parent);
    next_base_fees(config, &parent.excess_gas, &parent.gas_limits)
}

/// Verifies the vector gas fields of `header` against `parent`.
///
/// Checks, in order: that the vector fields are set, the blob and calldata usage bounds,
/// that the excess gas equals the one derived from the parent and, when `header` carries
/// base fees, that they equal the ones derived from the parent.
pub fn verify_vector_header(
    config: &VectorFeeConfig,
    parent: &Header,
    header: &Header,
) -> Result<(), InvalidHeader> {
    verify(config, parent, header).inspect_err(|err| {
        debug!(
            target: "vfm::consensus",
            number = header.number,
            timestamp = header.timestamp,
            %err,
            "rejected vector header"
        );
    })
}

fn verify(config: &VectorFeeConfig, parent: &Header, header: &Header) -> Result<(), InvalidHeader> {
    let (Some(excess_gas), Some(gas_used), Some(_)) =
        (header.excess_gas(), header.gas_used_vector(), header.gas_limits())
    else {
        // Every vector field is set or none is.
        return Err(InvalidHeader::MissingVectorFields);
    };

    let blob_used = gas_used[Dimension::Blob];
    if blob_used > config.max_blob_gas_per_block {
        return Err(InvalidHeader::BlobGasUsedExceedsMaximum {
            used: blob_used,
            max: config.max_blob_gas_per_block,
        });
    }
    if is_fractional(blob_used, config.blob_gas_per_blob) {
        return Err(InvalidHeader::BlobGasUsedNotMultipleOfBlobGas {
            used: blob_used,
            blob_gas_per_blob: config.blob_gas_per_blob,
        });
    }

    let calldata_used = gas_used[Dimension::Calldata];
    if is_fractional(calldata_used, config.calldata_gas_per_token) {
        return Err(InvalidHeader::CalldataGasUsedNotMultipleOfToken {
            used: calldata_used,
            gas_per_token: config.calldata_gas_per_token,
        });
    }

    let parent = sanitize_parent(config, parent);

    let expected = next_excess_gas(
        config,
        &parent.gas_used,
        &parent.excess_gas,
        &parent.gas_limits,
    );
    if *excess_gas != expected {
        return Err(InvalidHeader::ExcessGasMismatch {
            expected,
            got: *excess_gas,
        });
    }

    if let Some(base_fees) = &header.base_fees {
        let expected = next_base_fees(config, &parent.excess_gas, &parent.gas_limits);
        if *base_fees != expected {
            return Err(InvalidHeader::BaseFeesMismatch {
                expected,
                got: base_fees.clone(),
            });
        }
    }

    Ok(())
}

/// `true` if `value` is not a multiple of `unit`. A zero unit accepts any value.
#[inline]
fn is_fractional(value: u64, unit: u64) -> bool {
    value.checked_rem(unit).is_some_and(|rem| rem != 0)
}
