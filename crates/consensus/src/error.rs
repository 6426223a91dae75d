//! Header consensus errors.
use core::fmt;
use primitives::{GasVector, PriceVector};

/// Reason a header is rejected by [`verify_vector_header`](crate::verify_vector_header).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvalidHeader {
    /// The vector gas fields are not set on a header the vector rules apply to.
    MissingVectorFields,
    /// Blob gas used is above the per block maximum.
    BlobGasUsedExceedsMaximum {
        /// Blob gas used by the header.
        used: u64,
        /// Maximum blob gas per block.
        max: u64,
    },
    /// Blob gas used is not a whole number of blobs.
    BlobGasUsedNotMultipleOfBlobGas {
        /// Blob gas used by the header.
        used: u64,
        /// Gas consumed by a single blob.
        blob_gas_per_blob: u64,
    },
    /// Calldata gas used is not a whole number of calldata tokens.
    CalldataGasUsedNotMultipleOfToken {
        /// Calldata gas used by the header.
        used: u64,
        /// Gas consumed by a single calldata token.
        gas_per_token: u64,
    },
    /// Excess gas differs from the one derived from the parent.
    ExcessGasMismatch {
        /// Excess gas derived from the parent.
        expected: GasVector,
        /// Excess gas carried by the header.
        got: GasVector,
    },
    /// Base fees differ from the ones derived from the parent.
    BaseFeesMismatch {
        /// Base fees derived from the parent.
        expected: PriceVector,
        /// Base fees carried by the header.
        got: PriceVector,
    },
}

impl core::error::Error for InvalidHeader {}

impl fmt::Display for InvalidHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVectorFields => write!(f, "header is missing vector gas fields"),
            Self::BlobGasUsedExceedsMaximum { used, max } => {
                write!(f, "blob gas used {used} exceeds maximum allowance {max}")
            }
            Self::BlobGasUsedNotMultipleOfBlobGas {
                used,
                blob_gas_per_blob,
            } => write!(
                f,
                "blob gas used {used} not a multiple of blob gas per blob {blob_gas_per_blob}"
            ),
            Self::CalldataGasUsedNotMultipleOfToken {
                used,
                gas_per_token,
            } => write!(
                f,
                "calldata gas used {used} not a multiple of calldata gas per token {gas_per_token}"
            ),
            Self::ExcessGasMismatch { expected, got } => {
                write!(f, "invalid excessGas: have {got:?}, want {expected:?}")
            }
            Self::BaseFeesMismatch { expected, got } => {
                write!(f, "invalid baseFee: have {got:?}, want {expected:?}")
            }
        }
    }
}
