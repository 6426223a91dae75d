//! Errors raised while validating and settling a transaction.
use core::fmt;
use database::DBErrorMarker;
use primitives::{BigInt, Dimension, VectorError, U256};

/// Transaction validation and settlement error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvalidTransaction {
    /// A fee cap does not fit in 256 bits.
    FeeCapTooHigh {
        /// Offending dimension.
        dimension: Dimension,
    },
    /// A tip cap does not fit in 256 bits.
    TipTooHigh {
        /// Offending dimension.
        dimension: Dimension,
    },
    /// A tip cap is above the fee cap of the same dimension.
    TipAboveFeeCap {
        /// Offending dimension.
        dimension: Dimension,
    },
    /// A fee cap is below the block base fee of the same dimension.
    FeeCapBelowBaseFee {
        /// Offending dimension.
        dimension: Dimension,
    },
    /// The blob fee cap is below the block blob base fee.
    BlobFeeCapTooLow {
        /// Blob fee cap of the transaction.
        fee_cap: BigInt,
        /// Blob base fee of the block.
        blob_base_fee: BigInt,
    },
    /// Caller balance does not cover the maximum cost of the transaction.
    InsufficientFunds {
        /// Balance of the caller.
        have: U256,
        /// Balance required.
        want: U256,
    },
    /// The maximum cost of the transaction does not fit in 256 bits.
    BalanceCheckOverflow,
    /// A fee amount does not fit in 256 bits or is negative.
    Overflow,
    /// The block gas pool can not cover the gas limit of the transaction.
    GasPoolExhausted {
        /// Gas left in the pool.
        available: u64,
        /// Gas limit of the transaction.
        requested: u64,
    },
    /// The block has no room left for the blob or calldata gas of the transaction.
    BlockLimitReached {
        /// Dimension that ran out of room.
        dimension: Dimension,
        /// Gas left in the dimension.
        available: u64,
        /// Gas requested by the transaction.
        requested: u64,
    },
    /// Execution used more gas than the transaction gas limit.
    GasUsedExceedsLimit {
        /// Gas used by execution.
        used: u64,
        /// Gas limit of the transaction.
        limit: u64,
    },
    /// The vector rules apply but the block carries no base fees.
    BaseFeesNotSet,
    /// Fee vector arithmetic hit an absent element.
    Vector(VectorError),
}

impl core::error::Error for InvalidTransaction {}

impl fmt::Display for InvalidTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FeeCapTooHigh { dimension } => {
                write!(f, "max fee per gas higher than 2^256-1 in {dimension} dimension")
            }
            Self::TipTooHigh { dimension } => write!(
                f,
                "max priority fee per gas higher than 2^256-1 in {dimension} dimension"
            ),
            Self::TipAboveFeeCap { dimension } => write!(
                f,
                "max priority fee per gas higher than max fee per gas in {dimension} dimension"
            ),
            Self::FeeCapBelowBaseFee { dimension } => {
                write!(f, "max fee per gas less than block base fee in {dimension} dimension")
            }
            Self::BlobFeeCapTooLow {
                fee_cap,
                blob_base_fee,
            } => write!(
                f,
                "max fee per blob gas {fee_cap} less than block blob gas fee {blob_base_fee}"
            ),
            Self::InsufficientFunds { have, want } => write!(
                f,
                "insufficient funds for gas * price + value: have {have} want {want}"
            ),
            Self::BalanceCheckOverflow => {
                write!(f, "insufficient funds: required balance exceeds 256 bits")
            }
            Self::Overflow => write!(f, "value overflowed"),
            Self::GasPoolExhausted {
                available,
                requested,
            } => write!(f, "gas limit reached: have {available}, want {requested}"),
            Self::BlockLimitReached {
                dimension,
                available,
                requested,
            } => write!(
                f,
                "{dimension} gas limit reached: have {available}, want {requested}"
            ),
            Self::GasUsedExceedsLimit { used, limit } => {
                write!(f, "gas used {used} exceeds gas limit {limit}")
            }
            Self::BaseFeesNotSet => write!(f, "base fees not set"),
            Self::Vector(err) => write!(f, "fee vector: {err}"),
        }
    }
}

impl From<VectorError> for InvalidTransaction {
    fn from(value: VectorError) -> Self {
        Self::Vector(value)
    }
}

/// State transition error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionError<DBError> {
    /// Transaction validation or settlement error.
    Transaction(InvalidTransaction),
    /// Database error.
    Database(DBError),
}

impl<DBError: DBErrorMarker> From<DBError> for TransitionError<DBError> {
    fn from(value: DBError) -> Self {
        Self::Database(value)
    }
}

impl<DBError> From<InvalidTransaction> for TransitionError<DBError> {
    fn from(value: InvalidTransaction) -> Self {
        Self::Transaction(value)
    }
}

impl<DBError> core::error::Error for TransitionError<DBError>
where
    DBError: core::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Transaction(e) => Some(e),
            Self::Database(e) => Some(e),
        }
    }
}

impl<DBError: fmt::Display> fmt::Display for TransitionError<DBError> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transaction(e) => write!(f, "transaction validation error: {e}"),
            Self::Database(e) => write!(f, "database error: {e}"),
        }
    }
}
