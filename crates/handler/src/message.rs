//! Executable view of a transaction under a given block.
use crate::{BlockEnv, CfgEnv, InvalidTransaction, TxEnv};
use primitives::{Address, BigInt, Bytes, Dimension, GasVector, PriceVector, U256};

/// Transaction converted for execution in a specific block.
///
/// The fee fields are resolved against the block base fees once, when the message is
/// created, and consumed by gas accounting afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Message {
    /// Sender of the transaction.
    pub from: Address,
    /// Nonce of the transaction.
    pub nonce: u64,
    /// Execution gas limit.
    pub gas_limit: u64,
    /// Price paid per unit of execution gas.
    pub gas_price: BigInt,
    /// Scalar fee cap.
    pub gas_fee_cap: BigInt,
    /// Scalar tip cap.
    pub gas_tip_cap: BigInt,
    /// Scalar blob fee cap.
    pub blob_gas_fee_cap: BigInt,
    /// Value transferred.
    pub value: U256,
    /// Input data.
    pub data: Bytes,
    /// Gas limits per dimension.
    pub gas_limits: GasVector,
    /// Fee caps per dimension.
    pub gas_fee_caps: PriceVector,
    /// Tip caps per dimension.
    pub gas_tip_caps: PriceVector,
    /// Tip paid per unit of gas, per dimension.
    pub effective_gas_tips: PriceVector,
    /// Price paid per unit of gas, per dimension.
    pub effective_gas_prices: PriceVector,
}

impl Message {
    /// Converts `tx` into a message for execution in `block`.
    ///
    /// Under the vector rules the block must carry base fees, and the execution gas price
    /// is the effective price of the execution dimension. Otherwise the execution gas price
    /// is the EIP-1559 effective gas price and the per-dimension prices fall back to the
    /// caps.
    pub fn new(tx: &TxEnv, block: &BlockEnv, cfg: &CfgEnv) -> Result<Self, InvalidTransaction> {
        let (base_fees, vector_active) = if cfg.is_vector_fee_active(block.timestamp) {
            let base_fees = block
                .base_fees
                .clone()
                .ok_or(InvalidTransaction::BaseFeesNotSet)?;
            (base_fees, true)
        } else {
            (PriceVector::absent(), false)
        };

        let effective_gas_prices = tx.effective_gas_prices(&base_fees);
        let gas_price = if vector_active {
            effective_gas_prices[Dimension::Execution]
                .clone()
                .unwrap_or_default()
        } else {
            tx.effective_gas_price(block.basefee)
        };

        Ok(Self {
            from: tx.caller,
            nonce: tx.nonce,
            gas_limit: tx.gas_limit,
            gas_price,
            gas_fee_cap: tx.max_fee_per_gas(),
            gas_tip_cap: tx.max_priority_fee_per_gas(),
            blob_gas_fee_cap: tx.max_fee_per_blob_gas(),
            value: tx.value,
            data: tx.data.clone(),
            gas_limits: tx.gas_limits(&cfg.vector_fee),
            gas_fee_caps: tx.gas_fee_caps(),
            gas_tip_caps: tx.gas_tip_caps(),
            effective_gas_tips: tx.effective_gas_tips(&base_fees),
            effective_gas_prices,
        })
    }

    /// Blob gas of the message.
    #[inline]
    pub fn blob_gas(&self) -> u64 {
        self.gas_limits[Dimension::Blob]
    }
}
