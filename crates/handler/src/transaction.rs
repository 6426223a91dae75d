//! Transaction environment.
use fee_market::VectorFeeConfig;
use primitives::{Address, BigInt, Bytes, Dimension, FeeVector, GasVector, PriceVector, B256, U256};
use std::vec::Vec;

/// Transaction types.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransactionType {
    /// Legacy transaction type
    #[default]
    Legacy = 0,
    /// EIP-2930 Access List transaction type
    Eip2930 = 1,
    /// EIP-1559 Fee market change transaction type
    Eip1559 = 2,
    /// EIP-4844 Blob transaction type
    Eip4844 = 3,
    /// Transaction with a fee cap and a tip cap per gas dimension
    VectorFee = 5,
}

/// The transaction environment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TxEnv {
    /// Transaction type
    pub tx_type: TransactionType,
    /// Caller aka Author aka transaction signer
    pub caller: Address,
    /// The gas limit of the transaction. This is the execution gas limit.
    pub gas_limit: u64,
    /// The gas price of the transaction.
    ///
    /// For EIP-1559 and blob transactions this is the max fee per gas.
    pub gas_price: u128,
    /// The priority fee per gas.
    ///
    /// Incorporated as part of the London upgrade via [EIP-1559].
    ///
    /// [EIP-1559]: https://eips.ethereum.org/EIPS/eip-1559
    pub gas_priority_fee: Option<u128>,
    /// The value sent to the receiver
    pub value: U256,
    /// The data of the transaction
    pub data: Bytes,
    /// The nonce of the transaction
    pub nonce: u64,
    /// The blob hashes of a blob transaction
    pub blob_hashes: Vec<B256>,
    /// The max fee per blob gas of a blob transaction
    pub max_fee_per_blob_gas: u128,
    /// Max fee per gas of every dimension. Only used by vector fee transactions.
    pub max_fees_per_gas: FeeVector<U256>,
    /// Max priority fee per gas of every dimension. Only used by vector fee transactions.
    pub max_priority_fees_per_gas: FeeVector<U256>,
}

impl TxEnv {
    /// Returns `true` for transaction types that carry per-dimension fee fields.
    #[inline]
    pub fn is_vector_fee(&self) -> bool {
        self.tx_type == TransactionType::VectorFee
    }

    /// Returns `true` for transaction types that carry blobs.
    #[inline]
    pub fn carries_blobs(&self) -> bool {
        matches!(
            self.tx_type,
            TransactionType::Eip4844 | TransactionType::VectorFee
        )
    }

    /// Blob gas of the transaction.
    pub fn blob_gas(&self, config: &VectorFeeConfig) -> u64 {
        if self.carries_blobs() {
            config.blob_gas(self.blob_hashes.len())
        } else {
            0
        }
    }

    /// Calldata gas of the transaction.
    pub fn calldata_gas(&self, config: &VectorFeeConfig) -> u64 {
        config.calldata_gas(&self.data)
    }

    /// Gas limits per dimension: `[gas_limit, blob_gas, calldata_gas]`.
    ///
    /// Blob and calldata gas are fixed by the transaction shape, so their limits are
    /// also the amounts used.
    pub fn gas_limits(&self, config: &VectorFeeConfig) -> GasVector {
        GasVector::new(
            self.gas_limit,
            self.blob_gas(config),
            self.calldata_gas(config),
        )
    }

    /// Scalar fee cap. The max fee per gas of the execution dimension for vector fee
    /// transactions.
    pub fn max_fee_per_gas(&self) -> BigInt {
        match self.tx_type {
            TransactionType::VectorFee => {
                primitives::bigint_from_u256(self.max_fees_per_gas[Dimension::Execution])
            }
            _ => BigInt::from(self.gas_price),
        }
    }

    /// Scalar tip cap. Legacy and access list transactions tip their whole gas price.
    pub fn max_priority_fee_per_gas(&self) -> BigInt {
        match self.tx_type {
            TransactionType::Legacy | TransactionType::Eip2930 => BigInt::from(self.gas_price),
            TransactionType::Eip1559 | TransactionType::Eip4844 => {
                BigInt::from(self.gas_priority_fee.unwrap_or_default())
            }
            TransactionType::VectorFee => {
                primitives::bigint_from_u256(self.max_priority_fees_per_gas[Dimension::Execution])
            }
        }
    }

    /// Scalar blob fee cap.
    pub fn max_fee_per_blob_gas(&self) -> BigInt {
        match self.tx_type {
            TransactionType::VectorFee => {
                primitives::bigint_from_u256(self.max_fees_per_gas[Dimension::Blob])
            }
            _ => BigInt::from(self.max_fee_per_blob_gas),
        }
    }

    /// Fee caps per dimension.
    ///
    /// Scalar transactions apply their fee cap to execution and calldata gas. Only blob
    /// transactions have a blob fee cap, the others have zero.
    pub fn gas_fee_caps(&self) -> PriceVector {
        if self.is_vector_fee() {
            return self.max_fees_per_gas.into();
        }
        let fee_cap = self.max_fee_per_gas();
        let blob_fee_cap = if self.tx_type == TransactionType::Eip4844 {
            self.max_fee_per_blob_gas()
        } else {
            BigInt::default()
        };
        PriceVector::new(Some(fee_cap.clone()), Some(blob_fee_cap), Some(fee_cap))
    }

    /// Tip caps per dimension. Scalar transactions never tip for blob gas.
    pub fn gas_tip_caps(&self) -> PriceVector {
        if self.is_vector_fee() {
            return self.max_priority_fees_per_gas.into();
        }
        let tip_cap = self.max_priority_fee_per_gas();
        PriceVector::new(Some(tip_cap.clone()), Some(BigInt::default()), Some(tip_cap))
    }

    /// Effective tip per dimension: `min(tip_cap, fee_cap - base_fee)`.
    ///
    /// Where the base fee is absent the tip cap is used as is.
    pub fn effective_gas_tips(&self, base_fees: &PriceVector) -> PriceVector {
        let fee_caps = self.gas_fee_caps();
        let tip_caps = self.gas_tip_caps();
        PriceVector::from_fn(|d| {
            let tip_cap = tip_caps[d].clone()?;
            match &base_fees[d] {
                None => Some(tip_cap),
                Some(base_fee) => {
                    let headroom = fee_caps[d].as_ref()? - base_fee;
                    Some(tip_cap.min(headroom))
                }
            }
        })
    }

    /// Effective price per dimension: `min(tip_cap + base_fee, fee_cap)`.
    ///
    /// Where the base fee is absent the fee cap is used as is.
    pub fn effective_gas_prices(&self, base_fees: &PriceVector) -> PriceVector {
        let fee_caps = self.gas_fee_caps();
        let tip_caps = self.gas_tip_caps();
        PriceVector::from_fn(|d| {
            let fee_cap = fee_caps[d].clone()?;
            match &base_fees[d] {
                None => Some(fee_cap),
                Some(base_fee) => Some((tip_caps[d].as_ref()? + base_fee).min(fee_cap)),
            }
        })
    }

    /// Effective scalar gas price for a block with the given legacy base fee.
    pub fn effective_gas_price(&self, basefee: Option<u64>) -> BigInt {
        let fee_cap = self.max_fee_per_gas();
        if matches!(
            self.tx_type,
            TransactionType::Legacy | TransactionType::Eip2930
        ) {
            return fee_cap;
        }
        match basefee {
            None => fee_cap,
            Some(basefee) => (self.max_priority_fee_per_gas() + basefee).min(fee_cap),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitives::bytes;

    fn blob_tx() -> TxEnv {
        TxEnv {
            tx_type: TransactionType::Eip4844,
            gas_limit: 21_000,
            gas_price: 10,
            gas_priority_fee: Some(2),
            max_fee_per_blob_gas: 7,
            blob_hashes: vec![B256::ZERO, B256::ZERO],
            data: bytes!("0x0001"),
            ..Default::default()
        }
    }

    #[test]
    fn scalar_transactions_as_vectors() {
        let config = VectorFeeConfig::default();

        let legacy = TxEnv {
            gas_limit: 21_000,
            gas_price: 5,
            blob_hashes: vec![B256::ZERO],
            ..Default::default()
        };
        assert_eq!(legacy.gas_limits(&config), GasVector::new(21_000, 0, 0));
        assert_eq!(legacy.gas_fee_caps(), PriceVector::from_u64s(5, 0, 5));
        assert_eq!(legacy.gas_tip_caps(), PriceVector::from_u64s(5, 0, 5));

        let tx = blob_tx();
        // one zero byte and one non-zero byte: (1 + 4) * 4
        assert_eq!(tx.gas_limits(&config), GasVector::new(21_000, 262_144, 20));
        assert_eq!(tx.gas_fee_caps(), PriceVector::from_u64s(10, 7, 10));
        assert_eq!(tx.gas_tip_caps(), PriceVector::from_u64s(2, 0, 2));
    }

    #[test]
    fn vector_transaction_caps() {
        let tx = TxEnv {
            tx_type: TransactionType::VectorFee,
            max_fees_per_gas: FeeVector::new(U256::from(10), U256::from(20), U256::from(30)),
            max_priority_fees_per_gas: FeeVector::new(U256::from(1), U256::from(2), U256::from(3)),
            ..Default::default()
        };
        assert_eq!(tx.gas_fee_caps(), PriceVector::from_u64s(10, 20, 30));
        assert_eq!(tx.gas_tip_caps(), PriceVector::from_u64s(1, 2, 3));
        assert_eq!(tx.max_fee_per_gas(), BigInt::from(10));
        assert_eq!(tx.max_fee_per_blob_gas(), BigInt::from(20));
    }

    #[test]
    fn effective_prices_and_tips() {
        let tx = blob_tx();
        let base_fees = PriceVector::from_u64s(9, 3, 4);
        // fee caps [10, 7, 10], tip caps [2, 0, 2]
        assert_eq!(
            tx.effective_gas_prices(&base_fees),
            PriceVector::from_u64s(10, 3, 6)
        );
        assert_eq!(
            tx.effective_gas_tips(&base_fees),
            PriceVector::from_u64s(1, 0, 2)
        );
    }

    #[test]
    fn absent_base_fees_fall_back_to_caps() {
        let tx = blob_tx();
        let base_fees = PriceVector::new(None, Some(BigInt::from(3)), None);
        assert_eq!(
            tx.effective_gas_prices(&base_fees),
            PriceVector::from_u64s(10, 3, 10)
        );
        assert_eq!(
            tx.effective_gas_tips(&base_fees),
            PriceVector::from_u64s(2, 0, 2)
        );
    }

    #[test]
    fn scalar_effective_gas_price() {
        let tx = blob_tx();
        assert_eq!(tx.effective_gas_price(Some(5)), BigInt::from(7));
        assert_eq!(tx.effective_gas_price(Some(9)), BigInt::from(10));
        assert_eq!(tx.effective_gas_price(None), BigInt::from(10));

        let legacy = TxEnv {
            gas_price: 5,
            ..Default::default()
        };
        assert_eq!(legacy.effective_gas_price(Some(100)), BigInt::from(5));
    }
}
