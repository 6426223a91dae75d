//! Chain parameters of the vector fee market.
use primitives::{
    eip4844::{BLOB_BASE_FEE_UPDATE_FRACTION, GAS_PER_BLOB, MAX_BLOB_GAS_PER_BLOCK},
    BASE_FEE_UPDATE_FRACTION, CALLDATA_GAS_LIMIT_RATIO, CALLDATA_GAS_PER_TOKEN,
    CALLDATA_TOKENS_PER_NON_ZERO_BYTE, DIMENSIONS, LIMIT_TARGET_RATIOS, MIN_GAS_PRICE,
};

/// Vector fee market configuration.
///
/// Every field defaults to the protocol constant of the same name, and vector fee rules
/// are not activated unless [`VectorFeeConfig::activation_timestamp`] is set.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct VectorFeeConfig {
    /// Timestamp of the first block the vector fee rules apply to.
    ///
    /// `None` means the rules never apply.
    pub activation_timestamp: Option<u64>,
    /// Ratio between gas limit and gas target, per dimension.
    ///
    /// A ratio of zero yields a zero target for that dimension.
    pub limit_target_ratios: [u64; DIMENSIONS],
    /// Multiplier of the target in the base fee exponent denominator.
    pub base_fee_update_fraction: u64,
    /// Lowest base fee of any dimension.
    pub min_gas_price: u64,
    /// Calldata tokens charged for a non-zero byte.
    pub calldata_tokens_per_non_zero_byte: u64,
    /// Calldata gas charged per calldata token.
    pub calldata_gas_per_token: u64,
    /// Ratio between the execution gas limit and the calldata gas limit.
    pub calldata_gas_limit_ratio: u64,
    /// Blob gas consumed by a single blob.
    pub blob_gas_per_blob: u64,
    /// Maximum blob gas a block may consume.
    pub max_blob_gas_per_block: u64,
    /// Update fraction of the legacy blob base fee.
    pub blob_base_fee_update_fraction: u64,
}

impl Default for VectorFeeConfig {
    fn default() -> Self {
        Self {
            activation_timestamp: None,
            limit_target_ratios: LIMIT_TARGET_RATIOS,
            base_fee_update_fraction: BASE_FEE_UPDATE_FRACTION,
            min_gas_price: MIN_GAS_PRICE,
            calldata_tokens_per_non_zero_byte: CALLDATA_TOKENS_PER_NON_ZERO_BYTE,
            calldata_gas_per_token: CALLDATA_GAS_PER_TOKEN,
            calldata_gas_limit_ratio: CALLDATA_GAS_LIMIT_RATIO,
            blob_gas_per_blob: GAS_PER_BLOB,
            max_blob_gas_per_block: MAX_BLOB_GAS_PER_BLOCK,
            blob_base_fee_update_fraction: BLOB_BASE_FEE_UPDATE_FRACTION,
        }
    }
}

impl VectorFeeConfig {
    /// Returns the default configuration with vector fee rules active from `timestamp`.
    #[must_use]
    pub fn activated_at(timestamp: u64) -> Self {
        Self::default().with_activation_timestamp(timestamp)
    }

    /// Sets the activation timestamp.
    #[must_use]
    pub fn with_activation_timestamp(mut self, timestamp: u64) -> Self {
        self.activation_timestamp = Some(timestamp);
        self
    }

    /// Sets the limit to target ratios.
    #[must_use]
    pub fn with_limit_target_ratios(mut self, ratios: [u64; DIMENSIONS]) -> Self {
        self.limit_target_ratios = ratios;
        self
    }

    /// Returns `true` if the vector fee rules apply to a block with the given timestamp.
    #[inline]
    pub fn is_active(&self, timestamp: u64) -> bool {
        self.activation_timestamp
            .is_some_and(|activation| timestamp >= activation)
    }

    /// Calldata gas charged for `data`.
    ///
    /// A zero byte is one token, any other byte is
    /// [`calldata_tokens_per_non_zero_byte`](Self::calldata_tokens_per_non_zero_byte) tokens.
    pub fn calldata_gas(&self, data: &[u8]) -> u64 {
        let zero_bytes = data.iter().filter(|byte| **byte == 0).count() as u64;
        let non_zero_bytes = data.len() as u64 - zero_bytes;
        let tokens = non_zero_bytes
            .saturating_mul(self.calldata_tokens_per_non_zero_byte)
            .saturating_add(zero_bytes);
        tokens.saturating_mul(self.calldata_gas_per_token)
    }

    /// Blob gas consumed by `blob_count` blobs.
    #[inline]
    pub fn blob_gas(&self, blob_count: usize) -> u64 {
        self.blob_gas_per_blob.saturating_mul(blob_count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_by_default() {
        let config = VectorFeeConfig::default();
        assert!(!config.is_active(0));
        assert!(!config.is_active(u64::MAX));
    }

    #[test]
    fn activation_is_inclusive() {
        let config = VectorFeeConfig::activated_at(100);
        assert!(!config.is_active(99));
        assert!(config.is_active(100));
        assert!(config.is_active(101));
    }

    #[test]
    fn calldata_gas_counts_tokens() {
        let config = VectorFeeConfig::default();
        assert_eq!(config.calldata_gas(&[]), 0);
        // two zero bytes and one non-zero byte: (2 + 4) tokens * 4 gas
        assert_eq!(config.calldata_gas(&[0, 1, 0]), 24);
        assert_eq!(config.calldata_gas(&[0xff; 10]), 160);
    }

    #[test]
    fn blob_gas_per_blob() {
        let config = VectorFeeConfig::default();
        assert_eq!(config.blob_gas(0), 0);
        assert_eq!(config.blob_gas(3), 3 * 131_072);
    }

    #[test]
    fn huge_units_saturate() {
        let config = VectorFeeConfig {
            blob_gas_per_blob: u64::MAX / 2,
            calldata_gas_per_token: u64::MAX / 3,
            calldata_tokens_per_non_zero_byte: u64::MAX,
            ..Default::default()
        };
        assert_eq!(config.blob_gas(3), u64::MAX);
        assert_eq!(config.calldata_gas(&[0; 4]), u64::MAX);
        assert_eq!(config.calldata_gas(&[1]), u64::MAX);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_partial_json() {
        let config: VectorFeeConfig =
            serde_json::from_str(r#"{"activationTimestamp":1700000000,"limitTargetRatios":[1,2,0]}"#)
                .unwrap();
        assert_eq!(config.activation_timestamp, Some(1_700_000_000));
        assert_eq!(config.limit_target_ratios, [1, 2, 0]);
        assert_eq!(config.base_fee_update_fraction, 8);
        assert_eq!(config.max_blob_gas_per_block, 786_432);
    }
}
