//! Configuration of a state transition.
use fee_market::VectorFeeConfig;

/// Chain and execution configuration of a state transition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct CfgEnv {
    /// Vector fee market parameters, including the activation timestamp.
    pub vector_fee: VectorFeeConfig,
    /// Skips fee checks and tip payment for transactions that set all fee fields to zero.
    ///
    /// Used when simulating calls.
    pub disable_base_fee: bool,
}

impl CfgEnv {
    /// Creates a configuration with the given vector fee parameters.
    pub fn new(vector_fee: VectorFeeConfig) -> Self {
        Self {
            vector_fee,
            disable_base_fee: false,
        }
    }

    /// Enables or disables the base fee override.
    #[must_use]
    pub fn with_disable_base_fee(mut self, disable: bool) -> Self {
        self.disable_base_fee = disable;
        self
    }

    /// Returns `true` if the vector fee rules apply to a block with the given timestamp.
    #[inline]
    pub fn is_vector_fee_active(&self, timestamp: u64) -> bool {
        self.vector_fee.is_active(timestamp)
    }
}
