//! Execution gas available to the transactions of a block.
use crate::InvalidTransaction;
use tracing::debug;

/// Execution gas left in the block under construction.
///
/// Only the execution dimension is pooled. Blob and calldata capacity is bounded
/// by the header rules instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GasPool {
    gas: u64,
}

impl GasPool {
    /// Creates a pool holding `gas`.
    #[inline]
    pub const fn new(gas: u64) -> Self {
        Self { gas }
    }

    /// Gas left in the pool.
    #[inline]
    pub const fn gas(&self) -> u64 {
        self.gas
    }

    /// Takes `amount` out of the pool.
    pub fn sub_gas(&mut self, amount: u64) -> Result<(), InvalidTransaction> {
        let Some(gas) = self.gas.checked_sub(amount) else {
            debug!(target: "vfm::gas_pool", available = self.gas, requested = amount, "gas pool exhausted");
            return Err(InvalidTransaction::GasPoolExhausted {
                available: self.gas,
                requested: amount,
            });
        };
        self.gas = gas;
        Ok(())
    }

    /// Returns `amount` to the pool.
    #[inline]
    pub fn add_gas(&mut self, amount: u64) {
        self.gas = self.gas.saturating_add(amount);
    }
}
