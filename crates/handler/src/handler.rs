//! Gas accounting of a single transaction, from admission to settlement.
use crate::{
    post_execution, pre_execution, validation, BlockEnv, CfgEnv, Gas, GasPool,
    InvalidTransaction, Journal, Message, TransitionError,
};
use database::Database;
use primitives::GasVector;

/// Gas consumed by a settled transaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionOutcome {
    /// Execution gas left of the transaction.
    pub gas: Gas,
    /// Gas used in every dimension.
    pub gas_used: GasVector,
}

/// Runs the gas accounting of a [`Message`] against a block.
///
/// The stages run in order:
///   * [`pre_check`](Self::pre_check) - fee cap and tip cap checks against the block base fees
///   * [`buy_gas`](Self::buy_gas) - balance check, block gas pool debit and upfront charge
///   * [`record_gas_used`](Self::record_gas_used) - execution gas reported by the executor
///   * [`refund_gas`](Self::refund_gas) - unused gas back to the caller and the pool
///   * [`pay_tip`](Self::pay_tip) - beneficiary reward
///
/// Whether the vector or the legacy rules apply is decided by the block timestamp.
#[derive(Debug)]
pub struct StateTransition<'a, DB> {
    msg: Message,
    block: &'a BlockEnv,
    cfg: &'a CfgEnv,
    journal: &'a mut Journal<DB>,
    gas_pool: &'a mut GasPool,
    gas: Gas,
}

impl<'a, DB: Database> StateTransition<'a, DB> {
    /// Creates a transition of `msg`. No gas is bought yet.
    pub fn new(
        msg: Message,
        block: &'a BlockEnv,
        cfg: &'a CfgEnv,
        journal: &'a mut Journal<DB>,
        gas_pool: &'a mut GasPool,
    ) -> Self {
        Self {
            msg,
            block,
            cfg,
            journal,
            gas_pool,
            gas: Gas::default(),
        }
    }

    /// The message being applied.
    #[inline]
    pub fn msg(&self) -> &Message {
        &self.msg
    }

    /// Execution gas of the transaction.
    #[inline]
    pub fn gas(&self) -> &Gas {
        &self.gas
    }

    /// Returns `true` if the vector rules apply.
    #[inline]
    pub fn is_vector_fee_active(&self) -> bool {
        self.cfg.is_vector_fee_active(self.block.timestamp)
    }

    /// Checks the fee fields of the message.
    pub fn pre_check(&self) -> Result<(), InvalidTransaction> {
        validation::pre_check(&self.msg, self.block, self.cfg)
    }

    /// Checks the caller balance and charges the gas limits upfront.
    pub fn buy_gas(&mut self) -> Result<(), TransitionError<DB::Error>> {
        self.gas = pre_execution::buy_gas(&self.msg, self.block, self.cfg, self.journal, self.gas_pool)?;
        Ok(())
    }

    /// Records execution gas consumed by the executor.
    pub fn record_gas_used(&mut self, gas_used: u64) -> Result<(), InvalidTransaction> {
        if !self.gas.record_cost(gas_used) {
            return Err(InvalidTransaction::GasUsedExceedsLimit {
                used: gas_used,
                limit: self.gas.limit(),
            });
        }
        Ok(())
    }

    /// Refunds the unused gas.
    pub fn refund_gas(&mut self) -> Result<(), TransitionError<DB::Error>> {
        post_execution::refund_gas(
            &self.msg,
            self.block,
            self.cfg,
            &self.gas,
            self.journal,
            self.gas_pool,
        )
    }

    /// Pays the tip to the block beneficiary.
    pub fn pay_tip(&mut self) -> Result<(), TransitionError<DB::Error>> {
        post_execution::pay_tip(&self.msg, self.block, self.cfg, &self.gas, self.journal)
    }

    /// Gas used in every dimension.
    #[inline]
    pub fn vector_gas_used(&self) -> GasVector {
        post_execution::vector_gas_used(&self.msg, &self.gas)
    }

    /// Gas left in every dimension.
    #[inline]
    pub fn vector_gas_remaining(&self) -> GasVector {
        post_execution::vector_gas_remaining(&self.msg, &self.gas)
    }

    /// Runs every stage, with execution consuming `execution_gas_used`.
    ///
    /// On error the journal may hold partial changes and is expected to be discarded.
    pub fn transact(
        mut self,
        execution_gas_used: u64,
    ) -> Result<TransitionOutcome, TransitionError<DB::Error>> {
        self.pre_check()?;
        self.buy_gas()?;
        self.record_gas_used(execution_gas_used)?;
        self.refund_gas()?;
        self.pay_tip()?;

        Ok(TransitionOutcome {
            gas: self.gas,
            gas_used: self.vector_gas_used(),
        })
    }
}
