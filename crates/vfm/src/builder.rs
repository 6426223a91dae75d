//! Building a vector-active block on top of a parent.
use consensus::vector_child_header;
use database::{Account, Database, DatabaseCommit};
use handler::{
    BlockEnv, CfgEnv, GasPool, InvalidTransaction, Journal, Message, StateTransition,
    TransitionError, TransitionOutcome, TxEnv,
};
use header::{Header, HeaderGas};
use primitives::{Address, Dimension, HashMap};
use tracing::debug;

/// Applies transactions to a vector-active child header, accumulating the gas they use.
///
/// A transaction that fails leaves neither balances, the gas pool nor the header changed.
#[derive(Debug)]
pub struct BlockBuilder<DB> {
    cfg: CfgEnv,
    header: Header,
    block: BlockEnv,
    journal: Journal<DB>,
    gas_pool: GasPool,
}

impl<DB: Database> BlockBuilder<DB> {
    /// Starts the child of `parent` at `timestamp`, paying tips to `beneficiary`.
    ///
    /// Returns `None` if the vector rules do not apply at `timestamp`.
    pub fn new(
        cfg: CfgEnv,
        parent: &Header,
        timestamp: u64,
        gas_ceil: u64,
        beneficiary: Address,
        database: DB,
    ) -> Option<Self> {
        if !cfg.is_vector_fee_active(timestamp) {
            return None;
        }
        let mut header = vector_child_header(&cfg.vector_fee, parent, timestamp, gas_ceil);
        header.coinbase = beneficiary;

        let block = BlockEnv::from_header(&cfg.vector_fee, &header);
        let gas_pool = GasPool::new(
            header
                .gas_limits()
                .map_or(0, |limits| limits[Dimension::Execution]),
        );
        Some(Self {
            cfg,
            header,
            block,
            journal: Journal::new(database),
            gas_pool,
        })
    }

    /// The header under construction.
    #[inline]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The block environment transactions execute in.
    #[inline]
    pub fn block_env(&self) -> &BlockEnv {
        &self.block
    }

    /// Execution gas left in the block.
    #[inline]
    pub fn gas_pool(&self) -> &GasPool {
        &self.gas_pool
    }

    /// Applies `tx`, with execution consuming `execution_gas_used`.
    pub fn transact(
        &mut self,
        tx: &TxEnv,
        execution_gas_used: u64,
    ) -> Result<TransitionOutcome, TransitionError<DB::Error>> {
        let msg = Message::new(tx, &self.block, &self.cfg)?;
        self.check_block_limits(&msg)?;

        let checkpoint = self.journal.checkpoint();
        let gas_pool = self.gas_pool;
        let result = StateTransition::new(
            msg,
            &self.block,
            &self.cfg,
            &mut self.journal,
            &mut self.gas_pool,
        )
        .transact(execution_gas_used);

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                self.journal.checkpoint_revert(checkpoint);
                self.gas_pool = gas_pool;
                return Err(err);
            }
        };

        if let HeaderGas::Vector(vector) = &mut self.header.gas {
            for dimension in [Dimension::Blob, Dimension::Calldata] {
                let used = &mut vector.gas_used[dimension];
                *used = used.saturating_add(outcome.gas_used[dimension]);
            }
        }
        self.header
            .add_execution_gas_used(outcome.gas_used[Dimension::Execution]);
        Ok(outcome)
    }

    /// Rejects `msg` when its blob or calldata gas no longer fits in the block.
    fn check_block_limits(&self, msg: &Message) -> Result<(), InvalidTransaction> {
        let (Some(limits), Some(used)) = (self.header.gas_limits(), self.header.gas_used_vector())
        else {
            return Ok(());
        };
        for dimension in [Dimension::Blob, Dimension::Calldata] {
            let available = limits[dimension].saturating_sub(used[dimension]);
            let requested = msg.gas_limits[dimension];
            if requested > available {
                debug!(target: "vfm::builder", %dimension, available, requested, "block limit reached");
                return Err(InvalidTransaction::BlockLimitReached {
                    dimension,
                    available,
                    requested,
                });
            }
        }
        Ok(())
    }

    /// Finishes the block, returning its header and the account changes to commit.
    pub fn finish(mut self) -> (Header, HashMap<Address, Account>) {
        let changes = self.journal.finalize();
        (self.header, changes)
    }
}

impl<DB: Database + DatabaseCommit> BlockBuilder<DB> {
    /// Finishes the block and commits its account changes to the database.
    pub fn finish_commit(mut self) -> Header {
        let changes = self.journal.finalize();
        self.journal.database.commit(changes);
        self.header
    }
}
