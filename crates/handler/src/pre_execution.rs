//! Buying gas: the caller balance check and the upfront debit.
use crate::{BlockEnv, CfgEnv, Gas, GasPool, InvalidTransaction, Journal, Message, TransitionError};
use database::Database;
use primitives::{bigint_from_u256, u256_from_bigint, BigInt, U256};
use tracing::trace;

/// Upfront amounts of a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallerFee {
    /// Balance the caller must hold.
    pub balance_check: U256,
    /// Amount debited from the caller.
    pub cost: U256,
}

/// Maximum cost and upfront debit under the vector rules.
///
/// The caller must hold `sum(gas_limits * fee_caps) + value` and is charged
/// `sum(effective_prices * gas_limits)`.
pub fn vector_caller_fee(msg: &Message) -> Result<CallerFee, InvalidTransaction> {
    let gas_limits = msg.gas_limits.to_prices();

    let max_fees = gas_limits.checked_mul(&msg.gas_fee_caps)?.checked_sum()?;
    let balance_check = u256_from_bigint(&(max_fees + bigint_from_u256(msg.value)))
        .ok_or(InvalidTransaction::BalanceCheckOverflow)?;

    let cost = msg
        .effective_gas_prices
        .checked_mul(&gas_limits)?
        .checked_sum()?;
    let cost = u256_from_bigint(&cost).ok_or(InvalidTransaction::Overflow)?;

    Ok(CallerFee {
        balance_check,
        cost,
    })
}

/// Maximum cost and upfront debit under the legacy rules.
///
/// The caller must hold `gas_limit * fee_cap + value + blob_gas * blob_fee_cap` and is
/// charged `gas_limit * gas_price + blob_gas * blob_base_fee`.
pub fn legacy_caller_fee(msg: &Message, block: &BlockEnv) -> Result<CallerFee, InvalidTransaction> {
    let gas_limit = BigInt::from(msg.gas_limit);
    let mut cost = &gas_limit * &msg.gas_price;
    let mut balance_check = &gas_limit * &msg.gas_fee_cap + bigint_from_u256(msg.value);

    let blob_gas = BigInt::from(msg.blob_gas());
    if msg.blob_gas() > 0 {
        balance_check += &blob_gas * &msg.blob_gas_fee_cap;
        if let Some(blob_gasprice) = &block.blob_gasprice {
            cost += &blob_gas * blob_gasprice;
        }
    }

    Ok(CallerFee {
        balance_check: u256_from_bigint(&balance_check)
            .ok_or(InvalidTransaction::BalanceCheckOverflow)?,
        cost: u256_from_bigint(&cost).ok_or(InvalidTransaction::Overflow)?,
    })
}

/// Checks the caller can afford the transaction, takes its gas limit out of the block gas
/// pool and debits the caller.
///
/// Returns the execution gas of the transaction.
pub fn buy_gas<DB: Database>(
    msg: &Message,
    block: &BlockEnv,
    cfg: &CfgEnv,
    journal: &mut Journal<DB>,
    gas_pool: &mut GasPool,
) -> Result<Gas, TransitionError<DB::Error>> {
    let fee = if cfg.is_vector_fee_active(block.timestamp) {
        vector_caller_fee(msg)?
    } else {
        legacy_caller_fee(msg, block)?
    };

    let balance = journal.balance(msg.from)?;
    if balance < fee.balance_check {
        return Err(InvalidTransaction::InsufficientFunds {
            have: balance,
            want: fee.balance_check,
        }
        .into());
    }

    gas_pool.sub_gas(msg.gas_limit)?;
    journal.sub_balance(msg.from, fee.cost)?;
    trace!(target: "vfm::handler", from = %msg.from, cost = %fee.cost, gas_limit = msg.gas_limit, "bought gas");

    Ok(Gas::new(msg.gas_limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::{AccountInfo, InMemoryDB};
    use fee_market::VectorFeeConfig;
    use primitives::{address, Address, GasVector, PriceVector};

    const CALLER: Address = address!("0x00000000000000000000000000000000000000ca");

    fn vector_msg() -> Message {
        Message {
            from: CALLER,
            gas_limit: 100,
            value: U256::from(5),
            gas_limits: GasVector::new(100, 10, 20),
            gas_fee_caps: PriceVector::from_u64s(4, 3, 2),
            effective_gas_prices: PriceVector::from_u64s(2, 1, 1),
            ..Default::default()
        }
    }

    fn funded(balance: u64) -> InMemoryDB {
        let mut db = InMemoryDB::default();
        db.insert_account_info(CALLER, AccountInfo::from_balance(U256::from(balance)));
        db
    }

    #[test]
    fn vector_fee() {
        let fee = vector_caller_fee(&vector_msg()).unwrap();
        // 100 * 4 + 10 * 3 + 20 * 2 + 5
        assert_eq!(fee.balance_check, U256::from(475));
        // 100 * 2 + 10 * 1 + 20 * 1
        assert_eq!(fee.cost, U256::from(230));
    }

    #[test]
    fn vector_fee_overflow() {
        let mut msg = vector_msg();
        msg.gas_fee_caps[primitives::Dimension::Blob] = Some(BigInt::from(1) << 256usize);
        assert_eq!(
            vector_caller_fee(&msg),
            Err(InvalidTransaction::BalanceCheckOverflow)
        );

        let mut msg = vector_msg();
        msg.effective_gas_prices[primitives::Dimension::Blob] = Some(BigInt::from(-1));
        assert_eq!(vector_caller_fee(&msg), Err(InvalidTransaction::Overflow));
    }

    #[test]
    fn legacy_fee_with_blobs() {
        let msg = Message {
            gas_limit: 100,
            gas_price: BigInt::from(3),
            gas_fee_cap: BigInt::from(5),
            blob_gas_fee_cap: BigInt::from(4),
            value: U256::from(1),
            gas_limits: GasVector::new(100, 10, 0),
            ..Default::default()
        };
        let block = BlockEnv {
            blob_gasprice: Some(BigInt::from(2)),
            ..Default::default()
        };
        let fee = legacy_caller_fee(&msg, &block).unwrap();
        assert_eq!(fee.balance_check, U256::from(100 * 5 + 1 + 10 * 4));
        assert_eq!(fee.cost, U256::from(100 * 3 + 10 * 2));
    }

    #[test]
    fn buy_gas_debits_caller_and_pool() {
        let cfg = CfgEnv::new(VectorFeeConfig::activated_at(0));
        let block = BlockEnv::default();
        let mut journal = Journal::new(funded(475));
        let mut pool = GasPool::new(1_000);

        let gas = buy_gas(&vector_msg(), &block, &cfg, &mut journal, &mut pool).unwrap();
        assert_eq!(gas, Gas::new(100));
        assert_eq!(pool.gas(), 900);
        assert_eq!(journal.balance(CALLER).unwrap(), U256::from(245));
    }

    #[test]
    fn buy_gas_needs_balance_for_max_cost() {
        let cfg = CfgEnv::new(VectorFeeConfig::activated_at(0));
        let block = BlockEnv::default();
        let mut journal = Journal::new(funded(474));
        let mut pool = GasPool::new(1_000);

        assert_eq!(
            buy_gas(&vector_msg(), &block, &cfg, &mut journal, &mut pool),
            Err(TransitionError::Transaction(
                InvalidTransaction::InsufficientFunds {
                    have: U256::from(474),
                    want: U256::from(475),
                }
            ))
        );
        assert_eq!(pool.gas(), 1_000);
        assert_eq!(journal.balance(CALLER).unwrap(), U256::from(474));
    }

    #[test]
    fn buy_gas_needs_pool_capacity() {
        let cfg = CfgEnv::new(VectorFeeConfig::activated_at(0));
        let block = BlockEnv::default();
        let mut journal = Journal::new(funded(1_000));
        let mut pool = GasPool::new(99);

        assert_eq!(
            buy_gas(&vector_msg(), &block, &cfg, &mut journal, &mut pool),
            Err(TransitionError::Transaction(
                InvalidTransaction::GasPoolExhausted {
                    available: 99,
                    requested: 100,
                }
            ))
        );
        assert_eq!(journal.balance(CALLER).unwrap(), U256::from(1_000));
    }
}
