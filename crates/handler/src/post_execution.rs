//! Settlement after execution: refunding unused gas and paying the block beneficiary.
use crate::{BlockEnv, CfgEnv, Gas, GasPool, InvalidTransaction, Journal, Message, TransitionError};
use database::Database;
use primitives::{u256_from_bigint, BigInt, Dimension, GasVector, U256};
use tracing::trace;

/// Gas used by the transaction in every dimension.
///
/// Execution gas is what execution consumed. Blob and calldata gas are charged in full.
pub fn vector_gas_used(msg: &Message, gas: &Gas) -> GasVector {
    let mut used = msg.gas_limits;
    used[Dimension::Execution] = gas.spent();
    used
}

/// Gas left over in every dimension, floored at zero.
pub fn vector_gas_remaining(msg: &Message, gas: &Gas) -> GasVector {
    msg.gas_limits.saturating_sub(&vector_gas_used(msg, gas))
}

/// Amount returned to the caller under the vector rules:
/// `sum(remaining * effective_prices)`.
pub fn vector_refund(msg: &Message, gas: &Gas) -> Result<U256, InvalidTransaction> {
    let refund = vector_gas_remaining(msg, gas)
        .to_prices()
        .checked_mul(&msg.effective_gas_prices)?
        .checked_sum()?;
    u256_from_bigint(&refund).ok_or(InvalidTransaction::Overflow)
}

/// Amount returned to the caller under the legacy rules: `remaining * gas_price`.
pub fn legacy_refund(msg: &Message, gas: &Gas) -> Result<U256, InvalidTransaction> {
    let refund = BigInt::from(gas.remaining()) * &msg.gas_price;
    u256_from_bigint(&refund).ok_or(InvalidTransaction::Overflow)
}

/// Returns the value of unused gas to the caller and the unused execution gas to the block
/// gas pool.
pub fn refund_gas<DB: Database>(
    msg: &Message,
    block: &BlockEnv,
    cfg: &CfgEnv,
    gas: &Gas,
    journal: &mut Journal<DB>,
    gas_pool: &mut GasPool,
) -> Result<(), TransitionError<DB::Error>> {
    let refund = if cfg.is_vector_fee_active(block.timestamp) {
        vector_refund(msg, gas)?
    } else {
        legacy_refund(msg, gas)?
    };

    journal.add_balance(msg.from, refund)?;
    gas_pool.add_gas(gas.remaining());
    trace!(target: "vfm::handler", from = %msg.from, %refund, remaining = gas.remaining(), "refunded gas");
    Ok(())
}

/// Tip owed to the beneficiary under the vector rules: `sum(effective_tips * used)`.
///
/// Zero when base fees are disabled and the message carries no fee or tip caps.
pub fn vector_tip(msg: &Message, gas: &Gas, disable_base_fee: bool) -> Result<U256, InvalidTransaction> {
    if disable_base_fee && msg.gas_fee_caps.bits_all_zero() && msg.gas_tip_caps.bits_all_zero() {
        return Ok(U256::ZERO);
    }
    let tip = msg
        .effective_gas_tips
        .checked_mul(&vector_gas_used(msg, gas).to_prices())?
        .checked_sum()?;
    u256_from_bigint(&tip).ok_or(InvalidTransaction::Overflow)
}

/// Tip owed to the beneficiary under the legacy rules: `effective_tip * spent`.
///
/// The effective tip is `min(tip_cap, fee_cap - basefee)`, or the gas price when the block
/// has no base fee.
pub fn legacy_tip(
    msg: &Message,
    block: &BlockEnv,
    gas: &Gas,
    disable_base_fee: bool,
) -> Result<U256, InvalidTransaction> {
    if disable_base_fee && msg.gas_fee_cap.bits() == 0 && msg.gas_tip_cap.bits() == 0 {
        return Ok(U256::ZERO);
    }
    let effective_tip = match block.basefee {
        Some(basefee) => (&msg.gas_fee_cap - BigInt::from(basefee)).min(msg.gas_tip_cap.clone()),
        None => msg.gas_price.clone(),
    };
    let tip = effective_tip * BigInt::from(gas.spent());
    u256_from_bigint(&tip).ok_or(InvalidTransaction::Overflow)
}

/// Credits the block beneficiary with the tip of the transaction.
pub fn pay_tip<DB: Database>(
    msg: &Message,
    block: &BlockEnv,
    cfg: &CfgEnv,
    gas: &Gas,
    journal: &mut Journal<DB>,
) -> Result<(), TransitionError<DB::Error>> {
    let tip = if cfg.is_vector_fee_active(block.timestamp) {
        vector_tip(msg, gas, cfg.disable_base_fee)?
    } else {
        legacy_tip(msg, block, gas, cfg.disable_base_fee)?
    };

    if tip.is_zero() {
        return Ok(());
    }
    journal.add_balance(block.beneficiary, tip)?;
    trace!(target: "vfm::handler", beneficiary = %block.beneficiary, %tip, "paid tip");
    Ok(())
}
