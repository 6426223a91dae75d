//! Fee checks run before a transaction buys its gas.
use crate::{BlockEnv, CfgEnv, InvalidTransaction, Message};
use primitives::{BigInt, Dimension, PriceVector};
use tracing::debug;

/// Largest bit length of a fee or tip cap.
const MAX_FEE_BITS: u64 = 256;

/// Checks the fee fields of `msg` against the block, under the vector or the legacy rules
/// depending on the block timestamp.
pub fn pre_check(msg: &Message, block: &BlockEnv, cfg: &CfgEnv) -> Result<(), InvalidTransaction> {
    let result = if cfg.is_vector_fee_active(block.timestamp) {
        pre_check_vector(msg, block.base_fees.as_ref(), cfg.disable_base_fee)
    } else {
        pre_check_legacy(msg, block, cfg.disable_base_fee)
    };
    result.inspect_err(|err| {
        debug!(target: "vfm::handler", from = %msg.from, %err, "transaction rejected");
    })
}

/// Vector rules: every cap fits in 256 bits, every tip cap is at most its fee cap and every
/// fee cap is at least its base fee.
///
/// With `disable_base_fee` set, a message whose caps are all zero skips the checks.
pub fn pre_check_vector(
    msg: &Message,
    base_fees: Option<&PriceVector>,
    disable_base_fee: bool,
) -> Result<(), InvalidTransaction> {
    if disable_base_fee && msg.gas_fee_caps.bits_all_zero() && msg.gas_tip_caps.bits_all_zero() {
        return Ok(());
    }

    if let Some(dimension) = msg.gas_fee_caps.first_wider_than(MAX_FEE_BITS) {
        return Err(InvalidTransaction::FeeCapTooHigh { dimension });
    }
    if let Some(dimension) = msg.gas_tip_caps.first_wider_than(MAX_FEE_BITS) {
        return Err(InvalidTransaction::TipTooHigh { dimension });
    }
    if let Some(dimension) = msg.gas_tip_caps.first_not_le(&msg.gas_fee_caps) {
        return Err(InvalidTransaction::TipAboveFeeCap { dimension });
    }

    let base_fees = base_fees.ok_or(InvalidTransaction::BaseFeesNotSet)?;
    if let Some(dimension) = base_fees.first_not_le(&msg.gas_fee_caps) {
        return Err(InvalidTransaction::FeeCapBelowBaseFee { dimension });
    }
    Ok(())
}

/// EIP-1559 and EIP-4844 rules on the scalar fee fields.
pub fn pre_check_legacy(
    msg: &Message,
    block: &BlockEnv,
    disable_base_fee: bool,
) -> Result<(), InvalidTransaction> {
    let skip = disable_base_fee && msg.gas_fee_cap.bits() == 0 && msg.gas_tip_cap.bits() == 0;
    if !skip {
        let dimension = Dimension::Execution;
        if msg.gas_fee_cap.bits() > MAX_FEE_BITS {
            return Err(InvalidTransaction::FeeCapTooHigh { dimension });
        }
        if msg.gas_tip_cap.bits() > MAX_FEE_BITS {
            return Err(InvalidTransaction::TipTooHigh { dimension });
        }
        if msg.gas_fee_cap < msg.gas_tip_cap {
            return Err(InvalidTransaction::TipAboveFeeCap { dimension });
        }
        if block
            .basefee
            .is_some_and(|basefee| msg.gas_fee_cap < BigInt::from(basefee))
        {
            return Err(InvalidTransaction::FeeCapBelowBaseFee { dimension });
        }
    }

    if msg.blob_gas() > 0 && !(disable_base_fee && msg.blob_gas_fee_cap.bits() == 0) {
        if let Some(blob_base_fee) = &block.blob_gasprice {
            if msg.blob_gas_fee_cap < *blob_base_fee {
                return Err(InvalidTransaction::BlobFeeCapTooLow {
                    fee_cap: msg.blob_gas_fee_cap.clone(),
                    blob_base_fee: blob_base_fee.clone(),
                });
            }
        }
    }
    Ok(())
}
