//! Per transaction gas accounting under the vector fee market.
//!
//! A [`TxEnv`] is turned into a [`Message`] for a given [`BlockEnv`], and a
//! [`StateTransition`] then checks its fees, buys its gas, refunds what execution left
//! over and pays the block beneficiary.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc as std;

// Use serde to avoid unused dependency warning when the serde feature is enabled
#[cfg(feature = "serde")]
use serde as _;

pub mod block;
pub mod cfg;
pub mod error;
pub mod gas;
pub mod gas_pool;
pub mod handler;
pub mod journal;
pub mod message;
pub mod post_execution;
pub mod pre_execution;
pub mod transaction;
pub mod validation;

// Public exports
pub use block::BlockEnv;
pub use cfg::CfgEnv;
pub use error::{InvalidTransaction, TransitionError};
pub use gas::Gas;
pub use gas_pool::GasPool;
pub use handler::{StateTransition, TransitionOutcome};
pub use journal::{Journal, JournalCheckpoint};
pub use message::Message;
pub use pre_execution::CallerFee;
pub use transaction::{TransactionType, TxEnv};
