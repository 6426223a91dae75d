//! Multidimensional gas fee market.
//!
//! Gas is priced independently in three dimensions (execution, blob and calldata). This
//! crate re-exports the crates implementing it:
//!
//! * [`primitives`] - fee vectors and protocol constants
//! * [`fee_market`] - the excess gas and base fee recurrence
//! * [`header`] - the block header and its codec
//! * [`consensus`] - verification and preparation of the header vector fields
//! * [`database`] - account state and the base fees store
//! * [`handler`] - per transaction gas accounting
//!
//! and adds a [`BlockBuilder`] applying transactions to a child block.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc as std;

pub mod builder;

// reexport dependencies
pub use consensus;
pub use database;
pub use fee_market;
pub use handler;
pub use header;
pub use primitives;

// Export items.
pub use builder::BlockBuilder;
pub use consensus::{prepare_vector_fields, verify_vector_header, InvalidHeader};
pub use database::{Database, DatabaseCommit, InMemoryDB};
pub use fee_market::VectorFeeConfig;
pub use handler::{
    BlockEnv, CfgEnv, InvalidTransaction, Message, StateTransition, TransitionError, TxEnv,
};
pub use header::Header;
