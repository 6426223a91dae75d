//! Vector fee market engine.
//!
//! Pure functions deriving per-dimension targets, excess gas and base fees of a block
//! from the vectors of its parent, together with the [`VectorFeeConfig`] chain
//! parameters they are computed under.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc as std;

pub mod config;
pub mod engine;
pub mod gas_limit;

pub use config::VectorFeeConfig;
pub use engine::{blob_base_fee, fake_exponential, next_base_fees, next_excess_gas, targets};
pub use gas_limit::{calc_gas_limit, calc_gas_limits};
