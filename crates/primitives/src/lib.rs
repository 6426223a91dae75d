//! # vfm-primitives
//!
//! Fee vector types, protocol constants and re-exports of the alloy primitive types
//! used across the vector fee market crates.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc as std;

pub mod constants;
pub mod eip4844;
pub mod fee_vector;

pub use alloy_primitives::{
    self, address, b256, bytes, hex, keccak256, map::HashMap, Address, Bloom, Bytes, B256, B64,
    U256,
};
pub use constants::*;
pub use fee_vector::{
    bigint_from_u256, u256_from_bigint, Dimension, FeeVector, GasVector, PriceVector, VectorError,
    DIMENSIONS,
};
pub use num_bigint::{self, BigInt, Sign};
