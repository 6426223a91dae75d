//! Block header of the vector fee market chain and its RLP codec.
//!
//! A header is either legacy, carrying the scalar gas limit and gas used with the
//! pre-existing optional fields, or vector-active, carrying gas limits, gas used and
//! excess gas for every gas dimension. Both share the same wire format prefix.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc as std;

mod codec;
pub mod header;

pub use header::{Header, HeaderGas, LegacyGas, VectorGas};
