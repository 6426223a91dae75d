//! Consensus rule for the vector gas fields of a block header.
//!
//! [`verify_vector_header`] re-derives the excess gas and base fees of a header from its
//! parent and rejects the header if they disagree. [`prepare_vector_fields`] is the
//! builder side of the same computation.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc as std;

pub mod error;
pub mod prepare;
pub mod verify;

pub use error::InvalidHeader;
pub use prepare::{prepare_vector_fields, vector_child_header, VectorHeaderFields};
pub use verify::{base_fees_from_parent, sanitize_parent, verify_vector_header, ParentGas};
