//! Account state interface and storage used by the vector fee market.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc as std;

use core::convert::Infallible;

use auto_impl::auto_impl;
use primitives::{Address, HashMap};

pub mod account;
pub mod base_fees;
pub mod in_memory_db;
pub mod kv;

pub use account::{Account, AccountInfo};
pub use base_fees::{
    delete_header_base_fees, header_base_fees_key, read_header_base_fees,
    write_header_base_fees, BaseFeesStoreError, HEADER_BASE_FEES_PREFIX,
};
pub use in_memory_db::InMemoryDB;
pub use kv::{KeyValueStore, MemoryKvStore};

/// Database error marker is needed to implement From conversion for Error type.
pub trait DBErrorMarker: core::error::Error + Send + Sync + 'static {}

/// Implement marker for `Infallible`.
impl DBErrorMarker for Infallible {}

/// Account state interface.
#[auto_impl(&mut, Box)]
pub trait Database {
    /// The database error type.
    type Error: DBErrorMarker;

    /// Gets basic account information.
    fn basic(&mut self, address: Address) -> Result<Option<AccountInfo>, Self::Error>;
}

/// Account state commit interface.
#[auto_impl(&mut, Box)]
pub trait DatabaseCommit {
    /// Commit changes to the database.
    fn commit(&mut self, changes: HashMap<Address, Account>);
}
