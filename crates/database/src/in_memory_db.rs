//! In-memory account database.
use crate::{Account, AccountInfo, Database, DatabaseCommit};
use core::convert::Infallible;
use primitives::{Address, HashMap};

/// A [Database] implementation that stores all accounts in memory.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InMemoryDB {
    /// Accounts by address. Missing accounts do not exist.
    pub accounts: HashMap<Address, AccountInfo>,
}

impl InMemoryDB {
    /// Inserts or replaces account info.
    pub fn insert_account_info(&mut self, address: Address, info: AccountInfo) {
        self.accounts.insert(address, info);
    }

    /// Returns the account info of `address` without going through the [Database] interface.
    pub fn account(&self, address: &Address) -> Option<&AccountInfo> {
        self.accounts.get(address)
    }
}

impl Database for InMemoryDB {
    type Error = Infallible;

    fn basic(&mut self, address: Address) -> Result<Option<AccountInfo>, Self::Error> {
        Ok(self.accounts.get(&address).cloned())
    }
}

impl DatabaseCommit for InMemoryDB {
    fn commit(&mut self, changes: HashMap<Address, Account>) {
        for (address, account) in changes {
            if !account.is_touched() {
                continue;
            }
            self.accounts.insert(address, account.info);
        }
    }
}
