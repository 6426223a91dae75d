//! Account changes of a state transition, held until they are committed.
use crate::{InvalidTransaction, TransitionError};
use database::{Account, Database};
use primitives::{Address, HashMap, U256};

/// Loads accounts from a [`Database`] and records balance changes on them.
///
/// Nothing is written to the database. [`Journal::finalize`] hands out the changed
/// accounts for the caller to commit.
#[derive(Debug)]
pub struct Journal<DB> {
    /// Database the accounts are loaded from.
    pub database: DB,
    /// Loaded accounts.
    pub state: HashMap<Address, Account>,
}

impl<DB: Database> Journal<DB> {
    /// Creates an empty journal over `database`.
    pub fn new(database: DB) -> Self {
        Self {
            database,
            state: HashMap::default(),
        }
    }

    /// Loads the account of `address`, from the database on first access.
    pub fn load_account(&mut self, address: Address) -> Result<&mut Account, DB::Error> {
        if !self.state.contains_key(&address) {
            let account = match self.database.basic(address)? {
                Some(info) => Account::from(info),
                None => Account::new_not_existing(),
            };
            self.state.insert(address, account);
        }
        Ok(self.state.entry(address).or_default())
    }

    /// Balance of `address`.
    pub fn balance(&mut self, address: Address) -> Result<U256, DB::Error> {
        Ok(self.load_account(address)?.info.balance)
    }

    /// Adds `amount` to the balance of `address`.
    ///
    /// Fails with [`InvalidTransaction::Overflow`] if the balance would exceed 256 bits,
    /// in which case the account is left untouched.
    pub fn add_balance(
        &mut self,
        address: Address,
        amount: U256,
    ) -> Result<(), TransitionError<DB::Error>> {
        let account = self.load_account(address)?;
        let balance = account
            .info
            .balance
            .checked_add(amount)
            .ok_or(InvalidTransaction::Overflow)?;
        account.mark_touch();
        account.info.balance = balance;
        Ok(())
    }

    /// Subtracts `amount` from the balance of `address`.
    ///
    /// Fails with [`InvalidTransaction::InsufficientFunds`] if the balance is lower than
    /// `amount`, in which case the account is left untouched.
    pub fn sub_balance(
        &mut self,
        address: Address,
        amount: U256,
    ) -> Result<(), TransitionError<DB::Error>> {
        let account = self.load_account(address)?;
        let balance = account.info.balance;
        account.info.balance =
            balance
                .checked_sub(amount)
                .ok_or(InvalidTransaction::InsufficientFunds {
                    have: balance,
                    want: amount,
                })?;
        account.mark_touch();
        Ok(())
    }

    /// Takes the loaded accounts out of the journal, leaving it empty.
    pub fn finalize(&mut self) -> HashMap<Address, Account> {
        core::mem::take(&mut self.state)
    }

    /// Snapshots the loaded accounts.
    pub fn checkpoint(&self) -> JournalCheckpoint {
        JournalCheckpoint {
            state: self.state.clone(),
        }
    }

    /// Drops every change made since `checkpoint` was taken.
    pub fn checkpoint_revert(&mut self, checkpoint: JournalCheckpoint) {
        self.state = checkpoint.state;
    }
}

/// Accounts of a [`Journal`] at some point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JournalCheckpoint {
    state: HashMap<Address, Account>,
}
