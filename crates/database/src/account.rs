//! Account types.
use primitives::U256;

/// Basic account information.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccountInfo {
    /// Account balance.
    pub balance: U256,
    /// Account nonce.
    pub nonce: u64,
}

impl AccountInfo {
    /// Creates account info with the given balance and a zero nonce.
    pub const fn from_balance(balance: U256) -> Self {
        Self { balance, nonce: 0 }
    }

    /// Returns `true` if the account has neither balance nor nonce.
    pub fn is_empty(&self) -> bool {
        self.balance.is_zero() && self.nonce == 0
    }
}

/// Account loaded into a journal, together with whether it was changed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Account {
    /// Balance and nonce.
    pub info: AccountInfo,
    /// Whether the account was written to.
    touched: bool,
}

impl Account {
    /// Account that is not in the database yet.
    pub fn new_not_existing() -> Self {
        Self::default()
    }

    /// Marks the account as touched.
    pub fn mark_touch(&mut self) {
        self.touched = true;
    }

    /// Returns `true` if the account was touched.
    pub fn is_touched(&self) -> bool {
        self.touched
    }
}

impl From<AccountInfo> for Account {
    fn from(info: AccountInfo) -> Self {
        Self {
            info,
            touched: false,
        }
    }
}
