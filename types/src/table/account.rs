use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use super::MAX_NAME_LENGTH;

/// Opaque bettor identity, typically the chat platform's user id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AccountId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum WagerInvariantError {
    #[error("display name too long (len={len}, max={max})")]
    NameTooLong { len: usize, max: usize },
    #[error("stake must be positive")]
    ZeroStake,
}

/// One accepted bet, owned by the book of the round it was placed in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wager {
    pub id: u64,
    pub account: AccountId,
    pub display_name: String,
    pub stake: u64,
    /// Primary-catalog label the stake targets (lowercase).
    pub label: String,
}

impl Wager {
    pub fn validate_invariants(&self) -> Result<(), WagerInvariantError> {
        if self.display_name.len() > MAX_NAME_LENGTH {
            return Err(WagerInvariantError::NameTooLong {
                len: self.display_name.len(),
                max: MAX_NAME_LENGTH,
            });
        }
        if self.stake == 0 {
            return Err(WagerInvariantError::ZeroStake);
        }
        Ok(())
    }
}

/// A settlement line: the account credited and the amount it received.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Payout {
    pub account: AccountId,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub amount: u64,
    /// Balance after the credit landed.
    pub balance: u64,
}
