//! Durable account ledger.
//!
//! Balances live in memory and are mirrored to a [`SnapshotStore`] on
//! every mutation. A mutation is committed only once its snapshot write
//! succeeds; a failed write rolls the in-memory change back, so the
//! caller can retry without risking a partial update.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use wheelhouse_types::{AccountId, TableError};

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("snapshot io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot decode failed: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("snapshot store failed: {0}")]
    Failed(&'static str),
}

#[derive(Debug, ThisError)]
pub enum LedgerError {
    #[error("insufficient funds (requested={requested}, available={available})")]
    Insufficient { requested: u64, available: u64 },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<LedgerError> for TableError {
    fn from(value: LedgerError) -> Self {
        match value {
            LedgerError::Insufficient {
                requested,
                available,
            } => TableError::InsufficientFunds {
                stake: requested,
                balance: available,
            },
            LedgerError::Store(err) => TableError::Storage(err.to_string()),
        }
    }
}

/// Durable image of every balance the table has touched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub balances: BTreeMap<AccountId, u64>,
}

/// Persistence seam behind the ledger.
pub trait SnapshotStore: Send {
    /// Returns the last persisted snapshot, if any exists.
    fn load(&self) -> Result<Option<LedgerSnapshot>, StoreError>;
    /// Replaces the persisted snapshot. Must be all-or-nothing: a
    /// failure must leave the previous snapshot readable.
    fn persist(&mut self, snapshot: &LedgerSnapshot) -> Result<(), StoreError>;
}

/// JSON snapshot file. Writes go to a sibling temp file first and are
/// renamed into place, so a crash mid-write never tears the snapshot.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Result<Option<LedgerSnapshot>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn persist(&mut self, snapshot: &LedgerSnapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Account balances with atomic debit/credit.
///
/// Accounts materialize on first mutation; until then their balance is
/// the configured starting balance. Accounts are never deleted.
pub struct Ledger<S: SnapshotStore> {
    balances: BTreeMap<AccountId, u64>,
    starting_balance: u64,
    store: S,
}

impl<S: SnapshotStore> Ledger<S> {
    /// Opens the ledger, loading the persisted snapshot if one exists.
    pub fn open(store: S, starting_balance: u64) -> Result<Self, StoreError> {
        let balances = match store.load()? {
            Some(snapshot) => snapshot.balances,
            None => BTreeMap::new(),
        };
        Ok(Self {
            balances,
            starting_balance,
            store,
        })
    }

    pub fn balance(&self, account: &AccountId) -> u64 {
        self.balances
            .get(account)
            .copied()
            .unwrap_or(self.starting_balance)
    }

    /// Removes `amount` from the account. Fails with no side effect if
    /// the balance does not cover it or the snapshot write fails.
    pub fn debit(&mut self, account: &AccountId, amount: u64) -> Result<u64, LedgerError> {
        let current = self.balance(account);
        if amount > current {
            return Err(LedgerError::Insufficient {
                requested: amount,
                available: current,
            });
        }
        let next = current - amount;
        self.balances.insert(account.clone(), next);
        if let Err(err) = self.persist() {
            self.balances.insert(account.clone(), current);
            return Err(err.into());
        }
        Ok(next)
    }

    /// Adds `amount` to the account. Fails with no side effect if the
    /// snapshot write fails.
    pub fn credit(&mut self, account: &AccountId, amount: u64) -> Result<u64, LedgerError> {
        let current = self.balance(account);
        let next = current.saturating_add(amount);
        self.balances.insert(account.clone(), next);
        if let Err(err) = self.persist() {
            self.balances.insert(account.clone(), current);
            return Err(err.into());
        }
        Ok(next)
    }

    /// Applies every credit in the batch under one snapshot write. A
    /// failed write restores every balance, so settlement never lands
    /// partially.
    pub fn credit_batch(&mut self, credits: &[(AccountId, u64)]) -> Result<(), LedgerError> {
        if credits.is_empty() {
            return Ok(());
        }
        let rollback = self.balances.clone();
        for (account, amount) in credits {
            let next = self.balance(account).saturating_add(*amount);
            self.balances.insert(account.clone(), next);
        }
        if let Err(err) = self.persist() {
            self.balances = rollback;
            return Err(err.into());
        }
        Ok(())
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let snapshot = LedgerSnapshot {
            balances: self.balances.clone(),
        };
        self.store.persist(&snapshot)
    }
}
