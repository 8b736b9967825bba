//! Test doubles for the persistence seam.

use std::sync::{Arc, Mutex};

use crate::ledger::{LedgerSnapshot, SnapshotStore, StoreError};

#[derive(Default)]
struct MemStoreInner {
    snapshot: Option<LedgerSnapshot>,
    fail: bool,
}

/// In-memory snapshot store.
///
/// Clones share the same backing snapshot, so a test can hand one
/// handle to a table and keep another to reopen against or inspect.
/// Persist failures can be injected to exercise rollback paths.
#[derive(Clone, Default)]
pub struct MemStore {
    inner: Arc<Mutex<MemStoreInner>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every persist call fails until cleared.
    pub fn fail_persists(&self, fail: bool) {
        self.inner.lock().unwrap().fail = fail;
    }

    /// The snapshot as last persisted.
    pub fn snapshot(&self) -> Option<LedgerSnapshot> {
        self.inner.lock().unwrap().snapshot.clone()
    }
}

impl SnapshotStore for MemStore {
    fn load(&self) -> Result<Option<LedgerSnapshot>, StoreError> {
        Ok(self.inner.lock().unwrap().snapshot.clone())
    }

    fn persist(&mut self, snapshot: &LedgerSnapshot) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail {
            return Err(StoreError::Failed("injected persist failure"));
        }
        inner.snapshot = Some(snapshot.clone());
        Ok(())
    }
}
