//! Wheelhouse round/settlement engine.
//!
//! This crate contains the synchronous table logic driven by a chat-bot
//! front end: the durable balance ledger, the per-round bet book, the
//! outcome catalogs, the settlement arithmetic, and the round state
//! machine binding them together.
//!
//! ## Correctness requirements
//! - Every rejection is side-effect-free: a returned error means no
//!   balance moved and no phase changed.
//! - A settlement batch is one step: the ledger credits, the snapshot
//!   write, and the book clear all land together or not at all.
//! - Do not block inside engine calls; persistence is a single
//!   synchronous snapshot write behind the [`SnapshotStore`] seam.
//!
//! ## Durability
//! Balances survive restart through the snapshot store. Round state is
//! deliberately not durable: a restart opens a fresh accepting round
//! (see [`Table::open`]).
//!
//! The primary entrypoint is [`Table`].

pub mod book;
pub mod catalog;
pub mod ledger;
pub mod settle;

mod table;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;


pub use book::BetBook;
pub use catalog::{BonusSpec, PayoutRule, TableCatalog};
pub use ledger::{FileStore, Ledger, LedgerError, LedgerSnapshot, SnapshotStore, StoreError};
pub use settle::{bonus_winnings, primary_winnings, Winnings};
pub use table::{Table, TableSetupError};

#[cfg(any(test, feature = "mocks"))]
pub use mocks::MemStore;
