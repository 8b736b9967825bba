//! Shared types for the wheelhouse round/settlement engine.
//!
//! Everything the engine and its service front ends agree on lives here:
//! account and wager types, the round phase machine's vocabulary, the
//! table error set, the outbound event vocabulary, and the table
//! configuration. The crate is deliberately free of I/O and async
//! concerns so it can be depended on from every layer.

pub mod table;

pub use table::{
    AccountId, ActiveBonus, BonusOutcome, Payout, Round, RoundPhase, StakeTotal, TableConfig,
    TableError, TableEvent, Wager, WagerInvariantError, DOUBLE_SENTINEL, MAX_NAME_LENGTH,
};
