//! Table domain types.
//!
//! Defines the account/wager/round state shared by the engine and the
//! service layer, the closed table error set, and the outbound event
//! vocabulary rendered by chat front ends.

mod account;
mod config;
mod constants;
mod error;
mod events;
mod round;

pub use account::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use events::*;
pub use round::*;

#[cfg(test)]
mod tests;
