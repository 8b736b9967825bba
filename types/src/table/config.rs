use super::{
    DEFAULT_MAX_DOUBLE_ESCALATIONS, DEFAULT_MAX_WAGERS_PER_ROUND, DEFAULT_MIN_STAKE,
    DEFAULT_STARTING_BALANCE,
};

/// Table policy knobs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableConfig {
    /// Balance granted to an account on first contact.
    pub starting_balance: u64,
    /// Smallest stake a wager may carry.
    pub min_stake: u64,
    /// Largest stake a wager may carry.
    pub max_stake: u64,
    /// Whether locking an empty book fails with `NoOpenRound`.
    pub require_open_bets: bool,
    /// Cap on "double" escalations within one bonus stage.
    pub max_double_escalations: u8,
    /// Cap on wagers accepted into one round's book.
    pub max_wagers_per_round: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_balance: DEFAULT_STARTING_BALANCE,
            min_stake: DEFAULT_MIN_STAKE,
            max_stake: u64::MAX,
            require_open_bets: true,
            max_double_escalations: DEFAULT_MAX_DOUBLE_ESCALATIONS,
            max_wagers_per_round: DEFAULT_MAX_WAGERS_PER_ROUND,
        }
    }
}

impl TableConfig {
    /// Validates configuration invariants.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.min_stake == 0 {
            return Err("min_stake must be positive");
        }
        if self.min_stake > self.max_stake {
            return Err("min_stake must not exceed max_stake");
        }
        if self.max_wagers_per_round == 0 {
            return Err("max_wagers_per_round must be positive");
        }
        Ok(())
    }
}
