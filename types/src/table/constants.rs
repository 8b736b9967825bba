/// Maximum display-name length accepted with a wager
pub const MAX_NAME_LENGTH: usize = 32;

/// Label that re-rolls a bonus catalog with doubled values
pub const DOUBLE_SENTINEL: &str = "double";

/// Default minimum stake per wager
pub const DEFAULT_MIN_STAKE: u64 = 1;

/// Default cap on "double" escalations within a single bonus stage.
/// Termination of the escalation loop is structural: once the cap is
/// reached the sentinel leaves the active catalog.
pub const DEFAULT_MAX_DOUBLE_ESCALATIONS: u8 = 8;

/// Default cap on wagers accepted into one round's book
pub const DEFAULT_MAX_WAGERS_PER_ROUND: usize = 256;

/// Balance granted to an account on first contact
pub const DEFAULT_STARTING_BALANCE: u64 = 0;
