use thiserror::Error as ThisError;

/// The closed error set reported by table operations.
///
/// Every variant is a side-effect-free rejection: when an operation
/// returns one of these, no balance moved and no phase changed.
/// `Storage` is the one retryable kind; it means a persistence write
/// failed and the whole mutation was rolled back.
#[derive(Clone, Debug, ThisError, PartialEq, Eq)]
pub enum TableError {
    #[error("betting is closed")]
    BettingClosed,
    #[error("outcome {label:?} is not in the primary catalog")]
    InvalidOutcome { label: String },
    #[error("insufficient funds (stake={stake}, balance={balance})")]
    InsufficientFunds { stake: u64, balance: u64 },
    #[error("no open round to act on")]
    NoOpenRound,
    #[error("bonus outcome {label:?} is not in the active catalog")]
    UnknownBonusOutcome { label: String },
    #[error("round already settled")]
    AlreadySettled,
    #[error("stake {stake} outside bounds ({min}..={max})")]
    InvalidStake { stake: u64, min: u64, max: u64 },
    #[error("display name too long (len={len}, max={max})")]
    NameTooLong { len: usize, max: usize },
    #[error("ledger persistence failed: {0}")]
    Storage(String),
}

impl TableError {
    /// Stable wire code for the service protocol.
    pub fn code(&self) -> &'static str {
        match self {
            TableError::BettingClosed => "BETTING_CLOSED",
            TableError::InvalidOutcome { .. } => "INVALID_OUTCOME",
            TableError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            TableError::NoOpenRound => "NO_OPEN_ROUND",
            TableError::UnknownBonusOutcome { .. } => "UNKNOWN_BONUS_OUTCOME",
            TableError::AlreadySettled => "ALREADY_SETTLED",
            TableError::InvalidStake { .. } => "INVALID_STAKE",
            TableError::NameTooLong { .. } => "NAME_TOO_LONG",
            TableError::Storage(_) => "STORAGE",
        }
    }

    /// Whether the caller may retry the identical operation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TableError::Storage(_))
    }
}
