use serde::Serialize;

use super::{AccountId, Payout};

/// Per-label stake aggregate included in the lock announcement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StakeTotal {
    pub label: String,
    pub amount: u64,
}

/// Events the engine reports for the presentation layer to render.
///
/// Serialized as tagged JSON for the service protocol; field names are
/// camelCase on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum TableEvent {
    #[serde(rename = "betAccepted")]
    BetAccepted {
        #[serde(rename = "roundId")]
        round_id: u64,
        #[serde(rename = "wagerId")]
        wager_id: u64,
        account: AccountId,
        #[serde(rename = "displayName")]
        display_name: String,
        stake: u64,
        label: String,
        /// Bettor balance after the stake was reserved.
        balance: u64,
    },
    #[serde(rename = "betRejected")]
    BetRejected {
        #[serde(rename = "roundId")]
        round_id: u64,
        account: AccountId,
        #[serde(rename = "displayName")]
        display_name: String,
        code: String,
        reason: String,
    },
    #[serde(rename = "bettingLocked")]
    BettingLocked {
        #[serde(rename = "roundId")]
        round_id: u64,
        wagers: usize,
        #[serde(rename = "totalStaked")]
        total_staked: u64,
        totals: Vec<StakeTotal>,
    },
    #[serde(rename = "primaryResolved")]
    PrimaryResolved {
        #[serde(rename = "roundId")]
        round_id: u64,
        label: String,
        #[serde(rename = "externalFactor")]
        external_factor: u64,
        payouts: Vec<Payout>,
    },
    #[serde(rename = "bonusActivated")]
    BonusActivated {
        #[serde(rename = "roundId")]
        round_id: u64,
        game: String,
        values: Vec<u64>,
        #[serde(rename = "doubleAvailable")]
        double_available: bool,
        #[serde(rename = "activationFactor")]
        activation_factor: u64,
        /// Wagers carried into the bonus stage.
        wagers: usize,
    },
    #[serde(rename = "bonusEscalated")]
    BonusEscalated {
        #[serde(rename = "roundId")]
        round_id: u64,
        game: String,
        values: Vec<u64>,
        #[serde(rename = "doublesApplied")]
        doubles_applied: u8,
        #[serde(rename = "doubleAvailable")]
        double_available: bool,
    },
    #[serde(rename = "bonusResolved")]
    BonusResolved {
        #[serde(rename = "roundId")]
        round_id: u64,
        game: String,
        value: u64,
        payouts: Vec<Payout>,
    },
    #[serde(rename = "roundOpened")]
    RoundOpened {
        #[serde(rename = "roundId")]
        round_id: u64,
    },
}
