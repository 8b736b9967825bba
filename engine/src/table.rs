//! The table: round lifecycle, wager intake, and settlement.

use thiserror::Error as ThisError;
use wheelhouse_types::{
    AccountId, ActiveBonus, BonusOutcome, Payout, Round, RoundPhase, TableConfig, TableError,
    TableEvent, Wager, WagerInvariantError,
};

use crate::book::BetBook;
use crate::catalog::{PayoutRule, TableCatalog};
use crate::ledger::{Ledger, SnapshotStore, StoreError};
use crate::settle::{bonus_winnings, primary_winnings, Winnings};

#[derive(Debug, ThisError)]
pub enum TableSetupError {
    #[error("invalid config: {0}")]
    Config(&'static str),
    #[error("invalid catalog: {0}")]
    Catalog(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One table running one round at a time.
///
/// All operations run to completion before the next begins; callers
/// serialize access (the service wraps the table in a mutex). Failed
/// operations leave no trace: every error return means balances, the
/// book, and the round phase are exactly as they were.
pub struct Table<S: SnapshotStore> {
    config: TableConfig,
    catalog: TableCatalog,
    ledger: Ledger<S>,
    book: BetBook,
    round: Round,
    next_wager_id: u64,
}

impl<S: SnapshotStore> Table<S> {
    /// Opens a table over the given store.
    ///
    /// Balances load from the last persisted snapshot. Round state is
    /// deliberately not durable: every open starts round 1 in the
    /// accepting phase. Stakes debited for a round that never settled
    /// stay debited; the snapshot recorded them the moment the bets
    /// were accepted.
    pub fn open(
        config: TableConfig,
        catalog: TableCatalog,
        store: S,
    ) -> Result<Self, TableSetupError> {
        config.validate().map_err(TableSetupError::Config)?;
        catalog.validate().map_err(TableSetupError::Catalog)?;
        let ledger = Ledger::open(store, config.starting_balance)?;
        tracing::info!(
            starting_balance = config.starting_balance,
            "table opened, accepting bets"
        );
        Ok(Self {
            config,
            catalog,
            ledger,
            book: BetBook::new(),
            round: Round::open(1),
            next_wager_id: 1,
        })
    }

    pub fn round_id(&self) -> u64 {
        self.round.id
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase
    }

    pub fn active_bonus(&self) -> Option<&ActiveBonus> {
        self.round.bonus.as_ref()
    }

    pub fn wagers(&self) -> &[Wager] {
        self.book.snapshot()
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn catalog(&self) -> &TableCatalog {
        &self.catalog
    }

    /// Current balance of an account. Never-seen accounts report the
    /// configured starting balance.
    pub fn balance(&self, account: &AccountId) -> u64 {
        self.ledger.balance(account)
    }

    /// Accepts a wager into the open round, reserving the stake.
    ///
    /// The stake leaves the bettor's balance immediately and comes back
    /// only through settlement.
    pub fn place_bet(
        &mut self,
        account: AccountId,
        display_name: &str,
        stake: u64,
        label: &str,
    ) -> Result<TableEvent, TableError> {
        if self.round.phase != RoundPhase::Accepting {
            return Err(TableError::BettingClosed);
        }
        if self.book.len() >= self.config.max_wagers_per_round {
            return Err(TableError::BettingClosed);
        }
        let wager = Wager {
            id: self.next_wager_id,
            account,
            display_name: display_name.to_string(),
            stake,
            label: TableCatalog::normalize(label),
        };
        if let Err(err) = wager.validate_invariants() {
            return Err(match err {
                WagerInvariantError::NameTooLong { len, max } => {
                    TableError::NameTooLong { len, max }
                }
                WagerInvariantError::ZeroStake => TableError::InvalidStake {
                    stake: 0,
                    min: self.config.min_stake,
                    max: self.config.max_stake,
                },
            });
        }
        if stake < self.config.min_stake || stake > self.config.max_stake {
            return Err(TableError::InvalidStake {
                stake,
                min: self.config.min_stake,
                max: self.config.max_stake,
            });
        }
        if self.catalog.rule(&wager.label).is_none() {
            return Err(TableError::InvalidOutcome { label: wager.label });
        }
        let balance = self.ledger.debit(&wager.account, stake)?;
        self.next_wager_id = self.next_wager_id.saturating_add(1);
        tracing::debug!(
            round = self.round.id,
            wager = wager.id,
            account = %wager.account,
            stake,
            label = %wager.label,
            "bet accepted"
        );
        let event = TableEvent::BetAccepted {
            round_id: self.round.id,
            wager_id: wager.id,
            account: wager.account.clone(),
            display_name: wager.display_name.clone(),
            stake: wager.stake,
            label: wager.label.clone(),
            balance,
        };
        self.book.record(wager);
        Ok(event)
    }

    /// Closes intake for the open round.
    pub fn lock_betting(&mut self) -> Result<TableEvent, TableError> {
        if self.round.phase != RoundPhase::Accepting {
            return Err(TableError::BettingClosed);
        }
        if self.config.require_open_bets && self.book.is_empty() {
            return Err(TableError::NoOpenRound);
        }
        self.round.phase = RoundPhase::Locked;
        tracing::info!(
            round = self.round.id,
            wagers = self.book.len(),
            total_staked = self.book.total_staked(),
            "betting locked"
        );
        Ok(TableEvent::BettingLocked {
            round_id: self.round.id,
            wagers: self.book.len(),
            total_staked: self.book.total_staked(),
            totals: self.book.totals(),
        })
    }

    /// Settles the primary outcome of a locked round.
    ///
    /// A directly paying label credits its winners and opens the next
    /// round. A bonus label pays nothing here; it carries the matching
    /// wagers into the bonus stage instead. `external_factor` below 1
    /// is clamped to 1.
    pub fn resolve_primary(
        &mut self,
        label: &str,
        external_factor: u64,
    ) -> Result<Vec<TableEvent>, TableError> {
        match self.round.phase {
            RoundPhase::Locked => {}
            RoundPhase::Accepting => return Err(TableError::NoOpenRound),
            RoundPhase::ResolvingBonus => return Err(TableError::AlreadySettled),
        }
        let label = TableCatalog::normalize(label);
        let Some(rule) = self.catalog.rule(&label).copied() else {
            return Err(TableError::InvalidOutcome { label });
        };
        let external_factor = external_factor.max(1);
        match rule {
            PayoutRule::EnterBonus => {
                let Some(spec) = self.catalog.bonus(&label) else {
                    return Err(TableError::InvalidOutcome { label });
                };
                let bonus = spec.activate(&label, external_factor);
                self.book.retain_label(&label);
                tracing::info!(
                    round = self.round.id,
                    game = %bonus.game,
                    carried = self.book.len(),
                    activation_factor = bonus.activation_factor,
                    "bonus stage activated"
                );
                let resolved = TableEvent::PrimaryResolved {
                    round_id: self.round.id,
                    label,
                    external_factor,
                    payouts: Vec::new(),
                };
                let activated = TableEvent::BonusActivated {
                    round_id: self.round.id,
                    game: bonus.game.clone(),
                    values: bonus.values.clone(),
                    double_available: bonus.double_available,
                    activation_factor: bonus.activation_factor,
                    wagers: self.book.len(),
                };
                self.round.phase = RoundPhase::ResolvingBonus;
                self.round.bonus = Some(bonus);
                Ok(vec![resolved, activated])
            }
            PayoutRule::Fixed(_) | PayoutRule::Scaled(_) => {
                let winnings =
                    primary_winnings(self.book.snapshot(), &label, &rule, external_factor);
                let payouts = self.apply_winnings(&winnings)?;
                tracing::info!(
                    round = self.round.id,
                    label = %label,
                    external_factor,
                    winners = payouts.len(),
                    "primary resolved"
                );
                let resolved = TableEvent::PrimaryResolved {
                    round_id: self.round.id,
                    label,
                    external_factor,
                    payouts,
                };
                let opened = self.open_next_round();
                Ok(vec![resolved, opened])
            }
        }
    }

    /// Resolves one step of the active bonus stage.
    ///
    /// The double sentinel escalates the values and keeps the stage
    /// open; a settled value pays every carried wager and opens the
    /// next round.
    pub fn resolve_bonus(&mut self, label: &str) -> Result<Vec<TableEvent>, TableError> {
        match self.round.phase {
            RoundPhase::ResolvingBonus => {}
            RoundPhase::Locked => return Err(TableError::NoOpenRound),
            RoundPhase::Accepting => return Err(TableError::AlreadySettled),
        }
        let label = TableCatalog::normalize(label);
        let round_id = self.round.id;
        let max_escalations = self.config.max_double_escalations;
        let Some(bonus) = self.round.bonus.as_mut() else {
            return Err(TableError::AlreadySettled);
        };
        let Some(outcome) = bonus.lookup(&label) else {
            return Err(TableError::UnknownBonusOutcome { label });
        };
        match outcome {
            BonusOutcome::Double => {
                bonus.escalate(max_escalations);
                tracing::info!(
                    round = round_id,
                    game = %bonus.game,
                    doubles_applied = bonus.doubles_applied,
                    double_available = bonus.double_available,
                    "bonus values doubled"
                );
                Ok(vec![TableEvent::BonusEscalated {
                    round_id,
                    game: bonus.game.clone(),
                    values: bonus.values.clone(),
                    doubles_applied: bonus.doubles_applied,
                    double_available: bonus.double_available,
                }])
            }
            BonusOutcome::Value(value) => {
                let game = bonus.game.clone();
                let activation_factor = bonus.activation_factor;
                let winnings = bonus_winnings(self.book.snapshot(), value, activation_factor);
                let payouts = self.apply_winnings(&winnings)?;
                tracing::info!(
                    round = round_id,
                    game = %game,
                    value,
                    winners = payouts.len(),
                    "bonus resolved"
                );
                let resolved = TableEvent::BonusResolved {
                    round_id,
                    game,
                    value,
                    payouts,
                };
                let opened = self.open_next_round();
                Ok(vec![resolved, opened])
            }
        }
    }

    /// Credits an account outside of settlement.
    pub fn deposit(&mut self, account: &AccountId, amount: u64) -> Result<u64, TableError> {
        if amount == 0 {
            return Err(TableError::InvalidStake {
                stake: 0,
                min: 1,
                max: u64::MAX,
            });
        }
        let balance = self.ledger.credit(account, amount)?;
        tracing::info!(account = %account, amount, balance, "deposit credited");
        Ok(balance)
    }

    /// Credits every winner under one snapshot write, then reports the
    /// landed balances. A store failure rolls the whole batch back and
    /// surfaces as a retryable error.
    fn apply_winnings(&mut self, winnings: &[Winnings]) -> Result<Vec<Payout>, TableError> {
        let credits: Vec<(AccountId, u64)> = winnings
            .iter()
            .map(|won| (won.account.clone(), won.amount))
            .collect();
        self.ledger.credit_batch(&credits)?;
        Ok(winnings
            .iter()
            .map(|won| Payout {
                account: won.account.clone(),
                display_name: won.display_name.clone(),
                amount: won.amount,
                balance: self.ledger.balance(&won.account),
            })
            .collect())
    }

    fn open_next_round(&mut self) -> TableEvent {
        self.book.clear();
        let next = self.round.id.saturating_add(1);
        self.round = Round::open(next);
        tracing::debug!(round = next, "round opened");
        TableEvent::RoundOpened { round_id: next }
    }
}
