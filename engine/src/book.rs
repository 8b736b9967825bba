//! Open wagers for the current round.

use wheelhouse_types::{StakeTotal, Wager};

/// All wagers accepted since the round opened, in arrival order.
#[derive(Debug, Default)]
pub struct BetBook {
    wagers: Vec<Wager>,
}

impl BetBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, wager: Wager) {
        self.wagers.push(wager);
    }

    pub fn snapshot(&self) -> &[Wager] {
        &self.wagers
    }

    pub fn len(&self) -> usize {
        self.wagers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wagers.is_empty()
    }

    pub fn total_staked(&self) -> u64 {
        self.wagers
            .iter()
            .fold(0u64, |acc, wager| acc.saturating_add(wager.stake))
    }

    /// Per-label stake totals, ordered by first appearance in the book.
    pub fn totals(&self) -> Vec<StakeTotal> {
        let mut totals: Vec<StakeTotal> = Vec::new();
        for wager in &self.wagers {
            match totals.iter_mut().find(|total| total.label == wager.label) {
                Some(total) => total.amount = total.amount.saturating_add(wager.stake),
                None => totals.push(StakeTotal {
                    label: wager.label.clone(),
                    amount: wager.stake,
                }),
            }
        }
        totals
    }

    /// Drops every wager whose label differs from `label`.
    pub fn retain_label(&mut self, label: &str) {
        self.wagers.retain(|wager| wager.label == label);
    }

    pub fn clear(&mut self) {
        self.wagers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wheelhouse_types::AccountId;

    fn wager(id: u64, account: &str, stake: u64, label: &str) -> Wager {
        Wager {
            id,
            account: AccountId::from(account),
            display_name: account.to_string(),
            stake,
            label: label.to_string(),
        }
    }

    #[test]
    fn test_totals_preserve_first_seen_order() {
        let mut book = BetBook::new();
        book.record(wager(1, "a", 10, "crazy"));
        book.record(wager(2, "b", 5, "1"));
        book.record(wager(3, "c", 7, "crazy"));

        let totals = book.totals();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].label, "crazy");
        assert_eq!(totals[0].amount, 17);
        assert_eq!(totals[1].label, "1");
        assert_eq!(totals[1].amount, 5);
    }

    #[test]
    fn test_total_staked_saturates() {
        let mut book = BetBook::new();
        book.record(wager(1, "a", u64::MAX, "1"));
        book.record(wager(2, "b", 1, "1"));
        assert_eq!(book.total_staked(), u64::MAX);
    }

    #[test]
    fn test_retain_label_keeps_only_matching_wagers() {
        let mut book = BetBook::new();
        book.record(wager(1, "a", 10, "crazy"));
        book.record(wager(2, "b", 5, "1"));
        book.record(wager(3, "c", 7, "crazy"));

        book.retain_label("crazy");
        assert_eq!(book.len(), 2);
        assert!(book.snapshot().iter().all(|w| w.label == "crazy"));
    }

    #[test]
    fn test_clear_empties_the_book() {
        let mut book = BetBook::new();
        book.record(wager(1, "a", 10, "1"));
        assert!(!book.is_empty());
        book.clear();
        assert!(book.is_empty());
        assert_eq!(book.total_staked(), 0);
    }
}
