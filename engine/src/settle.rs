//! Settlement arithmetic.
//!
//! Pure functions from a wager set and a resolved outcome to the
//! amounts owed. All arithmetic saturates; a pathological multiplier
//! chain caps at `u64::MAX` rather than wrapping.

use wheelhouse_types::{AccountId, Wager};

use crate::catalog::PayoutRule;

/// One account's winnings from a settlement step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Winnings {
    pub account: AccountId,
    pub display_name: String,
    pub amount: u64,
}

/// Winnings for the primary outcome of a round.
///
/// Only wagers on the winning label pay. `EnterBonus` labels pay
/// nothing here; their wagers settle in the bonus stage instead.
pub fn primary_winnings(
    wagers: &[Wager],
    label: &str,
    rule: &PayoutRule,
    external_factor: u64,
) -> Vec<Winnings> {
    let mut winnings = Vec::new();
    for wager in wagers {
        if wager.label != label {
            continue;
        }
        let amount = match rule {
            PayoutRule::Fixed(multiplier) => wager.stake.saturating_mul(*multiplier),
            PayoutRule::Scaled(multiplier) => wager
                .stake
                .saturating_mul(*multiplier)
                .saturating_mul(external_factor)
                .saturating_add(wager.stake),
            PayoutRule::EnterBonus => continue,
        };
        if amount == 0 {
            continue;
        }
        winnings.push(Winnings {
            account: wager.account.clone(),
            display_name: wager.display_name.clone(),
            amount,
        });
    }
    winnings
}

/// Winnings for a settled bonus game.
///
/// Every wager in the book participates (the book was filtered down to
/// the bonus label when the game activated). Each pays
/// `stake * value * activation_factor`.
pub fn bonus_winnings(wagers: &[Wager], value: u64, activation_factor: u64) -> Vec<Winnings> {
    let mut winnings = Vec::new();
    for wager in wagers {
        let amount = wager
            .stake
            .saturating_mul(value)
            .saturating_mul(activation_factor);
        if amount == 0 {
            continue;
        }
        winnings.push(Winnings {
            account: wager.account.clone(),
            display_name: wager.display_name.clone(),
            amount,
        });
    }
    winnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wager(account: &str, stake: u64, label: &str) -> Wager {
        Wager {
            id: 0,
            account: AccountId::from(account),
            display_name: account.to_string(),
            stake,
            label: label.to_string(),
        }
    }

    #[test]
    fn test_fixed_pays_stake_times_multiplier() {
        let wagers = vec![wager("a", 10, "5"), wager("b", 3, "1")];
        let winnings = primary_winnings(&wagers, "5", &PayoutRule::Fixed(5), 1);
        assert_eq!(winnings.len(), 1);
        assert_eq!(winnings[0].account, AccountId::from("a"));
        assert_eq!(winnings[0].amount, 50);
    }

    #[test]
    fn test_fixed_ignores_external_factor() {
        let wagers = vec![wager("a", 10, "5")];
        let winnings = primary_winnings(&wagers, "5", &PayoutRule::Fixed(5), 7);
        assert_eq!(winnings[0].amount, 50);
    }

    #[test]
    fn test_scaled_adds_stake_on_top() {
        let wagers = vec![wager("a", 10, "bar")];
        let winnings = primary_winnings(&wagers, "bar", &PayoutRule::Scaled(20), 2);
        assert_eq!(winnings[0].amount, 10 * 20 * 2 + 10);
    }

    #[test]
    fn test_enter_bonus_pays_nothing() {
        let wagers = vec![wager("a", 10, "crazy")];
        let winnings = primary_winnings(&wagers, "crazy", &PayoutRule::EnterBonus, 1);
        assert!(winnings.is_empty());
    }

    #[test]
    fn test_zero_winnings_are_dropped() {
        let wagers = vec![wager("a", 10, "5")];
        let winnings = primary_winnings(&wagers, "5", &PayoutRule::Fixed(0), 1);
        assert!(winnings.is_empty());
    }

    #[test]
    fn test_primary_saturates() {
        let wagers = vec![wager("a", u64::MAX, "5")];
        let winnings = primary_winnings(&wagers, "5", &PayoutRule::Fixed(5), 1);
        assert_eq!(winnings[0].amount, u64::MAX);
    }

    #[test]
    fn test_bonus_pays_every_wager() {
        let wagers = vec![wager("a", 20, "crazy"), wager("b", 5, "crazy")];
        let winnings = bonus_winnings(&wagers, 20, 1);
        assert_eq!(winnings.len(), 2);
        assert_eq!(winnings[0].amount, 400);
        assert_eq!(winnings[1].amount, 100);
    }

    #[test]
    fn test_bonus_applies_activation_factor() {
        let wagers = vec![wager("a", 10, "stayinalive")];
        let winnings = bonus_winnings(&wagers, 25, 3);
        assert_eq!(winnings[0].amount, 10 * 25 * 3);
    }

    #[test]
    fn test_bonus_saturates() {
        let wagers = vec![wager("a", u64::MAX, "crazy")];
        let winnings = bonus_winnings(&wagers, 50, 2);
        assert_eq!(winnings[0].amount, u64::MAX);
    }
}
