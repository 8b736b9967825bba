//! Outcome catalog.
//!
//! The catalog is the closed set of labels a round accepts, each mapped
//! to a payout rule. Labels are stored lowercase; inbound text must be
//! passed through [`TableCatalog::normalize`] before lookup.

use std::collections::BTreeMap;

use wheelhouse_types::ActiveBonus;

/// How a winning wager on a label pays out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayoutRule {
    /// Winnings are `stake * multiplier`.
    Fixed(u64),
    /// Winnings are `stake * multiplier * external_factor`, plus the
    /// stake returned on top.
    Scaled(u64),
    /// No direct payout. Matching wagers advance to the label's bonus
    /// game instead.
    EnterBonus,
}

/// Parameters of a bonus game reachable through an [`PayoutRule::EnterBonus`] label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BonusSpec {
    values: Vec<u64>,
    double: bool,
}

impl BonusSpec {
    pub fn new(values: &[u64], double: bool) -> Self {
        Self {
            values: values.to_vec(),
            double,
        }
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn double(&self) -> bool {
        self.double
    }

    /// Instantiates the bonus for one round, capturing the external
    /// factor the primary spin resolved with.
    pub fn activate(&self, game: &str, activation_factor: u64) -> ActiveBonus {
        ActiveBonus {
            game: game.to_string(),
            values: self.values.clone(),
            double_available: self.double,
            doubles_applied: 0,
            activation_factor,
        }
    }
}

/// Closed label set for a table, with per-label payout rules and bonus
/// game parameters.
#[derive(Clone, Debug, Default)]
pub struct TableCatalog {
    rules: BTreeMap<String, PayoutRule>,
    bonuses: BTreeMap<String, BonusSpec>,
}

impl TableCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directly paying label.
    pub fn with_rule(mut self, label: &str, rule: PayoutRule) -> Self {
        self.rules.insert(Self::normalize(label), rule);
        self
    }

    /// Adds a bonus label together with its game parameters.
    pub fn with_bonus(mut self, label: &str, values: &[u64], double: bool) -> Self {
        let key = Self::normalize(label);
        self.rules.insert(key.clone(), PayoutRule::EnterBonus);
        self.bonuses.insert(key, BonusSpec::new(values, double));
        self
    }

    /// Canonical form of an inbound label: surrounding whitespace
    /// stripped, ASCII lowercased.
    pub fn normalize(label: &str) -> String {
        label.trim().to_ascii_lowercase()
    }

    /// Looks up the payout rule for an already normalized label.
    pub fn rule(&self, label: &str) -> Option<&PayoutRule> {
        self.rules.get(label)
    }

    /// Looks up the bonus parameters for an already normalized label.
    pub fn bonus(&self, label: &str) -> Option<&BonusSpec> {
        self.bonuses.get(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Checks the catalog is internally consistent: at least one
    /// label, every bonus label has game parameters, and every bonus
    /// game has at least one settlement value.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.is_empty() {
            return Err("catalog has no labels");
        }
        for (label, rule) in &self.rules {
            if matches!(rule, PayoutRule::EnterBonus) && !self.bonuses.contains_key(label) {
                return Err("bonus label missing its game parameters");
            }
        }
        for spec in self.bonuses.values() {
            if spec.values.is_empty() {
                return Err("bonus game has no settlement values");
            }
        }
        Ok(())
    }

    /// The standard wheel: number segments pay their face value, four
    /// bonus games sit on the remaining segments.
    pub fn classic() -> Self {
        Self::new()
            .with_rule("1", PayoutRule::Fixed(1))
            .with_rule("2", PayoutRule::Fixed(2))
            .with_rule("5", PayoutRule::Fixed(5))
            .with_rule("10", PayoutRule::Fixed(10))
            .with_bonus("coinflip", &[2, 3, 5, 10, 25, 50, 100], false)
            .with_bonus("cashhunt", &[5, 10, 15, 20, 25, 50, 75, 100], false)
            .with_bonus("pachinko", &[5, 10, 15, 25, 50, 100], true)
            .with_bonus("crazy", &[10, 25, 50], true)
    }

    /// Disco-themed wheel where every direct label scales with the
    /// external factor of the spin.
    pub fn funky() -> Self {
        Self::new()
            .with_rule("1", PayoutRule::Scaled(1))
            .with_rule("bar", PayoutRule::Scaled(20))
            .with_rule("disco", PayoutRule::Scaled(5))
            .with_rule("f", PayoutRule::Scaled(25))
            .with_rule("u", PayoutRule::Scaled(25))
            .with_rule("n", PayoutRule::Scaled(25))
            .with_rule("k", PayoutRule::Scaled(25))
            .with_rule("y", PayoutRule::Scaled(25))
            .with_rule("t", PayoutRule::Scaled(25))
            .with_rule("i", PayoutRule::Scaled(25))
            .with_rule("m", PayoutRule::Scaled(25))
            .with_rule("e", PayoutRule::Scaled(25))
            .with_bonus("stayinalive", &[10, 25, 50, 100], true)
            .with_bonus("vipdisco", &[25, 50, 100, 200], true)
    }

    /// Resolves a preset by name, for configuration surfaces.
    pub fn by_name(name: &str) -> Option<Self> {
        match Self::normalize(name).as_str() {
            "classic" => Some(Self::classic()),
            "funky" => Some(Self::funky()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(TableCatalog::normalize("  Crazy "), "crazy");
        assert_eq!(TableCatalog::normalize("10"), "10");
    }

    #[test]
    fn test_classic_labels_and_rules() {
        let catalog = TableCatalog::classic();
        assert_eq!(catalog.labels().count(), 8);
        assert_eq!(catalog.rule("5"), Some(&PayoutRule::Fixed(5)));
        assert_eq!(catalog.rule("crazy"), Some(&PayoutRule::EnterBonus));
        assert_eq!(catalog.rule("0"), None);

        let crazy = catalog.bonus("crazy").unwrap();
        assert_eq!(crazy.values(), &[10, 25, 50]);
        assert!(crazy.double());
    }

    #[test]
    fn test_funky_scales_every_direct_label() {
        let catalog = TableCatalog::funky();
        assert_eq!(catalog.rule("bar"), Some(&PayoutRule::Scaled(20)));
        assert_eq!(catalog.rule("k"), Some(&PayoutRule::Scaled(25)));
        assert!(catalog.bonus("vipdisco").is_some());
    }

    #[test]
    fn test_presets_validate() {
        TableCatalog::classic().validate().unwrap();
        TableCatalog::funky().validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_dangling_bonus_label() {
        let catalog = TableCatalog::new().with_rule("ghost", PayoutRule::EnterBonus);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_catalog() {
        assert!(TableCatalog::new().validate().is_err());
    }

    #[test]
    fn test_by_name() {
        assert!(TableCatalog::by_name("classic").is_some());
        assert!(TableCatalog::by_name(" FUNKY ").is_some());
        assert!(TableCatalog::by_name("polka").is_none());
    }

    #[test]
    fn test_activate_captures_factor() {
        let catalog = TableCatalog::classic();
        let bonus = catalog.bonus("crazy").unwrap().activate("crazy", 3);
        assert_eq!(bonus.game, "crazy");
        assert_eq!(bonus.values, vec![10, 25, 50]);
        assert!(bonus.double_available);
        assert_eq!(bonus.doubles_applied, 0);
        assert_eq!(bonus.activation_factor, 3);
    }
}
