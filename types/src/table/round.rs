use super::DOUBLE_SENTINEL;

/// Observable phases of the round lifecycle.
///
/// The resolving-primary step is atomic from the caller's point of view:
/// a locked round settles and lands in `Accepting` or `ResolvingBonus`
/// within one engine call, so no phase value exists for it.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    Accepting = 0,
    Locked = 1,
    ResolvingBonus = 2,
}

impl RoundPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundPhase::Accepting => "accepting",
            RoundPhase::Locked => "locked",
            RoundPhase::ResolvingBonus => "resolving_bonus",
        }
    }
}

impl TryFrom<u8> for RoundPhase {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RoundPhase::Accepting),
            1 => Ok(RoundPhase::Locked),
            2 => Ok(RoundPhase::ResolvingBonus),
            _ => Err(()),
        }
    }
}

/// Resolution of a bonus-catalog label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BonusOutcome {
    /// The escalation sentinel: double every value, stay in the stage.
    Double,
    /// A settled bonus value.
    Value(u64),
}

/// The bonus stage attached to a round after a bonus-eligible primary
/// result.
///
/// `values` is the catalog currently in force; doubling replaces the
/// values in place and never changes their count. `activation_factor`
/// is the external factor captured at primary resolution and is fixed
/// for the life of the stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveBonus {
    pub game: String,
    pub values: Vec<u64>,
    pub double_available: bool,
    pub doubles_applied: u8,
    pub activation_factor: u64,
}

impl ActiveBonus {
    /// Look up a label in the catalog currently in force.
    pub fn lookup(&self, label: &str) -> Option<BonusOutcome> {
        if label == DOUBLE_SENTINEL {
            return self.double_available.then_some(BonusOutcome::Double);
        }
        let value: u64 = label.parse().ok()?;
        self.values
            .contains(&value)
            .then_some(BonusOutcome::Value(value))
    }

    /// Double every value in place. Once `max_escalations` have been
    /// applied the sentinel is withdrawn, so the stage must settle.
    pub fn escalate(&mut self, max_escalations: u8) {
        for value in &mut self.values {
            *value = value.saturating_mul(2);
        }
        self.doubles_applied = self.doubles_applied.saturating_add(1);
        if self.doubles_applied >= max_escalations {
            self.double_available = false;
        }
    }
}

/// The live round aggregate. Exactly one exists per table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round {
    pub id: u64,
    pub phase: RoundPhase,
    pub bonus: Option<ActiveBonus>,
}

impl Round {
    /// A fresh round accepting bets.
    pub fn open(id: u64) -> Self {
        Self {
            id,
            phase: RoundPhase::Accepting,
            bonus: None,
        }
    }
}
