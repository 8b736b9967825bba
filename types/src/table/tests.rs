use super::*;

#[test]
fn test_round_phase_roundtrip() {
    for phase in [
        RoundPhase::Accepting,
        RoundPhase::Locked,
        RoundPhase::ResolvingBonus,
    ] {
        let raw = phase as u8;
        let decoded = RoundPhase::try_from(raw).unwrap();
        assert_eq!(phase, decoded);
    }
    assert!(RoundPhase::try_from(3).is_err());
}

#[test]
fn test_round_phase_labels() {
    assert_eq!(RoundPhase::Accepting.as_str(), "accepting");
    assert_eq!(RoundPhase::Locked.as_str(), "locked");
    assert_eq!(RoundPhase::ResolvingBonus.as_str(), "resolving_bonus");
}

fn sample_bonus() -> ActiveBonus {
    ActiveBonus {
        game: "crazy".to_string(),
        values: vec![10, 25, 50],
        double_available: true,
        doubles_applied: 0,
        activation_factor: 1,
    }
}

#[test]
fn test_bonus_lookup() {
    let bonus = sample_bonus();
    assert_eq!(bonus.lookup("25"), Some(BonusOutcome::Value(25)));
    assert_eq!(bonus.lookup("double"), Some(BonusOutcome::Double));
    assert_eq!(bonus.lookup("26"), None);
    assert_eq!(bonus.lookup("banana"), None);
}

#[test]
fn test_bonus_lookup_without_sentinel() {
    let mut bonus = sample_bonus();
    bonus.double_available = false;
    assert_eq!(bonus.lookup("double"), None);
    assert_eq!(bonus.lookup("10"), Some(BonusOutcome::Value(10)));
}

#[test]
fn test_escalation_doubles_in_place() {
    let mut bonus = sample_bonus();
    bonus.escalate(8);
    assert_eq!(bonus.values, vec![20, 50, 100]);
    assert_eq!(bonus.doubles_applied, 1);
    assert!(bonus.double_available);
}

#[test]
fn test_escalation_preserves_shape() {
    let mut bonus = sample_bonus();
    let original = bonus.values.clone();
    for _ in 0..4 {
        bonus.escalate(8);
    }
    assert_eq!(bonus.values.len(), original.len());
    for (doubled, base) in bonus.values.iter().zip(original.iter()) {
        assert_eq!(*doubled, base * 16);
    }
}

#[test]
fn test_escalation_cap_removes_sentinel() {
    let mut bonus = sample_bonus();
    bonus.escalate(2);
    assert!(bonus.double_available);
    bonus.escalate(2);
    assert!(!bonus.double_available);
    assert_eq!(bonus.lookup("double"), None);
}

#[test]
fn test_escalation_saturates() {
    let mut bonus = sample_bonus();
    bonus.values = vec![u64::MAX / 2 + 1];
    bonus.escalate(8);
    assert_eq!(bonus.values, vec![u64::MAX]);
}

#[test]
fn test_wager_invariants() {
    let wager = Wager {
        id: 1,
        account: AccountId::from("user-1"),
        display_name: "Ada".to_string(),
        stake: 10,
        label: "5".to_string(),
    };
    assert_eq!(wager.validate_invariants(), Ok(()));

    let long_name = Wager {
        display_name: "x".repeat(MAX_NAME_LENGTH + 1),
        ..wager.clone()
    };
    assert!(matches!(
        long_name.validate_invariants(),
        Err(WagerInvariantError::NameTooLong { .. })
    ));

    let zero_stake = Wager { stake: 0, ..wager };
    assert_eq!(
        zero_stake.validate_invariants(),
        Err(WagerInvariantError::ZeroStake)
    );
}

#[test]
fn test_config_validate() {
    assert_eq!(TableConfig::default().validate(), Ok(()));

    let zero_min = TableConfig {
        min_stake: 0,
        ..TableConfig::default()
    };
    assert!(zero_min.validate().is_err());

    let inverted = TableConfig {
        min_stake: 100,
        max_stake: 10,
        ..TableConfig::default()
    };
    assert!(inverted.validate().is_err());

    let no_capacity = TableConfig {
        max_wagers_per_round: 0,
        ..TableConfig::default()
    };
    assert!(no_capacity.validate().is_err());
}

#[test]
fn test_error_codes_are_stable() {
    let cases = [
        (TableError::BettingClosed, "BETTING_CLOSED"),
        (
            TableError::InvalidOutcome {
                label: "x".to_string(),
            },
            "INVALID_OUTCOME",
        ),
        (
            TableError::InsufficientFunds {
                stake: 10,
                balance: 5,
            },
            "INSUFFICIENT_FUNDS",
        ),
        (TableError::NoOpenRound, "NO_OPEN_ROUND"),
        (
            TableError::UnknownBonusOutcome {
                label: "x".to_string(),
            },
            "UNKNOWN_BONUS_OUTCOME",
        ),
        (TableError::AlreadySettled, "ALREADY_SETTLED"),
        (
            TableError::InvalidStake {
                stake: 0,
                min: 1,
                max: 100,
            },
            "INVALID_STAKE",
        ),
        (
            TableError::NameTooLong { len: 40, max: 32 },
            "NAME_TOO_LONG",
        ),
        (
            TableError::Storage("disk full".to_string()),
            "STORAGE",
        ),
    ];
    for (err, code) in cases {
        assert_eq!(err.code(), code);
    }
    assert!(TableError::Storage("io".to_string()).is_retryable());
    assert!(!TableError::BettingClosed.is_retryable());
}

#[test]
fn test_event_wire_shape() {
    let event = TableEvent::BetAccepted {
        round_id: 7,
        wager_id: 3,
        account: AccountId::from("user-1"),
        display_name: "Ada".to_string(),
        stake: 10,
        label: "5".to_string(),
        balance: 90,
    };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "betAccepted");
    assert_eq!(json["roundId"], 7);
    assert_eq!(json["wagerId"], 3);
    assert_eq!(json["account"], "user-1");
    assert_eq!(json["displayName"], "Ada");
    assert_eq!(json["balance"], 90);

    let event = TableEvent::BonusResolved {
        round_id: 7,
        game: "crazy".to_string(),
        value: 20,
        payouts: vec![Payout {
            account: AccountId::from("user-2"),
            display_name: "Grace".to_string(),
            amount: 400,
            balance: 430,
        }],
    };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "bonusResolved");
    assert_eq!(json["payouts"][0]["displayName"], "Grace");
    assert_eq!(json["payouts"][0]["amount"], 400);
}
