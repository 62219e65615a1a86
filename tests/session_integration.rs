//! Session integration tests
//!
//! Drive the full path from command names to session state, the way the
//! terminal driver does.

use health_chain::{
    run_command, HealthCommand, HealthError, NarrationKind, NarrationLog, Outcome, Session,
    SessionConfig, StepRunner,
};
use proptest::prelude::*;
use std::cell::Cell;

/// Attacks wear health down until a critical hit ends the game
#[test]
fn test_attacks_until_game_over() {
    let mut log = NarrationLog::new();
    let mut session = Session::new(100);

    let report = session.apply_named("Minor_Attack", &mut log).unwrap();
    assert_eq!(report.outcome, Outcome::Alive(80));
    assert_eq!(session.health(), 80);

    let report = session.apply_named("Major_Attack", &mut log).unwrap();
    assert_eq!(report.outcome, Outcome::Alive(30));
    assert_eq!(session.health(), 30);

    let report = session.apply_named("Critical_Attack", &mut log).unwrap();
    assert_eq!(report.raw, -71);
    assert_eq!(report.outcome, Outcome::Terminated);
    assert_eq!(session.health(), 0);
    assert!(session.is_terminated());

    assert_eq!(log.count(NarrationKind::Success), 2);
    assert_eq!(log.count(NarrationKind::Failure), 1);
}

/// Healing has no upper clamp
#[test]
fn test_heal_exceeds_starting_health() {
    let mut log = NarrationLog::new();
    let mut session = Session::new(100);

    session.apply_command(HealthCommand::Heal, &mut log).unwrap();
    assert_eq!(session.health(), 115);

    session.apply_command(HealthCommand::Heal, &mut log).unwrap();
    assert_eq!(session.health(), 130);
    assert!(!session.is_terminated());
}

#[test]
fn test_terminated_session_refuses_commands() {
    let mut log = NarrationLog::new();
    let mut session = Session::new(20);
    session.apply_named("Minor_Attack", &mut log).unwrap();
    assert!(session.is_terminated());

    let narrated = log.len();
    for command in HealthCommand::all() {
        let err = session.apply_command(*command, &mut log).unwrap_err();
        assert!(matches!(err, HealthError::SessionTerminated));
    }
    let err = session.run_sequence(["Heal"], &mut log).unwrap_err();
    assert!(matches!(err, HealthError::SessionTerminated));

    assert_eq!(session.health(), 0);
    assert_eq!(log.len(), narrated);
}

#[test]
fn test_run_command_matches_session() {
    let mut log = NarrationLog::new();
    let outcome = run_command("Major_Attack", 100, &mut log).unwrap();

    let mut session = Session::new(100);
    let report = session.apply_named("Major_Attack", &mut log).unwrap();

    assert_eq!(outcome, report.outcome);
}

#[test]
fn test_sequence_equals_individual_commands() {
    let names = ["Heal", "Minor_Attack", "Major_Attack", "Heal"];

    let mut log = NarrationLog::new();
    let mut chained = Session::new(100);
    let report = chained.run_sequence(names, &mut log).unwrap();

    let mut stepped = Session::new(100);
    for name in names {
        stepped.apply_named(name, &mut log).unwrap();
    }

    assert_eq!(report.outcome, Outcome::Alive(60));
    assert_eq!(chained.health(), stepped.health());
    assert!(report.skipped.is_empty());
}

#[test]
fn test_restart_after_game_over() {
    let config = SessionConfig::from_toml_str("starting_health = 25").unwrap();
    let mut log = NarrationLog::new();
    let mut session = Session::from_config(&config);

    session.apply_named("Major_Attack", &mut log).unwrap();
    assert!(session.is_terminated());
    assert!(session.available_commands().is_empty());

    session.restart(&config, &mut log);
    assert_eq!(session.health(), 25);
    assert_eq!(session.available_commands(), HealthCommand::all());
}

#[test]
fn test_short_circuit_step_never_runs() {
    let calls = Cell::new(0);
    let mut log = NarrationLog::new();
    let mut runner = StepRunner::new(&mut log);

    let outcome = Outcome::of(50_i64)
        .chain(|h| {
            calls.set(calls.get() + 1);
            runner.apply(h, -50, "first")
        })
        .chain(|h| {
            calls.set(calls.get() + 1);
            runner.apply(h, 1_000, "second")
        });

    assert_eq!(outcome, Outcome::Terminated);
    assert_eq!(calls.get(), 1);
}

proptest! {
    #[test]
    fn prop_session_health_never_negative(
        start in 1_i64..500,
        picks in proptest::collection::vec(0_usize..4, 0..20),
    ) {
        let mut log = NarrationLog::new();
        let mut session = Session::new(start);

        for pick in picks {
            let command = HealthCommand::all()[pick];
            let _ = session.apply_command(command, &mut log);
            prop_assert!(session.health() >= 0);
            prop_assert_eq!(session.is_terminated(), session.health() == 0);
        }
    }
}

/// Scripted play: a health override feeds the session, then one chained run
#[test]
fn test_scripted_run_counts_executed_commands() {
    let config = SessionConfig::default().with_starting_health(45).unwrap();
    let mut log = NarrationLog::with_capacity(config.narration_capacity);
    let mut session = Session::from_config(&config);

    let report = session
        .run_sequence(["Heal", "Minor_Attack", "Major_Attack", "Heal", "Heal"], &mut log)
        .unwrap();

    assert_eq!(report.executed.len(), 3);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(session.commands_applied(), 3);
    assert!(session.is_terminated());
    assert_eq!(
        log.last().map(|e| (e.kind, e.text.clone())),
        Some((
            NarrationKind::Info,
            "Skipped 2 command(s) after the game ended.".to_string()
        ))
    );
}
