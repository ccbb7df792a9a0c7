mod common;

use common::grid;
use gridsearch::step_log::{LoggedStep, StepLog};
use gridsearch::{Mode, Position, SearchSession, StepOutcome, Strategy};

fn logged_run(layout: &str, strategy: Strategy, speed: u32) -> (StepLog, SearchSession) {
    let mut grid = grid(layout);
    let mut session = SearchSession::for_grid(&grid, strategy);
    let mut log = StepLog::new();
    assert!(grid.transition(Mode::Search));

    for _ in 0..1000 {
        let outcome = grid.step(speed, &mut session);
        log.record(&grid, &session, outcome);
        if outcome.is_terminal() {
            break;
        }
    }

    (log, session)
}

#[test]
fn idle_steps_are_not_logged() {
    let (log, session) = logged_run(
        "
        S..
        ...
        ..E
        ",
        Strategy::Unweighted,
        20,
    );

    assert_eq!(log.steps().len() as u64, session.steps);
    assert!(log.steps().iter().all(|s| s.outcome != StepOutcome::Idle));
    assert_eq!(log.steps().last().map(|s| s.outcome), Some(StepOutcome::Finished));

    let first = &log.steps()[0];
    assert_eq!(first.step, 1);
    assert_eq!(first.cell, Some(Position::new(0, 0)));
    assert_eq!(first.score, Some(0.0));
    assert_eq!(first.best_score, Some(1.0));
    assert_eq!(first.frontier_len, 2);
}

#[test]
fn unreachable_run_ends_without_a_cell() {
    let (log, session) = logged_run(
        "
        S#.
        ##.
        ..E
        ",
        Strategy::AStar,
        60,
    );

    assert_eq!(session.steps, 1);
    assert_eq!(log.steps().len(), 2);
    let last = &log.steps()[1];
    assert_eq!(last.outcome, StepOutcome::Unreachable);
    assert_eq!(last.cell, None);
    assert_eq!(last.score, None);
    assert_eq!(last.frontier_len, 0);
    assert!(log.summary().contains("Outcome: Unreachable"));
}

#[test]
fn log_serializes_to_json() {
    let (log, _) = logged_run(
        "
        S...
        .##.
        ....
        ...E
        ",
        Strategy::Greedy,
        60,
    );

    let json = serde_json::to_string(log.steps()).unwrap();
    let parsed: Vec<LoggedStep> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.len(), log.steps().len());
    assert_eq!(parsed.last().map(|s| s.outcome), Some(StepOutcome::Finished));

    let summary = log.summary();
    assert!(summary.contains("Outcome: Finished"));
    assert!(summary.contains(&format!("Expansions: {}", log.steps().len())));
}

#[test]
fn trace_has_a_line_per_step() {
    let (log, session) = logged_run(
        "
        S#.
        ##.
        ..E
        ",
        Strategy::Unweighted,
        60,
    );

    let trace = log.trace();
    let lines: Vec<&str> = trace.lines().collect();
    assert_eq!(lines.len(), log.steps().len() + 2);
    assert_eq!(lines[0], format!("=== Step Log ({} steps) ===", session.steps + 1));
    assert!(lines[1].contains("(0,0)"));
    assert!(lines[1].contains("score=   0.00"));
    assert!(lines[1].ends_with("NotFinished"));
    assert!(lines[2].contains(" - score=      -"));
    assert!(lines[2].ends_with("Unreachable"));
    assert_eq!(lines[3], "=== End of Log ===");
}
