use crate::course::Course;
use crate::search::monitor::{InterruptMonitor, SolutionLimitMonitor, TimeLimitMonitor};
use crate::search::solver::{FirstOutcome, Solver, Termination};
use crate::search::tests::utils::{add_course, add_offering, slot};
use crate::time::Day;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

/// Four courses with three non-conflicting offerings each: 81 solutions.
fn wide_open() -> Vec<Course> {
    let mut courses = Vec::new();
    for (name, day) in [
        ("Math", Day::Saturday),
        ("Art", Day::Sunday),
        ("History", Day::Monday),
        ("Physics", Day::Tuesday),
    ] {
        add_course(&mut courses, name, 3);
        for (i, start) in ["08:00", "10:00", "12:00"].into_iter().enumerate() {
            let end = format!("{}:00", 9 + 2 * i);
            add_offering(&mut courses, name, &format!("{}{}", name, i), vec![slot(day, start, &end)], 0);
        }
    }
    courses
}

#[test]
fn test_unbounded_enumeration_is_exhaustive() {
    let courses = wide_open();
    let result = Solver::new(&courses).solve_all().unwrap();
    assert_eq!(81, result.solutions.len());
    assert!(result.is_complete());
}

#[test]
fn test_solution_limit_truncates_enumeration() {
    let courses = wide_open();
    let result = Solver::new(&courses)
        .with_monitor(SolutionLimitMonitor::new(5))
        .solve_all()
        .unwrap();

    assert_eq!(5, result.solutions.len());
    assert_eq!(
        Termination::Aborted("solution limit reached".to_string()),
        result.termination
    );
    assert!(!result.is_complete());
}

#[test]
fn test_raised_interrupt_stops_before_first_candidate() {
    let courses = wide_open();
    let flag = AtomicBool::new(true);
    let result = Solver::new(&courses)
        .with_monitor(InterruptMonitor::new(&flag))
        .solve_all()
        .unwrap();

    assert!(result.solutions.is_empty());
    assert_eq!(0, result.statistics.nodes);
    assert_eq!(
        Termination::Aborted("interrupt signal received".to_string()),
        result.termination
    );
}

#[test]
fn test_interrupted_first_is_not_unsatisfiable() {
    let courses = wide_open();
    let flag = AtomicBool::new(true);
    let first = Solver::new(&courses)
        .with_monitor(InterruptMonitor::new(&flag))
        .solve_first()
        .unwrap();

    assert_eq!(
        FirstOutcome::Aborted("interrupt signal received".to_string()),
        first.outcome
    );
}

#[test]
fn test_expired_time_limit_aborts() {
    let courses = wide_open();
    let result = Solver::new(&courses)
        .with_monitor(TimeLimitMonitor::with_clock_check_mask(Duration::ZERO, 0))
        .solve_all()
        .unwrap();

    assert!(result.solutions.is_empty());
    assert_eq!(
        Termination::Aborted("time limit reached".to_string()),
        result.termination
    );
}

#[test]
fn test_generous_time_limit_completes() {
    let courses = wide_open();
    let mut solver = Solver::new(&courses);
    solver.add_monitor(TimeLimitMonitor::new(Duration::from_secs(3600)));
    let result = solver.solve_all().unwrap();

    assert_eq!(81, result.solutions.len());
    assert!(result.is_complete());
}
