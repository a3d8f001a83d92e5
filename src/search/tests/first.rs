use crate::error::{Error, InvalidInput};
use crate::search::solver::{FirstOutcome, Solver};
use crate::search::tests::utils::{add_course, add_offering, slot, teachers};
use crate::time::Day::{Monday, Tuesday};

#[test]
fn test_first_returns_earliest_in_search_order() {
    let mut courses = Vec::new();
    add_course(&mut courses, "MathA", 3);
    add_course(&mut courses, "PhysicsB", 3);
    add_offering(&mut courses, "MathA", "Teacher1", vec![slot(Monday, "14:00", "15:30")], 0);
    add_offering(&mut courses, "MathA", "Teacher2", vec![slot(Monday, "16:00", "17:30")], 5);
    add_offering(&mut courses, "PhysicsB", "Teacher3", vec![slot(Tuesday, "14:00", "15:00")], 0);

    let first = Solver::new(&courses).solve_first().unwrap();

    match first.outcome {
        FirstOutcome::Found(assignment) => {
            assert_eq!(vec!["Teacher1", "Teacher3"], teachers(&assignment))
        }
        other => panic!("expected a solution, got {:?}", other),
    }
    assert_eq!(1, first.statistics.solutions);
}

#[test]
fn test_first_stops_after_success() {
    let mut courses = Vec::new();
    add_course(&mut courses, "Math", 3);
    add_course(&mut courses, "Art", 2);
    for t in ["M1", "M2", "M3"] {
        add_offering(&mut courses, "Math", t, vec![slot(Monday, "08:00", "09:00")], 0);
    }
    for t in ["A1", "A2", "A3"] {
        add_offering(&mut courses, "Art", t, vec![slot(Tuesday, "08:00", "09:00")], 0);
    }

    let first = Solver::new(&courses).solve_first().unwrap();

    assert!(matches!(first.outcome, FirstOutcome::Found(_)));
    // M1 then A1, nothing else
    assert_eq!(2, first.statistics.nodes);
}

#[test]
fn test_first_reports_unsatisfiable() {
    let mut courses = Vec::new();
    add_course(&mut courses, "MathA", 3);
    add_course(&mut courses, "PhysicsB", 3);
    add_offering(&mut courses, "MathA", "Teacher1", vec![slot(Monday, "14:00", "15:30")], 0);
    add_offering(&mut courses, "MathA", "Teacher2", vec![slot(Monday, "14:00", "15:30")], 0);
    add_offering(&mut courses, "PhysicsB", "Teacher3", vec![slot(Monday, "14:00", "15:00")], 0);

    let first = Solver::new(&courses).solve_first().unwrap();

    assert_eq!(FirstOutcome::Unsatisfiable, first.outcome);
    assert_eq!(0, first.statistics.solutions);
}

#[test]
fn test_first_rejects_empty_course() {
    let mut courses = Vec::new();
    add_course(&mut courses, "Math", 3);

    assert!(matches!(
        Solver::new(&courses).solve_first(),
        Err(Error::InvalidInput(InvalidInput::EmptyCourse(_)))
    ));
}
