use crate::search::assignment::Assignment;
use std::cmp::Reverse;

/// Orders solutions by descending priority sum. The sort is stable: equal scores
/// keep their discovery order.
pub fn rank(solutions: &mut [Assignment<'_>]) {
    solutions.sort_by_key(|s| Reverse(s.score()));
}

pub fn ranked(mut solutions: Vec<Assignment<'_>>) -> Vec<Assignment<'_>> {
    rank(&mut solutions);
    solutions
}
