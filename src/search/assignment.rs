use crate::course::{Course, Offering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick<'a> {
    pub course: &'a Course,
    pub offering: &'a Offering,
    /// Position of `offering` within `course.offerings`.
    pub index: usize,
}

/// Course to offering mapping, kept in course order.
///
/// During search it holds the partial choice of the current branch; solutions are
/// recorded as clones, so they stay valid while the search keeps backtracking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment<'a> {
    picks: Vec<Pick<'a>>,
}

impl<'a> Assignment<'a> {
    pub(crate) fn with_capacity(capacity: usize) -> Assignment<'a> {
        Assignment {
            picks: Vec::with_capacity(capacity),
        }
    }

    /// Rebuilds an assignment from the offering index chosen per course, as returned
    /// by [`Assignment::choices`]. `None` if the lengths differ or an index is out of range.
    pub fn from_choices(courses: &'a [Course], choices: &[usize]) -> Option<Assignment<'a>> {
        if courses.len() != choices.len() {
            return None;
        }
        let mut assignment = Assignment::with_capacity(courses.len());
        for (course, &index) in courses.iter().zip(choices) {
            if index >= course.offerings.len() {
                return None;
            }
            assignment.push(course, index);
        }
        Some(assignment)
    }

    pub(crate) fn push(&mut self, course: &'a Course, index: usize) {
        self.picks.push(Pick {
            course,
            offering: &course.offerings[index],
            index,
        });
    }

    pub(crate) fn pop(&mut self) -> Option<Pick<'a>> {
        self.picks.pop()
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn get(&self, course_name: &str) -> Option<&'a Offering> {
        self.picks
            .iter()
            .find(|p| *p.course.name == *course_name)
            .map(|p| p.offering)
    }

    pub fn picks(&self) -> &[Pick<'a>] {
        &self.picks
    }

    pub fn offerings(&self) -> impl Iterator<Item = &'a Offering> + '_ {
        self.picks.iter().map(|p| p.offering)
    }

    /// Offering index chosen for each course, in course order.
    pub fn choices(&self) -> Vec<usize> {
        self.picks.iter().map(|p| p.index).collect()
    }

    /// Whether `candidate` overlaps any offering already chosen.
    pub fn conflicts_with(&self, candidate: &Offering) -> bool {
        self.offerings().any(|o| o.conflicts_with(candidate))
    }

    /// Sum of the priorities of the chosen offerings.
    pub fn score(&self) -> u64 {
        self.offerings().map(|o| u64::from(o.priority())).sum()
    }

    pub fn total_credits(&self) -> u32 {
        self.picks.iter().map(|p| p.course.credits).sum()
    }
}
