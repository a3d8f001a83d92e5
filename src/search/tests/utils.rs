use crate::course::{Course, Offering};
use crate::search::assignment::Assignment;
use crate::time::{Day, Time, TimeSlot};
use proptest::prelude::*;

pub fn slot(day: Day, start: &str, end: &str) -> TimeSlot {
    TimeSlot {
        day,
        start: start.parse().unwrap(),
        end: end.parse().unwrap(),
    }
}

pub fn add_course(courses: &mut Vec<Course>, name: &str, credits: u32) {
    courses.push(Course::new(name, credits, vec![]));
}

pub fn add_offering(
    courses: &mut [Course],
    course_name: &str,
    teacher: &str,
    slots: Vec<TimeSlot>,
    priority: u32,
) {
    let course = courses
        .iter_mut()
        .find(|c| *c.name == *course_name)
        .unwrap();
    course
        .offerings
        .push(Offering::with_priority(teacher, slots, priority));
}

/// Teachers chosen by an assignment, in course order.
pub fn teachers(assignment: &Assignment<'_>) -> Vec<String> {
    assignment
        .offerings()
        .map(|o| o.teacher().to_string())
        .collect()
}

/// Every index combination of the cross product whose offerings are pairwise conflict-free.
pub fn brute_force(courses: &[Course]) -> Vec<Vec<usize>> {
    let mut combos: Vec<Vec<usize>> = vec![vec![]];
    for course in courses {
        combos = combos
            .into_iter()
            .flat_map(|prefix| {
                (0..course.offerings.len()).map(move |i| {
                    let mut next = prefix.clone();
                    next.push(i);
                    next
                })
            })
            .collect();
    }
    combos
        .into_iter()
        .filter(|combo| {
            let chosen: Vec<&Offering> = courses
                .iter()
                .zip(combo)
                .map(|(c, &i)| &c.offerings[i])
                .collect();
            chosen.iter().enumerate().all(|(i, a)| {
                chosen
                    .iter()
                    .skip(i + 1)
                    .all(|b| !a.conflicts_with(b))
            })
        })
        .collect()
}

pub fn arb_slot() -> impl Strategy<Value = TimeSlot> {
    (
        prop::sample::select(vec![Day::Saturday, Day::Monday, Day::Wednesday]),
        // coarse grid so touching and overlapping slots are both common
        (8u16..18).prop_map(|h| h * 60),
        prop::sample::select(vec![30u16, 60, 90, 120]),
    )
        .prop_map(|(day, start, len)| TimeSlot {
            day,
            start: Time(start),
            end: Time(start + len),
        })
}

pub fn arb_offering() -> impl Strategy<Value = Offering> {
    (
        prop::sample::select(vec!["T1", "T2", "T3", "T4"]),
        prop::collection::vec(arb_slot(), 1..3),
        0u32..4,
    )
        .prop_map(|(teacher, slots, priority)| Offering::with_priority(teacher, slots, priority))
}

pub fn arb_courses() -> impl Strategy<Value = Vec<Course>> {
    prop::collection::vec(prop::collection::vec(arb_offering(), 1..=3), 1..=3).prop_map(
        |offerings| {
            offerings
                .into_iter()
                .enumerate()
                .map(|(i, o)| Course::new(format!("C{}", i), 3, o))
                .collect()
        },
    )
}
