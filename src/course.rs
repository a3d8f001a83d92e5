use crate::error::InvalidInput;
use crate::time::TimeSlot;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

pub type CourseId = Arc<str>;
pub type TeacherId = Arc<str>;

/// One class option of a course: a teacher, the weekly slots and a preference weight.
///
/// Offerings are built once all preference information is known and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Offering {
    teacher: TeacherId,
    slots: Vec<TimeSlot>,
    priority: u32,
}

impl Offering {
    pub fn new(teacher: impl Into<TeacherId>, slots: Vec<TimeSlot>) -> Offering {
        Self::with_priority(teacher, slots, 0)
    }

    pub fn with_priority(
        teacher: impl Into<TeacherId>,
        slots: Vec<TimeSlot>,
        priority: u32,
    ) -> Offering {
        Offering {
            teacher: teacher.into(),
            slots,
            priority,
        }
    }

    pub fn teacher(&self) -> &TeacherId {
        &self.teacher
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn conflicts_with(&self, other: &Offering) -> bool {
        conflicts(self, other)
    }
}

/// Two offerings conflict when any of their slots overlap on the same day.
pub fn conflicts(a: &Offering, b: &Offering) -> bool {
    a.slots
        .iter()
        .any(|x| b.slots.iter().any(|y| x.overlaps(y)))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    pub name: CourseId,
    pub credits: u32,
    pub offerings: Vec<Offering>,
}

impl Course {
    pub fn new(name: impl Into<CourseId>, credits: u32, offerings: Vec<Offering>) -> Course {
        Course {
            name: name.into(),
            credits,
            offerings,
        }
    }

    /// Copy of this course where every offering of `teacher` carries `priority`.
    pub fn with_teacher_priority(&self, teacher: &str, priority: u32) -> Course {
        let offerings = self
            .offerings
            .iter()
            .map(|o| {
                if *o.teacher == *teacher {
                    Offering::with_priority(o.teacher.clone(), o.slots.clone(), priority)
                } else {
                    o.clone()
                }
            })
            .collect();
        Course {
            name: self.name.clone(),
            credits: self.credits,
            offerings,
        }
    }
}

/// Fails on the first structurally invalid record: an empty course list, a course
/// without offerings, a repeated course name or a slot that is empty or leaves its day.
pub fn validate_courses(courses: &[Course]) -> Result<(), InvalidInput> {
    if courses.is_empty() {
        return Err(InvalidInput::NoCourses);
    }

    let mut names = HashSet::new();
    for course in courses {
        if !names.insert(course.name.clone()) {
            return Err(InvalidInput::DuplicateCourse(course.name.clone()));
        }
        if course.offerings.is_empty() {
            return Err(InvalidInput::EmptyCourse(course.name.clone()));
        }
        for offering in &course.offerings {
            if let Some(slot) = offering.slots.iter().find(|s| !s.is_valid()) {
                return Err(InvalidInput::InvalidSlot(format!(
                    "{} ({}): {}",
                    course.name, offering.teacher, slot
                )));
            }
        }
    }
    Ok(())
}
