use crate::course::{Course, CourseId, Offering, TeacherId, validate_courses};
use crate::error::Result;
use crate::time::TimeSlot;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize)]
struct RawOffering {
    teacher: TeacherId,
    slots: Vec<TimeSlot>,
    #[serde(default)]
    priority: Option<u32>,
}

#[derive(Deserialize)]
struct RawCourse {
    name: CourseId,
    credits: u32,
    offerings: Vec<RawOffering>,
}

#[derive(Deserialize)]
struct Preference {
    teacher: TeacherId,
    priority: u32,
}

#[derive(Deserialize)]
struct RawData {
    courses: Vec<RawCourse>,
    #[serde(default)]
    preferences: Vec<Preference>,
}

pub fn load_from_file(path: impl AsRef<Path>) -> Result<Vec<Course>> {
    let data = std::fs::read_to_string(path)?;
    from_json_str(&data)
}

/// Builds validated courses from a JSON scenario.
///
/// Entries with the same course name are merged in file order, keeping the credits
/// of the first one. An offering's priority is its own `priority`, else the
/// preference listed for its teacher, else 0.
pub fn from_json_str(data: &str) -> Result<Vec<Course>> {
    let raw: RawData = serde_json::from_str(data)?;

    let preferences: HashMap<TeacherId, u32> = raw
        .preferences
        .into_iter()
        .map(|p| (p.teacher, p.priority))
        .collect();

    let mut courses: Vec<Course> = Vec::new();
    let mut index: HashMap<CourseId, usize> = HashMap::new();
    for rc in raw.courses {
        let offerings = rc.offerings.into_iter().map(|ro| {
            let priority = ro
                .priority
                .or_else(|| preferences.get(&ro.teacher).copied())
                .unwrap_or(0);
            Offering::with_priority(ro.teacher, ro.slots, priority)
        });

        match index.get(&rc.name).copied() {
            Some(i) => courses[i].offerings.extend(offerings),
            None => {
                index.insert(rc.name.clone(), courses.len());
                courses.push(Course::new(rc.name, rc.credits, offerings.collect()));
            }
        }
    }

    validate_courses(&courses)?;
    debug!(courses = courses.len(), "scenario loaded");
    Ok(courses)
}

/// Rebuilds every offering taught by `teacher` with the given priority.
pub fn apply_preference(courses: &[Course], teacher: &str, priority: u32) -> Vec<Course> {
    courses
        .iter()
        .map(|c| c.with_teacher_priority(teacher, priority))
        .collect()
}
