//! Weekly timetable solver.
//!
//! Each course offers alternative classes (a teacher and a set of weekly time
//! slots). The solver picks exactly one class per course so that no two chosen
//! classes overlap, either enumerating every such timetable or stopping at the
//! first one, and the ranker orders timetables by the summed class priority.

pub mod course;
pub mod error;
pub mod rank;
pub mod scenario;
pub mod search;
pub mod time;

pub use course::{Course, CourseId, Offering, TeacherId, conflicts};
pub use error::{Error, InvalidInput, Result};
pub use search::{Assignment, Enumeration, FirstFit, FirstOutcome, Solver, Termination};
pub use time::{Day, Time, TimeSlot};
