use crate::course::{Course, validate_courses};
use crate::error::Result;
use crate::search::assignment::Assignment;
use crate::search::monitor::{SearchCommand, SearchMonitor};
use crate::search::stats::SearchStatistics;
use std::ops::ControlFlow;
use std::time::Instant;
use tracing::{debug, info, trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// Every branch was explored.
    Exhausted,
    /// A monitor stopped the search; the string holds its reason.
    Aborted(String),
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Termination::Exhausted => write!(f, "Exhausted"),
            Termination::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// Result of enumerating every conflict-free assignment, in discovery order.
#[derive(Debug, Clone)]
pub struct Enumeration<'a> {
    pub solutions: Vec<Assignment<'a>>,
    pub termination: Termination,
    pub statistics: SearchStatistics,
}

impl Enumeration<'_> {
    pub fn is_complete(&self) -> bool {
        self.termination == Termination::Exhausted
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FirstOutcome<'a> {
    Found(Assignment<'a>),
    /// The whole space was explored without a conflict-free assignment.
    Unsatisfiable,
    /// A monitor stopped the search before anything was found.
    Aborted(String),
}

#[derive(Debug, Clone)]
pub struct FirstFit<'a> {
    pub outcome: FirstOutcome<'a>,
    pub statistics: SearchStatistics,
}

/// One level of the backtracking: the course being assigned and the next offering to try.
#[derive(Debug, Clone, Copy)]
struct Frame {
    course: usize,
    cursor: usize,
}

impl Frame {
    fn new(course: usize) -> Frame {
        Frame { course, cursor: 0 }
    }
}

/// Depth-first backtracking over the courses in the order given.
pub struct Solver<'a> {
    courses: &'a [Course],
    monitors: Vec<Box<dyn SearchMonitor + 'a>>,
}

impl<'a> Solver<'a> {
    pub fn new(courses: &'a [Course]) -> Solver<'a> {
        Solver {
            courses,
            monitors: Vec::new(),
        }
    }

    pub fn with_monitor<M>(mut self, monitor: M) -> Self
    where
        M: SearchMonitor + 'a,
    {
        self.add_monitor(monitor);
        self
    }

    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SearchMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Every complete assignment whose offerings are pairwise conflict-free.
    pub fn solve_all(&mut self) -> Result<Enumeration<'a>> {
        validate_courses(self.courses)?;

        let mut solutions = Vec::new();
        let (termination, statistics) = self.search(|assignment| {
            solutions.push(assignment.clone());
            ControlFlow::Continue(())
        });

        Ok(Enumeration {
            solutions,
            termination,
            statistics,
        })
    }

    /// The first complete assignment in search order. Stops as soon as one is found.
    pub fn solve_first(&mut self) -> Result<FirstFit<'a>> {
        validate_courses(self.courses)?;

        let mut found = None;
        let (termination, statistics) = self.search(|assignment| {
            found = Some(assignment.clone());
            ControlFlow::Break(())
        });

        let outcome = match (found, termination) {
            (Some(assignment), _) => FirstOutcome::Found(assignment),
            (None, Termination::Exhausted) => FirstOutcome::Unsatisfiable,
            (None, Termination::Aborted(reason)) => FirstOutcome::Aborted(reason),
        };
        Ok(FirstFit {
            outcome,
            statistics,
        })
    }

    fn poll_monitors(&mut self) -> SearchCommand {
        for monitor in self.monitors.iter_mut() {
            monitor.on_step();
        }
        self.monitors
            .iter()
            .map(|m| m.search_command())
            .find(|c| *c != SearchCommand::Continue)
            .unwrap_or_default()
    }

    /// Shared core of both modes. `on_solution` sees each complete assignment and
    /// decides whether the search goes on.
    fn search<F>(&mut self, mut on_solution: F) -> (Termination, SearchStatistics)
    where
        F: FnMut(&Assignment<'a>) -> ControlFlow<()>,
    {
        let courses = self.courses;
        let started = Instant::now();
        let mut stats = SearchStatistics::default();
        let mut termination = Termination::Exhausted;

        debug!(courses = courses.len(), "entering search");
        for monitor in self.monitors.iter_mut() {
            monitor.on_enter_search(courses);
        }

        let mut partial = Assignment::with_capacity(courses.len());
        let mut stack = Vec::with_capacity(courses.len());
        stack.push(Frame::new(0));

        while let Some(frame) = stack.last_mut() {
            let course = &courses[frame.course];
            if frame.cursor == course.offerings.len() {
                // exhausted this level: undo the parent's commit
                stack.pop();
                partial.pop();
                continue;
            }

            let index = frame.cursor;
            frame.cursor += 1;
            let depth = frame.course;

            if let SearchCommand::Terminate(reason) = self.poll_monitors() {
                info!(%reason, "search terminated by monitor");
                termination = Termination::Aborted(reason);
                break;
            }

            stats.nodes += 1;
            if partial.conflicts_with(&course.offerings[index]) {
                stats.conflicts += 1;
                continue;
            }

            partial.push(course, index);
            if depth + 1 < courses.len() {
                stack.push(Frame::new(depth + 1));
                continue;
            }

            stats.solutions += 1;
            trace!(choices = ?partial.choices(), score = partial.score(), "solution found");
            for monitor in self.monitors.iter_mut() {
                monitor.on_solution_found(&partial);
            }
            let flow = on_solution(&partial);
            partial.pop();
            if flow.is_break() {
                break;
            }
        }

        stats.duration = started.elapsed();
        debug!(
            nodes = stats.nodes,
            conflicts = stats.conflicts,
            solutions = stats.solutions,
            %termination,
            "leaving search"
        );
        (termination, stats)
    }
}
