pub mod assignment;
pub mod monitor;
pub mod solver;
pub mod stats;

pub use assignment::{Assignment, Pick};
pub use solver::{Enumeration, FirstFit, FirstOutcome, Solver, Termination};
