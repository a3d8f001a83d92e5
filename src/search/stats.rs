use std::time::Duration;

/// Counters collected while searching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Candidate offerings tried.
    pub nodes: u64,
    /// Candidates rejected because they overlapped a committed offering.
    pub conflicts: u64,
    /// Complete assignments reached.
    pub solutions: u64,
    pub duration: Duration,
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Nodes: {}", self.nodes)?;
        writeln!(f, "  Conflicts: {}", self.conflicts)?;
        writeln!(f, "  Solutions: {}", self.solutions)?;
        write!(f, "  Duration (secs): {:.3}", self.duration.as_secs_f64())
    }
}
