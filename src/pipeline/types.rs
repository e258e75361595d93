use serde::Serialize;

/// A parsed input line waiting for a worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Job {
    /// 1-based physical line number in the input
    pub line: usize,
    pub target: u64,
}

/// Solver outcome for one [`Job`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobResult {
    pub line: usize,
    pub target: u64,
    /// Minimum box count, `None` when the target cannot be packed exactly
    pub min_boxes: Option<u64>,
}

/// Totals produced by a successful run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_boxes: u64,
    /// Number of non-blank lines solved
    pub lines: usize,
    pub workers: usize,
}
