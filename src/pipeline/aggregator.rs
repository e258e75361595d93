use crossbeam::channel::Receiver;

use super::error::PackError;
use super::types::JobResult;

/// Running totals from the result queue
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub total_boxes: u64,
    pub received: usize,
}

/// Sum feasible results until the result queue disconnects.
///
/// Results arrive in any order. The first infeasible result aborts the
/// tally; dropping `results` on return lets the workers wind down.
pub fn aggregate(results: Receiver<JobResult>) -> Result<Tally, PackError> {
    let mut tally = Tally::default();

    for result in results.iter() {
        tally.received += 1;

        let Some(boxes) = result.min_boxes else {
            tracing::debug!("line {}: target {} is infeasible, aborting", result.line, result.target);
            return Err(PackError::Infeasible {
                line: result.line,
                target: result.target,
            });
        };

        tally.total_boxes = tally
            .total_boxes
            .checked_add(boxes)
            .ok_or(PackError::TotalOverflow { line: result.line })?;
    }

    tracing::debug!("aggregated {} results, {} boxes", tally.received, tally.total_boxes);
    Ok(tally)
}
