use crossbeam::channel::Sender;
use std::io::{BufRead, Read};
use std::num::IntErrorKind;

use super::error::PackError;
use super::types::Job;
use crate::parallel::AbortSignal;

/// Longest accepted line, newline excluded
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

/// Parse one trimmed, non-blank line into a target
pub fn parse_target(line: usize, text: &str) -> Result<u64, PackError> {
    match text.parse::<i64>() {
        Ok(value) => u64::try_from(value).map_err(|_| PackError::Range {
            line,
            text: text.to_string(),
        }),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Err(PackError::Range {
                line,
                text: text.to_string(),
            }),
            _ => Err(PackError::Parse {
                line,
                text: text.to_string(),
            }),
        },
    }
}

/// Scan `input` and submit one [`Job`] per non-blank line.
///
/// Line numbers are physical: blank lines are skipped but still counted.
/// Stops at the first bad line or at a line longer than [`MAX_LINE_BYTES`].
/// If `abort` is raised or the job queue disconnects, reading stops quietly
/// and the jobs sent so far are reported.
///
/// Returns the number of jobs submitted.
pub fn submit_jobs<I: BufRead>(
    mut input: I,
    jobs: &Sender<Job>,
    abort: &AbortSignal,
) -> Result<usize, PackError> {
    let mut buf = Vec::new();
    let mut line = 0;
    let mut submitted = 0;

    loop {
        if abort.is_aborted() {
            tracing::debug!("run aborted after {} jobs, stopping reader", submitted);
            return Ok(submitted);
        }

        buf.clear();
        let read = (&mut input)
            .take(MAX_LINE_BYTES as u64 + 1)
            .read_until(b'\n', &mut buf)
            .map_err(|source| PackError::Read { line: line + 1, source })?;
        if read == 0 {
            break;
        }
        line += 1;

        if buf.len() > MAX_LINE_BYTES && buf.last() != Some(&b'\n') {
            return Err(PackError::LineTooLong {
                line,
                limit: MAX_LINE_BYTES,
            });
        }

        let text = String::from_utf8_lossy(&buf);
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        let target = parse_target(line, text)?;
        tracing::trace!("line {}: submitting target {}", line, target);

        if jobs.send(Job { line, target }).is_err() {
            tracing::debug!("job queue closed after {} jobs, stopping reader", submitted);
            return Ok(submitted);
        }
        submitted += 1;
    }

    tracing::debug!("reader finished: {} lines, {} jobs", line, submitted);
    Ok(submitted)
}
