//! Error kinds raised while counting boxes.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every failure is fatal to the run; none produce a partial total.
#[derive(Error, Debug)]
pub enum PackError {
    /// Line is not a base-10 integer
    #[error("line {line}: invalid integer {text:?}")]
    Parse { line: usize, text: String },

    /// Line is an integer, but negative or too large
    #[error("line {line}: value {text} is out of range (expected 0..={max})", max = i64::MAX)]
    Range { line: usize, text: String },

    /// No combination of box sizes sums to the target
    #[error("line {line}: target {target} cannot be packed exactly")]
    Infeasible { line: usize, target: u64 },

    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: longer than {limit} bytes")]
    LineTooLong { line: usize, limit: usize },

    /// Workers exited without answering every submitted job
    #[error("worker pool delivered {received} of {expected} results")]
    WorkerLost { expected: usize, received: usize },

    #[error("line {line}: total box count overflowed")]
    TotalOverflow { line: usize },
}

impl PackError {
    /// Input line the error points at, when there is one
    pub fn line(&self) -> Option<usize> {
        match self {
            PackError::Parse { line, .. }
            | PackError::Range { line, .. }
            | PackError::Infeasible { line, .. }
            | PackError::Read { line, .. }
            | PackError::LineTooLong { line, .. }
            | PackError::TotalOverflow { line } => Some(*line),
            PackError::Open { .. } | PackError::WorkerLost { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_quotes_text() {
        let error = PackError::Parse { line: 7, text: "abc".to_string() };
        let msg = format!("{error}");
        assert!(msg.contains("line 7"));
        assert!(msg.contains("\"abc\""));
    }

    #[test]
    fn test_range_error_names_value() {
        let error = PackError::Range { line: 2, text: "-5".to_string() };
        let msg = format!("{error}");
        assert!(msg.contains("line 2"));
        assert!(msg.contains("-5"));
        assert!(msg.contains("out of range"));
    }

    #[test]
    fn test_infeasible_error() {
        let error = PackError::Infeasible { line: 1, target: 3 };
        assert_eq!(format!("{error}"), "line 1: target 3 cannot be packed exactly");
        assert_eq!(error.line(), Some(1));
    }

    #[test]
    fn test_open_error_has_no_line() {
        let error = PackError::Open {
            path: PathBuf::from("missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(format!("{error}").contains("missing.txt"));
        assert_eq!(error.line(), None);
    }

    #[test]
    fn test_line_too_long_error() {
        let error = PackError::LineTooLong { line: 4, limit: 1024 };
        assert_eq!(format!("{error}"), "line 4: longer than 1024 bytes");
        assert_eq!(error.line(), Some(4));
    }
}
