//! Session error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::notice::Severity;
use crate::tab_id::TabId;

const MEGABYTE: f64 = 1024.0 * 1024.0;

/// Failures of session operations. Each one becomes a notice in the UI;
/// none of them ends the process.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(
        "File too large ({:.1} MB, limit {:.0} MB): {}",
        megabytes(.size),
        megabytes(.limit),
        .path.display()
    )]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("Cannot open binary file: {}", .path.display())]
    BinaryOrUndecodable { path: PathBuf },

    #[error("Error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error saving {}: {source}", .path.display())]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Nothing to save")]
    NothingToSave,

    #[error("Cannot determine file path for tab {tab_id}")]
    UnresolvablePath { tab_id: TabId },

    #[error("Error loading extension map: {reason}")]
    ConfigLoadFailure { reason: String },

    #[error("Cannot close the {what}")]
    CloseRejected { what: &'static str },
}

fn megabytes(bytes: &u64) -> f64 {
    *bytes as f64 / MEGABYTE
}

impl SessionError {
    pub fn severity(&self) -> Severity {
        match self {
            SessionError::NothingToSave | SessionError::CloseRejected { .. } => Severity::Info,
            SessionError::FileTooLarge { .. } | SessionError::ConfigLoadFailure { .. } => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_too_large_message() {
        let err = SessionError::FileTooLarge {
            path: PathBuf::from("/tmp/big.log"),
            size: 15 * 1024 * 1024,
            limit: 10 * 1024 * 1024,
        };
        assert_eq!(
            err.to_string(),
            "File too large (15.0 MB, limit 10 MB): /tmp/big.log"
        );
        assert_eq!(err.severity(), Severity::Warning);
    }

    #[test]
    fn test_severity_of_save_failure() {
        let err = SessionError::SaveFailed {
            path: PathBuf::from("a.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.severity(), Severity::Error);
        assert_eq!(SessionError::NothingToSave.severity(), Severity::Info);
    }
}
