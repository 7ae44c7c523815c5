use std::path::PathBuf;
use thiserror::Error;

/// Failure that aborts a whole stage. Per-entry rename problems are not
/// represented here; they end up in `rename::RenameReport::failures`.
#[derive(Error, Debug)]
pub enum StageError {
    #[error("recording directory is missing or not a directory: {}", .path.display())]
    InvalidDirectory { path: PathBuf },

    #[error("CSV file not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    #[error("column '{column}' not found in {}", .path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl StageError {
    /// True for the conditions checked before any work starts: a bad
    /// directory, a missing source file, a missing column.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            StageError::InvalidDirectory { .. }
                | StageError::SourceNotFound { .. }
                | StageError::MissingColumn { .. }
        )
    }
}
