use std::path::PathBuf;

use thiserror::Error;

use crate::identified::{EntityKind, Id};

/// Errors raised by entity construction, lookups, loading and dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Caller-supplied data breaks a precondition (bad id, VIN, rating, times, no driver).
    #[error("invalid input: {0}")]
    Validation(String),
    /// A loaded record references an entity that is not in the dataset.
    #[error("data integrity violation: {0}")]
    DataIntegrity(String),
    /// A well-formed id matched nothing.
    #[error("no {entity} with id {id}")]
    NotFound { entity: EntityKind, id: Id },
    #[error(transparent)]
    Source(#[from] RecordSourceError),
}

impl DispatchError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        DispatchError::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DispatchError::Validation(_))
    }

    pub fn is_data_integrity(&self) -> bool {
        matches!(self, DispatchError::DataIntegrity(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DispatchError::NotFound { .. })
    }
}

/// Failures of the record source collaborator.
#[derive(Debug, Error)]
pub enum RecordSourceError {
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed csv in {}: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },
    #[error("{}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        message: String,
    },
}
