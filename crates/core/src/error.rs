use crate::access::{Permission, Role};
use crate::validation::ValidationError;
use hms_files::FilesError;

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to open data directory: {0}")]
    DataDirectory(FilesError),
    #[error("failed to load {collection}: {source}")]
    Load {
        collection: &'static str,
        #[source]
        source: FilesError,
    },
    #[error(
        "{file} could not be read and was moved to {moved_to}: {source}",
        moved_to = moved_to.display()
    )]
    Unreadable {
        file: &'static str,
        moved_to: std::path::PathBuf,
        #[source]
        source: FilesError,
    },
    #[error("failed to save {file}: {source}")]
    Snapshot {
        file: &'static str,
        #[source]
        source: FilesError,
    },
    #[error("failed to write {file}: {source}")]
    Mirror {
        file: &'static str,
        #[source]
        source: FilesError,
    },
    #[error("failed to append to {file}: {source}")]
    LogAppend {
        file: &'static str,
        #[source]
        source: FilesError,
    },
    #[error(
        "failed to export patients to {path}: {source}",
        path = path.display()
    )]
    Export {
        path: std::path::PathBuf,
        #[source]
        source: FilesError,
    },
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("{role} is not permitted to {permission}")]
    PermissionDenied { role: Role, permission: Permission },
}

impl RecordError {
    /// True for failures to read or write record files.
    ///
    /// The in-memory state stays authoritative for the session after one of these.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            RecordError::DataDirectory(_)
                | RecordError::Load { .. }
                | RecordError::Unreadable { .. }
                | RecordError::Snapshot { .. }
                | RecordError::Mirror { .. }
                | RecordError::LogAppend { .. }
                | RecordError::Export { .. }
        )
    }
}

pub type RecordResult<T> = std::result::Result<T, RecordError>;
