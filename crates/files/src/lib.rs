//! Hospital record file formats
//!
//! This crate owns every byte the record store puts on disk. It knows nothing about
//! patients or appointments; callers hand it serialisable collections and pre-split
//! CSV fields.
//!
//! ## Design Principles
//!
//! - One flat data directory holds every file; it is created on first use
//! - The binary snapshot of a collection is the authoritative state
//! - CSV mirrors are regenerated from scratch and are never read back
//! - CSV logs only ever grow; their header is written exactly once
//!
//! ## Layout
//!
//! ```text
//! data/
//! ├── patients.bin        # bincode snapshot, authoritative
//! ├── patients.txt        # CSV mirror, rewritten on every change
//! ├── appointments.bin
//! ├── appointments.txt
//! └── appointments.csv    # append-only log
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use hms_files::DataDirectory;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = DataDirectory::open(Path::new("data"))?;
//! data.write_snapshot("doctors.bin", &vec!["D001".to_string()])?;
//! let doctors: Option<Vec<String>> = data.read_snapshot("doctors.bin")?;
//! # Ok(())
//! # }
//! ```

pub mod csv;
mod files;

pub use files::DataDirectory;

/// Errors that can occur during file operations
#[derive(Debug, thiserror::Error)]
pub enum FilesError {
    /// Data directory path exists but cannot be used
    #[error("Invalid data directory: {0}")]
    InvalidDataDirectory(String),

    /// Snapshot could not be encoded
    #[error("Failed to encode snapshot {file}: {source}")]
    Encode {
        file: String,
        #[source]
        source: bincode::error::EncodeError,
    },

    /// Snapshot bytes could not be decoded into the expected collection
    #[error("Failed to decode snapshot {file}: {source}")]
    Decode {
        file: String,
        #[source]
        source: bincode::error::DecodeError,
    },

    /// CSV table or log could not be written
    #[error("Failed to write CSV {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: ::csv::Error,
    },

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
