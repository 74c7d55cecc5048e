//! Data directory service implementation
//!
//! This module provides [`DataDirectory`], the single entry point for reading and
//! writing record files. Three kinds of file live side by side in one directory:
//!
//! - **Snapshots** (`*.bin`): a bincode encoding of a whole collection. Written in
//!   full on every change and read once at startup. These are authoritative.
//! - **Mirrors** (`*.txt`): the same collection rendered as CSV for people and
//!   spreadsheets. Regenerated in full alongside each snapshot, never read back.
//! - **Logs** (`*.csv`): CSV files that only grow by one row per new record.
//!
//! Snapshot and mirror are separate writes with no coordination between them. If the
//! process dies between the two, the snapshot wins on the next start.

use crate::csv;
use crate::FilesError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Handle on the directory holding every record file.
///
/// Construction creates the directory when it is missing and canonicalises the path,
/// so every later file operation resolves against the same absolute location.
#[derive(Debug, Clone)]
pub struct DataDirectory {
    root: PathBuf,
}

impl DataDirectory {
    /// Opens (and if necessary creates) the data directory.
    ///
    /// # Errors
    ///
    /// Returns `FilesError` if:
    /// - the path exists but is not a directory
    /// - the directory cannot be created or canonicalised
    pub fn open(root: &Path) -> Result<Self, FilesError> {
        if root.exists() && !root.is_dir() {
            return Err(FilesError::InvalidDataDirectory(format!(
                "Path is not a directory: {}",
                root.display()
            )));
        }

        fs::create_dir_all(root).map_err(|e| {
            FilesError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create data directory {}: {}", root.display(), e),
            ))
        })?;

        let root = root.canonicalize().map_err(|e| {
            FilesError::InvalidDataDirectory(format!(
                "Cannot canonicalize path {}: {}",
                root.display(),
                e
            ))
        })?;

        Ok(Self { root })
    }

    /// Returns the canonical data directory path.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the absolute path of a file inside the data directory.
    #[must_use]
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Encodes `value` with bincode and replaces `file_name` with the result.
    ///
    /// Returns the number of bytes written.
    pub fn write_snapshot<T: Serialize>(
        &self,
        file_name: &str,
        value: &T,
    ) -> Result<usize, FilesError> {
        let bytes = bincode::serde::encode_to_vec(value, bincode::config::standard()).map_err(
            |source| FilesError::Encode {
                file: file_name.to_owned(),
                source,
            },
        )?;

        let path = self.path_for(file_name);
        fs::write(&path, &bytes).map_err(|e| {
            FilesError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write snapshot {}: {}", path.display(), e),
            ))
        })?;

        Ok(bytes.len())
    }

    /// Reads and decodes a snapshot.
    ///
    /// Returns `Ok(None)` when the file has never been written.
    ///
    /// # Errors
    ///
    /// Returns `FilesError` if the file exists but cannot be read, or its bytes do not
    /// decode as `T`.
    pub fn read_snapshot<T: DeserializeOwned>(
        &self,
        file_name: &str,
    ) -> Result<Option<T>, FilesError> {
        let path = self.path_for(file_name);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(|e| {
            FilesError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read snapshot {}: {}", path.display(), e),
            ))
        })?;

        let (value, _read) =
            bincode::serde::decode_from_slice::<T, _>(&bytes, bincode::config::standard())
                .map_err(|source| FilesError::Decode {
                    file: file_name.to_owned(),
                    source,
                })?;

        Ok(Some(value))
    }

    /// Renames an unreadable file to `<file_name>.corrupt` so later writes cannot replace it.
    ///
    /// If that name is taken, `.corrupt.1`, `.corrupt.2`, ... are tried in turn. Returns the
    /// new path.
    pub fn set_aside(&self, file_name: &str) -> Result<PathBuf, FilesError> {
        let from = self.path_for(file_name);
        let mut to = self.path_for(&format!("{file_name}.corrupt"));
        let mut attempt = 0;
        while to.exists() {
            attempt += 1;
            to = self.path_for(&format!("{file_name}.corrupt.{attempt}"));
        }

        fs::rename(&from, &to).map_err(|e| {
            FilesError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to move {} aside to {}: {}",
                    from.display(),
                    to.display(),
                    e
                ),
            ))
        })?;

        Ok(to)
    }

    /// Rewrites `file_name` as a CSV table: header line, then one line per row.
    pub fn write_table<R>(&self, file_name: &str, header: &[&str], rows: R) -> Result<(), FilesError>
    where
        R: IntoIterator<Item = Vec<String>>,
    {
        csv::write_table(&self.path_for(file_name), header, rows)
    }

    /// Appends one CSV row to a log, writing `header` first if the log does not exist yet.
    ///
    /// Returns `true` when this call created the log (and therefore wrote the header).
    pub fn append_row(
        &self,
        file_name: &str,
        header: &[&str],
        row: &[String],
    ) -> Result<bool, FilesError> {
        csv::append_row(&self.path_for(file_name), header, row)
    }
}
