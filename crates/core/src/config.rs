//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! [`Hospital::open`](crate::Hospital::open). Core code never reads environment variables
//! itself, which keeps tests independent of the process environment.

use crate::constants::DEFAULT_DATA_DIR;
use crate::validation::{ValidationError, ValidationResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] if `data_dir` is empty.
    pub fn new(data_dir: PathBuf) -> ValidationResult<Self> {
        if data_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingField("data directory"));
        }

        Ok(Self { data_dir })
    }

    /// Directory holding every snapshot, mirror and log.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Resolve the data directory from an optional raw value (flag or environment).
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_DATA_DIR`].
pub fn data_dir_from_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_data_dir() {
        let result = CoreConfig::new(PathBuf::new());
        assert_eq!(
            result.unwrap_err(),
            ValidationError::MissingField("data directory")
        );
    }

    #[test]
    fn keeps_configured_data_dir() {
        let cfg = CoreConfig::new(PathBuf::from("/var/lib/hms")).unwrap();
        assert_eq!(cfg.data_dir(), Path::new("/var/lib/hms"));
    }

    #[test]
    fn blank_value_falls_back_to_default() {
        assert_eq!(data_dir_from_value(None), PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(
            data_dir_from_value(Some("   ".into())),
            PathBuf::from(DEFAULT_DATA_DIR)
        );
        assert_eq!(
            data_dir_from_value(Some(" records ".into())),
            PathBuf::from("records")
        );
    }
}
