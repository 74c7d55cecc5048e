//! Patient report export.
//!
//! Reports use the same columns and escaping as the patients mirror but may be written
//! anywhere, and are never read back.

use crate::constants::{PATIENTS, PATIENT_REPORT_PREFIX};
use crate::error::{RecordError, RecordResult};
use crate::models::Patient;
use crate::store::Record;
use std::path::{Path, PathBuf};

/// Writes `patients` as a CSV report to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`RecordError::Export`] if the file cannot be written.
pub fn export_patients(patients: &[Patient], path: &Path) -> RecordResult<()> {
    let rows = patients.iter().map(Record::csv_fields);

    hms_files::csv::write_table(path, PATIENTS.header, rows).map_err(|source| {
        tracing::error!("failed to export patients to {}: {}", path.display(), source);
        RecordError::Export {
            path: path.to_path_buf(),
            source,
        }
    })?;

    tracing::info!("exported {} patients to {}", patients.len(), path.display());
    Ok(())
}

/// `patient_report_<unix-millis>.csv` inside `data_dir`.
pub fn default_export_path(data_dir: &Path) -> PathBuf {
    let millis = chrono::Utc::now().timestamp_millis();
    data_dir.join(format!("{PATIENT_REPORT_PREFIX}{millis}.csv"))
}
