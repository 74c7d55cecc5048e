//! Constants used throughout the hospital core crate.
//!
//! File names, CSV headers and date patterns live here so that the store, the
//! exporter and the tests agree on them.

/// Default directory for record storage when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Date pattern for every date column (day-month-year).
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Date-time pattern for appointment slots.
pub const DATE_TIME_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Status given to every newly booked appointment.
pub const DEFAULT_APPOINTMENT_STATUS: &str = "SCHEDULED";

/// Doctor id recorded on lab reports filed without a named doctor.
pub const UNASSIGNED_DOCTOR_ID: &str = "N/A";

/// Inclusive bounds for a patient's age in years.
pub const MIN_PATIENT_AGE: i32 = 0;
pub const MAX_PATIENT_AGE: i32 = 150;

/// Prefix of default patient report export files.
pub const PATIENT_REPORT_PREFIX: &str = "patient_report_";

/// The files backing one record collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Collection {
    /// Human-readable collection name, used in logs and errors.
    pub name: &'static str,
    /// Authoritative binary snapshot.
    pub blob: &'static str,
    /// CSV mirror rewritten on every change.
    pub mirror: &'static str,
    /// Append-only CSV log, for collections that keep one.
    pub log: Option<&'static str>,
    /// Column names shared by the mirror and the log.
    pub header: &'static [&'static str],
}

pub const PATIENTS: Collection = Collection {
    name: "patients",
    blob: "patients.bin",
    mirror: "patients.txt",
    log: None,
    header: &[
        "id",
        "name",
        "dob",
        "age",
        "status",
        "gender",
        "contact",
        "address",
        "medicalHistory",
        "admitDate",
    ],
};

pub const USERS: Collection = Collection {
    name: "users",
    blob: "users.bin",
    mirror: "users.txt",
    log: None,
    header: &["username", "role", "passwordHash"],
};

pub const DOCTORS: Collection = Collection {
    name: "doctors",
    blob: "doctors.bin",
    mirror: "doctors.txt",
    log: None,
    header: &["id", "name", "specialization", "dutyTimings", "contact"],
};

pub const STAFF: Collection = Collection {
    name: "staff",
    blob: "staff.bin",
    mirror: "staff.txt",
    log: None,
    header: &["id", "name", "role", "shiftSchedule", "contact"],
};

pub const APPOINTMENTS: Collection = Collection {
    name: "appointments",
    blob: "appointments.bin",
    mirror: "appointments.txt",
    log: Some("appointments.csv"),
    header: &[
        "appointmentId",
        "patientId",
        "doctorId",
        "datetime",
        "reason",
        "status",
    ],
};

pub const LAB_REPORTS: Collection = Collection {
    name: "lab reports",
    blob: "lab_reports.bin",
    mirror: "lab_reports.txt",
    log: Some("lab_reports.csv"),
    header: &[
        "reportId",
        "patientId",
        "doctorId",
        "date",
        "testName",
        "result",
        "notes",
    ],
};
