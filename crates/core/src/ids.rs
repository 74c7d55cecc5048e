//! Short random record identifiers.
//!
//! Ids are a type prefix followed by the leading hex characters of a v4 UUID, which keeps
//! them short enough to type while making collisions unlikely at hospital scale. Nothing
//! checks for collisions; the record stores accept duplicate ids.

use uuid::Uuid;

/// Returns `prefix` followed by the first `len` hex characters of a fresh UUID.
pub fn generate_id(prefix: &str, len: usize) -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("{}{}", prefix, &raw[..len.min(raw.len())])
}

pub fn new_patient_id() -> String {
    generate_id("P", 5)
}

pub fn new_appointment_id() -> String {
    generate_id("A", 6)
}

pub fn new_lab_report_id() -> String {
    generate_id("LR", 8)
}
