use crate::constants::{Collection, APPOINTMENTS, DEFAULT_APPOINTMENT_STATUS};
use crate::dates::format_date_time;
use crate::store::Record;
use crate::validation::{required, ValidationResult};
use chrono::NaiveDateTime;
use hms_types::{optional_text, NonEmptyText};
use serde::{Deserialize, Serialize};

/// A booked slot between a patient and a doctor.
///
/// `patient_id` and `doctor_id` are plain strings; nothing checks that they name
/// existing records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    id: NonEmptyText,
    patient_id: String,
    doctor_id: String,
    date_time: NaiveDateTime,
    reason: String,
    status: String,
}

impl Appointment {
    pub fn new(
        id: &str,
        patient_id: &str,
        doctor_id: &str,
        date_time: NaiveDateTime,
        reason: Option<&str>,
    ) -> ValidationResult<Self> {
        Ok(Self {
            id: required("id", id)?,
            patient_id: patient_id.trim().to_string(),
            doctor_id: doctor_id.trim().to_string(),
            date_time,
            reason: optional_text(reason),
            status: DEFAULT_APPOINTMENT_STATUS.to_string(),
        })
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn doctor_id(&self) -> &str {
        &self.doctor_id
    }

    pub fn date_time(&self) -> NaiveDateTime {
        self.date_time
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.trim().to_string();
    }
}

impl Record for Appointment {
    const COLLECTION: Collection = APPOINTMENTS;

    fn record_id(&self) -> &str {
        self.id.as_str()
    }

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.id().to_string(),
            self.patient_id.clone(),
            self.doctor_id.clone(),
            format_date_time(self.date_time),
            self.reason.clone(),
            self.status.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn slot() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    #[test]
    fn new_appointment_is_scheduled() {
        let appt = Appointment::new("A1b2c3", " P001 ", "D7", slot(), Some(" follow-up ")).unwrap();
        assert_eq!(appt.status(), "SCHEDULED");
        assert_eq!(appt.patient_id(), "P001");
        assert_eq!(appt.reason(), "follow-up");
    }

    #[test]
    fn csv_columns_follow_header() {
        let mut appt = Appointment::new("A1", "P001", "D7", slot(), Some("chest pain, mild")).unwrap();
        appt.set_status("COMPLETED");

        assert_eq!(
            appt.csv_fields(),
            ["A1", "P001", "D7", "01-03-2024 14:30", "chest pain, mild", "COMPLETED"]
        );
        assert_eq!(appt.csv_fields().len(), Appointment::COLLECTION.header.len());
    }
}
