use crate::constants::{Collection, LAB_REPORTS};
use crate::dates::format_date;
use crate::store::Record;
use crate::validation::{required, ValidationResult};
use chrono::NaiveDate;
use hms_types::{optional_text, NonEmptyText};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabReport {
    id: NonEmptyText,
    patient_id: String,
    doctor_id: String,
    date: NaiveDate,
    test_name: String,
    result: String,
    notes: String,
}

impl LabReport {
    pub fn new(
        id: &str,
        patient_id: &str,
        doctor_id: &str,
        date: NaiveDate,
        test_name: Option<&str>,
        result: Option<&str>,
        notes: Option<&str>,
    ) -> ValidationResult<Self> {
        Ok(Self {
            id: required("id", id)?,
            patient_id: patient_id.trim().to_string(),
            doctor_id: doctor_id.trim().to_string(),
            date,
            test_name: optional_text(test_name),
            result: optional_text(result),
            notes: optional_text(notes),
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

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }
}

impl Record for LabReport {
    const COLLECTION: Collection = LAB_REPORTS;

    fn record_id(&self) -> &str {
        self.id.as_str()
    }

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.id().to_string(),
            self.patient_id.clone(),
            self.doctor_id.clone(),
            format_date(Some(self.date)),
            self.test_name.clone(),
            self.result.clone(),
            self.notes.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_line_notes_stay_in_one_field() {
        let report = LabReport::new(
            "LR1a2b3c4d",
            "P001",
            "N/A",
            NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            Some("CBC"),
            Some("Hb 13.2"),
            Some("repeat in 2 weeks\nfasting"),
        )
        .unwrap();

        let fields = report.csv_fields();
        assert_eq!(fields.len(), LabReport::COLLECTION.header.len());
        assert_eq!(fields[3], "02-06-2024");
        assert_eq!(fields[6], "repeat in 2 weeks\nfasting");
        assert_eq!(
            hms_files::csv::render_row(&fields).unwrap(),
            "LR1a2b3c4d,P001,N/A,02-06-2024,CBC,Hb 13.2,\"repeat in 2 weeks\nfasting\"\n"
        );
    }

    #[test]
    fn id_is_required() {
        let result = LabReport::new(
            "",
            "P001",
            "D7",
            NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            None,
            None,
            None,
        );
        assert!(result.is_err());
    }
}
