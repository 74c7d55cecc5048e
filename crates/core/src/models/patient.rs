use crate::constants::{Collection, PATIENTS};
use crate::dates::format_date;
use crate::models::{Describe, PersonFields, PersonRecord};
use crate::store::Record;
use crate::validation::{patient_age, ValidationResult};
use chrono::NaiveDate;
use hms_types::optional_text;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a patient is in their stay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatientStatus {
    #[default]
    Registered,
    Admitted,
    Discharged,
}

impl PatientStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PatientStatus::Registered => "REGISTERED",
            PatientStatus::Admitted => "ADMITTED",
            PatientStatus::Discharged => "DISCHARGED",
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered patient.
///
/// New patients start `REGISTERED` with no admission date. The status only moves through
/// [`Patient::admit`] and [`Patient::discharge`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    person: PersonFields,
    age: u8,
    gender: String,
    address: String,
    medical_history: String,
    status: PatientStatus,
    admit_date: Option<NaiveDate>,
}

impl Patient {
    /// # Errors
    ///
    /// Returns [`ValidationError::AgeOutOfRange`](crate::ValidationError::AgeOutOfRange)
    /// unless `0 <= age <= 150`.
    pub fn new(
        person: PersonFields,
        age: i32,
        gender: Option<&str>,
        address: Option<&str>,
        medical_history: Option<&str>,
    ) -> ValidationResult<Self> {
        Ok(Self {
            person,
            age: patient_age(age)?,
            gender: optional_text(gender),
            address: optional_text(address),
            medical_history: optional_text(medical_history),
            status: PatientStatus::Registered,
            admit_date: None,
        })
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn medical_history(&self) -> &str {
        &self.medical_history
    }

    pub fn status(&self) -> PatientStatus {
        self.status
    }

    pub fn admit_date(&self) -> Option<NaiveDate> {
        self.admit_date
    }

    pub fn set_age(&mut self, age: i32) -> ValidationResult<()> {
        self.age = patient_age(age)?;
        Ok(())
    }

    pub fn set_gender(&mut self, gender: Option<&str>) {
        self.gender = optional_text(gender);
    }

    pub fn set_address(&mut self, address: Option<&str>) {
        self.address = optional_text(address);
    }

    pub fn set_medical_history(&mut self, medical_history: Option<&str>) {
        self.medical_history = optional_text(medical_history);
    }

    /// Marks the patient admitted on `date`.
    pub fn admit(&mut self, date: NaiveDate) {
        self.status = PatientStatus::Admitted;
        self.admit_date = Some(date);
    }

    /// Marks the patient discharged. The admission date is kept.
    pub fn discharge(&mut self) {
        self.status = PatientStatus::Discharged;
    }

    /// Name match ignoring case; `exact` compares whole names, otherwise a substring.
    pub fn matches_name(&self, query: &str, exact: bool) -> bool {
        let name = self.name().to_lowercase();
        let query = query.trim().to_lowercase();
        if exact {
            name == query
        } else {
            name.contains(&query)
        }
    }

    /// Applies an edit, leaving the patient untouched if any field fails validation.
    ///
    /// Status and admission date are not editable here.
    pub fn apply(&mut self, edit: PatientEdit) -> ValidationResult<()> {
        let mut next = self.clone();

        if let Some(name) = edit.name.as_deref() {
            next.person.set_name(name)?;
        }
        if let Some(contact) = edit.contact.as_deref() {
            next.person.set_contact(contact)?;
        }
        if let Some(date_of_birth) = edit.date_of_birth {
            next.person.set_date_of_birth(Some(date_of_birth));
        }
        if let Some(age) = edit.age {
            next.set_age(age)?;
        }
        if let Some(gender) = edit.gender.as_deref() {
            next.set_gender(Some(gender));
        }
        if let Some(address) = edit.address.as_deref() {
            next.set_address(Some(address));
        }
        if let Some(history) = edit.medical_history.as_deref() {
            next.set_medical_history(Some(history));
        }

        *self = next;
        Ok(())
    }
}

/// Fields to change on an existing patient; `None` leaves a field as it is.
#[derive(Clone, Debug, Default)]
pub struct PatientEdit {
    pub name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub contact: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub medical_history: Option<String>,
}

impl PersonRecord for Patient {
    fn person(&self) -> &PersonFields {
        &self.person
    }
}

impl Describe for Patient {
    fn describe(&self) -> String {
        format!(
            "Patient[id={},name={},age={},status={}]",
            self.id(),
            self.name(),
            self.age,
            self.status
        )
    }
}

impl Record for Patient {
    const COLLECTION: Collection = PATIENTS;

    fn record_id(&self) -> &str {
        self.person.id()
    }

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.id().to_string(),
            self.name().to_string(),
            format_date(self.date_of_birth()),
            self.age.to_string(),
            self.status.to_string(),
            self.gender.clone(),
            self.contact().to_string(),
            self.address.clone(),
            self.medical_history.clone(),
            format_date(self.admit_date),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    fn person(id: &str, name: &str) -> PersonFields {
        PersonFields::new(id, name, NaiveDate::from_ymd_opt(1994, 1, 2), "9876543210").unwrap()
    }

    fn patient(age: i32) -> ValidationResult<Patient> {
        Patient::new(
            person("P001", "Jane Doe"),
            age,
            Some(" F "),
            Some(" 12 High St "),
            Some(" asthma "),
        )
    }

    #[test]
    fn new_patient_is_registered_and_trimmed() {
        let p = patient(30).unwrap();
        assert_eq!(p.status(), PatientStatus::Registered);
        assert_eq!(p.admit_date(), None);
        assert_eq!(p.age(), 30);
        assert_eq!(p.gender(), "F");
        assert_eq!(p.address(), "12 High St");
        assert_eq!(p.medical_history(), "asthma");
    }

    #[test]
    fn absent_optional_fields_are_empty() {
        let p = Patient::new(person("P002", "John"), 40, None, None, None).unwrap();
        assert_eq!(p.gender(), "");
        assert_eq!(p.address(), "");
        assert_eq!(p.medical_history(), "");
    }

    #[test]
    fn age_bounds() {
        assert!(patient(0).is_ok());
        assert!(patient(150).is_ok());
        assert_eq!(patient(-1).unwrap_err(), ValidationError::AgeOutOfRange(-1));
        assert_eq!(patient(151).unwrap_err(), ValidationError::AgeOutOfRange(151));
    }

    #[test]
    fn admit_then_discharge_keeps_admit_date() {
        let mut p = patient(30).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        p.admit(day);
        assert_eq!(p.status(), PatientStatus::Admitted);
        assert_eq!(p.admit_date(), Some(day));

        p.discharge();
        assert_eq!(p.status(), PatientStatus::Discharged);
        assert_eq!(p.admit_date(), Some(day));
    }

    #[test]
    fn name_matching() {
        let p = patient(30).unwrap();
        assert!(p.matches_name("jane doe", true));
        assert!(!p.matches_name("jane", true));
        assert!(p.matches_name("DOE", false));
        assert!(!p.matches_name("smith", false));
    }

    #[test]
    fn failed_edit_changes_nothing() {
        let mut p = patient(30).unwrap();
        let before = p.clone();

        let edit = PatientEdit {
            name: Some("Janet Doe".into()),
            age: Some(200),
            ..PatientEdit::default()
        };

        assert_eq!(p.apply(edit).unwrap_err(), ValidationError::AgeOutOfRange(200));
        assert_eq!(p, before);
    }

    #[test]
    fn edit_preserves_status() {
        let mut p = patient(30).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        p.admit(day);

        p.apply(PatientEdit {
            address: Some(" 4 Low Rd ".into()),
            age: Some(31),
            ..PatientEdit::default()
        })
        .unwrap();

        assert_eq!(p.address(), "4 Low Rd");
        assert_eq!(p.age(), 31);
        assert_eq!(p.status(), PatientStatus::Admitted);
        assert_eq!(p.admit_date(), Some(day));
    }

    #[test]
    fn describe_and_csv_columns() {
        let mut p = patient(30).unwrap();
        p.admit(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());

        assert_eq!(
            p.describe(),
            "Patient[id=P001,name=Jane Doe,age=30,status=ADMITTED]"
        );
        assert_eq!(
            p.csv_fields(),
            [
                "P001",
                "Jane Doe",
                "02-01-1994",
                "30",
                "ADMITTED",
                "F",
                "9876543210",
                "12 High St",
                "asthma",
                "01-06-2024"
            ]
        );
        assert_eq!(p.csv_fields().len(), Patient::COLLECTION.header.len());
    }
}
