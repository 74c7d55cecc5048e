use crate::models::{Doctor, Patient, Staff};
use crate::validation::{required, ValidationResult};
use chrono::NaiveDate;
use hms_types::NonEmptyText;
use serde::{Deserialize, Serialize};

/// Identity fields common to patients, doctors and staff.
///
/// `id`, `name` and `contact` are required and stored trimmed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonFields {
    id: NonEmptyText,
    name: NonEmptyText,
    date_of_birth: Option<NaiveDate>,
    contact: NonEmptyText,
}

impl PersonFields {
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`](crate::ValidationError::MissingField)
    /// naming the first blank field among `id`, `name` and `contact`.
    pub fn new(
        id: &str,
        name: &str,
        date_of_birth: Option<NaiveDate>,
        contact: &str,
    ) -> ValidationResult<Self> {
        Ok(Self {
            id: required("id", id)?,
            name: required("name", name)?,
            date_of_birth,
            contact: required("contact", contact)?,
        })
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth
    }

    pub fn contact(&self) -> &str {
        self.contact.as_str()
    }

    pub fn set_name(&mut self, name: &str) -> ValidationResult<()> {
        self.name = required("name", name)?;
        Ok(())
    }

    pub fn set_contact(&mut self, contact: &str) -> ValidationResult<()> {
        self.contact = required("contact", contact)?;
        Ok(())
    }

    pub fn set_date_of_birth(&mut self, date_of_birth: Option<NaiveDate>) {
        self.date_of_birth = date_of_birth;
    }
}

/// Short human-readable summary of a record.
pub trait Describe {
    fn describe(&self) -> String;
}

/// Access to the shared identity fields of a person-like record.
pub trait PersonRecord {
    fn person(&self) -> &PersonFields;

    fn id(&self) -> &str {
        self.person().id()
    }

    fn name(&self) -> &str {
        self.person().name()
    }

    fn contact(&self) -> &str {
        self.person().contact()
    }

    fn date_of_birth(&self) -> Option<NaiveDate> {
        self.person().date_of_birth()
    }
}

/// Any person known to the hospital.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Person {
    Patient(Patient),
    Doctor(Doctor),
    Staff(Staff),
}

impl Person {
    /// Lower-case label of the variant, for listings.
    pub fn kind(&self) -> &'static str {
        match self {
            Person::Patient(_) => "patient",
            Person::Doctor(_) => "doctor",
            Person::Staff(_) => "staff",
        }
    }
}

impl PersonRecord for Person {
    fn person(&self) -> &PersonFields {
        match self {
            Person::Patient(p) => p.person(),
            Person::Doctor(d) => d.person(),
            Person::Staff(s) => s.person(),
        }
    }
}

impl Describe for Person {
    fn describe(&self) -> String {
        match self {
            Person::Patient(p) => p.describe(),
            Person::Doctor(d) => d.describe(),
            Person::Staff(s) => s.describe(),
        }
    }
}

impl From<Patient> for Person {
    fn from(value: Patient) -> Self {
        Person::Patient(value)
    }
}

impl From<Doctor> for Person {
    fn from(value: Doctor) -> Self {
        Person::Doctor(value)
    }
}

impl From<Staff> for Person {
    fn from(value: Staff) -> Self {
        Person::Staff(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    fn fields() -> PersonFields {
        PersonFields::new(" D001 ", " Gregory House ", None, " 555-0100 ").unwrap()
    }

    #[test]
    fn trims_required_fields() {
        let person = fields();
        assert_eq!(person.id(), "D001");
        assert_eq!(person.name(), "Gregory House");
        assert_eq!(person.contact(), "555-0100");
        assert_eq!(person.date_of_birth(), None);
    }

    #[test]
    fn each_required_field_is_named() {
        assert_eq!(
            PersonFields::new("", "Name", None, "c").unwrap_err(),
            ValidationError::MissingField("id")
        );
        assert_eq!(
            PersonFields::new("P1", "  ", None, "c").unwrap_err(),
            ValidationError::MissingField("name")
        );
        assert_eq!(
            PersonFields::new("P1", "Name", None, "\t").unwrap_err(),
            ValidationError::MissingField("contact")
        );
    }

    #[test]
    fn setters_validate_and_trim() {
        let mut person = fields();
        assert!(person.set_name(" ").is_err());
        assert_eq!(person.name(), "Gregory House");

        person.set_contact(" 555-0199 ").unwrap();
        assert_eq!(person.contact(), "555-0199");
    }

    #[test]
    fn describe_dispatches_per_variant() {
        let doctor = Doctor::new(fields(), Some("Diagnostics"), None);
        let staff = Staff::new(
            PersonFields::new("S1", "Carla", None, "555").unwrap(),
            Some("Nurse"),
            Some("Morning: 7-3"),
        );

        let people: Vec<Person> = vec![doctor.into(), staff.into()];
        let described: Vec<String> = people.iter().map(Describe::describe).collect();

        assert_eq!(described, ["Dr. Gregory House (Diagnostics)", "Carla - Nurse"]);
        assert_eq!(people[0].kind(), "doctor");
        assert_eq!(people[1].id(), "S1");
    }
}
