use crate::constants::{Collection, STAFF};
use crate::models::{Describe, PersonFields, PersonRecord};
use crate::store::Record;
use hms_types::optional_text;
use serde::{Deserialize, Serialize};

/// A non-physician staff member.
///
/// `role` is the job title (Nurse, WardBoy, ...), unrelated to account roles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    person: PersonFields,
    role: String,
    shift_schedule: String,
}

impl Staff {
    pub fn new(person: PersonFields, role: Option<&str>, shift_schedule: Option<&str>) -> Self {
        Self {
            person,
            role: optional_text(role),
            shift_schedule: optional_text(shift_schedule),
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn shift_schedule(&self) -> &str {
        &self.shift_schedule
    }

    pub fn set_role(&mut self, role: Option<&str>) {
        self.role = optional_text(role);
    }

    pub fn set_shift_schedule(&mut self, shift_schedule: Option<&str>) {
        self.shift_schedule = optional_text(shift_schedule);
    }
}

impl PersonRecord for Staff {
    fn person(&self) -> &PersonFields {
        &self.person
    }
}

impl Describe for Staff {
    fn describe(&self) -> String {
        format!("{} - {}", self.name(), self.role)
    }
}

impl Record for Staff {
    const COLLECTION: Collection = STAFF;

    fn record_id(&self) -> &str {
        self.person.id()
    }

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.id().to_string(),
            self.name().to_string(),
            self.role.clone(),
            self.shift_schedule.clone(),
            self.contact().to_string(),
        ]
    }
}
