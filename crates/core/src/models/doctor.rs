use crate::constants::{Collection, DOCTORS};
use crate::models::{Describe, PersonFields, PersonRecord};
use crate::store::Record;
use hms_types::optional_text;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    person: PersonFields,
    specialization: String,
    /// Free text, for example `Mon-Fri 09:00-15:00`.
    duty_timings: String,
}

impl Doctor {
    pub fn new(
        person: PersonFields,
        specialization: Option<&str>,
        duty_timings: Option<&str>,
    ) -> Self {
        Self {
            person,
            specialization: optional_text(specialization),
            duty_timings: optional_text(duty_timings),
        }
    }

    pub fn specialization(&self) -> &str {
        &self.specialization
    }

    pub fn duty_timings(&self) -> &str {
        &self.duty_timings
    }

    pub fn set_specialization(&mut self, specialization: Option<&str>) {
        self.specialization = optional_text(specialization);
    }

    pub fn set_duty_timings(&mut self, duty_timings: Option<&str>) {
        self.duty_timings = optional_text(duty_timings);
    }
}

impl PersonRecord for Doctor {
    fn person(&self) -> &PersonFields {
        &self.person
    }
}

impl Describe for Doctor {
    fn describe(&self) -> String {
        format!("Dr. {} ({})", self.name(), self.specialization)
    }
}

impl Record for Doctor {
    const COLLECTION: Collection = DOCTORS;

    fn record_id(&self) -> &str {
        self.person.id()
    }

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.id().to_string(),
            self.name().to_string(),
            self.specialization.clone(),
            self.duty_timings.clone(),
            self.contact().to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_columns_follow_header() {
        let mut doctor = Doctor::new(
            PersonFields::new("D7", "Meredith Grey", None, "555-0107").unwrap(),
            Some(" General Surgery "),
            None,
        );
        doctor.set_duty_timings(Some("Mon-Fri 09:00-15:00"));

        assert_eq!(doctor.specialization(), "General Surgery");
        assert_eq!(
            doctor.csv_fields(),
            [
                "D7",
                "Meredith Grey",
                "General Surgery",
                "Mon-Fri 09:00-15:00",
                "555-0107"
            ]
        );
    }
}
