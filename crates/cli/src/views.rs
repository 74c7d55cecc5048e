//! Listing output.
//!
//! Each record type has a flat view with contacts already masked for the viewing
//! session. Views print either as one line per record or as a JSON array.

use hms_core::dates::{format_date, format_date_time};
use hms_core::{
    Appointment, Describe, Doctor, LabReport, Patient, Person, PersonRecord, Session, Staff,
    User,
};
use serde::Serialize;
use std::fmt;

#[derive(Serialize)]
pub struct PatientView {
    id: String,
    name: String,
    dob: String,
    age: u8,
    status: String,
    gender: String,
    contact: String,
    address: String,
    medical_history: String,
    admit_date: String,
}

impl PatientView {
    pub fn new(session: &Session, p: &Patient) -> Self {
        Self {
            id: p.id().to_string(),
            name: p.name().to_string(),
            dob: format_date(p.date_of_birth()),
            age: p.age(),
            status: p.status().to_string(),
            gender: p.gender().to_string(),
            contact: session.display_contact(p.contact()),
            address: p.address().to_string(),
            medical_history: p.medical_history().to_string(),
            admit_date: format_date(p.admit_date()),
        }
    }
}

impl fmt::Display for PatientView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Age: {}, Status: {}, Contact: {}",
            self.id, self.name, self.age, self.status, self.contact
        )?;
        if !self.admit_date.is_empty() {
            write!(f, ", Admitted: {}", self.admit_date)?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
pub struct DoctorView {
    id: String,
    name: String,
    specialization: String,
    duty_timings: String,
    contact: String,
}

impl DoctorView {
    pub fn new(session: &Session, d: &Doctor) -> Self {
        Self {
            id: d.id().to_string(),
            name: d.name().to_string(),
            specialization: d.specialization().to_string(),
            duty_timings: d.duty_timings().to_string(),
            contact: session.display_contact(d.contact()),
        }
    }
}

impl fmt::Display for DoctorView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Specialization: {}, Duty: {}, Contact: {}",
            self.id, self.name, self.specialization, self.duty_timings, self.contact
        )
    }
}

#[derive(Serialize)]
pub struct StaffView {
    id: String,
    name: String,
    role: String,
    shift_schedule: String,
    contact: String,
}

impl StaffView {
    pub fn new(session: &Session, s: &Staff) -> Self {
        Self {
            id: s.id().to_string(),
            name: s.name().to_string(),
            role: s.role().to_string(),
            shift_schedule: s.shift_schedule().to_string(),
            contact: session.display_contact(s.contact()),
        }
    }
}

impl fmt::Display for StaffView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Role: {}, Shift: {}, Contact: {}",
            self.id, self.name, self.role, self.shift_schedule, self.contact
        )
    }
}

#[derive(Serialize)]
pub struct AppointmentView {
    id: String,
    patient_id: String,
    doctor_id: String,
    datetime: String,
    reason: String,
    status: String,
}

impl From<&Appointment> for AppointmentView {
    fn from(a: &Appointment) -> Self {
        Self {
            id: a.id().to_string(),
            patient_id: a.patient_id().to_string(),
            doctor_id: a.doctor_id().to_string(),
            datetime: format_date_time(a.date_time()),
            reason: a.reason().to_string(),
            status: a.status().to_string(),
        }
    }
}

impl fmt::Display for AppointmentView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Patient: {}, Doctor: {}, When: {}, Status: {}",
            self.id, self.patient_id, self.doctor_id, self.datetime, self.status
        )?;
        if !self.reason.is_empty() {
            write!(f, ", Reason: {}", self.reason)?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
pub struct LabReportView {
    id: String,
    patient_id: String,
    doctor_id: String,
    date: String,
    test_name: String,
    result: String,
    notes: String,
}

impl From<&LabReport> for LabReportView {
    fn from(r: &LabReport) -> Self {
        Self {
            id: r.id().to_string(),
            patient_id: r.patient_id().to_string(),
            doctor_id: r.doctor_id().to_string(),
            date: format_date(Some(r.date())),
            test_name: r.test_name().to_string(),
            result: r.result().to_string(),
            notes: r.notes().to_string(),
        }
    }
}

impl fmt::Display for LabReportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Patient: {}, Doctor: {}, Date: {}, Test: {}, Result: {}",
            self.id, self.patient_id, self.doctor_id, self.date, self.test_name, self.result
        )
    }
}

/// Accounts are listed without their password digests.
#[derive(Serialize)]
pub struct UserView {
    username: String,
    role: String,
}

impl From<&User> for UserView {
    fn from(u: &User) -> Self {
        Self {
            username: u.username().to_string(),
            role: u.role().to_string(),
        }
    }
}

impl fmt::Display for UserView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Username: {}, Role: {}", self.username, self.role)
    }
}

#[derive(Serialize)]
pub struct PersonView {
    kind: &'static str,
    id: String,
    name: String,
    contact: String,
    summary: String,
}

impl PersonView {
    pub fn new(session: &Session, p: &Person) -> Self {
        Self {
            kind: p.kind(),
            id: p.id().to_string(),
            name: p.name().to_string(),
            contact: session.display_contact(p.contact()),
            summary: p.describe(),
        }
    }
}

impl fmt::Display for PersonView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.summary)
    }
}

/// Prints `rows` as a JSON array, or one line each with `empty` when there are none.
pub fn print_rows<T>(rows: &[T], json: bool, empty: &str) -> anyhow::Result<()>
where
    T: Serialize + fmt::Display,
{
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
    } else if rows.is_empty() {
        println!("{empty}");
    } else {
        for row in rows {
            println!("{row}");
        }
    }
    Ok(())
}

/// Prints a single record, as JSON or on one line.
pub fn print_one<T>(row: &T, json: bool) -> anyhow::Result<()>
where
    T: Serialize + fmt::Display,
{
    if json {
        println!("{}", serde_json::to_string_pretty(row)?);
    } else {
        println!("{row}");
    }
    Ok(())
}
