//! Record entities.
//!
//! Patients, doctors and staff share a [`PersonFields`] value rather than a base
//! class; [`Person`] is the sum over the three when code needs to treat them alike.
//! Users, appointments and lab reports stand alone.

mod appointment;
mod doctor;
mod lab_report;
mod patient;
mod person;
mod staff;
mod user;

pub use appointment::Appointment;
pub use doctor::Doctor;
pub use lab_report::LabReport;
pub use patient::{Patient, PatientEdit, PatientStatus};
pub use person::{Describe, Person, PersonFields, PersonRecord};
pub use staff::Staff;
pub use user::User;
