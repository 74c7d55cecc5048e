//! # HMS Core
//!
//! Core records logic for the hospital management system.
//!
//! This crate holds the entity model and the persistence rules:
//! - Patients, doctors, staff, user accounts, appointments and lab reports
//! - One generic [`RecordStore`] per entity type, backed by a binary snapshot and a CSV
//!   mirror in a single data directory
//! - Role-gated operations through the [`Hospital`] facade
//!
//! **No front-end concerns**: argument parsing, output formatting and logging setup
//! belong in `hms-cli`.

pub mod access;
pub mod accounts;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod dates;
pub mod error;
pub mod export;
pub mod hospital;
pub mod ids;
pub mod models;
pub mod store;
pub mod validation;

pub use access::{mask_contact, Permission, Role, Session};
pub use config::{data_dir_from_value, CoreConfig};
pub use error::{RecordError, RecordResult};
pub use hms_types::NonEmptyText;
pub use hospital::Hospital;
pub use models::{
    Appointment, Describe, Doctor, LabReport, Patient, PatientEdit, PatientStatus, Person,
    PersonFields, PersonRecord, Staff, User,
};
pub use store::{Record, RecordStore};
pub use validation::{ValidationError, ValidationResult};
