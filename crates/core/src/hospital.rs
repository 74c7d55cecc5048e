//! Hospital service facade.
//!
//! [`Hospital`] owns one [`RecordStore`] per entity type and is the single entry point
//! for the command-line front end. Every operation takes the caller's [`Session`] and
//! checks the matching [`Permission`] before touching a store.

use crate::access::{Permission, Session};
use crate::accounts;
use crate::config::CoreConfig;
use crate::error::{RecordError, RecordResult};
use crate::export::{default_export_path, export_patients};
use crate::models::{
    Appointment, Doctor, LabReport, Patient, PatientEdit, Person, PersonRecord, Staff, User,
};
use crate::store::{Record, RecordStore};
use chrono::{Local, NaiveDate};
use hms_files::DataDirectory;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The hospital's records, opened from one data directory.
#[derive(Debug)]
pub struct Hospital {
    cfg: Arc<CoreConfig>,
    files: DataDirectory,
    patients: RecordStore<Patient>,
    users: RecordStore<User>,
    doctors: RecordStore<Doctor>,
    staff: RecordStore<Staff>,
    appointments: RecordStore<Appointment>,
    lab_reports: RecordStore<LabReport>,
    load_warnings: Vec<RecordError>,
}

impl Hospital {
    /// Creates the data directory if needed and loads all six collections.
    ///
    /// A snapshot that cannot be read or decoded is moved aside and its collection starts
    /// empty; see [`Hospital::load_warnings`].
    ///
    /// # Errors
    ///
    /// Returns a `RecordError` if:
    /// - the data directory cannot be created or is not a directory
    /// - an unreadable snapshot cannot be moved aside
    pub fn open(cfg: Arc<CoreConfig>) -> RecordResult<Self> {
        let files = DataDirectory::open(cfg.data_dir()).map_err(|e| {
            tracing::error!(
                "failed to open data directory {}: {}",
                cfg.data_dir().display(),
                e
            );
            RecordError::DataDirectory(e)
        })?;

        let mut load_warnings = Vec::new();
        let hospital = Self {
            patients: open_store(&files, &mut load_warnings)?,
            users: open_store(&files, &mut load_warnings)?,
            doctors: open_store(&files, &mut load_warnings)?,
            staff: open_store(&files, &mut load_warnings)?,
            appointments: open_store(&files, &mut load_warnings)?,
            lab_reports: open_store(&files, &mut load_warnings)?,
            load_warnings,
            files,
            cfg,
        };

        tracing::info!("opened records in {}", hospital.data_dir().display());
        Ok(hospital)
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    /// Canonical path of the data directory.
    pub fn data_dir(&self) -> &Path {
        self.files.root()
    }

    /// Snapshots that were unreadable at [`Hospital::open`], one
    /// [`RecordError::Unreadable`] each.
    pub fn load_warnings(&self) -> &[RecordError] {
        &self.load_warnings
    }

    pub fn patients(&self) -> &RecordStore<Patient> {
        &self.patients
    }

    pub fn users(&self) -> &RecordStore<User> {
        &self.users
    }

    pub fn doctors(&self) -> &RecordStore<Doctor> {
        &self.doctors
    }

    pub fn staff(&self) -> &RecordStore<Staff> {
        &self.staff
    }

    pub fn appointments(&self) -> &RecordStore<Appointment> {
        &self.appointments
    }

    pub fn lab_reports(&self) -> &RecordStore<LabReport> {
        &self.lab_reports
    }

    /// Creates the default accounts if there are no users yet.
    pub fn seed_default_accounts(&self) -> RecordResult<bool> {
        accounts::seed_default_accounts(&self.users)
    }

    /// # Errors
    ///
    /// Returns [`RecordError::InvalidCredentials`] if no account matches.
    pub fn login(&self, username: &str, password: &str) -> RecordResult<Session> {
        let user = accounts::authenticate(&self.users, username, password)?;
        tracing::info!("{} logged in as {}", user.username(), user.role());
        Ok(Session::new(user))
    }

    // Patients

    pub fn list_patients(&self, session: &Session) -> RecordResult<Vec<Patient>> {
        session.require(Permission::ViewRecords)?;
        Ok(self.patients.all())
    }

    /// Looks a patient up by id, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NotFound`] if no patient has that id.
    pub fn find_patient(&self, session: &Session, id: &str) -> RecordResult<Patient> {
        session.require(Permission::ViewRecords)?;
        self.patient(id)
    }

    pub fn register_patient(&self, session: &Session, patient: Patient) -> RecordResult<Patient> {
        session.require(Permission::RegisterPatient)?;
        self.patients.add(patient.clone())?;
        tracing::info!("registered patient {}", patient.id());
        Ok(patient)
    }

    /// Applies `edit` to the patient with `id`.
    ///
    /// The edit is all-or-nothing: if any field fails validation the stored patient is
    /// unchanged. Status and admission date are never edited here.
    ///
    /// # Errors
    ///
    /// Returns `RecordError` if:
    /// - the session may not edit patients
    /// - no patient has that id
    /// - an edited field is invalid
    pub fn edit_patient(
        &self,
        session: &Session,
        id: &str,
        edit: PatientEdit,
    ) -> RecordResult<Patient> {
        session.require(Permission::EditPatient)?;
        let mut patient = self.patient(id)?;
        patient.apply(edit)?;
        self.replace_patient(patient)
    }

    /// Admits a patient today (local date).
    pub fn admit_patient(&self, session: &Session, id: &str) -> RecordResult<Patient> {
        self.admit_patient_on(session, id, Local::now().date_naive())
    }

    /// Admits a patient on `date`, whatever their current status.
    pub fn admit_patient_on(
        &self,
        session: &Session,
        id: &str,
        date: NaiveDate,
    ) -> RecordResult<Patient> {
        session.require(Permission::AdmitDischarge)?;
        let mut patient = self.patient(id)?;
        patient.admit(date);
        let patient = self.replace_patient(patient)?;
        tracing::info!("admitted patient {} on {}", patient.id(), date);
        Ok(patient)
    }

    /// Discharges a patient, keeping their admission date.
    pub fn discharge_patient(&self, session: &Session, id: &str) -> RecordResult<Patient> {
        session.require(Permission::AdmitDischarge)?;
        let mut patient = self.patient(id)?;
        patient.discharge();
        let patient = self.replace_patient(patient)?;
        tracing::info!("discharged patient {}", patient.id());
        Ok(patient)
    }

    /// Deletes every patient with `id`, returning how many were removed.
    ///
    /// An unknown id removes nothing and returns `Ok(0)`.
    pub fn delete_patient(&self, session: &Session, id: &str) -> RecordResult<usize> {
        session.require(Permission::DeletePatient)?;
        let removed = self.patients.delete(id)?;
        tracing::info!("deleted {} record(s) for patient {}", removed, id.trim());
        Ok(removed)
    }

    /// Patients whose name matches `query`, ignoring case.
    ///
    /// With `exact` the whole name must match; otherwise `query` may appear anywhere in it.
    pub fn search_patients(
        &self,
        session: &Session,
        query: &str,
        exact: bool,
    ) -> RecordResult<Vec<Patient>> {
        session.require(Permission::ViewRecords)?;
        Ok(self.patients.filter(|p| p.matches_name(query, exact)))
    }

    /// Writes every patient to a CSV report and returns where it went.
    ///
    /// Without `path` the report lands in the data directory as
    /// `patient_report_<unix-millis>.csv`.
    pub fn export_patients(
        &self,
        session: &Session,
        path: Option<PathBuf>,
    ) -> RecordResult<PathBuf> {
        session.require(Permission::ViewRecords)?;
        let path = path.unwrap_or_else(|| default_export_path(self.data_dir()));
        export_patients(&self.patients.all(), &path)?;
        Ok(path)
    }

    fn patient(&self, id: &str) -> RecordResult<Patient> {
        self.patients
            .find_by_id(id)
            .ok_or_else(|| RecordError::NotFound(id.trim().to_string()))
    }

    fn replace_patient(&self, patient: Patient) -> RecordResult<Patient> {
        if self.patients.update(patient.clone())? {
            Ok(patient)
        } else {
            Err(RecordError::NotFound(patient.id().to_string()))
        }
    }

    // Doctors and staff

    pub fn list_doctors(&self, session: &Session) -> RecordResult<Vec<Doctor>> {
        session.require(Permission::ViewRecords)?;
        Ok(self.doctors.all())
    }

    pub fn add_doctor(&self, session: &Session, doctor: Doctor) -> RecordResult<Doctor> {
        session.require(Permission::ManageDoctors)?;
        self.doctors.add(doctor.clone())?;
        tracing::info!("added doctor {}", doctor.id());
        Ok(doctor)
    }

    pub fn list_staff(&self, session: &Session) -> RecordResult<Vec<Staff>> {
        session.require(Permission::ViewRecords)?;
        Ok(self.staff.all())
    }

    pub fn add_staff(&self, session: &Session, staff: Staff) -> RecordResult<Staff> {
        session.require(Permission::ManageStaff)?;
        self.staff.add(staff.clone())?;
        tracing::info!("added staff member {}", staff.id());
        Ok(staff)
    }

    /// Every patient, doctor and staff member, in that order.
    pub fn directory(&self, session: &Session) -> RecordResult<Vec<Person>> {
        session.require(Permission::ViewRecords)?;

        let mut people: Vec<Person> = Vec::new();
        people.extend(self.patients.all().into_iter().map(Person::from));
        people.extend(self.doctors.all().into_iter().map(Person::from));
        people.extend(self.staff.all().into_iter().map(Person::from));
        Ok(people)
    }

    // Accounts

    pub fn list_users(&self, session: &Session) -> RecordResult<Vec<User>> {
        session.require(Permission::ManageUsers)?;
        Ok(self.users.all())
    }

    /// Adds an account. Usernames are not checked for uniqueness.
    pub fn add_user(&self, session: &Session, user: User) -> RecordResult<User> {
        session.require(Permission::ManageUsers)?;
        self.users.add(user.clone())?;
        tracing::info!("added {} account {}", user.role(), user.username());
        Ok(user)
    }

    // Appointments and lab reports

    pub fn list_appointments(&self, session: &Session) -> RecordResult<Vec<Appointment>> {
        session.require(Permission::ViewRecords)?;
        Ok(self.appointments.all())
    }

    /// Books an appointment. The patient and doctor ids are not checked.
    pub fn book_appointment(
        &self,
        session: &Session,
        appointment: Appointment,
    ) -> RecordResult<Appointment> {
        session.require(Permission::BookAppointment)?;
        self.appointments.add(appointment.clone())?;
        tracing::info!(
            "booked appointment {} for patient {}",
            appointment.id(),
            appointment.patient_id()
        );
        Ok(appointment)
    }

    pub fn list_lab_reports(&self, session: &Session) -> RecordResult<Vec<LabReport>> {
        session.require(Permission::ViewRecords)?;
        Ok(self.lab_reports.all())
    }

    pub fn add_lab_report(&self, session: &Session, report: LabReport) -> RecordResult<LabReport> {
        session.require(Permission::AddLabReport)?;
        self.lab_reports.add(report.clone())?;
        tracing::info!(
            "filed lab report {} for patient {}",
            report.id(),
            report.patient_id()
        );
        Ok(report)
    }
}

fn open_store<T: Record>(
    files: &DataDirectory,
    warnings: &mut Vec<RecordError>,
) -> RecordResult<RecordStore<T>> {
    let (store, warning) = RecordStore::open_recovering(files.clone())?;
    warnings.extend(warning);
    Ok(store)
}
