//! Roles, permissions and the logged-in session.
//!
//! Every account carries exactly one [`Role`]. Operations that change records ask the
//! [`Session`] for a [`Permission`] first; read-only listings only need a session.
//!
//! | Permission        | Admin | Doctor | Nurse | Receptionist |
//! |-------------------|:-----:|:------:|:-----:|:------------:|
//! | ManageUsers       |   x   |        |       |              |
//! | ManageDoctors     |   x   |        |       |              |
//! | ManageStaff       |   x   |        |       |              |
//! | DeletePatient     |   x   |        |       |              |
//! | AdmitDischarge    |   x   |   x    |   x   |              |
//! | AddLabReport      |   x   |   x    |       |              |
//! | BookAppointment   |   x   |        |   x   |      x       |
//! | RegisterPatient   |   x   |   x    |   x   |      x       |
//! | EditPatient       |   x   |   x    |   x   |      x       |
//! | ViewRecords       |   x   |   x    |   x   |      x       |

use crate::error::{RecordError, RecordResult};
use crate::models::User;
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Account role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Doctor,
    Nurse,
    Receptionist,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Doctor, Role::Nurse, Role::Receptionist];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Doctor => "Doctor",
            Role::Nurse => "Nurse",
            Role::Receptionist => "Receptionist",
        }
    }

    /// Whether this role holds `permission`.
    pub fn allows(self, permission: Permission) -> bool {
        use Permission::*;

        match permission {
            ManageUsers | ManageDoctors | ManageStaff | DeletePatient => self == Role::Admin,
            AdmitDischarge => self != Role::Receptionist,
            AddLabReport => matches!(self, Role::Admin | Role::Doctor),
            BookAppointment => self != Role::Doctor,
            RegisterPatient | EditPatient | ViewRecords => true,
        }
    }

    /// Whether contacts are shown to this role unmasked.
    pub fn sees_full_contact(self) -> bool {
        matches!(self, Role::Admin | Role::Receptionist)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    /// Parses a role name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownRole(s.to_string()))
    }
}

/// An action gated by role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Permission {
    ManageUsers,
    ManageDoctors,
    ManageStaff,
    DeletePatient,
    AdmitDischarge,
    AddLabReport,
    BookAppointment,
    RegisterPatient,
    EditPatient,
    ViewRecords,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Permission::ManageUsers => "manage users",
            Permission::ManageDoctors => "manage doctors",
            Permission::ManageStaff => "manage staff",
            Permission::DeletePatient => "delete patients",
            Permission::AdmitDischarge => "admit or discharge patients",
            Permission::AddLabReport => "add lab reports",
            Permission::BookAppointment => "book appointments",
            Permission::RegisterPatient => "register patients",
            Permission::EditPatient => "edit patients",
            Permission::ViewRecords => "view records",
        };
        f.write_str(text)
    }
}

/// Masks a contact for roles that may not see it in full.
///
/// Short contacts (under six characters) are hidden entirely; longer ones keep their
/// first and last two characters.
pub fn mask_contact(contact: &str, role: Role) -> String {
    if role.sees_full_contact() {
        return contact.to_string();
    }

    let chars: Vec<char> = contact.chars().collect();
    if chars.len() < 6 {
        return "*****".to_string();
    }

    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{head}*****{tail}")
}

/// An authenticated user.
///
/// Obtained from [`Hospital::login`](crate::Hospital::login).
#[derive(Clone, Debug)]
pub struct Session {
    user: User,
}

impl Session {
    pub(crate) fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.user.role()
    }

    /// Fails with [`RecordError::PermissionDenied`] unless the session's role allows `permission`.
    pub fn require(&self, permission: Permission) -> RecordResult<()> {
        let role = self.role();
        if role.allows(permission) {
            Ok(())
        } else {
            Err(RecordError::PermissionDenied { role, permission })
        }
    }

    /// A contact as this session may see it.
    pub fn display_contact(&self, contact: &str) -> String {
        mask_contact(contact, self.role())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_roles_case_insensitively() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" RECEPTIONIST ".parse::<Role>().unwrap(), Role::Receptionist);
        assert_eq!(
            "WardBoy".parse::<Role>().unwrap_err(),
            ValidationError::UnknownRole("WardBoy".into())
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn only_admin_manages_accounts_and_deletes() {
        for role in Role::ALL {
            let expected = role == Role::Admin;
            assert_eq!(role.allows(Permission::ManageUsers), expected);
            assert_eq!(role.allows(Permission::ManageDoctors), expected);
            assert_eq!(role.allows(Permission::ManageStaff), expected);
            assert_eq!(role.allows(Permission::DeletePatient), expected);
        }
    }

    #[test]
    fn receptionist_cannot_admit_or_discharge() {
        assert!(!Role::Receptionist.allows(Permission::AdmitDischarge));
        assert!(Role::Nurse.allows(Permission::AdmitDischarge));
        assert!(Role::Doctor.allows(Permission::AdmitDischarge));
    }

    #[test]
    fn lab_reports_need_doctor_or_admin() {
        assert!(Role::Doctor.allows(Permission::AddLabReport));
        assert!(Role::Admin.allows(Permission::AddLabReport));
        assert!(!Role::Nurse.allows(Permission::AddLabReport));
        assert!(!Role::Receptionist.allows(Permission::AddLabReport));
    }

    #[test]
    fn doctors_do_not_book_appointments() {
        assert!(!Role::Doctor.allows(Permission::BookAppointment));
        assert!(Role::Receptionist.allows(Permission::BookAppointment));
    }

    #[test]
    fn everyone_registers_and_views() {
        for role in Role::ALL {
            assert!(role.allows(Permission::RegisterPatient));
            assert!(role.allows(Permission::EditPatient));
            assert!(role.allows(Permission::ViewRecords));
        }
    }

    #[test]
    fn masks_contact_for_clinical_roles() {
        assert_eq!(mask_contact("9876543210", Role::Nurse), "98*****10");
        assert_eq!(mask_contact("12345", Role::Doctor), "*****");
        assert_eq!(mask_contact("9876543210", Role::Admin), "9876543210");
        assert_eq!(mask_contact("9876543210", Role::Receptionist), "9876543210");
    }

    #[test]
    fn session_require_reports_role_and_permission() {
        let user = User::new("nurse", "nurse123", Role::Nurse).unwrap();
        let session = Session::new(user);

        assert!(session.require(Permission::AdmitDischarge).is_ok());
        let err = session.require(Permission::ManageUsers).unwrap_err();
        assert_eq!(err.to_string(), "Nurse is not permitted to manage users");
    }
}
