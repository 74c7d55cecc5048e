use crate::access::Role;
use crate::constants::{Collection, USERS};
use crate::credentials::{hash_password, verify_password};
use crate::store::Record;
use crate::validation::{required, ValidationResult};
use hms_types::NonEmptyText;
use serde::{Deserialize, Serialize};

/// A login account.
///
/// Only the password digest is kept. Usernames are looked up ignoring case but are not
/// required to be unique.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    username: NonEmptyText,
    password_hash: String,
    role: Role,
}

impl User {
    /// Creates an account from a plaintext password.
    pub fn new(username: &str, password: &str, role: Role) -> ValidationResult<Self> {
        Ok(Self {
            username: required("username", username)?,
            password_hash: hash_password(password),
            role,
        })
    }

    /// Creates an account from an existing digest.
    pub fn with_hash(username: &str, password_hash: &str, role: Role) -> ValidationResult<Self> {
        Ok(Self {
            username: required("username", username)?,
            password_hash: password_hash.to_string(),
            role,
        })
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn set_username(&mut self, username: &str) -> ValidationResult<()> {
        self.username = required("username", username)?;
        Ok(())
    }

    pub fn set_password(&mut self, password: &str) {
        self.password_hash = hash_password(password);
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub fn verify_password(&self, candidate: &str) -> bool {
        verify_password(&self.password_hash, candidate)
    }
}

impl Record for User {
    const COLLECTION: Collection = USERS;

    fn record_id(&self) -> &str {
        self.username.as_str()
    }

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.username().to_string(),
            self.role.to_string(),
            self.password_hash.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    #[test]
    fn stores_digest_not_plaintext() {
        let user = User::new(" admin ", "admin123", Role::Admin).unwrap();
        assert_eq!(user.username(), "admin");
        assert_ne!(user.password_hash(), "admin123");
        assert_eq!(user.password_hash().len(), 64);
        assert!(user.verify_password("admin123"));
        assert!(!user.verify_password("wrong"));
    }

    #[test]
    fn blank_username_is_rejected() {
        assert_eq!(
            User::new(" ", "pw", Role::Nurse).unwrap_err(),
            ValidationError::MissingField("username")
        );
    }

    #[test]
    fn password_change_rehashes() {
        let mut user = User::new("doc", "doc123", Role::Doctor).unwrap();
        user.set_password("n3w");
        assert!(!user.verify_password("doc123"));
        assert!(user.verify_password("n3w"));
    }

    #[test]
    fn with_hash_keeps_digest() {
        let digest = hash_password("recep123");
        let user = User::with_hash("recep", &digest, Role::Receptionist).unwrap();
        assert!(user.verify_password("recep123"));
        assert_eq!(user.csv_fields(), ["recep", "Receptionist", digest.as_str()]);
    }
}
