//! Account seeding and password login.

use crate::access::Role;
use crate::error::{RecordError, RecordResult};
use crate::models::User;
use crate::store::{Record, RecordStore};

/// Username, password and role of the accounts a fresh installation starts with.
pub const DEFAULT_ACCOUNTS: [(&str, &str, Role); 4] = [
    ("admin", "admin123", Role::Admin),
    ("doc", "doc123", Role::Doctor),
    ("nurse", "nurse123", Role::Nurse),
    ("recep", "recep123", Role::Receptionist),
];

/// Writes [`DEFAULT_ACCOUNTS`] when the user store is empty.
///
/// Returns `true` if the accounts were created. Runs once per process from the entry
/// point, never implicitly when a store is opened.
pub fn seed_default_accounts(users: &RecordStore<User>) -> RecordResult<bool> {
    let accounts = DEFAULT_ACCOUNTS
        .iter()
        .map(|(username, password, role)| User::new(username, password, *role))
        .collect::<Result<Vec<_>, _>>()?;

    let seeded = users.populate_if_empty(accounts)?;
    if seeded {
        tracing::info!("seeded {} default accounts", DEFAULT_ACCOUNTS.len());
    }
    Ok(seeded)
}

/// Finds the first user whose username matches (ignoring case) and whose password verifies.
///
/// # Errors
///
/// Returns [`RecordError::InvalidCredentials`] when no account matches. The message does
/// not say whether the username or the password was wrong.
pub fn authenticate(
    users: &RecordStore<User>,
    username: &str,
    password: &str,
) -> RecordResult<User> {
    users
        .filter(|u| u.matches_record_id(username))
        .into_iter()
        .find(|u| u.verify_password(password))
        .ok_or_else(|| {
            tracing::warn!("failed login for {}", username.trim());
            RecordError::InvalidCredentials
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hms_files::DataDirectory;
    use tempfile::TempDir;

    fn users(temp: &TempDir) -> RecordStore<User> {
        RecordStore::open(DataDirectory::open(temp.path()).unwrap()).unwrap()
    }

    #[test]
    fn seeds_only_into_empty_store() {
        let temp = TempDir::new().unwrap();
        let store = users(&temp);

        assert!(seed_default_accounts(&store).unwrap());
        assert!(!seed_default_accounts(&store).unwrap());
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn seeding_survives_reopen_without_duplicating() {
        let temp = TempDir::new().unwrap();
        seed_default_accounts(&users(&temp)).unwrap();

        let reopened = users(&temp);
        assert!(!seed_default_accounts(&reopened).unwrap());
        assert_eq!(reopened.len(), 4);
    }

    #[test]
    fn existing_accounts_block_seeding() {
        let temp = TempDir::new().unwrap();
        let store = users(&temp);
        store
            .add(User::new("chief", "s3cret", Role::Admin).unwrap())
            .unwrap();

        assert!(!seed_default_accounts(&store).unwrap());
        assert!(authenticate(&store, "admin", "admin123").is_err());
    }

    #[test]
    fn seeded_accounts_log_in_with_their_roles() {
        let temp = TempDir::new().unwrap();
        let store = users(&temp);
        seed_default_accounts(&store).unwrap();

        for (username, password, role) in DEFAULT_ACCOUNTS {
            let user = authenticate(&store, username, password).unwrap();
            assert_eq!(user.role(), role);
        }
    }

    #[test]
    fn username_is_case_insensitive_password_is_not() {
        let temp = TempDir::new().unwrap();
        let store = users(&temp);
        seed_default_accounts(&store).unwrap();

        assert!(authenticate(&store, " ADMIN ", "admin123").is_ok());
        assert!(matches!(
            authenticate(&store, "admin", "ADMIN123"),
            Err(RecordError::InvalidCredentials)
        ));
        assert!(matches!(
            authenticate(&store, "ghost", "admin123"),
            Err(RecordError::InvalidCredentials)
        ));
    }

    #[test]
    fn duplicate_usernames_try_each_password() {
        let temp = TempDir::new().unwrap();
        let store = users(&temp);
        store.add(User::new("sam", "first", Role::Nurse).unwrap()).unwrap();
        store.add(User::new("Sam", "second", Role::Doctor).unwrap()).unwrap();

        assert_eq!(authenticate(&store, "sam", "first").unwrap().role(), Role::Nurse);
        assert_eq!(authenticate(&store, "sam", "second").unwrap().role(), Role::Doctor);
    }
}
