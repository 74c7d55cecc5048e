//! Validated text primitives shared by the hospital record crates.
//!
//! Every identity field in the record model (ids, names, contacts, usernames) must be
//! present and is stored trimmed. Free-text fields are optional and collapse to the
//! empty string when absent. These two rules live here so that entity constructors
//! and setters apply them identically.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Compares two keys ignoring letter case and surrounding whitespace.
///
/// Record lookups by id and username follow this rule everywhere.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Trims an optional free-text value, substituting the empty string when absent.
pub fn optional_text(input: Option<&str>) -> String {
    input.map(|s| s.trim().to_owned()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let text = NonEmptyText::new("  Jane Doe \n").unwrap();
        assert_eq!(text.as_str(), "Jane Doe");
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(NonEmptyText::new(""), Err(TextError::Empty));
        assert_eq!(NonEmptyText::new(" \t "), Err(TextError::Empty));
    }

    #[test]
    fn trimming_is_idempotent() {
        let once = NonEmptyText::new(" P001 ").unwrap();
        let twice = NonEmptyText::new(once.as_str()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn compares_ignoring_case() {
        assert!(eq_ignore_case("P001", "p001"));
        assert!(eq_ignore_case("P001", " P001 "));
        assert!(!eq_ignore_case("P001", "P002"));
    }

    #[test]
    fn optional_text_defaults_to_empty() {
        assert_eq!(optional_text(None), "");
        assert_eq!(optional_text(Some("  ward 3 ")), "ward 3");
    }

    #[test]
    fn deserialize_rejects_blank() {
        let ok: NonEmptyText = serde_json::from_str("\" admin \"").unwrap();
        assert_eq!(ok.as_str(), "admin");
        assert!(serde_json::from_str::<NonEmptyText>("\"   \"").is_err());
    }
}
