use serde::Deserialize;
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Registration form fields, checked before the credential table is touched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Reasons a registration is rejected before reaching the store.
/// The messages are shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("Please fill all fields")]
    MissingFields,

    #[error("Passwords don't match")]
    PasswordMismatch,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
}

impl RegistrationForm {
    /// Checks run in order; the first failure wins.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(RegistrationError::MissingFields);
        }
        if self.password != self.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(RegistrationError::PasswordTooShort);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str, password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            username: username.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert_eq!(form("alice", "secret1", "secret1").validate(), Ok(()));
    }

    #[test]
    fn test_empty_fields_rejected_first() {
        assert_eq!(
            form("", "x", "y").validate(),
            Err(RegistrationError::MissingFields)
        );
        assert_eq!(
            form("alice", "", "").validate(),
            Err(RegistrationError::MissingFields)
        );
    }

    #[test]
    fn test_mismatch_checked_before_length() {
        assert_eq!(
            form("alice", "abc", "abd").validate(),
            Err(RegistrationError::PasswordMismatch)
        );
    }

    #[test]
    fn test_short_password_rejected() {
        assert_eq!(
            form("alice", "abc12", "abc12").validate(),
            Err(RegistrationError::PasswordTooShort)
        );
        assert_eq!(form("alice", "abc123", "abc123").validate(), Ok(()));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert_eq!(
            form("alice", "ééé", "ééé").validate(),
            Err(RegistrationError::PasswordTooShort)
        );
    }

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            RegistrationError::PasswordMismatch.to_string(),
            "Passwords don't match"
        );
    }
}
