use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::FullNameError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::PhoneNumberError;
use crate::user::errors::ValidationError;

/// User aggregate entity.
///
/// Represents a registered user. `password_hash` is an Argon2 PHC string and
/// `password_salt` the hex salt mixed into it; plaintext is never stored.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub full_name: FullName,
    pub phone_number: PhoneNumber,
    pub password_hash: String,
    pub password_salt: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub successful_logins: i64,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Full name value type
///
/// Ensures full name is 3-60 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 60;

    /// Create a new valid full name.
    ///
    /// # Errors
    /// * `ValidationError` - Shorter than 3 or longer than 60 characters
    pub fn new(full_name: String) -> Result<Self, ValidationError> {
        let length = full_name.chars().count();
        if length < Self::MIN_LENGTH || length > Self::MAX_LENGTH {
            return Err(ValidationError::from_violations(&[
                FullNameError::InvalidLength {
                    min: Self::MIN_LENGTH,
                    max: Self::MAX_LENGTH,
                },
            ]));
        }

        Ok(Self(full_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Phone number value type
///
/// Ensures phone number is 10-13 characters and starts with the Indonesian
/// country code `+62`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MIN_LENGTH: usize = 10;
    const MAX_LENGTH: usize = 13;
    const PREFIX: &'static str = "+62";

    /// Create a new valid phone number.
    ///
    /// Both rules are checked so every violation is reported.
    ///
    /// # Errors
    /// * `ValidationError` - Length out of range and/or missing `+62` prefix
    pub fn new(phone_number: String) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();

        let length = phone_number.chars().count();
        if length < Self::MIN_LENGTH || length > Self::MAX_LENGTH {
            violations.push(PhoneNumberError::InvalidLength {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
            });
        }
        if !phone_number.starts_with(Self::PREFIX) {
            violations.push(PhoneNumberError::MissingPrefix(Self::PREFIX));
        }

        if violations.is_empty() {
            Ok(Self(phone_number))
        } else {
            Err(ValidationError::from_violations(&violations))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password that satisfies the registration policy.
///
/// Debug output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;
    const MAX_LENGTH: usize = 64;

    /// Create a password checked against the registration policy.
    ///
    /// # Errors
    /// * `ValidationError` - Every violated rule: length 6-64, an uppercase
    ///   letter, a digit, a character that is neither alphanumeric nor whitespace
    pub fn new(password: String) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();

        let length = password.chars().count();
        if length < Self::MIN_LENGTH || length > Self::MAX_LENGTH {
            violations.push(PasswordPolicyError::InvalidLength {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
            });
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            violations.push(PasswordPolicyError::MissingUppercase);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            violations.push(PasswordPolicyError::MissingDigit);
        }
        if !password
            .chars()
            .any(|c| !c.is_ascii_alphanumeric() && !c.is_whitespace())
        {
            violations.push(PasswordPolicyError::MissingSpecialCharacter);
        }

        if violations.is_empty() {
            Ok(Self(password))
        } else {
            Err(ValidationError::from_violations(&violations))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub full_name: FullName,
    pub phone_number: PhoneNumber,
    pub password: Password,
}

impl RegisterUserCommand {
    /// Construct a new register user command.
    ///
    /// # Arguments
    /// * `full_name` - Validated full name
    /// * `phone_number` - Validated phone number
    /// * `password` - Plaintext password (will be salted and hashed by service)
    pub fn new(full_name: FullName, phone_number: PhoneNumber, password: Password) -> Self {
        Self {
            full_name,
            phone_number,
            password,
        }
    }
}

/// Command to log in with phone number and password.
///
/// Only non-emptiness is checked; an unknown or malformed phone number simply
/// matches no user.
#[derive(Debug)]
pub struct LoginCommand {
    pub phone_number: String,
    pub password: String,
}

/// Successful login: the identity and its freshly minted access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub user_id: UserId,
    pub token: String,
}

/// Row to insert for a new registration.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: FullName,
    pub phone_number: PhoneNumber,
    pub password_hash: String,
    pub password_salt: String,
}

/// Command to update a profile with optional validated fields.
///
/// Only provided fields will be updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProfileCommand {
    pub full_name: Option<FullName>,
    pub phone_number: Option<PhoneNumber>,
}

impl UpdateProfileCommand {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.phone_number.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_number_valid() {
        let phone = PhoneNumber::new("+628123456789".to_string()).unwrap();
        assert_eq!(phone.as_str(), "+628123456789");
    }

    #[test]
    fn test_phone_number_reports_all_rules() {
        let error = PhoneNumber::new("0812".to_string()).unwrap_err();
        assert_eq!(
            error.to_string(),
            "phone number must be between 10 and 13 characters, phone number must start with +62"
        );
    }

    #[test]
    fn test_phone_number_too_long() {
        let error = PhoneNumber::new("+6281234567890".to_string()).unwrap_err();
        assert_eq!(
            error.0,
            vec!["phone number must be between 10 and 13 characters".to_string()]
        );
    }

    #[test]
    fn test_full_name_bounds() {
        assert!(FullName::new("Jo".to_string()).is_err());
        assert!(FullName::new("Joe".to_string()).is_ok());
        assert!(FullName::new("a".repeat(60)).is_ok());
        assert!(FullName::new("a".repeat(61)).is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(Password::new("Password123!".to_string()).is_ok());

        let error = Password::new(String::new()).unwrap_err();
        assert_eq!(
            error.to_string(),
            "password must be between 6 and 64 characters, \
             password must contain at least one uppercase letter, \
             password must contain at least one number, \
             password must contain at least one special character"
        );
    }

    #[test]
    fn test_password_whitespace_is_not_special() {
        let error = Password::new("Password 123".to_string()).unwrap_err();
        assert_eq!(
            error.0,
            vec!["password must contain at least one special character".to_string()]
        );
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("Password123!".to_string()).unwrap();
        assert_eq!(format!("{:?}", password), "Password(***)");
    }

    #[test]
    fn test_update_profile_command_is_empty() {
        let command = UpdateProfileCommand {
            full_name: None,
            phone_number: None,
        };
        assert!(command.is_empty());
    }
}
