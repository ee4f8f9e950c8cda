use thiserror::Error;

/// Error for FullName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FullNameError {
    #[error("full name must be between {min} and {max} characters")]
    InvalidLength { min: usize, max: usize },
}

/// Error for PhoneNumber validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhoneNumberError {
    #[error("phone number must be between {min} and {max} characters")]
    InvalidLength { min: usize, max: usize },

    #[error("phone number must start with {0}")]
    MissingPrefix(&'static str),
}

/// Error for password policy violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("password must be between {min} and {max} characters")]
    InvalidLength { min: usize, max: usize },

    #[error("password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("password must contain at least one number")]
    MissingDigit,

    #[error("password must contain at least one special character")]
    MissingSpecialCharacter,
}

/// Every input rule a request broke, in the order they were checked.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}", .0.join(", "))]
pub struct ValidationError(pub Vec<String>);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(vec![message.into()])
    }

    pub fn from_violations<E: ToString>(violations: &[E]) -> Self {
        Self(violations.iter().map(ToString::to_string).collect())
    }

    /// Merge the failures of several independently validated fields.
    ///
    /// # Returns
    /// None when no field failed
    pub fn collect<I>(results: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<ValidationError>>,
    {
        let violations: Vec<String> = results.into_iter().flatten().flat_map(|e| e.0).collect();

        if violations.is_empty() {
            None
        } else {
            Some(Self(violations))
        }
    }
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Input validation errors
    #[error("{0}")]
    Validation(#[from] ValidationError),

    // Domain-level errors
    #[error("user not registered")]
    NotFound,

    #[error("phone number already registered")]
    PhoneNumberAlreadyExists(String),

    #[error("wrong password")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::JwtError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
