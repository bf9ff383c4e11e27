use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Error during file I/O operations
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Error during JSON serialization or deserialization
    #[error("json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    /// Error when user input fails.
    #[error("inquire error: {0}")]
    Inquire(#[from] inquire::InquireError),
    /// Edit-only transition called while viewing
    #[error("profile is not being edited")]
    NotEditing,
    /// Edit requested while an edit is already open
    #[error("profile is already being edited")]
    AlreadyEditing,
    /// Picture bytes are not a recognised image
    #[error("unsupported image: {0}")]
    UnsupportedImage(String),
    /// Seed profile fails validation
    #[error("invalid seed profile: {0}")]
    InvalidSeed(String),
    /// Field value fails validation
    #[error("{0}")]
    Field(#[from] FieldValidationError),
    /// Field name not known to the profile
    #[error("unknown profile field: '{0}'")]
    UnknownField(String),
}

/// Validation failure for a single profile field.
///
/// The display strings are shown verbatim next to the offending field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldValidationError {
    /// Blank or whitespace-only value, carries the field label
    #[error("{0} is required.")]
    Required(&'static str),
    #[error("Name cannot start with a space.")]
    NameStartsWithSpace,
    #[error("Name cannot contain only numbers.")]
    NameOnlyNumbers,
    #[error("Invalid email address.")]
    InvalidEmail,
    #[error("Phone number must be exactly 10 digits.")]
    InvalidPhone,
}
