use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    error::{AppError, FieldValidationError},
    profile::{Profile, ProfileField, VALIDATED_FIELDS},
};

/// `local@domain.tld` with no whitespace or extra `@` in any part
pub static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex should compile"));

/// Exactly ten ASCII digits
pub static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("phone regex should compile"));

/// One or more ASCII digits and nothing else
pub static DIGITS_ONLY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("digits regex should compile"));

/// Validates a single field value, first failing rule wins
///
/// # Arguments
/// * `field` - Field the value belongs to
/// * `value` - Value exactly as stored in the draft
pub fn validate(field: ProfileField, value: &str) -> Result<(), FieldValidationError> {
    if trim_blank(value).is_empty() {
        return Err(FieldValidationError::Required(field.label()));
    }

    match field {
        ProfileField::Name => {
            if value.starts_with(' ') {
                Err(FieldValidationError::NameStartsWithSpace)
            } else if DIGITS_ONLY_PATTERN.is_match(value) {
                Err(FieldValidationError::NameOnlyNumbers)
            } else {
                Ok(())
            }
        }
        ProfileField::Email if !EMAIL_PATTERN.is_match(value) => {
            Err(FieldValidationError::InvalidEmail)
        }
        ProfileField::Phone if !PHONE_PATTERN.is_match(value) => {
            Err(FieldValidationError::InvalidPhone)
        }
        _ => Ok(()),
    }
}

/// Validates every submit-checked field of a profile
///
/// Returns the failures in display order; empty when the profile is valid.
pub fn validate_profile(profile: &Profile) -> Vec<(ProfileField, FieldValidationError)> {
    VALIDATED_FIELDS
        .iter()
        .filter_map(|&field| validate(field, profile.get(field)).err().map(|e| (field, e)))
        .collect()
}

/// Whether `c` counts as blank when trimming input, byte order mark included
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Trims blank characters from both ends
pub fn trim_blank(value: &str) -> &str {
    value.trim_matches(is_blank)
}

/// Trims blank characters from the start only
pub fn trim_start_blank(value: &str) -> &str {
    value.trim_start_matches(is_blank)
}

/// Checks a value for a field named on the command line
///
/// # Arguments
/// * `field` - Field key (name, email, phone, profilePicture)
/// * `value` - Value to check
pub fn check_value(field: &str, value: &str) -> Result<ProfileField, AppError> {
    let field: ProfileField = field.parse()?;
    validate(field, value)?;
    Ok(field)
}

/// Whether a raw phone input contains anything other than digits
pub fn has_non_digit(value: &str) -> bool {
    value.chars().any(|c| !c.is_ascii_digit())
}
