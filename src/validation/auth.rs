use garde::Validate;

use crate::error::{ApiError, ApiResult};
use crate::validation::fields::{FieldValidation, is_filled};

const PASSWORD_SYMBOLS: &str = "-#!$@£%^&*()_+|~=`{}[]:\";'<>?,./\\ ";

#[derive(Validate)]
struct EmailInput {
    #[garde(email)]
    email: String,
}

pub fn is_email(email: &str) -> bool {
    EmailInput {
        email: email.to_string(),
    }
    .validate()
    .is_ok()
}

pub fn email_validator(email: &str) -> FieldValidation {
    FieldValidation::new("emailClasses", is_email(email))
}

pub fn name_validator(name: &str) -> FieldValidation {
    FieldValidation::new("nameClasses", is_filled(name))
}

/// At least 8 characters with an ASCII lowercase letter, an ASCII uppercase
/// letter, a digit and a symbol.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

pub fn password_validator(password: &str) -> FieldValidation {
    FieldValidation::new("passwordClasses", is_strong_password(password))
}

pub fn match_validator(first: &str, second: &str) -> FieldValidation {
    FieldValidation::new("matchClasses", first == second)
}

/// Validates a password before it is sent to the backend.
///
/// # Arguments
///
/// * `password` - The new password.
///
/// # Returns
///
/// `ApiError::Validation` if the password is not strong enough.
pub fn validate_password(password: &str) -> ApiResult<()> {
    if !is_strong_password(password) {
        return Err(ApiError::Validation(
            "Password must be at least 8 characters long and contain a lowercase letter, an uppercase letter, a number and a symbol"
                .to_string(),
        ));
    }

    Ok(())
}

/// Validates the username (an email address) of an auth flow.
pub fn validate_username(username: &str) -> ApiResult<()> {
    if !is_email(username) {
        return Err(ApiError::Validation(
            "Username must be a valid email address".to_string(),
        ));
    }

    Ok(())
}
