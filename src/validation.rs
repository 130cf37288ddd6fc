use validator::ValidateEmail;

use crate::error::AppError;

/// Validates a profile key, which becomes an INI section header
pub fn validate_profile_key(key: &str) -> Result<(), AppError> {
    if key.is_empty() {
        Err(AppError::Validation("profile name cannot be empty".to_string()))
    } else if key.contains(['[', ']']) {
        Err(AppError::Validation("profile name cannot contain '[' or ']'".to_string()))
    } else if key.starts_with(['#', ';']) {
        Err(AppError::Validation("profile name cannot start with '#' or ';'".to_string()))
    } else if is_multiline(key) {
        Err(AppError::Validation("profile name must be a single line".to_string()))
    } else {
        Ok(())
    }
}

/// Validates the display name applied as user.name
pub fn validate_display_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() {
        Err(AppError::Validation("name cannot be empty".to_string()))
    } else if is_multiline(name) {
        Err(AppError::Validation("name must be a single line".to_string()))
    } else {
        Ok(())
    }
}

/// Validates the email applied as user.email
pub fn validate_email(email: &str) -> Result<(), AppError> {
    if email.is_empty() {
        Err(AppError::Validation("email cannot be empty".to_string()))
    } else if is_multiline(email) || !email.validate_email() {
        Err(AppError::Validation(format!("invalid email format: '{email}'")))
    } else {
        Ok(())
    }
}

fn is_multiline(value: &str) -> bool {
    value.contains(['\n', '\r'])
}
