//! User validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Username exceeds maximum length of {0} characters")]
    UsernameTooLong(usize),

    #[error("Username is too short. Minimum length is {0} characters")]
    UsernameTooShort(usize),

    #[error("Username contains invalid character: '{0}'. Only alphanumeric characters, underscores, and hyphens are allowed")]
    InvalidUsernameCharacter(char),

    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email exceeds maximum length of {0} characters")]
    EmailTooLong(usize),

    #[error("Email '{0}' is not a valid address")]
    InvalidEmail(String),

    #[error("Phone number must be between {0} and {1} characters")]
    PhoneNumberLength(usize, usize),

    #[error("Phone number contains invalid character: '{0}'")]
    InvalidPhoneNumberCharacter(char),

    #[error("Phone number must contain at least one digit")]
    PhoneNumberWithoutDigits,

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),
}

const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 50;
const MAX_EMAIL_LENGTH: usize = 254;
const MIN_PHONE_NUMBER_LENGTH: usize = 3;
const MAX_PHONE_NUMBER_LENGTH: usize = 32;
const MAX_PASSWORD_LENGTH: usize = 128;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Validate a username
///
/// Rules:
/// - Cannot be empty
/// - Minimum 3 characters
/// - Maximum 50 characters
/// - Only alphanumeric characters, underscores, and hyphens
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if username.is_empty() {
        return Err(UserValidationError::EmptyUsername);
    }

    if username.len() < MIN_USERNAME_LENGTH {
        return Err(UserValidationError::UsernameTooShort(MIN_USERNAME_LENGTH));
    }

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(UserValidationError::UsernameTooLong(MAX_USERNAME_LENGTH));
    }

    for c in username.chars() {
        if !c.is_ascii_alphanumeric() && c != '_' && c != '-' {
            return Err(UserValidationError::InvalidUsernameCharacter(c));
        }
    }

    Ok(())
}

/// Trim and lower-case an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate an already normalized email address
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(UserValidationError::EmailTooLong(MAX_EMAIL_LENGTH));
    }

    if !EMAIL_PATTERN.is_match(email) {
        return Err(UserValidationError::InvalidEmail(email.to_string()));
    }

    Ok(())
}

/// Trim a phone number; blank input means "no phone number"
pub fn normalize_phone_number(phone_number: Option<&str>) -> Option<String> {
    phone_number
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
}

/// Validate a phone number
///
/// Digits plus the usual separators are accepted; formatting is not normalized further.
pub fn validate_phone_number(phone_number: &str) -> Result<(), UserValidationError> {
    if phone_number.len() < MIN_PHONE_NUMBER_LENGTH || phone_number.len() > MAX_PHONE_NUMBER_LENGTH {
        return Err(UserValidationError::PhoneNumberLength(
            MIN_PHONE_NUMBER_LENGTH,
            MAX_PHONE_NUMBER_LENGTH,
        ));
    }

    for c in phone_number.chars() {
        if !c.is_ascii_digit() && !matches!(c, '+' | '-' | ' ' | '(' | ')' | '.') {
            return Err(UserValidationError::InvalidPhoneNumberCharacter(c));
        }
    }

    if !phone_number.chars().any(|c| c.is_ascii_digit()) {
        return Err(UserValidationError::PhoneNumberWithoutDigits);
    }

    Ok(())
}

/// Validate a password against the configured minimum length
pub fn validate_password(password: &str, min_length: usize) -> Result<(), UserValidationError> {
    let length = password.chars().count();

    if length < min_length {
        return Err(UserValidationError::PasswordTooShort(min_length));
    }

    if length > MAX_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("user_name").is_ok());
        assert!(validate_username("user-name").is_ok());
        assert!(validate_username("User123").is_ok());
    }

    #[test]
    fn test_username_errors() {
        assert_eq!(validate_username(""), Err(UserValidationError::EmptyUsername));
        assert_eq!(
            validate_username("ab"),
            Err(UserValidationError::UsernameTooShort(3))
        );
        assert_eq!(
            validate_username(&"a".repeat(51)),
            Err(UserValidationError::UsernameTooLong(50))
        );
        assert_eq!(
            validate_username("user@name"),
            Err(UserValidationError::InvalidUsernameCharacter('@'))
        );
    }

    #[test]
    fn test_email_normalization_and_validation() {
        let email = normalize_email("  Alice@Example.COM ");
        assert_eq!(email, "alice@example.com");
        assert!(validate_email(&email).is_ok());

        assert_eq!(validate_email(""), Err(UserValidationError::EmptyEmail));
        assert!(matches!(
            validate_email("not-an-email"),
            Err(UserValidationError::InvalidEmail(_))
        ));
        assert!(validate_email("a b@x.com").is_err());
    }

    #[test]
    fn test_phone_number_normalization() {
        assert_eq!(normalize_phone_number(None), None);
        assert_eq!(normalize_phone_number(Some("   ")), None);
        assert_eq!(
            normalize_phone_number(Some(" +1 555 0100 ")),
            Some("+1 555 0100".to_string())
        );
    }

    #[test]
    fn test_phone_number_validation() {
        assert!(validate_phone_number("+1 (555) 010-0100").is_ok());
        assert_eq!(
            validate_phone_number("12"),
            Err(UserValidationError::PhoneNumberLength(3, 32))
        );
        assert_eq!(
            validate_phone_number("555-CALL"),
            Err(UserValidationError::InvalidPhoneNumberCharacter('C'))
        );
        assert_eq!(
            validate_phone_number("+-()"),
            Err(UserValidationError::PhoneNumberWithoutDigits)
        );
    }

    #[test]
    fn test_password_length_bounds() {
        assert!(validate_password("secret1", 6).is_ok());
        assert_eq!(
            validate_password("short", 6),
            Err(UserValidationError::PasswordTooShort(6))
        );
        assert_eq!(
            validate_password(&"a".repeat(129), 6),
            Err(UserValidationError::PasswordTooLong(128))
        );
    }
}
