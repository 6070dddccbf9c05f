//! Field checks for service inputs.

use crate::error::AppError;
use regex::Regex;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const PHONE_PATTERN: &str = r"^01[016789]-?\d{3,4}-?\d{4}$";

pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const RATING_MIN: i32 = 1;
pub const RATING_MAX: i32 = 5;

/// Implemented by every create/update input; called before the service touches the store.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

pub struct RequestValidator;

impl RequestValidator {
    /// Non-blank text of at most `max` characters.
    pub fn text(col: &str, value: &str, max: usize) -> Result<(), AppError> {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{} is required", col)));
        }
        if value.chars().count() > max {
            return Err(AppError::Validation(format!(
                "{} must be at most {} characters",
                col, max
            )));
        }
        Ok(())
    }

    pub fn optional_text(col: &str, value: Option<&str>, max: usize) -> Result<(), AppError> {
        match value {
            Some(v) => Self::text(col, v, max),
            None => Ok(()),
        }
    }

    pub fn email(col: &str, value: &str) -> Result<(), AppError> {
        Self::pattern(col, value, EMAIL_PATTERN, "must be a valid email")
    }

    pub fn phone(col: &str, value: &str) -> Result<(), AppError> {
        Self::pattern(col, value, PHONE_PATTERN, "must be a valid phone number")
    }

    pub fn password(col: &str, value: &str) -> Result<(), AppError> {
        if value.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(AppError::Validation(format!(
                "{} must be at least {} characters",
                col, PASSWORD_MIN_LENGTH
            )));
        }
        Ok(())
    }

    pub fn range(col: &str, value: i64, min: i64, max: i64) -> Result<(), AppError> {
        if value < min {
            return Err(AppError::Validation(format!("{} must be at least {}", col, min)));
        }
        if value > max {
            return Err(AppError::Validation(format!("{} must be at most {}", col, max)));
        }
        Ok(())
    }

    fn pattern(col: &str, value: &str, pattern: &str, what: &str) -> Result<(), AppError> {
        let re = Regex::new(pattern).map_err(|_| AppError::Validation(format!("invalid pattern for {}", col)))?;
        if !re.is_match(value) {
            return Err(AppError::Validation(format!("{} {}", col, what)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_and_phone_patterns() {
        assert!(RequestValidator::email("email", "reader@novel.io").is_ok());
        assert!(RequestValidator::email("email", "reader@novel").is_err());
        assert!(RequestValidator::email("email", "no at sign").is_err());
        assert!(RequestValidator::phone("phone", "010-1234-5678").is_ok());
        assert!(RequestValidator::phone("phone", "01012345678").is_ok());
        assert!(RequestValidator::phone("phone", "12345").is_err());
    }

    #[test]
    fn text_rejects_blank_and_long() {
        assert!(RequestValidator::text("title", "hello", 10).is_ok());
        assert!(RequestValidator::text("title", "   ", 10).is_err());
        assert!(RequestValidator::text("title", "hello world", 5).is_err());
        assert!(RequestValidator::optional_text("title", None, 5).is_ok());
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert!(RequestValidator::range("rating", 1, 1, 5).is_ok());
        assert!(RequestValidator::range("rating", 5, 1, 5).is_ok());
        let err = RequestValidator::range("rating", 6, 1, 5).unwrap_err();
        assert_eq!(err.to_string(), "validation: rating must be at most 5");
        assert!(RequestValidator::range("rating", 0, 1, 5).is_err());
    }

    #[test]
    fn password_needs_minimum_length() {
        assert!(RequestValidator::password("pwd", "short").is_err());
        assert!(RequestValidator::password("pwd", "long-enough").is_ok());
    }
}
