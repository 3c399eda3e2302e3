//! Local form validation.
//!
//! Validation failures block submission in place; they never reach the
//! transport or synchronization layers.

use crate::error::ValidationError;

/// Minimum accepted password length.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// A required text field must contain something other than whitespace.
pub fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required { field })
    } else {
        Ok(())
    }
}

/// Minimal address-syntax check: one `@` separating a non-empty local part
/// from a domain with a dot, and no whitespace anywhere.
pub fn email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let valid = value
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.chars().any(char::is_whitespace)
                && value.matches('@').count() == 1
        });
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail { field })
    }
}

/// Optional email: absent or blank is fine, anything present must parse.
pub fn optional_email(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => email(field, v),
        _ => Ok(()),
    }
}

/// Passwords must be present and at least [`PASSWORD_MIN_LENGTH`] characters.
pub fn password(field: &'static str, value: &str) -> Result<(), ValidationError> {
    required(field, value)?;
    if value.chars().count() < PASSWORD_MIN_LENGTH {
        Err(ValidationError::TooShort {
            field,
            min: PASSWORD_MIN_LENGTH,
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank() {
        assert!(required("name", "Ana").is_ok());
        assert_eq!(
            required("name", "   "),
            Err(ValidationError::Required { field: "name" })
        );
    }

    #[test]
    fn email_syntax() {
        assert!(email("email", "ana@example.cl").is_ok());
        for bad in ["ana", "@example.cl", "ana@localhost", "ana@.cl", "a na@example.cl", "a@b@c.cl"] {
            assert!(email("email", bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn optional_email_allows_absence() {
        assert!(optional_email("email", None).is_ok());
        assert!(optional_email("email", Some("  ")).is_ok());
        assert!(optional_email("email", Some("nope")).is_err());
    }

    #[test]
    fn password_length() {
        assert!(password("password", "longenough").is_ok());
        assert_eq!(
            password("password", "short"),
            Err(ValidationError::TooShort {
                field: "password",
                min: PASSWORD_MIN_LENGTH
            })
        );
        assert_eq!(
            password("password", ""),
            Err(ValidationError::Required { field: "password" })
        );
    }
}
