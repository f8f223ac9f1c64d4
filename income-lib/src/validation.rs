//! Request validation.
//!
//! Request bodies deserialize into structs of optional fields and are then checked with a
//! chain of [`Rules`]. Only the first failing rule is reported, so a client always gets a
//! single message back.

use crate::error::HandlerError;

/// Turns a raw request payload into the checked input of a service call.
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, HandlerError>;
}

#[derive(Debug, Default)]
#[must_use]
pub struct Rules {
    first_error: Option<String>,
}

impl Rules {
    pub fn new() -> Rules {
        Rules::default()
    }

    pub fn check(mut self, valid: bool, message: impl Into<String>) -> Rules {
        if self.first_error.is_none() && !valid {
            self.first_error = Some(message.into());
        }
        self
    }

    pub fn required<T>(self, value: &Option<T>, field: &str) -> Rules {
        self.check(value.is_some(), format!("{} is required", field))
    }

    /// Fails when the value is present but blank. Pair with [`Rules::required`] for
    /// mandatory strings.
    pub fn not_blank(self, value: Option<&str>, field: &str) -> Rules {
        let valid = value.map_or(true, |v| !v.trim().is_empty());
        self.check(valid, format!("{} must not be empty", field))
    }

    pub fn finish(self) -> Result<(), HandlerError> {
        match self.first_error {
            Some(message) => Err(HandlerError::Validation(message)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<(), HandlerError>) -> String {
        match result {
            Err(HandlerError::Validation(message)) => message,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_passes_when_all_rules_hold() {
        let name = Some("Salary".to_string());
        let result = Rules::new()
            .required(&name, "name")
            .not_blank(name.as_deref(), "name")
            .finish();
        assert!(result.is_ok());
    }

    #[test]
    fn test_reports_first_error_only() {
        let name: Option<String> = None;
        let value: Option<i32> = None;
        let result = Rules::new()
            .required(&name, "name")
            .required(&value, "value")
            .finish();
        assert_eq!(message(result), "name is required");
    }

    #[test]
    fn test_blank_string() {
        let result = Rules::new().not_blank(Some("   "), "tag").finish();
        assert_eq!(message(result), "tag must not be empty");
    }

    #[test]
    fn test_absent_value_is_not_blank() {
        assert!(Rules::new().not_blank(None, "tag").finish().is_ok());
    }
}
