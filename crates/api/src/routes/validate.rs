//! Collects field violations from request DTOs.

use std::fmt::Display;

use crate::error::AppError;

/// Field violations gathered while building a domain value from a request.
#[derive(Debug, Default)]
pub struct Violations(Vec<String>);

impl Violations {
    /// Record a violation for `field`.
    pub fn push(&mut self, field: &str, message: impl Display) {
        self.0.push(format!("{field}: {message}"));
    }

    /// Require a value to be present.
    pub fn required<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.push(field, "must not be null");
        }
        value
    }

    /// Require a string to be present and not blank.
    pub fn not_blank(&mut self, field: &str, value: Option<String>) -> String {
        match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => {
                self.push(field, "must not be blank");
                String::new()
            }
        }
    }

    /// Parse a required string field.
    pub fn parse<T, E: Display>(
        &mut self,
        field: &str,
        value: Option<String>,
        parse: impl FnOnce(&str) -> Result<T, E>,
    ) -> Option<T> {
        let value = self.required(field, value)?;
        parse(&value).map_err(|e| self.push(field, e)).ok()
    }

    /// Finish validation, returning `value` only if nothing was violated.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` listing every violation.
    pub fn finish<T>(self, value: Option<T>) -> Result<T, AppError> {
        match value {
            Some(value) if self.0.is_empty() => Ok(value),
            _ if self.0.is_empty() => Err(AppError::validation("invalid input")),
            _ => Err(AppError::Validation(self.0)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_every_violation() {
        let mut v = Violations::default();
        let name = v.not_blank("firstName", Some("  ".to_string()));
        let age = v.parse("age", Some("x".to_string()), |s| s.parse::<u8>());
        let income: Option<u32> = v.required("income", None);

        assert!(name.is_empty());
        assert!(age.is_none() && income.is_none());

        let AppError::Validation(messages) = v.finish(Some(())).unwrap_err() else {
            panic!("expected validation error");
        };
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], "firstName: must not be blank");
        assert_eq!(messages[2], "income: must not be null");
    }

    #[test]
    fn test_finish_ok() {
        let mut v = Violations::default();
        let name = v.not_blank("firstName", Some("Ana".to_string()));
        assert_eq!(v.finish(Some(name)).unwrap(), "Ana");
    }
}
