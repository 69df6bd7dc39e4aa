//! # Error Type — Field-Qualified Validation Failures
//!
//! The single error kind raised by every constructor and validator in the
//! workspace. A `ValidationError` names the offending field and a
//! human-readable reason; composite records re-wrap failures from nested
//! value-objects by prefixing the enclosing field name while preserving the
//! inner reason text.
//!
//! There is deliberately no "not found" or "internal" variant: construction
//! either succeeds with a fully-populated value or fails with exactly one
//! terminal message for the whole record (fail-fast, not fail-all).

use thiserror::Error;

/// A validation failure scoped to a single field.
///
/// `Display` renders `invalid <field>: <reason>`, so nesting via
/// [`ValidationError::wrap`] produces messages like
/// `invalid start: invalid timestamp: format not known/supported`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    field: String,
    reason: String,
}

impl ValidationError {
    /// Create a validation error for `field` with the given reason.
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Re-wrap a nested failure under an enclosing field name.
    ///
    /// The inner error's full message becomes the reason, so no detail from
    /// deeper layers is lost.
    pub fn wrap(field: impl Into<String>, inner: ValidationError) -> Self {
        Self {
            field: field.into(),
            reason: inner.to_string(),
        }
    }

    /// Prefix an outer path segment onto the field (`outer.inner`).
    ///
    /// Used when a record delegates to a nested record and the nested
    /// record's own field names should stay visible.
    #[must_use]
    pub fn qualify(mut self, outer: impl AsRef<str>) -> Self {
        self.field = format!("{}.{}", outer.as_ref(), self.field);
        self
    }

    /// Rewrite the field to a sequence element path (`field[index]`).
    #[must_use]
    pub fn at_index(self, field: impl AsRef<str>, index: usize) -> Self {
        self.qualify(format!("{}[{index}]", field.as_ref()))
    }

    /// The field path this error is scoped to.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The human-readable reason, without the field prefix.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_field_and_reason() {
        let err = ValidationError::new("weekday", "out of bounds");
        assert_eq!(err.to_string(), "invalid weekday: out of bounds");
    }

    #[test]
    fn test_wrap_preserves_inner_text() {
        let inner = ValidationError::new("timestamp", "format not known/supported");
        let outer = ValidationError::wrap("start", inner);
        assert_eq!(outer.field(), "start");
        assert_eq!(
            outer.to_string(),
            "invalid start: invalid timestamp: format not known/supported"
        );
    }

    #[test]
    fn test_qualify_builds_path() {
        let err = ValidationError::new("weekday", "not a number").qualify("lessons[2]");
        assert_eq!(err.field(), "lessons[2].weekday");
    }

    #[test]
    fn test_at_index() {
        let err = ValidationError::new("teacher", "not a valid string").at_index("lessons", 0);
        assert_eq!(err.field(), "lessons[0].teacher");
        assert_eq!(
            err.to_string(),
            "invalid lessons[0].teacher: not a valid string"
        );
    }
}
