//! # Record Contract — Two Entry Points, Two Output Forms
//!
//! Every composite record implements [`Record`]: construction from a
//! named-field map or from a positional row (two explicit entry points, no
//! input-shape sniffing), a positional wire form that round-trips through
//! construction, and a write-only named storage form.
//!
//! Identity: records carrying an [`Identifier`] compare by it in
//! [`Record::equals`]; unkeyed records fall back to content equality.
//! Structural content equality is always available through `PartialEq`.

use serde_json::Value;

use campus_core::{Identifier, ValidationError};

use crate::schema::{FieldMap, RecordSchema};

/// A validated, serializable domain record.
pub trait Record: Sized + PartialEq {
    /// The record's name and positional column order.
    const SCHEMA: RecordSchema;

    /// Construct from the named-field shape, validating field by field in
    /// declaration order and stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns a single field-qualified [`ValidationError`]; no partially
    /// constructed record is ever observable.
    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError>;

    /// Construct from the positional wire row (re-mapped through
    /// [`Record::SCHEMA`], then validated like the named form).
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an over-wide row or any field
    /// failure.
    fn from_row(row: &[Value]) -> Result<Self, ValidationError> {
        let fields = Self::SCHEMA.fields_from_row(row)?;
        Self::from_fields(&fields)
    }

    /// The positional wire row in schema column order. Nested value-objects
    /// and records are reduced to their own canonical forms, so
    /// `from_row(&simplify(x))` reconstructs a content-equal record.
    fn simplify(&self) -> Vec<Value>;

    /// The named storage row: backing-column names, enumerations as labels,
    /// nested sequences as encoded blobs. Write-only — no symmetric
    /// constructor is guaranteed.
    fn to_storage(&self) -> FieldMap;

    /// The record's identifier, when it has one.
    fn identity(&self) -> Option<&Identifier> {
        None
    }

    /// Identifier equality when both sides are keyed, content equality
    /// otherwise.
    fn equals(&self, other: &Self) -> bool {
        match (self.identity(), other.identity()) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }
}

/// Decode a nested record from a wire value that may be either shape:
/// a positional row (array) or a named-field map (object).
///
/// Failures are qualified with the enclosing `field` path.
pub(crate) fn record_from_value<T: Record>(
    field: &str,
    value: &Value,
) -> Result<T, ValidationError> {
    match value {
        Value::Array(row) => T::from_row(row).map_err(|e| e.qualify(field)),
        Value::Object(map) => T::from_fields(map).map_err(|e| e.qualify(field)),
        _ => Err(ValidationError::new(field, "not an object nor an array")),
    }
}
