//! # Schema — Column Orders and the Generic Field Reader
//!
//! Every record type declares one [`RecordSchema`]: its name and the stable
//! positional column order shared by the wire form and the array-mode
//! constructor. A positional row is first re-mapped to a named [`FieldMap`]
//! and then validated field by field through [`Fields`] — the single
//! generic validation routine used by every record.
//!
//! All getters coerce compatible representations (numeric `0`/`1` to
//! booleans, delimited strings to lists, untrimmed strings to trimmed
//! strings, canonical strings to value-objects), enforce presence and range
//! rules, and scope every failure to the field name. Validation is
//! fail-fast: record constructors read fields in declaration order and stop
//! at the first failure, so either a fully-populated record exists or no
//! instance at all.

use serde_json::Value;

use campus_core::{
    ClassDiscriminator, Identifier, IntervalExpression, LessonDiscriminator, Timestamp,
    ValidationError, VersionNumber,
};

/// Named-field input/output shape shared by the field and storage forms.
pub type FieldMap = serde_json::Map<String, Value>;

/// Convert a `json!({...})` literal into a [`FieldMap`].
pub(crate) fn as_field_map(value: Value) -> FieldMap {
    match value {
        Value::Object(map) => map,
        _ => FieldMap::new(),
    }
}

/// A record type's name and positional column order.
#[derive(Debug, Clone, Copy)]
pub struct RecordSchema {
    /// The record type name, used in whole-row error messages.
    pub record: &'static str,
    /// Stable column order for the positional wire form.
    pub columns: &'static [&'static str],
}

impl RecordSchema {
    /// Re-map a positional row to the named-field shape.
    ///
    /// Missing trailing columns become absent fields; explicit nulls are
    /// dropped (the getters treat absent and null identically). A row with
    /// more values than columns is rejected.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] scoped to the record name when the row
    /// is too wide.
    pub fn fields_from_row(&self, row: &[Value]) -> Result<FieldMap, ValidationError> {
        if row.len() > self.columns.len() {
            return Err(ValidationError::new(
                self.record,
                format!(
                    "expected at most {} columns, got {}",
                    self.columns.len(),
                    row.len()
                ),
            ));
        }
        let mut map = FieldMap::new();
        for (name, value) in self.columns.iter().zip(row) {
            if !value.is_null() {
                map.insert((*name).to_string(), value.clone());
            }
        }
        Ok(map)
    }
}

/// Decode a value-object from its wire representation.
///
/// This is the per-type decoder column of the schema: each primitive knows
/// how to read itself out of a wire `Value`, and [`Fields::get`] /
/// [`Fields::opt`] drive it with the enclosing field name for error
/// scoping.
pub trait FromWire: Sized {
    /// Decode from a wire value; failures are scoped to `field`.
    fn from_wire(field: &str, value: &Value) -> Result<Self, ValidationError>;
}

fn wire_string<'v>(field: &str, value: &'v Value) -> Result<&'v str, ValidationError> {
    value
        .as_str()
        .ok_or_else(|| ValidationError::new(field, "not a string"))
}

impl FromWire for Identifier {
    fn from_wire(field: &str, value: &Value) -> Result<Self, ValidationError> {
        Identifier::parse(wire_string(field, value)?)
            .map_err(|e| ValidationError::wrap(field, e))
    }
}

impl FromWire for VersionNumber {
    fn from_wire(field: &str, value: &Value) -> Result<Self, ValidationError> {
        VersionNumber::parse(wire_string(field, value)?)
            .map_err(|e| ValidationError::wrap(field, e))
    }
}

impl FromWire for ClassDiscriminator {
    fn from_wire(field: &str, value: &Value) -> Result<Self, ValidationError> {
        ClassDiscriminator::parse(wire_string(field, value)?)
            .map_err(|e| ValidationError::wrap(field, e))
    }
}

impl FromWire for LessonDiscriminator {
    fn from_wire(field: &str, value: &Value) -> Result<Self, ValidationError> {
        LessonDiscriminator::parse(wire_string(field, value)?)
            .map_err(|e| ValidationError::wrap(field, e))
    }
}

impl FromWire for IntervalExpression {
    fn from_wire(field: &str, value: &Value) -> Result<Self, ValidationError> {
        IntervalExpression::parse(wire_string(field, value)?)
            .map_err(|e| ValidationError::wrap(field, e))
    }
}

/// Timestamps accept the tagged string (`"D<n>"` / `"DT<n>"`) and the
/// structured `{year, month, day}` object, which always yields a
/// day-granular value.
impl FromWire for Timestamp {
    fn from_wire(field: &str, value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::String(s) => {
                Timestamp::parse(s).map_err(|e| ValidationError::wrap(field, e))
            }
            Value::Object(map) => {
                let part = |name: &str| -> Result<i64, ValidationError> {
                    map.get(name)
                        .and_then(Value::as_i64)
                        .ok_or_else(|| {
                            ValidationError::new(field, format!("{name} not a number"))
                        })
                };
                let year = i32::try_from(part("year")?)
                    .map_err(|_| ValidationError::new(field, "year out of bounds"))?;
                let month = u32::try_from(part("month")?)
                    .map_err(|_| ValidationError::new(field, "month out of bounds"))?;
                let day = u32::try_from(part("day")?)
                    .map_err(|_| ValidationError::new(field, "day out of bounds"))?;
                Timestamp::from_ymd(year, month, day)
                    .map_err(|e| ValidationError::wrap(field, e))
            }
            _ => Err(ValidationError::new(field, "not a string nor an object")),
        }
    }
}

/// The generic per-field validation routine: a typed reader over a
/// [`FieldMap`].
///
/// Absent fields and explicit nulls are indistinguishable. Every getter
/// returns a [`ValidationError`] scoped to the field name on failure.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    map: &'a FieldMap,
}

impl<'a> Fields<'a> {
    /// Wrap a named-field map for reading.
    pub fn new(map: &'a FieldMap) -> Self {
        Self { map }
    }

    fn raw(&self, name: &str) -> Option<&'a Value> {
        self.map.get(name).filter(|v| !v.is_null())
    }

    /// A trimmed string; absent, null, or empty-after-trim yields `None`.
    ///
    /// # Errors
    ///
    /// Fails when the value is present but not a string.
    pub fn optional_string(&self, name: &str) -> Result<Option<String>, ValidationError> {
        match self.raw(name) {
            None => Ok(None),
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(trimmed.to_string()))
                }
            }
            Some(_) => Err(ValidationError::new(name, "not a string nor null")),
        }
    }

    /// A trimmed, non-empty string.
    ///
    /// # Errors
    ///
    /// Fails when absent, empty after trimming, or not a string.
    pub fn required_string(&self, name: &str) -> Result<String, ValidationError> {
        self.optional_string(name)?
            .ok_or_else(|| ValidationError::new(name, "not a valid string"))
    }

    /// A boolean; the numeric encodings `0` and `1` coerce.
    ///
    /// # Errors
    ///
    /// Fails when absent or any other shape.
    pub fn boolean(&self, name: &str) -> Result<bool, ValidationError> {
        match self.raw(name) {
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(0) => Ok(false),
                Some(1) => Ok(true),
                _ => Err(ValidationError::new(name, "not a boolean")),
            },
            _ => Err(ValidationError::new(name, "not a boolean")),
        }
    }

    /// Any integer.
    ///
    /// # Errors
    ///
    /// Fails when absent, fractional, or not a number.
    pub fn integer(&self, name: &str) -> Result<i64, ValidationError> {
        self.raw(name)
            .and_then(Value::as_i64)
            .ok_or_else(|| ValidationError::new(name, "not a number"))
    }

    /// A non-negative integer fitting in `u32`.
    ///
    /// # Errors
    ///
    /// Fails when absent, negative, fractional, or out of range.
    pub fn non_negative_int(&self, name: &str) -> Result<u32, ValidationError> {
        let value = self.integer(name)?;
        u32::try_from(value).map_err(|_| ValidationError::new(name, "out of bounds"))
    }

    /// A list of trimmed, non-empty strings. Accepts a JSON array or a
    /// comma-delimited string. Absent yields `None`.
    ///
    /// # Errors
    ///
    /// Fails when any element is empty or not a string.
    pub fn optional_string_list(
        &self,
        name: &str,
    ) -> Result<Option<Vec<String>>, ValidationError> {
        let items: Vec<String> = match self.raw(name) {
            None => return Ok(None),
            Some(Value::String(s)) => {
                tracing::trace!(field = name, "coercing comma-delimited string to list");
                s.split(',').map(str::to_string).collect()
            }
            Some(Value::Array(values)) => {
                let mut items = Vec::with_capacity(values.len());
                for value in values {
                    match value.as_str() {
                        Some(s) => items.push(s.to_string()),
                        None => {
                            return Err(ValidationError::new(
                                name,
                                "some element is not a valid string",
                            ))
                        }
                    }
                }
                items
            }
            Some(_) => return Err(ValidationError::new(name, "not an array")),
        };
        let mut trimmed = Vec::with_capacity(items.len());
        for item in items {
            let item = item.trim();
            if item.is_empty() {
                return Err(ValidationError::new(
                    name,
                    "some element is not a valid string",
                ));
            }
            trimmed.push(item.to_string());
        }
        Ok(Some(trimmed))
    }

    /// Like [`Fields::optional_string_list`] but the field must be present.
    ///
    /// # Errors
    ///
    /// Fails when absent or malformed.
    pub fn string_list(&self, name: &str) -> Result<Vec<String>, ValidationError> {
        self.optional_string_list(name)?
            .ok_or_else(|| ValidationError::new(name, "not an array"))
    }

    /// A required nested value-object.
    ///
    /// # Errors
    ///
    /// Fails when absent or when the type's own decoder rejects the value;
    /// decoder failures arrive scoped to `name` with the inner reason
    /// preserved.
    pub fn get<T: FromWire>(&self, name: &str) -> Result<T, ValidationError> {
        match self.raw(name) {
            Some(value) => T::from_wire(name, value),
            None => Err(ValidationError::new(name, "missing value")),
        }
    }

    /// An optional nested value-object; absent or null yields `None`.
    ///
    /// # Errors
    ///
    /// Fails only when a present value is rejected by the type's decoder.
    pub fn opt<T: FromWire>(&self, name: &str) -> Result<Option<T>, ValidationError> {
        self.raw(name).map(|value| T::from_wire(name, value)).transpose()
    }

    /// A required enumeration value, as integer index or string label.
    ///
    /// # Errors
    ///
    /// Fails when absent, out of range, or an unknown label.
    pub fn enumerated<T: crate::enums::Enumerated>(
        &self,
        name: &str,
    ) -> Result<T, ValidationError> {
        match self.raw(name) {
            Some(value) => T::from_wire(name, value),
            None => Err(ValidationError::new(name, "missing value")),
        }
    }

    /// The raw value of a field, when present and non-null.
    pub fn value(&self, name: &str) -> Option<&'a Value> {
        self.raw(name)
    }
}
