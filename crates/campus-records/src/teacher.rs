//! # Teacher — Staff Master Data
//!
//! A teacher record keeps the shorthand the timetable grid uses, the
//! display name, the taught subjects, and the contact identifier. The
//! optional nested timetable sequence is populated when the caller asked
//! for it; it is never persisted into the teacher's own storage row (the
//! timetables live in their own table).

use serde_json::{json, Value};

use campus_core::{Identifier, ValidationError};

use crate::record::{record_from_value, Record};
use crate::schema::{as_field_map, FieldMap, Fields, RecordSchema};
use crate::timetable::Timetable;

/// A validated teacher record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    /// The teacher's identifier.
    pub id: Identifier,
    /// True once the teacher has left the school; the record is kept for
    /// historical timetables.
    pub left_school: bool,
    /// Grid shorthand (e.g. `MUE`).
    pub shorthand: String,
    /// Display name.
    pub name: String,
    /// Subjects taught, as shorthands.
    pub subjects: Vec<String>,
    /// Contact identifier (mail routing key).
    pub email: Identifier,
    /// Free-form annotations.
    pub comments: Vec<String>,
    /// Nested timetables, when expanded by the caller.
    pub timetables: Option<Vec<Timetable>>,
}

/// Decode an optional nested timetable sequence under `field`.
pub(crate) fn timetables_from(
    f: &Fields<'_>,
    field: &str,
) -> Result<Option<Vec<Timetable>>, ValidationError> {
    match f.value(field) {
        None => Ok(None),
        Some(Value::Array(rows)) => rows
            .iter()
            .enumerate()
            .map(|(i, row)| record_from_value::<Timetable>(&format!("{field}[{i}]"), row))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(_) => Err(ValidationError::new(field, "not an array nor null")),
    }
}

/// Render an optional nested timetable sequence for the wire form.
pub(crate) fn timetables_to_wire(timetables: &Option<Vec<Timetable>>) -> Value {
    match timetables {
        None => Value::Null,
        Some(timetables) => Value::Array(
            timetables
                .iter()
                .map(|tt| Value::Array(tt.simplify()))
                .collect(),
        ),
    }
}

impl Record for Teacher {
    const SCHEMA: RecordSchema = RecordSchema {
        record: "teacher",
        columns: &[
            "uuid",
            "left_school",
            "shorthand",
            "name",
            "subjects",
            "email",
            "comments",
            "timetables",
        ],
    };

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let f = Fields::new(fields);
        let id = f.get::<Identifier>("uuid")?;
        let left_school = f.boolean("left_school")?;
        let shorthand = f.required_string("shorthand")?;
        let name = f.required_string("name")?;
        let subjects = f.string_list("subjects")?;
        let email = f.get::<Identifier>("email")?;
        let comments = f.optional_string_list("comments")?.unwrap_or_default();
        let timetables = timetables_from(&f, "timetables")?;
        Ok(Self {
            id,
            left_school,
            shorthand,
            name,
            subjects,
            email,
            comments,
            timetables,
        })
    }

    fn simplify(&self) -> Vec<Value> {
        vec![
            json!(self.id.simplify()),
            json!(self.left_school),
            json!(self.shorthand),
            json!(self.name),
            json!(self.subjects),
            json!(self.email.simplify()),
            json!(self.comments),
            timetables_to_wire(&self.timetables),
        ]
    }

    fn to_storage(&self) -> FieldMap {
        as_field_map(json!({
            "uuid": self.id.simplify(),
            "left_school": self.left_school,
            "shorthand": self.shorthand,
            "name": self.name,
            "subjects": self.subjects.join(","),
            "email": self.email.simplify(),
            "comments": self.comments.join(","),
        }))
    }

    fn identity(&self) -> Option<&Identifier> {
        Some(&self.id)
    }
}
