//! # Timetable — A Week Grid and Its Owned Lessons
//!
//! A timetable belongs to a master — a class, a teacher, or a room — and
//! owns an ordered sequence of [`Lesson`] rows. The master field is typed
//! by the kind: a validated [`ClassDiscriminator`] for class timetables, a
//! plain shorthand/name string otherwise.
//!
//! Lessons arrive in two ways: as live nested rows under `lessons` (each
//! inheriting the timetable's identifier as back-reference when it carries
//! none), or as the denormalized `content` blob the storage layer keeps in
//! one JSON column. The blob codec is deliberately its own pair of
//! functions ([`encode_content`] / [`decode_content`]) next to, not inside,
//! the named-field storage mapping.

use serde_json::{json, Value};

use campus_core::{ClassDiscriminator, Identifier, Timestamp, ValidationError};

use crate::enums::{Enumerated, TimetableKind};
use crate::lesson::Lesson;
use crate::record::Record;
use crate::schema::{as_field_map, FieldMap, Fields, RecordSchema};

/// Who a timetable describes, typed by [`TimetableKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimetableMaster {
    /// A class timetable: the master is the class itself.
    Class(ClassDiscriminator),
    /// A teacher or room timetable: shorthand or room name.
    Named(String),
}

impl TimetableMaster {
    /// The wire/storage rendering of the master field.
    pub fn simplify(&self) -> Value {
        match self {
            Self::Class(class) => json!(class.simplify()),
            Self::Named(name) => json!(name),
        }
    }
}

/// A validated timetable with its owned lesson sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timetable {
    /// The timetable's identifier.
    pub id: Identifier,
    /// What the master field refers to.
    pub kind: TimetableKind,
    /// The class, teacher shorthand, or room name this grid belongs to.
    pub master: TimetableMaster,
    /// When this timetable becomes the active one.
    pub activation: Timestamp,
    /// The owned lesson rows, in grid order.
    pub lessons: Vec<Lesson>,
}

/// Encode a lesson sequence into the storage blob: a JSON array of the
/// lessons' storage rows (back-references nulled).
pub fn encode_content(lessons: &[Lesson]) -> String {
    Value::Array(
        lessons
            .iter()
            .map(|lesson| Value::Object(lesson.to_storage()))
            .collect(),
    )
    .to_string()
}

/// Decode the storage blob back into owned lessons, re-injecting `owner`
/// as each row's back-reference.
///
/// # Errors
///
/// Returns a [`ValidationError`] scoped to `content` for malformed JSON,
/// and element-scoped errors (`content[i].<field>`) for invalid rows.
pub fn decode_content(content: &str, owner: &Identifier) -> Result<Vec<Lesson>, ValidationError> {
    let rows: Value = serde_json::from_str(content)
        .map_err(|e| ValidationError::new("content", format!("not valid JSON: {e}")))?;
    let Value::Array(rows) = rows else {
        return Err(ValidationError::new("content", "not an array"));
    };
    tracing::debug!(lessons = rows.len(), "decoding timetable content blob");
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            lesson_with_owner(row, owner).map_err(|e| e.at_index("content", i))
        })
        .collect()
}

/// Decode one nested lesson value (row or map), filling in the owner as
/// back-reference when the value carries none.
fn lesson_with_owner(value: &Value, owner: &Identifier) -> Result<Lesson, ValidationError> {
    let mut fields = match value {
        Value::Array(row) => Lesson::SCHEMA.fields_from_row(row)?,
        Value::Object(map) => map.clone(),
        _ => return Err(ValidationError::new("lesson", "not an object nor an array")),
    };
    let absent = fields.get("master_uuid").map_or(true, Value::is_null);
    if absent {
        fields.insert("master_uuid".into(), json!(owner.simplify()));
    }
    Lesson::from_fields(&fields)
}

impl Record for Timetable {
    const SCHEMA: RecordSchema = RecordSchema {
        record: "timetable",
        columns: &["uuid", "kind", "master", "activation", "lessons"],
    };

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let f = Fields::new(fields);
        let id = f.get::<Identifier>("uuid")?;
        let kind = f.enumerated::<TimetableKind>("kind")?;
        let master = match kind {
            TimetableKind::Class => TimetableMaster::Class(f.get::<ClassDiscriminator>("master")?),
            TimetableKind::Teacher | TimetableKind::Room => {
                TimetableMaster::Named(f.required_string("master")?)
            }
        };
        let activation = f.get::<Timestamp>("activation")?;
        let lessons = match (f.value("lessons"), f.optional_string("content")?) {
            (Some(_), Some(_)) => {
                return Err(ValidationError::new(
                    "lessons",
                    "both lessons and content supplied",
                ))
            }
            (None, Some(content)) => decode_content(&content, &id)?,
            (Some(Value::Array(rows)), None) => rows
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    lesson_with_owner(row, &id).map_err(|e| e.at_index("lessons", i))
                })
                .collect::<Result<Vec<_>, _>>()?,
            (Some(_), None) => return Err(ValidationError::new("lessons", "not an array")),
            (None, None) => return Err(ValidationError::new("lessons", "not an array")),
        };
        Ok(Self {
            id,
            kind,
            master,
            activation,
            lessons,
        })
    }

    fn simplify(&self) -> Vec<Value> {
        vec![
            json!(self.id.simplify()),
            json!(self.kind.index()),
            self.master.simplify(),
            json!(self.activation.simplify()),
            Value::Array(
                self.lessons
                    .iter()
                    .map(|lesson| Value::Array(lesson.simplify()))
                    .collect(),
            ),
        ]
    }

    fn to_storage(&self) -> FieldMap {
        as_field_map(json!({
            "uuid": self.id.simplify(),
            "kind": self.kind.as_str(),
            "master": self.master.simplify(),
            "activation": self.activation.simplify(),
            "content": encode_content(&self.lessons),
        }))
    }

    fn identity(&self) -> Option<&Identifier> {
        Some(&self.id)
    }
}
