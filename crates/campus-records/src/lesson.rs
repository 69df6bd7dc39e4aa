//! # Lesson — One Cell of the Timetable Grid
//!
//! A lesson names its slot, room, teacher, subject, and class for one
//! weekday, plus how many slots it spans and on which week parity it runs.
//! The `master_id` back-reference points at the owning timetable; on the
//! storage path it is nulled out, because the owning row is implied by the
//! blob column the lesson is embedded in (see `timetable::decode_content`).

use serde_json::{json, Value};

use campus_core::{ClassDiscriminator, Identifier, LessonDiscriminator, ValidationError};

use crate::enums::{Enumerated, Regularity, Weekday};
use crate::record::Record;
use crate::schema::{as_field_map, FieldMap, Fields, RecordSchema};

/// A validated lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    /// Back-reference to the owning timetable.
    pub master_id: Identifier,
    /// The teaching day.
    pub weekday: Weekday,
    /// The slot or slot range this lesson occupies.
    pub lesson: LessonDiscriminator,
    /// Room name, absent for off-site lessons.
    pub room: Option<String>,
    /// Teacher shorthand.
    pub teacher: String,
    /// Subject shorthand.
    pub subject: String,
    /// The class being taught.
    pub class: ClassDiscriminator,
    /// Number of consecutive slots the lesson spans.
    pub length: u32,
    /// Week parity on which the lesson runs.
    pub regularity: Regularity,
}

impl Record for Lesson {
    const SCHEMA: RecordSchema = RecordSchema {
        record: "lesson",
        columns: &[
            "master_uuid",
            "weekday",
            "lesson",
            "room",
            "teacher",
            "subject",
            "class",
            "length",
            "regularity",
        ],
    };

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let f = Fields::new(fields);
        let master_id = f.get::<Identifier>("master_uuid")?;
        let weekday = f.enumerated::<Weekday>("weekday")?;
        let lesson = f.get::<LessonDiscriminator>("lesson")?;
        let room = f.optional_string("room")?;
        let teacher = f.required_string("teacher")?;
        let subject = f.required_string("subject")?;
        let class = f.get::<ClassDiscriminator>("class")?;
        let length = f.non_negative_int("length")?;
        let regularity = f.enumerated::<Regularity>("regularity")?;
        Ok(Self {
            master_id,
            weekday,
            lesson,
            room,
            teacher,
            subject,
            class,
            length,
            regularity,
        })
    }

    fn simplify(&self) -> Vec<Value> {
        vec![
            json!(self.master_id.simplify()),
            json!(self.weekday.index()),
            json!(self.lesson.simplify()),
            json!(self.room),
            json!(self.teacher),
            json!(self.subject),
            json!(self.class.simplify()),
            json!(self.length),
            json!(self.regularity.index()),
        ]
    }

    /// The blob-element shape: the back-reference is nulled, since the
    /// owning timetable is implied by the column the blob lives in.
    fn to_storage(&self) -> FieldMap {
        as_field_map(json!({
            "master_uuid": null,
            "weekday": self.weekday.as_str(),
            "lesson": self.lesson.simplify(),
            "room": self.room,
            "teacher": self.teacher,
            "subject": self.subject,
            "class": self.class.simplify(),
            "length": self.length,
            "regularity": self.regularity.as_str(),
        }))
    }

    fn identity(&self) -> Option<&Identifier> {
        Some(&self.master_id)
    }
}
