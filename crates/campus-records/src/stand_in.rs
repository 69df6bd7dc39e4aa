//! # StandIn — Substitutions and Day Announcements
//!
//! The substitution plan has two record shapes behind one type field:
//!
//! - `default`: a real substitution, carrying the full detail set (who
//!   covers what, where, and what it replaces). The wire row has all 13
//!   columns with `subtype` always null.
//! - `motd`: a message-of-the-day announcement, carrying only a subtype
//!   and a required message. The wire row is the 5-column short form; the
//!   detail columns are never transmitted.
//!
//! The shape is modeled as an enum, so a substitution cannot carry a
//! subtype, and an announcement cannot carry substitution detail — the
//! cross-field rule holds by construction after validation.

use serde_json::{json, Value};

use campus_core::{ClassDiscriminator, Identifier, LessonDiscriminator, Timestamp, ValidationError};

use crate::enums::{AnnouncementKind, Enumerated, StandInKind};
use crate::record::Record;
use crate::schema::{as_field_map, FieldMap, Fields, RecordSchema};

/// The detail set of a real substitution. Every field is optional except
/// the elimination flag — the upstream plan often only knows parts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution {
    /// Free-form note shown with the entry.
    pub message: Option<String>,
    /// The covering teacher's shorthand.
    pub teacher: Option<String>,
    /// The subject actually taught.
    pub subject: Option<String>,
    /// The affected slot.
    pub lesson: Option<LessonDiscriminator>,
    /// The affected class.
    pub class: Option<ClassDiscriminator>,
    /// The room the substitution takes place in.
    pub room: Option<String>,
    /// The teacher originally scheduled.
    pub original_teacher: Option<String>,
    /// The subject originally scheduled.
    pub original_subject: Option<String>,
    /// True when the lesson is cancelled outright.
    pub eliminated: bool,
}

/// The two stand-in shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StandInDetail {
    /// A real substitution with its detail set.
    Substitution(Substitution),
    /// A message-of-the-day announcement.
    Announcement {
        /// What kind of announcement this is.
        subtype: AnnouncementKind,
        /// The announcement text; always present.
        message: String,
    },
}

/// A validated stand-in entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandIn {
    /// The entry's identifier.
    pub id: Identifier,
    /// The day this entry applies to.
    pub day: Timestamp,
    /// The shape-specific payload.
    pub detail: StandInDetail,
}

impl StandIn {
    /// The type discriminator of this entry.
    pub fn kind(&self) -> StandInKind {
        match self.detail {
            StandInDetail::Substitution(_) => StandInKind::Default,
            StandInDetail::Announcement { .. } => StandInKind::Motd,
        }
    }

    /// The message text, regardless of shape.
    pub fn message(&self) -> Option<&str> {
        match &self.detail {
            StandInDetail::Substitution(detail) => detail.message.as_deref(),
            StandInDetail::Announcement { message, .. } => Some(message),
        }
    }
}

impl Record for StandIn {
    const SCHEMA: RecordSchema = RecordSchema {
        record: "stand_in",
        columns: &[
            "uuid",
            "kind",
            "subtype",
            "day",
            "message",
            "teacher",
            "subject",
            "lesson",
            "class",
            "room",
            "original_teacher",
            "original_subject",
            "eliminated",
        ],
    };

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let f = Fields::new(fields);
        let id = f.get::<Identifier>("uuid")?;
        let kind = f.enumerated::<StandInKind>("kind")?;
        let day = f.get::<Timestamp>("day")?;
        let detail = match kind {
            StandInKind::Motd => StandInDetail::Announcement {
                subtype: f.enumerated::<AnnouncementKind>("subtype")?,
                message: f.required_string("message")?,
            },
            StandInKind::Default => StandInDetail::Substitution(Substitution {
                message: f.optional_string("message")?,
                teacher: f.optional_string("teacher")?,
                subject: f.optional_string("subject")?,
                lesson: f.opt::<LessonDiscriminator>("lesson")?,
                class: f.opt::<ClassDiscriminator>("class")?,
                room: f.optional_string("room")?,
                original_teacher: f.optional_string("original_teacher")?,
                original_subject: f.optional_string("original_subject")?,
                eliminated: f.boolean("eliminated")?,
            }),
        };
        Ok(Self { id, day, detail })
    }

    fn simplify(&self) -> Vec<Value> {
        match &self.detail {
            StandInDetail::Announcement { subtype, message } => vec![
                json!(self.id.simplify()),
                json!(StandInKind::Motd.index()),
                json!(subtype.index()),
                json!(self.day.simplify()),
                json!(message),
            ],
            StandInDetail::Substitution(detail) => vec![
                json!(self.id.simplify()),
                json!(StandInKind::Default.index()),
                Value::Null,
                json!(self.day.simplify()),
                json!(detail.message),
                json!(detail.teacher),
                json!(detail.subject),
                json!(detail.lesson.as_ref().map(|l| l.simplify())),
                json!(detail.class.as_ref().map(|c| c.simplify())),
                json!(detail.room),
                json!(detail.original_teacher),
                json!(detail.original_subject),
                json!(detail.eliminated),
            ],
        }
    }

    fn to_storage(&self) -> FieldMap {
        match &self.detail {
            StandInDetail::Announcement { subtype, message } => as_field_map(json!({
                "uuid": self.id.simplify(),
                "kind": StandInKind::Motd.as_str(),
                "subtype": subtype.as_str(),
                "day": self.day.simplify(),
                "message": message,
            })),
            StandInDetail::Substitution(detail) => as_field_map(json!({
                "uuid": self.id.simplify(),
                "kind": StandInKind::Default.as_str(),
                "day": self.day.simplify(),
                "message": detail.message,
                "teacher": detail.teacher,
                "subject": detail.subject,
                "lesson": detail.lesson.as_ref().map(|l| l.simplify()),
                "class": detail.class.as_ref().map(|c| c.simplify()),
                "room": detail.room,
                "original_teacher": detail.original_teacher,
                "original_subject": detail.original_subject,
                "eliminated": detail.eliminated,
            })),
        }
    }

    fn identity(&self) -> Option<&Identifier> {
        Some(&self.id)
    }
}
