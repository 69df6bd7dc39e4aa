//! # CalendarEvent — School Calendar Entries
//!
//! A calendar entry inside one calendar feed (`master_id` names the feed).
//! Recurring events carry the recurrence detail as one optional group:
//! either the event is one-off and the group is absent, or it recurs and
//! the human-readable description, the machine rule, and the exhausted
//! flag are all present. The wire form still transmits the flag plus three
//! nullable columns.

use serde_json::{json, Value};

use campus_core::{Identifier, Timestamp, ValidationError};

use crate::record::Record;
use crate::schema::{as_field_map, FieldMap, Fields, RecordSchema};

/// The recurrence detail group, present iff the event recurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recurrence {
    /// Human-readable recurrence description (e.g. "every monday").
    pub human: String,
    /// The machine-readable recurrence rule.
    pub rule: String,
    /// True once the recurrence has run out of future occurrences.
    pub no_more: bool,
}

/// A validated calendar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// The calendar feed this event belongs to.
    pub master_id: String,
    /// The event's identifier.
    pub id: Identifier,
    /// Event start.
    pub start: Timestamp,
    /// Event end.
    pub end: Timestamp,
    /// Short summary line.
    pub summary: String,
    /// Longer description, if any.
    pub description: Option<String>,
    /// Location, if any.
    pub location: Option<String>,
    /// Recurrence detail; `Some` iff the event recurs.
    pub recurrence: Option<Recurrence>,
}

impl CalendarEvent {
    /// True when the event recurs.
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }
}

impl Record for CalendarEvent {
    const SCHEMA: RecordSchema = RecordSchema {
        record: "calendar_event",
        columns: &[
            "master_uuid",
            "uuid",
            "start",
            "end",
            "summary",
            "description",
            "location",
            "is_recurring",
            "human_recurrence",
            "recurrence_rule",
            "no_more",
        ],
    };

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let f = Fields::new(fields);
        let master_id = f.required_string("master_uuid")?;
        let id = f.get::<Identifier>("uuid")?;
        let start = f.get::<Timestamp>("start")?;
        let end = f.get::<Timestamp>("end")?;
        let summary = f.required_string("summary")?;
        let description = f.optional_string("description")?;
        let location = f.optional_string("location")?;
        // Recurrence fields are gated: validated only when the flag is set,
        // force-cleared otherwise even if supplied.
        let recurrence = if f.boolean("is_recurring")? {
            Some(Recurrence {
                human: f.required_string("human_recurrence")?,
                rule: f.required_string("recurrence_rule")?,
                no_more: f.boolean("no_more")?,
            })
        } else {
            None
        };
        Ok(Self {
            master_id,
            id,
            start,
            end,
            summary,
            description,
            location,
            recurrence,
        })
    }

    fn simplify(&self) -> Vec<Value> {
        vec![
            json!(self.master_id),
            json!(self.id.simplify()),
            json!(self.start.simplify()),
            json!(self.end.simplify()),
            json!(self.summary),
            json!(self.description),
            json!(self.location),
            json!(self.recurrence.is_some()),
            json!(self.recurrence.as_ref().map(|r| &r.human)),
            json!(self.recurrence.as_ref().map(|r| &r.rule)),
            json!(self.recurrence.as_ref().map(|r| r.no_more)),
        ]
    }

    fn to_storage(&self) -> FieldMap {
        as_field_map(json!({
            "master_uuid": self.master_id,
            "uuid": self.id.simplify(),
            "start": self.start.simplify(),
            "end": self.end.simplify(),
            "summary": self.summary,
            "description": self.description,
            "location": self.location,
            "is_recurring": self.recurrence.is_some(),
            "human_recurrence": self.recurrence.as_ref().map(|r| &r.human),
            "recurrence_rule": self.recurrence.as_ref().map(|r| &r.rule),
            "no_more": self.recurrence.as_ref().map(|r| r.no_more),
        }))
    }

    fn identity(&self) -> Option<&Identifier> {
        Some(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_fields() -> FieldMap {
        as_field_map(json!({
            "master_uuid": "calendar-1",
            "uuid": "ev1@school.example.org",
            "start": "DT1000",
            "end": "DT2000",
            "summary": "  Sports day ",
            "is_recurring": false,
        }))
    }

    #[test]
    fn test_minimal_event() {
        let ev = CalendarEvent::from_fields(&base_fields()).unwrap();
        assert_eq!(ev.summary, "Sports day");
        assert_eq!(ev.description, None);
        assert!(!ev.is_recurring());
    }

    #[test]
    fn test_recurring_requires_full_group() {
        let mut fields = base_fields();
        fields.insert("is_recurring".into(), json!(true));
        let err = CalendarEvent::from_fields(&fields).unwrap_err();
        assert_eq!(err.field(), "human_recurrence");

        fields.insert("human_recurrence".into(), json!("every monday"));
        let err = CalendarEvent::from_fields(&fields).unwrap_err();
        assert_eq!(err.field(), "recurrence_rule");

        fields.insert("recurrence_rule".into(), json!("FREQ=WEEKLY;BYDAY=MO"));
        fields.insert("no_more".into(), json!(0));
        let ev = CalendarEvent::from_fields(&fields).unwrap();
        let recurrence = ev.recurrence.as_ref().unwrap();
        assert_eq!(recurrence.human, "every monday");
        assert!(!recurrence.no_more);
    }

    #[test]
    fn test_non_recurring_forces_group_absent() {
        let mut fields = base_fields();
        fields.insert("human_recurrence".into(), json!("every monday"));
        fields.insert("recurrence_rule".into(), json!("FREQ=WEEKLY"));
        fields.insert("no_more".into(), json!(true));
        let ev = CalendarEvent::from_fields(&fields).unwrap();
        assert_eq!(ev.recurrence, None);
    }

    #[test]
    fn test_numeric_boolean_coercion() {
        let mut fields = base_fields();
        fields.insert("is_recurring".into(), json!(0));
        let ev = CalendarEvent::from_fields(&fields).unwrap();
        assert!(!ev.is_recurring());
    }

    #[test]
    fn test_rejects_bad_identifier() {
        let mut fields = base_fields();
        fields.insert("uuid".into(), json!("not-an-identifier"));
        let err = CalendarEvent::from_fields(&fields).unwrap_err();
        assert_eq!(err.field(), "uuid");
    }

    #[test]
    fn test_wire_roundtrip() {
        let mut fields = base_fields();
        fields.insert("is_recurring".into(), json!(true));
        fields.insert("human_recurrence".into(), json!("every monday"));
        fields.insert("recurrence_rule".into(), json!("FREQ=WEEKLY;BYDAY=MO"));
        fields.insert("no_more".into(), json!(false));
        fields.insert("description".into(), json!("bring shoes"));
        let ev = CalendarEvent::from_fields(&fields).unwrap();

        let row = ev.simplify();
        assert_eq!(row.len(), CalendarEvent::SCHEMA.columns.len());
        let back = CalendarEvent::from_row(&row).unwrap();
        assert_eq!(back, ev);
    }

    #[test]
    fn test_storage_form() {
        let ev = CalendarEvent::from_fields(&base_fields()).unwrap();
        let row = ev.to_storage();
        assert_eq!(row.get("uuid"), Some(&json!("ev1@school.example.org")));
        assert_eq!(row.get("is_recurring"), Some(&json!(false)));
        assert_eq!(row.get("human_recurrence"), Some(&json!(null)));
    }

    #[test]
    fn test_equals_is_identity_first() {
        let a = CalendarEvent::from_fields(&base_fields()).unwrap();
        let mut changed = base_fields();
        changed.insert("summary".into(), json!("Different"));
        let b = CalendarEvent::from_fields(&changed).unwrap();
        // Same identifier, different content.
        assert!(a.equals(&b));
        assert_ne!(a, b);
    }
}
