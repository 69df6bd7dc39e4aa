//! # Room — Floor-Plan Master Data
//!
//! A room carries its display name, a human-readable location, and its
//! rectangle on the floor-plan grid (integer coordinates and extents).
//! Like [`Teacher`](crate::teacher::Teacher), the nested timetable
//! sequence is an expansion-only view and never lands in the room's own
//! storage row.

use serde_json::{json, Value};

use campus_core::{Identifier, ValidationError};

use crate::record::Record;
use crate::schema::{as_field_map, FieldMap, Fields, RecordSchema};
use crate::teacher::{timetables_from, timetables_to_wire};
use crate::timetable::Timetable;

/// A validated room record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// The room's identifier.
    pub id: Identifier,
    /// Display name (e.g. `A 1.04`).
    pub name: String,
    /// Human-readable location (building, floor).
    pub location: String,
    /// Left edge on the floor-plan grid.
    pub x: i64,
    /// Top edge on the floor-plan grid.
    pub y: i64,
    /// Rectangle height in grid units.
    pub height: i64,
    /// Rectangle width in grid units.
    pub width: i64,
    /// Nested timetables, when expanded by the caller.
    pub timetables: Option<Vec<Timetable>>,
}

impl Record for Room {
    const SCHEMA: RecordSchema = RecordSchema {
        record: "room",
        columns: &[
            "uuid",
            "name",
            "location",
            "x",
            "y",
            "height",
            "width",
            "timetables",
        ],
    };

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let f = Fields::new(fields);
        let id = f.get::<Identifier>("uuid")?;
        let name = f.required_string("name")?;
        let location = f.required_string("location")?;
        let x = f.integer("x")?;
        let y = f.integer("y")?;
        let height = f.integer("height")?;
        let width = f.integer("width")?;
        let timetables = timetables_from(&f, "timetables")?;
        Ok(Self {
            id,
            name,
            location,
            x,
            y,
            height,
            width,
            timetables,
        })
    }

    fn simplify(&self) -> Vec<Value> {
        vec![
            json!(self.id.simplify()),
            json!(self.name),
            json!(self.location),
            json!(self.x),
            json!(self.y),
            json!(self.height),
            json!(self.width),
            timetables_to_wire(&self.timetables),
        ]
    }

    fn to_storage(&self) -> FieldMap {
        as_field_map(json!({
            "uuid": self.id.simplify(),
            "name": self.name,
            "location": self.location,
            "x": self.x,
            "y": self.y,
            "height": self.height,
            "width": self.width,
        }))
    }

    fn identity(&self) -> Option<&Identifier> {
        Some(&self.id)
    }
}
