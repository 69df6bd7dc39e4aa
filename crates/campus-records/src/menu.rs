//! # Menu — The Canteen's Daily Offering
//!
//! One record per day: the standard dish plus the optional vegetarian,
//! dessert, and evening columns. The standard dish keeps its historical
//! storage column name `default`.

use serde_json::{json, Value};

use campus_core::{Identifier, Timestamp, ValidationError};

use crate::record::Record;
use crate::schema::{as_field_map, FieldMap, Fields, RecordSchema};

/// A validated canteen menu for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    /// The menu's identifier.
    pub id: Identifier,
    /// The day this menu applies to.
    pub day: Timestamp,
    /// The standard dish (storage column `default`).
    pub standard: String,
    /// Vegetarian alternative, if offered.
    pub vegetarian: Option<String>,
    /// Dessert, if offered.
    pub dessert: Option<String>,
    /// Evening meal, if offered.
    pub evening: Option<String>,
}

impl Record for Menu {
    const SCHEMA: RecordSchema = RecordSchema {
        record: "menu",
        columns: &["uuid", "day", "default", "vegetarian", "dessert", "evening"],
    };

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let f = Fields::new(fields);
        let id = f.get::<Identifier>("uuid")?;
        let day = f.get::<Timestamp>("day")?;
        let standard = f.required_string("default")?;
        let vegetarian = f.optional_string("vegetarian")?;
        let dessert = f.optional_string("dessert")?;
        let evening = f.optional_string("evening")?;
        Ok(Self {
            id,
            day,
            standard,
            vegetarian,
            dessert,
            evening,
        })
    }

    fn simplify(&self) -> Vec<Value> {
        vec![
            json!(self.id.simplify()),
            json!(self.day.simplify()),
            json!(self.standard),
            json!(self.vegetarian),
            json!(self.dessert),
            json!(self.evening),
        ]
    }

    fn to_storage(&self) -> FieldMap {
        as_field_map(json!({
            "uuid": self.id.simplify(),
            "day": self.day.simplify(),
            "default": self.standard,
            "vegetarian": self.vegetarian,
            "dessert": self.dessert,
            "evening": self.evening,
        }))
    }

    fn identity(&self) -> Option<&Identifier> {
        Some(&self.id)
    }
}
