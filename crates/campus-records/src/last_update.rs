//! # LastUpdate — Per-Category Freshness Bookkeeping
//!
//! Clients poll one tiny table to find out what changed: one row per data
//! category with the timestamp of its last modification. Unkeyed — content
//! equality only.

use serde_json::{json, Value};

use campus_core::{Timestamp, ValidationError};

use crate::enums::{Enumerated, UpdateCategory};
use crate::record::Record;
use crate::schema::{as_field_map, FieldMap, Fields, RecordSchema};

/// A validated last-update row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastUpdate {
    /// The data category this row tracks.
    pub category: UpdateCategory,
    /// When that category last changed.
    pub last_update: Timestamp,
}

impl LastUpdate {
    /// Whether this row tracks the given category.
    pub fn is_category(&self, category: UpdateCategory) -> bool {
        self.category == category
    }
}

impl Record for LastUpdate {
    const SCHEMA: RecordSchema = RecordSchema {
        record: "last_update",
        columns: &["category", "last_update"],
    };

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let f = Fields::new(fields);
        Ok(Self {
            category: f.enumerated::<UpdateCategory>("category")?,
            last_update: f.get::<Timestamp>("last_update")?,
        })
    }

    fn simplify(&self) -> Vec<Value> {
        vec![
            json!(self.category.index()),
            json!(self.last_update.simplify()),
        ]
    }

    fn to_storage(&self) -> FieldMap {
        as_field_map(json!({
            "category": self.category.as_str(),
            "last_update": self.last_update.simplify(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_fields() -> FieldMap {
        as_field_map(json!({
            "category": "stand-in",
            "last_update": "DT1700000000000",
        }))
    }

    #[test]
    fn test_from_fields() {
        let row = LastUpdate::from_fields(&base_fields()).unwrap();
        assert_eq!(row.category, UpdateCategory::StandIn);
        assert!(row.is_category(UpdateCategory::StandIn));
        assert!(!row.is_category(UpdateCategory::Menu));
    }

    #[test]
    fn test_category_accepts_index() {
        let mut fields = base_fields();
        fields.insert("category".into(), json!(4));
        let row = LastUpdate::from_fields(&fields).unwrap();
        assert_eq!(row.category, UpdateCategory::StandIn);
    }

    #[test]
    fn test_rejects_unknown_category() {
        let mut fields = base_fields();
        fields.insert("category".into(), json!("weather"));
        let err = LastUpdate::from_fields(&fields).unwrap_err();
        assert_eq!(err.field(), "category");
    }

    #[test]
    fn test_wire_roundtrip() {
        let row = LastUpdate::from_fields(&base_fields()).unwrap();
        let wire = row.simplify();
        assert_eq!(wire, vec![json!(4), json!("DT1700000000000")]);
        assert_eq!(LastUpdate::from_row(&wire).unwrap(), row);
    }

    #[test]
    fn test_storage_renders_label() {
        let row = LastUpdate::from_fields(&base_fields()).unwrap();
        assert_eq!(row.to_storage().get("category"), Some(&json!("stand-in")));
    }
}
