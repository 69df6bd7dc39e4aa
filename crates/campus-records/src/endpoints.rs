//! # Endpoints — Published Client Version Matrix
//!
//! One row per published client build: which platform it targets, which
//! API version it speaks, and the rollout flags the clients use to decide
//! whether to nag for an update. Unkeyed — two rows are the same row
//! exactly when their content matches.

use serde_json::{json, Value};

use campus_core::{ValidationError, VersionNumber};

use crate::enums::{Enumerated, Platform};
use crate::record::Record;
use crate::schema::{as_field_map, FieldMap, Fields, RecordSchema};

/// A validated endpoints row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// The published client version.
    pub version: VersionNumber,
    /// The platform this build targets.
    pub platform: Platform,
    /// The API version this build speaks.
    pub api_version: VersionNumber,
    /// True for the build clients should move to.
    pub is_recommended: bool,
    /// True once the build is too old to support.
    pub is_outdated: bool,
    /// True for internal development builds.
    pub dev_version: bool,
}

impl Endpoints {
    /// Whether this row targets the given platform.
    pub fn is_platform(&self, platform: Platform) -> bool {
        self.platform == platform
    }
}

impl Record for Endpoints {
    const SCHEMA: RecordSchema = RecordSchema {
        record: "endpoints",
        columns: &[
            "version",
            "platform",
            "api_version",
            "is_recommended",
            "is_outdated",
            "dev_version",
        ],
    };

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let f = Fields::new(fields);
        Ok(Self {
            version: f.get::<VersionNumber>("version")?,
            platform: f.enumerated::<Platform>("platform")?,
            api_version: f.get::<VersionNumber>("api_version")?,
            is_recommended: f.boolean("is_recommended")?,
            is_outdated: f.boolean("is_outdated")?,
            dev_version: f.boolean("dev_version")?,
        })
    }

    fn simplify(&self) -> Vec<Value> {
        vec![
            json!(self.version.simplify()),
            json!(self.platform.index()),
            json!(self.api_version.simplify()),
            json!(self.is_recommended),
            json!(self.is_outdated),
            json!(self.dev_version),
        ]
    }

    fn to_storage(&self) -> FieldMap {
        as_field_map(json!({
            "version": self.version.simplify(),
            "platform": self.platform.as_str(),
            "api_version": self.api_version.simplify(),
            "is_recommended": self.is_recommended,
            "is_outdated": self.is_outdated,
            "dev_version": self.dev_version,
        }))
    }
}
