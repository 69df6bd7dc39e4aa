//! # Reports — Client Error and Feedback Submissions
//!
//! Both report types share the same envelope — who sent it, when, from
//! which client build and platform — and the same follow-up tail: an
//! optional reply message plus the timestamps of when the reply went out
//! and when the report was handled.
//!
//! - [`ErrorReport`] carries the crash detail: when it occurred, the error
//!   text, and the stack trace.
//! - [`FeedbackReport`] carries the user's words: an optional name, an
//!   optional contact identifier, and the feedback text.

use serde_json::{json, Value};

use campus_core::{Identifier, Timestamp, ValidationError, VersionNumber};

use crate::enums::{Enumerated, Platform};
use crate::record::Record;
use crate::schema::{as_field_map, FieldMap, Fields, RecordSchema};

/// A crash/error submission from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    /// The report's identifier.
    pub id: Identifier,
    /// When the report was submitted.
    pub time: Timestamp,
    /// The client build that submitted it.
    pub version: VersionNumber,
    /// The client's user-agent string.
    pub user_agent: String,
    /// The submitting platform.
    pub platform: Platform,
    /// When the error occurred on the client.
    pub occurred_at: Timestamp,
    /// The error text.
    pub error: String,
    /// The captured stack trace.
    pub stack: String,
    /// Reply to send the user on request, if any.
    pub msg_on_req: Option<String>,
    /// When the reply was sent.
    pub send_msg_on_req: Option<Timestamp>,
    /// When the report was handled.
    pub handled: Option<Timestamp>,
}

impl Record for ErrorReport {
    const SCHEMA: RecordSchema = RecordSchema {
        record: "error_report",
        columns: &[
            "uuid",
            "time",
            "version",
            "user_agent",
            "platform",
            "occurred_at",
            "error",
            "stack",
            "msg_on_req",
            "send_msg_on_req",
            "handled",
        ],
    };

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let f = Fields::new(fields);
        Ok(Self {
            id: f.get::<Identifier>("uuid")?,
            time: f.get::<Timestamp>("time")?,
            version: f.get::<VersionNumber>("version")?,
            user_agent: f.required_string("user_agent")?,
            platform: f.enumerated::<Platform>("platform")?,
            occurred_at: f.get::<Timestamp>("occurred_at")?,
            error: f.required_string("error")?,
            stack: f.required_string("stack")?,
            msg_on_req: f.optional_string("msg_on_req")?,
            send_msg_on_req: f.opt::<Timestamp>("send_msg_on_req")?,
            handled: f.opt::<Timestamp>("handled")?,
        })
    }

    fn simplify(&self) -> Vec<Value> {
        vec![
            json!(self.id.simplify()),
            json!(self.time.simplify()),
            json!(self.version.simplify()),
            json!(self.user_agent),
            json!(self.platform.index()),
            json!(self.occurred_at.simplify()),
            json!(self.error),
            json!(self.stack),
            json!(self.msg_on_req),
            json!(self.send_msg_on_req.map(|t| t.simplify())),
            json!(self.handled.map(|t| t.simplify())),
        ]
    }

    fn to_storage(&self) -> FieldMap {
        as_field_map(json!({
            "uuid": self.id.simplify(),
            "time": self.time.simplify(),
            "version": self.version.simplify(),
            "user_agent": self.user_agent,
            "platform": self.platform.as_str(),
            "occurred_at": self.occurred_at.simplify(),
            "error": self.error,
            "stack": self.stack,
            "msg_on_req": self.msg_on_req,
            "send_msg_on_req": self.send_msg_on_req.map(|t| t.simplify()),
            "handled": self.handled.map(|t| t.simplify()),
        }))
    }

    fn identity(&self) -> Option<&Identifier> {
        Some(&self.id)
    }
}

/// A feedback submission from a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackReport {
    /// The report's identifier.
    pub id: Identifier,
    /// When the report was submitted.
    pub time: Timestamp,
    /// The client build that submitted it.
    pub version: VersionNumber,
    /// The client's user-agent string.
    pub user_agent: String,
    /// The submitting platform.
    pub platform: Platform,
    /// The user's name, if given.
    pub name: Option<String>,
    /// The user's contact identifier, if given.
    pub email: Option<Identifier>,
    /// The feedback text.
    pub content: String,
    /// Reply to send the user on request, if any.
    pub msg_on_req: Option<String>,
    /// When the reply was sent.
    pub send_msg_on_req: Option<Timestamp>,
    /// When the report was handled.
    pub handled: Option<Timestamp>,
}

impl Record for FeedbackReport {
    const SCHEMA: RecordSchema = RecordSchema {
        record: "feedback_report",
        columns: &[
            "uuid",
            "time",
            "version",
            "user_agent",
            "platform",
            "name",
            "email",
            "content",
            "msg_on_req",
            "send_msg_on_req",
            "handled",
        ],
    };

    fn from_fields(fields: &FieldMap) -> Result<Self, ValidationError> {
        let f = Fields::new(fields);
        Ok(Self {
            id: f.get::<Identifier>("uuid")?,
            time: f.get::<Timestamp>("time")?,
            version: f.get::<VersionNumber>("version")?,
            user_agent: f.required_string("user_agent")?,
            platform: f.enumerated::<Platform>("platform")?,
            name: f.optional_string("name")?,
            email: f.opt::<Identifier>("email")?,
            content: f.required_string("content")?,
            msg_on_req: f.optional_string("msg_on_req")?,
            send_msg_on_req: f.opt::<Timestamp>("send_msg_on_req")?,
            handled: f.opt::<Timestamp>("handled")?,
        })
    }

    fn simplify(&self) -> Vec<Value> {
        vec![
            json!(self.id.simplify()),
            json!(self.time.simplify()),
            json!(self.version.simplify()),
            json!(self.user_agent),
            json!(self.platform.index()),
            json!(self.name),
            json!(self.email.as_ref().map(|e| e.simplify())),
            json!(self.content),
            json!(self.msg_on_req),
            json!(self.send_msg_on_req.map(|t| t.simplify())),
            json!(self.handled.map(|t| t.simplify())),
        ]
    }

    fn to_storage(&self) -> FieldMap {
        as_field_map(json!({
            "uuid": self.id.simplify(),
            "time": self.time.simplify(),
            "version": self.version.simplify(),
            "user_agent": self.user_agent,
            "platform": self.platform.as_str(),
            "name": self.name,
            "email": self.email.as_ref().map(|e| e.simplify()),
            "content": self.content,
            "msg_on_req": self.msg_on_req,
            "send_msg_on_req": self.send_msg_on_req.map(|t| t.simplify()),
            "handled": self.handled.map(|t| t.simplify()),
        }))
    }

    fn identity(&self) -> Option<&Identifier> {
        Some(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_fields() -> FieldMap {
        as_field_map(json!({
            "uuid": "e1@school.example.org",
            "time": "DT1700000000000",
            "version": "v1.2.3",
            "user_agent": "campus-ios/1.2.3",
            "platform": "ios",
            "occurred_at": "DT1699999990000",
            "error": "TypeError: undefined is not a function",
            "stack": "at render (app.js:42)",
        }))
    }

    fn feedback_fields() -> FieldMap {
        as_field_map(json!({
            "uuid": "f1@school.example.org",
            "time": "DT1700000000000",
            "version": "v1.2.3",
            "user_agent": "campus-android/1.2.3",
            "platform": 1,
            "content": "The timetable widget is great.",
            "email": "someone@school.example.org",
        }))
    }

    #[test]
    fn test_error_report_minimal() {
        let report = ErrorReport::from_fields(&error_fields()).unwrap();
        assert_eq!(report.platform, Platform::Ios);
        assert_eq!(report.msg_on_req, None);
        assert_eq!(report.handled, None);
    }

    #[test]
    fn test_error_report_requires_stack() {
        let mut fields = error_fields();
        fields.remove("stack");
        let err = ErrorReport::from_fields(&fields).unwrap_err();
        assert_eq!(err.field(), "stack");
    }

    #[test]
    fn test_error_report_follow_up_tail() {
        let mut fields = error_fields();
        fields.insert("msg_on_req".into(), json!("fixed in v1.2.4"));
        fields.insert("send_msg_on_req".into(), json!("DT1700000100000"));
        fields.insert("handled".into(), json!("DT1700000200000"));
        let report = ErrorReport::from_fields(&fields).unwrap();
        assert!(report.handled.unwrap().has_time());
    }

    #[test]
    fn test_error_report_wire_roundtrip() {
        let mut fields = error_fields();
        fields.insert("handled".into(), json!("DT1700000200000"));
        let report = ErrorReport::from_fields(&fields).unwrap();
        let row = report.simplify();
        assert_eq!(row.len(), ErrorReport::SCHEMA.columns.len());
        assert_eq!(ErrorReport::from_row(&row).unwrap(), report);
    }

    #[test]
    fn test_feedback_report_optional_sender() {
        let report = FeedbackReport::from_fields(&feedback_fields()).unwrap();
        assert_eq!(report.name, None);
        assert_eq!(
            report.email.as_ref().map(|e| e.simplify()).as_deref(),
            Some("someone@school.example.org")
        );
        assert_eq!(report.platform, Platform::Android);
    }

    #[test]
    fn test_feedback_report_requires_content() {
        let mut fields = feedback_fields();
        fields.insert("content".into(), json!(""));
        let err = FeedbackReport::from_fields(&fields).unwrap_err();
        assert_eq!(err.field(), "content");
    }

    #[test]
    fn test_feedback_report_rejects_bad_email() {
        let mut fields = feedback_fields();
        fields.insert("email".into(), json!("not an identifier"));
        let err = FeedbackReport::from_fields(&fields).unwrap_err();
        assert_eq!(err.field(), "email");
    }

    #[test]
    fn test_feedback_report_wire_roundtrip() {
        let report = FeedbackReport::from_fields(&feedback_fields()).unwrap();
        let row = report.simplify();
        assert_eq!(row.len(), FeedbackReport::SCHEMA.columns.len());
        assert_eq!(FeedbackReport::from_row(&row).unwrap(), report);
    }

    #[test]
    fn test_storage_renders_platform_label() {
        let report = FeedbackReport::from_fields(&feedback_fields()).unwrap();
        assert_eq!(report.to_storage().get("platform"), Some(&json!("android")));
    }
}
