//! # campus-records — Validated Domain Records for the Campus Stack
//!
//! Every record a school-information backend moves between its clients and
//! its store: calendar events, timetables and their lessons, teachers,
//! rooms, menus, stand-in entries, error and feedback reports, the
//! published version matrix, and freshness bookkeeping.
//!
//! ## Key Design Principles
//!
//! 1. **One generic validation routine.** Each record declares its
//!    [`schema::RecordSchema`] (name + positional column order) and reads
//!    its fields through [`schema::Fields`], which coerces, trims,
//!    range-checks, and field-qualifies every failure. Validation is
//!    fail-fast: one terminal [`campus_core::ValidationError`] per record.
//!
//! 2. **Two explicit entry points, two output forms.** Construction is
//!    [`Record::from_fields`] (named map) or [`Record::from_row`]
//!    (positional row) — never shape-sniffing one constructor. Output is
//!    [`Record::simplify`] (wire row, round-trips through construction) or
//!    [`Record::to_storage`] (named row, enums as labels, write-only).
//!
//! 3. **Cross-field rules hold by construction.** Gated field groups are
//!    modeled as enums and optional structs
//!    ([`calendar_event::Recurrence`], [`stand_in::StandInDetail`],
//!    [`timetable::TimetableMaster`]), so an invalid combination is not
//!    representable after validation.
//!
//! 4. **Denormalized blobs have their own codec.** A timetable's lessons
//!    flatten into one JSON storage column through
//!    [`timetable::encode_content`] / [`timetable::decode_content`], kept
//!    next to — not inside — the named-field storage mapping.
//!
//! ## Crate Policy
//!
//! - Depends only on `campus-core` internally.
//! - No `unsafe` code, no `panic!()` or `.unwrap()` outside tests.
//! - Enumerated lookup tables are compile-time constants; nothing in this
//!   crate holds mutable global state.

pub mod calendar_event;
pub mod endpoints;
pub mod enums;
pub mod last_update;
pub mod lesson;
pub mod menu;
pub mod record;
pub mod report;
pub mod room;
pub mod schema;
pub mod stand_in;
pub mod teacher;
pub mod timetable;

// Re-export primary types for ergonomic imports.
pub use calendar_event::{CalendarEvent, Recurrence};
pub use endpoints::Endpoints;
pub use enums::{
    AnnouncementKind, Enumerated, Platform, Regularity, StandInKind, TimetableKind,
    UpdateCategory, Weekday,
};
pub use last_update::LastUpdate;
pub use lesson::Lesson;
pub use menu::Menu;
pub use record::Record;
pub use report::{ErrorReport, FeedbackReport};
pub use room::Room;
pub use schema::{FieldMap, Fields, FromWire, RecordSchema};
pub use stand_in::{StandIn, StandInDetail, Substitution};
pub use teacher::Teacher;
pub use timetable::{Timetable, TimetableMaster};
