//! # Enumeration Sets — Integer-Indexed Label Tables
//!
//! Bounded categorical fields are stored as an enum backed by a fixed,
//! ordered label table. The wire form transmits the integer index, the
//! storage form the label, and the shared validator accepts either — an
//! in-range index or a trimmed, case-insensitive label — producing
//! identical internal state both ways.
//!
//! One definition per set, used across the entire stack; an exhaustive
//! `match` in `from_index` keeps the table and the variants in lockstep at
//! compile time.

use serde_json::Value;

use campus_core::ValidationError;

/// A bounded categorical value backed by an ordered label table.
pub trait Enumerated: Sized + Copy {
    /// The ordered label table; `LABELS[v.index()]` is `v.as_str()`.
    const LABELS: &'static [&'static str];

    /// The variant at `index`, if in range.
    fn from_index(index: usize) -> Option<Self>;

    /// The integer index transmitted on the wire.
    fn index(self) -> usize;

    /// The label rendered into storage rows.
    fn as_str(self) -> &'static str {
        Self::LABELS[self.index()]
    }

    /// Look up a variant by trimmed, case-insensitive label.
    fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::LABELS
            .iter()
            .position(|l| l.eq_ignore_ascii_case(label))
            .and_then(Self::from_index)
    }

    /// The shared enum-validator contract: accept an integer index or a
    /// string label.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] scoped to `field` for an out-of-range
    /// index, an unknown label, or any other value shape.
    fn from_wire(field: &str, value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .and_then(|i| usize::try_from(i).ok())
                .and_then(Self::from_index)
                .ok_or_else(|| ValidationError::new(field, "out of bounds")),
            Value::String(s) => Self::from_label(s)
                .ok_or_else(|| ValidationError::new(field, "label not known/supported")),
            _ => Err(ValidationError::new(field, "not an index nor label")),
        }
    }
}

macro_rules! enumeration {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl Enumerated for $name {
            const LABELS: &'static [&'static str] = &[$($label),+];

            fn from_index(index: usize) -> Option<Self> {
                [$($name::$variant),+].get(index).copied()
            }

            fn index(self) -> usize {
                self as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

enumeration! {
    /// The client platform a report or endpoint entry belongs to.
    Platform {
        /// The iOS client.
        Ios = "ios",
        /// The Android client.
        Android = "android",
        /// The backend itself.
        Backend = "backend",
    }
}

enumeration! {
    /// Teaching days; the timetable grid has no weekend columns.
    Weekday {
        Monday = "monday",
        Tuesday = "tuesday",
        Wednesday = "wednesday",
        Thursday = "thursday",
        Friday = "friday",
    }
}

enumeration! {
    /// Week-parity regularity of a lesson.
    Regularity {
        /// Every week.
        Always = "always",
        /// Odd calendar weeks only.
        Uneven = "uneven",
        /// Even calendar weeks only.
        Even = "even",
    }
}

enumeration! {
    /// What a timetable's master field refers to.
    TimetableKind {
        /// A school class; the master is a class discriminator.
        Class = "class",
        /// A teacher; the master is the teacher's shorthand.
        Teacher = "teacher",
        /// A room; the master is the room name.
        Room = "room",
    }
}

enumeration! {
    /// The two stand-in record shapes.
    StandInKind {
        /// A substitution with the full detail field set.
        Default = "default",
        /// A message-of-the-day announcement.
        Motd = "motd",
    }
}

enumeration! {
    /// Subcategory of an announcement stand-in.
    AnnouncementKind {
        /// Free-form announcement.
        Other = "other",
        /// Classes absent for the day.
        AbsentClasses = "absentclasses",
        /// Teachers absent for the day.
        AbsentTeachers = "absentteachers",
    }
}

enumeration! {
    /// The data categories tracked by last-update bookkeeping.
    UpdateCategory {
        Timetables = "timetables",
        Rooms = "rooms",
        Teachers = "teachers",
        Menu = "menu",
        StandIn = "stand-in",
        Calendar = "calendar",
        LessonRanges = "lessonranges",
        Version = "version",
    }
}
