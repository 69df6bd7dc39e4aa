//! # LessonRange — Slot Labels Bound to Clock Times
//!
//! The bell schedule: each lesson slot is bound to a clock-time window.
//! The window may be open on one side (`"7:45-"` for "from first bell",
//! `"-8:30"` for "until second bell") but never on both.
//!
//! Clock times are canonicalized to `H:MM` with an un-padded hour and a
//! zero-padded minute, so `"07:5"` simplifies to `"7:05"`.

use serde_json::{json, Value};

use crate::discriminator::LessonDiscriminator;
use crate::error::ValidationError;

/// A wall-clock time of day (hour 0–23, minute 0–59).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Parse `H:MM` / `HH:MM` (1–2 digits per part).
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for malformed input or out-of-range
    /// hour/minute.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let s = value.as_ref().trim();
        let err = || ValidationError::new("time", "format not known/supported");
        let Some((hour, minute)) = s.split_once(':') else {
            return Err(err());
        };
        let part = |p: &str| -> Option<u8> {
            (!p.is_empty() && p.len() <= 2 && p.bytes().all(|b| b.is_ascii_digit()))
                .then(|| p.parse().ok())
                .flatten()
        };
        let (hour, minute) = match (part(hour), part(minute)) {
            (Some(h), Some(m)) => (h, m),
            _ => return Err(err()),
        };
        if hour > 23 || minute > 59 {
            return Err(ValidationError::new("time", "out of bounds"));
        }
        Ok(Self { hour, minute })
    }

    /// The hour component (0–23).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// The minute component (0–59).
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Canonical form: un-padded hour, zero-padded minute (`7:05`).
    pub fn simplify(&self) -> String {
        format!("{}:{:02}", self.hour, self.minute)
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.simplify())
    }
}

impl std::str::FromStr for ClockTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl_canonical_serde!(ClockTime);

/// A lesson slot bound to its clock-time window.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LessonRange {
    discriminator: LessonDiscriminator,
    start: Option<ClockTime>,
    end: Option<ClockTime>,
}

impl LessonRange {
    /// Build from already-validated parts. At least one bound must be
    /// present.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when both bounds are absent.
    pub fn new(
        discriminator: LessonDiscriminator,
        start: Option<ClockTime>,
        end: Option<ClockTime>,
    ) -> Result<Self, ValidationError> {
        if start.is_none() && end.is_none() {
            return Err(ValidationError::new("time", "window has no bounds"));
        }
        Ok(Self {
            discriminator,
            start,
            end,
        })
    }

    /// Parse the dashed window form: `"7:45-8:30"`, `"7:45-"` or
    /// `"-8:30"`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for a missing dash, two empty sides,
    /// or an invalid clock time on either side.
    pub fn parse_window(
        discriminator: LessonDiscriminator,
        window: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        let s = window.as_ref().trim();
        let Some((start, end)) = s.split_once('-') else {
            return Err(ValidationError::new("time", "format not known/supported"));
        };
        let side = |name: &str, part: &str| -> Result<Option<ClockTime>, ValidationError> {
            if part.is_empty() {
                Ok(None)
            } else {
                ClockTime::parse(part)
                    .map(Some)
                    .map_err(|e| ValidationError::wrap(name, e))
            }
        };
        Self::new(discriminator, side("time.start", start)?, side("time.end", end)?)
    }

    /// The slot label this window belongs to.
    pub fn discriminator(&self) -> &LessonDiscriminator {
        &self.discriminator
    }

    /// Window start, absent for "until" windows.
    pub fn start(&self) -> Option<ClockTime> {
        self.start
    }

    /// Window end, absent for "from" windows.
    pub fn end(&self) -> Option<ClockTime> {
        self.end
    }

    /// The re-joined dashed window (`"7:45-8:30"`, `"7:45-"`, `"-8:30"`).
    pub fn window(&self) -> String {
        format!(
            "{}-{}",
            self.start.map(|t| t.simplify()).unwrap_or_default(),
            self.end.map(|t| t.simplify()).unwrap_or_default(),
        )
    }

    /// Canonical named-field form: `{ "discriminator": ..., "time": ... }`.
    pub fn simplify(&self) -> Value {
        json!({
            "discriminator": self.discriminator.simplify(),
            "time": self.window(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discrim(label: &str) -> LessonDiscriminator {
        LessonDiscriminator::parse(label).unwrap()
    }

    // -- ClockTime --

    #[test]
    fn test_clock_time_parse() {
        let t = ClockTime::parse("7:45").unwrap();
        assert_eq!((t.hour(), t.minute()), (7, 45));
        assert_eq!(ClockTime::parse("07:05").unwrap().simplify(), "7:05");
    }

    #[test]
    fn test_clock_time_rejects_malformed() {
        assert!(ClockTime::parse("745").is_err());
        assert!(ClockTime::parse(":45").is_err());
        assert!(ClockTime::parse("7:").is_err());
        assert!(ClockTime::parse("7:4:5").is_err());
        assert!(ClockTime::parse("24:00").is_err());
        assert!(ClockTime::parse("7:60").is_err());
        assert!(ClockTime::parse("123:4").is_err());
    }

    #[test]
    fn test_clock_time_canonicalization_idempotent() {
        let t = ClockTime::parse("7:5").unwrap();
        assert_eq!(t.simplify(), "7:05");
        assert_eq!(ClockTime::parse(t.simplify()).unwrap(), t);
    }

    // -- LessonRange --

    #[test]
    fn test_window_closed() {
        let r = LessonRange::parse_window(discrim("1"), "7:45-8:30").unwrap();
        assert_eq!(r.start().unwrap().simplify(), "7:45");
        assert_eq!(r.end().unwrap().simplify(), "8:30");
        assert_eq!(r.window(), "7:45-8:30");
    }

    #[test]
    fn test_window_open_sides() {
        let from = LessonRange::parse_window(discrim("1"), "7:45-").unwrap();
        assert!(from.end().is_none());
        assert_eq!(from.window(), "7:45-");

        let until = LessonRange::parse_window(discrim("1"), "-8:30").unwrap();
        assert!(until.start().is_none());
        assert_eq!(until.window(), "-8:30");
    }

    #[test]
    fn test_window_rejects_malformed() {
        assert!(LessonRange::parse_window(discrim("1"), "-").is_err());
        assert!(LessonRange::parse_window(discrim("1"), "7:45").is_err());
        assert!(LessonRange::parse_window(discrim("1"), "7:45-25:00").is_err());
    }

    #[test]
    fn test_new_requires_a_bound() {
        assert!(LessonRange::new(discrim("1"), None, None).is_err());
    }

    #[test]
    fn test_window_error_names_the_side() {
        let err = LessonRange::parse_window(discrim("1"), "bad-8:30").unwrap_err();
        assert_eq!(err.field(), "time.start");
    }

    #[test]
    fn test_simplify_shape() {
        let r = LessonRange::parse_window(discrim("3/4"), "9:40-10:25").unwrap();
        assert_eq!(
            r.simplify(),
            serde_json::json!({"discriminator": "3/4", "time": "9:40-10:25"})
        );
    }
}
