//! # Timestamp — Day- or Millisecond-Granular Instants
//!
//! A `Timestamp` is a single integer offset from the Unix epoch plus a
//! granularity tag: `Date` counts whole days, `DateTime` counts
//! milliseconds. The textual encoding carries the tag (`D<n>` for dates,
//! `DT<n>` for date-times) and the two granularities never compare equal,
//! even for the same numeric offset — `D100` and `DT100` are different
//! instants in kind, not just precision.
//!
//! Calendar math (ISO week numbers, weekday lookup, year/month/day
//! construction) is delegated to `chrono`; the offset representation itself
//! stays a plain integer so wire and storage forms are trivially stable.

use chrono::{Datelike, Duration, NaiveDate, Utc};

use crate::error::ValidationError;

const FIELD: &str = "timestamp";

/// Milliseconds in one day.
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Whether a [`Timestamp`] counts days or milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// Whole days since the Unix epoch.
    Date,
    /// Milliseconds since the Unix epoch.
    DateTime,
}

/// An instant at day or millisecond granularity.
///
/// The granularity is fixed at construction. All operations preserve it
/// except [`Timestamp::day_in_week`], which always yields a `Date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timestamp {
    raw: i64,
    granularity: Granularity,
}

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch is a valid date")
}

impl Timestamp {
    /// Parse the tagged textual encoding: `D<n>` (date) or `DT<n>`
    /// (date-time), case-insensitive, optionally negative offset.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for any other shape.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let s = value.as_ref().trim();
        let rest = s
            .strip_prefix('D')
            .or_else(|| s.strip_prefix('d'))
            .ok_or_else(|| ValidationError::new(FIELD, "format not known/supported"))?;
        let (granularity, digits) = match rest.strip_prefix('T').or_else(|| rest.strip_prefix('t'))
        {
            Some(r) => (Granularity::DateTime, r),
            None => (Granularity::Date, rest),
        };
        let unsigned = digits.strip_prefix('-').unwrap_or(digits);
        if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::new(FIELD, "format not known/supported"));
        }
        let raw = digits
            .parse::<i64>()
            .map_err(|_| ValidationError::new(FIELD, "offset out of bounds"))?;
        Ok(Self { raw, granularity })
    }

    /// Construct a day-granular timestamp from a calendar date
    /// (month `1..=12`, day validated against the month).
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the triple is not a real date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ValidationError> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| ValidationError::new(FIELD, "not a valid calendar date"))?;
        Ok(Self {
            raw: date.signed_duration_since(epoch()).num_days(),
            granularity: Granularity::Date,
        })
    }

    /// The current instant at millisecond granularity.
    pub fn now() -> Self {
        Self {
            raw: Utc::now().timestamp_millis(),
            granularity: Granularity::DateTime,
        }
    }

    /// The current day at day granularity.
    pub fn today() -> Self {
        Self {
            raw: Utc::now().timestamp_millis().div_euclid(MILLIS_PER_DAY),
            granularity: Granularity::Date,
        }
    }

    /// The raw integer offset (days or milliseconds, per granularity).
    pub fn raw(&self) -> i64 {
        self.raw
    }

    /// The granularity tag.
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// True for millisecond granularity.
    pub fn has_time(&self) -> bool {
        self.granularity == Granularity::DateTime
    }

    /// The offset in milliseconds regardless of granularity.
    pub fn to_unix_millis(&self) -> i64 {
        match self.granularity {
            Granularity::Date => self.raw.saturating_mul(MILLIS_PER_DAY),
            Granularity::DateTime => self.raw,
        }
    }

    fn as_date(&self) -> Result<NaiveDate, ValidationError> {
        let days = match self.granularity {
            Granularity::Date => self.raw,
            Granularity::DateTime => self.raw.div_euclid(MILLIS_PER_DAY),
        };
        Duration::try_days(days)
            .and_then(|delta| epoch().checked_add_signed(delta))
            .ok_or_else(|| ValidationError::new(FIELD, "offset out of calendar range"))
    }

    /// Thursday-anchored ISO-8601 week number of this instant's day.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the offset falls outside the
    /// representable calendar range.
    pub fn iso_week(&self) -> Result<u32, ValidationError> {
        Ok(self.as_date()?.iso_week().week())
    }

    /// The date of the given weekday within this instant's ISO week.
    ///
    /// `target` uses the Sunday = 0 convention (Monday = 1, ... Saturday =
    /// 6); Sunday resolves to the day before the week's Monday. The result
    /// is always day-granular.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for `target > 6` or an offset outside
    /// the calendar range.
    pub fn day_in_week(&self, target: u8) -> Result<Self, ValidationError> {
        if target > 6 {
            return Err(ValidationError::new("weekday", "out of bounds"));
        }
        let date = self.as_date()?;
        let back = Duration::try_days(i64::from(date.weekday().num_days_from_monday()))
            .ok_or_else(|| ValidationError::new(FIELD, "offset out of calendar range"))?;
        let monday = date
            .checked_sub_signed(back)
            .ok_or_else(|| ValidationError::new(FIELD, "offset out of calendar range"))?;
        let shifted = monday
            .checked_add_signed(Duration::days(i64::from(target) - 1))
            .ok_or_else(|| ValidationError::new(FIELD, "offset out of calendar range"))?;
        Ok(Self {
            raw: shifted.signed_duration_since(epoch()).num_days(),
            granularity: Granularity::Date,
        })
    }

    /// A copy shifted by whole days and (for date-times) milliseconds.
    ///
    /// At day granularity the millisecond component is ignored — a date
    /// cannot move by less than a day.
    #[must_use]
    pub fn offset(&self, days: i64, millis: i64) -> Self {
        let raw = match self.granularity {
            Granularity::Date => self.raw.saturating_add(days),
            Granularity::DateTime => self
                .raw
                .saturating_add(millis)
                .saturating_add(days.saturating_mul(MILLIS_PER_DAY)),
        };
        Self {
            raw,
            granularity: self.granularity,
        }
    }

    /// In-place variant of [`Timestamp::offset`]. Must not be called on an
    /// instance shared across threads.
    pub fn offset_mut(&mut self, days: i64, millis: i64) {
        *self = self.offset(days, millis);
    }

    /// Canonical textual form: `D<n>` or `DT<n>`.
    pub fn simplify(&self) -> String {
        match self.granularity {
            Granularity::Date => format!("D{}", self.raw),
            Granularity::DateTime => format!("DT{}", self.raw),
        }
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.simplify())
    }
}

impl std::str::FromStr for Timestamp {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl_canonical_serde!(Timestamp);

#[cfg(test)]
mod tests {
    use super::*;

    // ---- parsing ----

    #[test]
    fn test_parse_date() {
        let t = Timestamp::parse("D123").unwrap();
        assert_eq!(t.raw(), 123);
        assert_eq!(t.granularity(), Granularity::Date);
        assert!(!t.has_time());
    }

    #[test]
    fn test_parse_datetime() {
        let t = Timestamp::parse("DT456789").unwrap();
        assert_eq!(t.raw(), 456_789);
        assert!(t.has_time());
    }

    #[test]
    fn test_parse_case_insensitive_and_trimmed() {
        assert_eq!(Timestamp::parse(" dt42 ").unwrap(), Timestamp::parse("DT42").unwrap());
        assert_eq!(Timestamp::parse("d7").unwrap(), Timestamp::parse("D7").unwrap());
    }

    #[test]
    fn test_parse_negative_offset() {
        let t = Timestamp::parse("D-3").unwrap();
        assert_eq!(t.raw(), -3);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Timestamp::parse("").is_err());
        assert!(Timestamp::parse("D").is_err());
        assert!(Timestamp::parse("DT").is_err());
        assert!(Timestamp::parse("123").is_err());
        assert!(Timestamp::parse("T123").is_err());
        assert!(Timestamp::parse("D12.5").is_err());
        assert!(Timestamp::parse("D+5").is_err());
        assert!(Timestamp::parse("D99999999999999999999999").is_err());
    }

    // ---- granularity identity ----

    #[test]
    fn test_granularity_is_part_of_identity() {
        let date = Timestamp::parse("D100").unwrap();
        let datetime = Timestamp::parse("DT100").unwrap();
        assert_ne!(date, datetime);
    }

    // ---- calendar construction ----

    #[test]
    fn test_from_ymd_epoch() {
        assert_eq!(Timestamp::from_ymd(1970, 1, 1).unwrap().raw(), 0);
        assert_eq!(Timestamp::from_ymd(1970, 1, 2).unwrap().raw(), 1);
    }

    #[test]
    fn test_from_ymd_is_date_granular() {
        let t = Timestamp::from_ymd(2026, 8, 6).unwrap();
        assert_eq!(t.granularity(), Granularity::Date);
    }

    #[test]
    fn test_from_ymd_rejects_impossible_dates() {
        assert!(Timestamp::from_ymd(2026, 2, 30).is_err());
        assert!(Timestamp::from_ymd(2026, 13, 1).is_err());
        assert!(Timestamp::from_ymd(2026, 0, 1).is_err());
    }

    // ---- ISO week ----

    #[test]
    fn test_iso_week_first_thursday() {
        // 2026-01-01 is a Thursday, so it opens ISO week 1.
        let t = Timestamp::from_ymd(2026, 1, 1).unwrap();
        assert_eq!(t.iso_week().unwrap(), 1);
    }

    #[test]
    fn test_iso_week_year_boundary() {
        // 2021-01-01 is a Friday and still belongs to week 53 of 2020.
        let t = Timestamp::from_ymd(2021, 1, 1).unwrap();
        assert_eq!(t.iso_week().unwrap(), 53);
    }

    #[test]
    fn test_iso_week_datetime_granularity() {
        let date = Timestamp::from_ymd(2026, 1, 7).unwrap();
        let millis = Timestamp::parse(format!("DT{}", date.raw() * MILLIS_PER_DAY + 3_600_000))
            .unwrap();
        assert_eq!(millis.iso_week().unwrap(), date.iso_week().unwrap());
    }

    // ---- weekday lookup ----

    #[test]
    fn test_day_in_week() {
        // 2026-01-07 is a Wednesday in the week of Monday 2026-01-05.
        let t = Timestamp::from_ymd(2026, 1, 7).unwrap();
        assert_eq!(t.day_in_week(1).unwrap(), Timestamp::from_ymd(2026, 1, 5).unwrap());
        assert_eq!(t.day_in_week(4).unwrap(), Timestamp::from_ymd(2026, 1, 8).unwrap());
        assert_eq!(t.day_in_week(6).unwrap(), Timestamp::from_ymd(2026, 1, 10).unwrap());
        // Sunday = 0 resolves to the day before the week's Monday.
        assert_eq!(t.day_in_week(0).unwrap(), Timestamp::from_ymd(2026, 1, 4).unwrap());
    }

    #[test]
    fn test_day_in_week_rejects_out_of_bounds() {
        let t = Timestamp::from_ymd(2026, 1, 7).unwrap();
        assert!(t.day_in_week(7).is_err());
    }

    // ---- offsetting ----

    #[test]
    fn test_offset_date_ignores_millis() {
        let t = Timestamp::parse("D10").unwrap();
        assert_eq!(t.offset(5, 999_999), Timestamp::parse("D15").unwrap());
    }

    #[test]
    fn test_offset_datetime() {
        let t = Timestamp::parse("DT1000").unwrap();
        let shifted = t.offset(1, 500);
        assert_eq!(shifted.raw(), 1000 + MILLIS_PER_DAY + 500);
    }

    #[test]
    fn test_offset_mut_matches_offset() {
        let t = Timestamp::parse("DT1000").unwrap();
        let mut m = t;
        m.offset_mut(2, -100);
        assert_eq!(m, t.offset(2, -100));
    }

    // ---- conversions ----

    #[test]
    fn test_to_unix_millis() {
        assert_eq!(Timestamp::parse("D2").unwrap().to_unix_millis(), 2 * MILLIS_PER_DAY);
        assert_eq!(Timestamp::parse("DT555").unwrap().to_unix_millis(), 555);
    }

    #[test]
    fn test_now_and_today_granularities() {
        assert!(Timestamp::now().has_time());
        assert!(!Timestamp::today().has_time());
    }

    // ---- canonical form ----

    #[test]
    fn test_simplify_roundtrip() {
        for s in ["D0", "D123", "DT456", "D-7"] {
            let t = Timestamp::parse(s).unwrap();
            assert_eq!(t.simplify(), s);
            assert_eq!(Timestamp::parse(t.simplify()).unwrap(), t);
        }
    }

    #[test]
    fn test_serde_roundtrip() {
        let t = Timestamp::parse("DT789").unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"DT789\"");
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
