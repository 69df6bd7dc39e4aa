//! # IntervalExpression — Applicability Windows Over Timestamps
//!
//! Records that only apply for a while (timetables, calendar entries, app
//! versions) carry an interval expression: a window over day or millisecond
//! offsets, sharing the `D`/`DT` granularity tag with [`Timestamp`].
//!
//! Accepted encodings:
//!
//! - closed: `D5-D10`
//! - open-ended: `D5-` (from) and `-D10` (until)
//! - symmetric: `D5+-D2`, centered on 5 with radius 2, resolving to `[3, 7]`
//!
//! The symmetric sugar does not survive canonicalization — `simplify()`
//! always renders the resolved `start-end` shape, and equality is on the
//! resolved bounds. Containment is end-inclusive; comparing a day-granular
//! window against a millisecond instant widens each day bound to the full
//! day (the end bound by adding one day).

use crate::error::ValidationError;
use crate::timestamp::{Timestamp, MILLIS_PER_DAY};

const FIELD: &str = "range";

/// A window over lesson/day offsets with possibly-unbounded sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntervalExpression {
    has_time: bool,
    start: Option<i64>,
    end: Option<i64>,
}

/// Parse one bound token: `D<n>` or `DT<n>` (case-insensitive, optionally
/// negative). Returns `(has_time, value)`.
fn bound(token: &str) -> Result<(bool, i64), ValidationError> {
    let err = || ValidationError::new(FIELD, "format not known/supported");
    let rest = token
        .strip_prefix('D')
        .or_else(|| token.strip_prefix('d'))
        .ok_or_else(err)?;
    let (has_time, digits) = match rest.strip_prefix('T').or_else(|| rest.strip_prefix('t')) {
        Some(r) => (true, r),
        None => (false, rest),
    };
    let unsigned = digits.strip_prefix('-').unwrap_or(digits);
    if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }
    let value = digits
        .parse::<i64>()
        .map_err(|_| ValidationError::new(FIELD, "bound out of range"))?;
    Ok((has_time, value))
}

/// Find the dash separating the two bound tokens: the first `-` that is
/// followed by a `D`/`d` tag or ends the string. A `-` inside a negative
/// bound is always followed by a digit and never matches.
fn split_bounds(s: &str) -> Option<(&str, &str)> {
    for (i, c) in s.char_indices() {
        if c != '-' {
            continue;
        }
        let rest = &s[i + 1..];
        if rest.is_empty() || rest.starts_with(['D', 'd']) {
            return Some((&s[..i], rest));
        }
    }
    None
}

impl IntervalExpression {
    /// Parse any of the accepted window encodings.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for malformed input, mismatched
    /// granularity tags, or a window with no bounds at all.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let s = value.as_ref().trim();
        let err = || ValidationError::new(FIELD, "format not known/supported");

        if let Some((center, radius)) = s.split_once("+-") {
            let (center_time, center) = bound(center)?;
            let (radius_time, radius) = bound(radius)?;
            if center_time != radius_time {
                return Err(ValidationError::new(FIELD, "mixed granularity tags"));
            }
            return Ok(Self {
                has_time: center_time,
                start: Some(center.saturating_sub(radius)),
                end: Some(center.saturating_add(radius)),
            });
        }

        let Some((left, right)) = split_bounds(s) else {
            return Err(err());
        };
        let start = if left.is_empty() {
            None
        } else {
            Some(bound(left)?)
        };
        let end = if right.is_empty() {
            None
        } else {
            Some(bound(right)?)
        };
        match (start, end) {
            (None, None) => Err(err()),
            (Some((t, s0)), Some((t1, e0))) => {
                if t != t1 {
                    return Err(ValidationError::new(FIELD, "mixed granularity tags"));
                }
                Ok(Self {
                    has_time: t,
                    start: Some(s0),
                    end: Some(e0),
                })
            }
            (Some((t, s0)), None) => Ok(Self {
                has_time: t,
                start: Some(s0),
                end: None,
            }),
            (None, Some((t, e0))) => Ok(Self {
                has_time: t,
                start: None,
                end: Some(e0),
            }),
        }
    }

    /// True when the bounds are millisecond-granular (`DT` tags).
    pub fn has_time(&self) -> bool {
        self.has_time
    }

    /// The resolved lower bound; `None` means unbounded below.
    pub fn start(&self) -> Option<i64> {
        self.start
    }

    /// The resolved upper bound; `None` means unbounded above.
    pub fn end(&self) -> Option<i64> {
        self.end
    }

    /// Widen a day bound to milliseconds; the end bound becomes
    /// end-of-day-inclusive by adding one day.
    fn millis_bounds(&self) -> (Option<i64>, Option<i64>) {
        if self.has_time {
            (self.start, self.end)
        } else {
            (
                self.start.map(|s| s.saturating_mul(MILLIS_PER_DAY)),
                self.end
                    .map(|e| e.saturating_add(1).saturating_mul(MILLIS_PER_DAY)),
            )
        }
    }

    /// End-inclusive containment of an instant.
    pub fn contains(&self, time: &Timestamp) -> bool {
        if self.has_time == time.has_time() {
            self.start.map_or(true, |s| time.raw() >= s)
                && self.end.map_or(true, |e| time.raw() <= e)
        } else {
            let value = time.to_unix_millis();
            let (start, end) = self.millis_bounds();
            start.map_or(true, |s| value >= s) && end.map_or(true, |e| value <= e)
        }
    }

    /// True when the instant falls strictly before the window opens.
    ///
    /// A day-granular instant compared against a millisecond window counts
    /// as before only if its whole day is before the start.
    pub fn is_before(&self, time: &Timestamp) -> bool {
        let Some(start) = self.start else {
            return false;
        };
        if self.has_time == time.has_time() {
            time.raw() < start
        } else {
            let value = if time.has_time() {
                time.raw()
            } else {
                time.raw().saturating_add(1).saturating_mul(MILLIS_PER_DAY)
            };
            let start = if self.has_time {
                start
            } else {
                start.saturating_mul(MILLIS_PER_DAY)
            };
            value < start
        }
    }

    /// True when the instant falls strictly after the window closes.
    pub fn is_after(&self, time: &Timestamp) -> bool {
        let Some(end) = self.end else {
            return false;
        };
        if self.has_time == time.has_time() {
            time.raw() > end
        } else {
            let value = time.to_unix_millis();
            let end = if self.has_time {
                end
            } else {
                end.saturating_add(1).saturating_mul(MILLIS_PER_DAY)
            };
            value > end
        }
    }

    fn render(&self, bound: Option<i64>) -> String {
        match bound {
            Some(v) if self.has_time => format!("DT{v}"),
            Some(v) => format!("D{v}"),
            None => String::new(),
        }
    }

    /// Canonical form: the resolved `start-end` shape, open sides empty.
    pub fn simplify(&self) -> String {
        format!("{}-{}", self.render(self.start), self.render(self.end))
    }
}

impl std::fmt::Display for IntervalExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.simplify())
    }
}

impl std::str::FromStr for IntervalExpression {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl_canonical_serde!(IntervalExpression);

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    // ---- parsing ----

    #[test]
    fn test_parse_closed() {
        let r = IntervalExpression::parse("D5-D10").unwrap();
        assert_eq!((r.start(), r.end()), (Some(5), Some(10)));
        assert!(!r.has_time());
    }

    #[test]
    fn test_parse_open_ended() {
        let from = IntervalExpression::parse("D5-").unwrap();
        assert_eq!((from.start(), from.end()), (Some(5), None));

        let until = IntervalExpression::parse("-D10").unwrap();
        assert_eq!((until.start(), until.end()), (None, Some(10)));
    }

    #[test]
    fn test_parse_around_resolves_bounds() {
        let r = IntervalExpression::parse("D5+-D2").unwrap();
        assert_eq!((r.start(), r.end()), (Some(3), Some(7)));
    }

    #[test]
    fn test_parse_datetime_tags() {
        let r = IntervalExpression::parse("DT1000-DT2000").unwrap();
        assert!(r.has_time());
        assert_eq!((r.start(), r.end()), (Some(1000), Some(2000)));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(IntervalExpression::parse("").is_err());
        assert!(IntervalExpression::parse("-").is_err());
        assert!(IntervalExpression::parse("D5").is_err());
        assert!(IntervalExpression::parse("5-10").is_err());
        assert!(IntervalExpression::parse("D5-D").is_err());
        assert!(IntervalExpression::parse("D5+-").is_err());
        assert!(IntervalExpression::parse("-D5-D7").is_err());
    }

    #[test]
    fn test_parse_rejects_mixed_tags() {
        assert!(IntervalExpression::parse("D5-DT10").is_err());
        assert!(IntervalExpression::parse("DT5-D10").is_err());
        assert!(IntervalExpression::parse("D5+-DT2").is_err());
    }

    // ---- canonical form ----

    #[test]
    fn test_simplify_drops_around_sugar() {
        let r = IntervalExpression::parse("D5+-D2").unwrap();
        assert_eq!(r.simplify(), "D3-D7");
        assert_eq!(IntervalExpression::parse(r.simplify()).unwrap(), r);
    }

    #[test]
    fn test_simplify_open_sides() {
        assert_eq!(IntervalExpression::parse("D5-").unwrap().simplify(), "D5-");
        assert_eq!(IntervalExpression::parse("-D10").unwrap().simplify(), "-D10");
        assert_eq!(
            IntervalExpression::parse("DT1-DT2").unwrap().simplify(),
            "DT1-DT2"
        );
    }

    #[test]
    fn test_negative_resolved_bounds_roundtrip() {
        // Radius larger than center pushes the start below zero.
        let r = IntervalExpression::parse("D5+-D10").unwrap();
        assert_eq!((r.start(), r.end()), (Some(-5), Some(15)));
        assert_eq!(IntervalExpression::parse(r.simplify()).unwrap(), r);
    }

    // ---- containment, same granularity ----

    #[test]
    fn test_contains_is_end_inclusive() {
        let r = IntervalExpression::parse("D5-D10").unwrap();
        assert!(r.contains(&ts("D5")));
        assert!(r.contains(&ts("D7")));
        assert!(r.contains(&ts("D10")));
        assert!(!r.contains(&ts("D11")));
        assert!(!r.contains(&ts("D4")));
    }

    #[test]
    fn test_contains_open_sides() {
        let from = IntervalExpression::parse("D5-").unwrap();
        assert!(from.contains(&ts("D999")));
        assert!(!from.contains(&ts("D4")));

        let until = IntervalExpression::parse("-D10").unwrap();
        assert!(until.contains(&ts("D-50")));
        assert!(!until.contains(&ts("D11")));
    }

    // ---- containment, mixed granularity ----

    #[test]
    fn test_contains_day_window_vs_millis_instant() {
        let r = IntervalExpression::parse("D5-D10").unwrap();
        // Late on day 10 is still inside: the end bound covers the full day.
        let late_day_10 = ts(&format!("DT{}", 10 * MILLIS_PER_DAY + 86_399_999));
        assert!(r.contains(&late_day_10));
        // Midday on day 4 is outside.
        let midday_4 = ts(&format!("DT{}", 4 * MILLIS_PER_DAY + 43_200_000));
        assert!(!r.contains(&midday_4));
    }

    #[test]
    fn test_contains_millis_window_vs_day_instant() {
        let r = IntervalExpression::parse(&format!(
            "DT{}-DT{}",
            5 * MILLIS_PER_DAY,
            10 * MILLIS_PER_DAY
        ))
        .unwrap();
        assert!(r.contains(&ts("D7")));
        assert!(!r.contains(&ts("D11")));
    }

    // ---- before / after ----

    #[test]
    fn test_is_before_and_after() {
        let r = IntervalExpression::parse("D5-D10").unwrap();
        assert!(r.is_before(&ts("D4")));
        assert!(!r.is_before(&ts("D5")));
        assert!(r.is_after(&ts("D11")));
        assert!(!r.is_after(&ts("D10")));
    }

    #[test]
    fn test_unbounded_sides_are_never_before_or_after() {
        let from = IntervalExpression::parse("D5-").unwrap();
        assert!(!from.is_after(&ts("D999999")));

        let until = IntervalExpression::parse("-D10").unwrap();
        assert!(!until.is_before(&ts("D-999999")));
    }

    #[test]
    fn test_is_before_mixed_granularity() {
        let r = IntervalExpression::parse(&format!("DT{}-", 5 * MILLIS_PER_DAY)).unwrap();
        // Day 4 ends exactly at the start bound, so it is not strictly before.
        assert!(!r.is_before(&ts("D4")));
        assert!(r.is_before(&ts("D3")));
    }

    #[test]
    fn test_serde_roundtrip() {
        let r = IntervalExpression::parse("D3-D7").unwrap();
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, "\"D3-D7\"");
        assert_eq!(serde_json::from_str::<IntervalExpression>(&json).unwrap(), r);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Canonicalization is idempotent for all window shapes.
        #[test]
        fn parse_simplify_roundtrip(
            center in -1_000_000i64..1_000_000,
            radius in 0i64..1_000_000,
            tagged in any::<bool>(),
        ) {
            let tag = if tagged { "DT" } else { "D" };
            let r = IntervalExpression::parse(format!("{tag}{center}+-{tag}{radius}")).unwrap();
            let again = IntervalExpression::parse(r.simplify()).unwrap();
            prop_assert_eq!(again, r);
        }

        /// The around form always contains its center.
        #[test]
        fn around_contains_center(center in -1_000_000i64..1_000_000, radius in 0i64..1_000_000) {
            let r = IntervalExpression::parse(format!("D{center}+-D{radius}")).unwrap();
            let t = Timestamp::parse(format!("D{center}")).unwrap();
            prop_assert!(r.contains(&t));
        }
    }
}
