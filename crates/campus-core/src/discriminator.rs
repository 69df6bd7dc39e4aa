//! # Discriminators — Class Names and Lesson Slot Labels
//!
//! Two validated categorical labels:
//!
//! - [`ClassDiscriminator`] names a school class. Any trimmed non-empty
//!   string is accepted; names matching the regular grade-and-section
//!   pattern (grade 5–12, optional section letters `a`–`d`) are tagged as
//!   regular so consumers can distinguish ordinary classes from courses and
//!   working groups.
//! - [`LessonDiscriminator`] names a lesson slot or slot range. Regular
//!   forms are a single slot (`3`) or a dashed range (`3-4`); the slashed
//!   "between" notation (`3/4`, `3/`, `/4`) marks slots that sit between
//!   the regular grid and is tagged irregular.
//!
//! Equality for both is on the normalized label only; the regularity tag is
//! derived and carries no identity.

use crate::error::ValidationError;

/// A validated school-class name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassDiscriminator {
    name: String,
    regular: bool,
}

fn is_regular_class(name: &str) -> bool {
    let digits_end = name
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(name.len(), |(i, _)| i);
    let Ok(grade) = name[..digits_end].parse::<u8>() else {
        return false;
    };
    if !(5..=12).contains(&grade) {
        return false;
    }
    name[digits_end..]
        .chars()
        .all(|c| matches!(c.to_ascii_lowercase(), 'a'..='d'))
}

impl ClassDiscriminator {
    /// Parse a class name; any trimmed non-empty string is valid.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for empty or whitespace-only input.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let name = value.as_ref().trim();
        if name.is_empty() {
            return Err(ValidationError::new("class", "not a valid string"));
        }
        Ok(Self {
            regular: is_regular_class(name),
            name: name.to_string(),
        })
    }

    /// The normalized (trimmed) class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when the name matches the regular grade-and-section pattern.
    pub fn is_regular(&self) -> bool {
        self.regular
    }

    /// Canonical form: the trimmed name.
    pub fn simplify(&self) -> String {
        self.name.clone()
    }
}

impl std::fmt::Display for ClassDiscriminator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl std::str::FromStr for ClassDiscriminator {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl_canonical_serde!(ClassDiscriminator);

/// A validated lesson-slot label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LessonDiscriminator {
    label: String,
    regular: bool,
}

fn slot(part: &str) -> bool {
    !part.is_empty() && part.len() <= 2 && part.bytes().all(|b| b.is_ascii_digit())
}

/// `N` or `N-M`, 1–2 digits per slot.
fn is_regular_slot(label: &str) -> bool {
    match label.split_once('-') {
        None => slot(label),
        Some((start, end)) => slot(start) && slot(end),
    }
}

/// Between notation: `N/M`, `N/` or `/M` — exactly one slash, each present
/// side a 1–2 digit slot, at least one side present.
fn is_between_slot(label: &str) -> bool {
    let Some((left, right)) = label.split_once('/') else {
        return false;
    };
    if right.contains('/') || (left.is_empty() && right.is_empty()) {
        return false;
    }
    (left.is_empty() || slot(left)) && (right.is_empty() || slot(right))
}

impl LessonDiscriminator {
    /// Parse a slot label. All whitespace is stripped before matching, so
    /// `"3 - 4"` normalizes to `"3-4"`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the stripped label is neither a
    /// regular slot/range nor a between form.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let label: String = value.as_ref().chars().filter(|c| !c.is_whitespace()).collect();
        if is_regular_slot(&label) {
            Ok(Self {
                label,
                regular: true,
            })
        } else if is_between_slot(&label) {
            Ok(Self {
                label,
                regular: false,
            })
        } else {
            Err(ValidationError::new("lesson", "format not known/supported"))
        }
    }

    /// The whitespace-stripped label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// True for a single slot or dashed range; false for between notation.
    pub fn is_regular(&self) -> bool {
        self.regular
    }

    /// Canonical form: the stripped label.
    pub fn simplify(&self) -> String {
        self.label.clone()
    }
}

impl std::fmt::Display for LessonDiscriminator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

impl std::str::FromStr for LessonDiscriminator {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl_canonical_serde!(LessonDiscriminator);
