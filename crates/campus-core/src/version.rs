//! # VersionNumber — Hex-Component Release Tags
//!
//! Client and API releases are tagged `v<major>.<minor>.<patch>` where each
//! component is one or two hexadecimal digits. The canonical form re-renders
//! with lowercase, un-padded hex: `V01.0A.0F` parses fine but always
//! simplifies to `v1.a.f`.

use crate::error::ValidationError;

const FIELD: &str = "version";

/// A three-component hexadecimal version number.
///
/// Ordering is lexicographic over `(major, minor, patch)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionNumber {
    major: u8,
    minor: u8,
    patch: u8,
}

fn component(part: &str) -> Option<u8> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(part, 16).ok()
}

impl VersionNumber {
    /// Construct directly from the three components.
    pub fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a `vXX.XX.XX`-shaped string (case-insensitive `v` and hex
    /// digits, 1–2 digits per component).
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for any other shape.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let s = value.as_ref().trim();
        let rest = s
            .strip_prefix('v')
            .or_else(|| s.strip_prefix('V'))
            .ok_or_else(|| ValidationError::new(FIELD, "format not known/supported"))?;
        let mut parts = rest.split('.');
        let (major, minor, patch) = match (parts.next(), parts.next(), parts.next(), parts.next())
        {
            (Some(a), Some(b), Some(c), None) => (component(a), component(b), component(c)),
            _ => return Err(ValidationError::new(FIELD, "format not known/supported")),
        };
        match (major, minor, patch) {
            (Some(major), Some(minor), Some(patch)) => Ok(Self {
                major,
                minor,
                patch,
            }),
            _ => Err(ValidationError::new(FIELD, "format not known/supported")),
        }
    }

    /// The major component.
    pub fn major(&self) -> u8 {
        self.major
    }

    /// The minor component.
    pub fn minor(&self) -> u8 {
        self.minor
    }

    /// The patch component.
    pub fn patch(&self) -> u8 {
        self.patch
    }

    /// Canonical form: lowercase, un-padded hex (`v1.a.f`).
    pub fn simplify(&self) -> String {
        format!("v{:x}.{:x}.{:x}", self.major, self.minor, self.patch)
    }
}

impl std::fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.simplify())
    }
}

impl std::str::FromStr for VersionNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl_canonical_serde!(VersionNumber);
