//! # Identifier — Compound `local@issuer` Keys
//!
//! Every keyed record in the system is identified by a compound key: a
//! locally-generated component and the name of the issuing host, joined by
//! `@`. Both components are restricted to `[A-Za-z0-9.\-_+]` so a key is
//! always safe in URLs, log lines, and storage columns.
//!
//! An identifier whose issuer matches the current host can be resolved back
//! to the numeric value of its unique-ID token; identifiers issued elsewhere
//! are opaque. Resolution is derived on demand via
//! [`Identifier::resolve`] rather than cached — equality is component-wise
//! and never looks at the numeric form.

use crate::context::{decode_snowflake, IssuerContext};
use crate::error::ValidationError;

const FIELD: &str = "identifier";

/// Returns true when `s` is a valid identifier component
/// (non-empty, `[A-Za-z0-9.\-_+]` only).
pub(crate) fn is_component(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '+'))
}

/// A compound `local@issuer` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    local: String,
    issuer: String,
}

impl Identifier {
    /// Parse an identifier from its `local@issuer` textual form.
    ///
    /// Leading/trailing whitespace is trimmed. Exactly one `@` must be
    /// present and both components must be non-empty and inside the
    /// component character class.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] scoped to `identifier` otherwise.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let s = value.as_ref().trim();
        let Some((local, issuer)) = s.split_once('@') else {
            return Err(ValidationError::new(FIELD, "format not known/supported"));
        };
        if !is_component(local) || !is_component(issuer) {
            return Err(ValidationError::new(FIELD, "format not known/supported"));
        }
        Ok(Self {
            local: local.to_string(),
            issuer: issuer.to_string(),
        })
    }

    /// Mint a fresh identifier: next token from the context's ID source,
    /// issued under the context's host.
    pub fn mint(ctx: &IssuerContext) -> Self {
        Self {
            local: ctx.next_local(),
            issuer: ctx.host().to_string(),
        }
    }

    /// The locally-generated component (left of `@`).
    pub fn local(&self) -> &str {
        &self.local
    }

    /// The issuing host component (right of `@`).
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// The numeric value of the local token, when this host issued it.
    ///
    /// Returns `Ok(None)` for identifiers issued by a different host.
    ///
    /// # Errors
    ///
    /// Returns an error when the issuer matches but the local component is
    /// not a decodable 64-bit token.
    pub fn resolve(&self, ctx: &IssuerContext) -> Result<Option<u64>, ValidationError> {
        if self.issuer != ctx.host() {
            return Ok(None);
        }
        decode_snowflake(&self.local, 64).map(Some)
    }

    /// Canonical textual form: `local@issuer`.
    pub fn simplify(&self) -> String {
        format!("{}@{}", self.local, self.issuer)
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.local, self.issuer)
    }
}

impl std::str::FromStr for Identifier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl_canonical_serde!(Identifier);
