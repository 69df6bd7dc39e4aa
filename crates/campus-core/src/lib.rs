//! # campus-core — Primitive Value-Objects for the Campus Stack
//!
//! This crate is the bedrock of the Campus Stack: the validated scalar
//! concepts every record type is built from. Each type accepts untrusted
//! textual input, enforces its grammar at construction, and exposes
//! `simplify()` — a deterministic canonical encoding that re-parses to an
//! equal value.
//!
//! ## Key Design Principles
//!
//! 1. **Validated constructors everywhere.** `Identifier`, `Timestamp`,
//!    `VersionNumber`, the discriminators, and `IntervalExpression` all
//!    reject malformed input with a field-scoped [`ValidationError`]. No
//!    bare strings for domain concepts.
//!
//! 2. **Canonical forms round-trip.** For every valid encoding `s`,
//!    `parse(parse(s).simplify())` equals `parse(s)`. Wire and storage
//!    layers rely on this and never re-implement the grammar.
//!
//! 3. **Granularity is identity.** A day-granular and a millisecond-granular
//!    `Timestamp` never compare equal, even at the same numeric offset.
//!
//! 4. **Collaborators are explicit.** Identifier minting and local
//!    resolution go through [`IssuerContext`] — there is no process-global
//!    host name or ID generator.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `campus-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public value types implement `Serialize`/`Deserialize` through
//!   their canonical textual form, rejecting invalid values on the way in.

/// Implements `Serialize`/`Deserialize` through a type's canonical textual
/// form: serializes as the `simplify()` string and deserializes by routing
/// through `parse()`, so invalid values are rejected at deserialization
/// time — not silently accepted.
macro_rules! impl_canonical_serde {
    ($ty:ident) => {
        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.simplify())
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                Self::parse(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

pub mod context;
pub mod discriminator;
pub mod error;
pub mod identifier;
pub mod interval;
pub mod lesson_range;
pub mod timestamp;
pub mod version;

// Re-export primary types for ergonomic imports.
pub use context::{CounterIdSource, IdSource, IssuerContext};
pub use discriminator::{ClassDiscriminator, LessonDiscriminator};
pub use error::ValidationError;
pub use identifier::Identifier;
pub use interval::IntervalExpression;
pub use lesson_range::{ClockTime, LessonRange};
pub use timestamp::{Granularity, Timestamp, MILLIS_PER_DAY};
pub use version::VersionNumber;
