//! # Issuer Context — Collaborator Interfaces Made Explicit
//!
//! The core consumes exactly two things from the outside world: a unique-ID
//! source that mints base64 tokens, and the name of the host this process
//! issues identifiers under. Both are bundled into [`IssuerContext`] and
//! passed explicitly wherever minting or local resolution happens — there is
//! no process-global registry.
//!
//! The numeric decode of a token (`undo` in the generator's vocabulary) is a
//! pure function and lives here as [`decode_snowflake`].

use std::sync::atomic::{AtomicU64, Ordering};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use crate::error::ValidationError;

/// A source of fresh unique-ID tokens, already base64-encoded.
///
/// The distributed generator behind this trait is an external collaborator;
/// the core only ever calls [`IdSource::next`]. Tokens must use the URL-safe
/// base64 alphabet so they stay inside the identifier character class.
pub trait IdSource: Send + Sync {
    /// Mint the next unique token.
    fn next(&self) -> String;
}

/// The identity of this process as an identifier issuer.
///
/// Holds the configured host name and the unique-ID source. Identifiers
/// minted through this context carry `host` as their issuer component, and
/// only identifiers whose issuer matches `host` can be resolved back to a
/// numeric value.
pub struct IssuerContext {
    host: String,
    source: Box<dyn IdSource>,
}

impl IssuerContext {
    /// Create a context for `host` backed by `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if `host` is empty or contains characters outside
    /// the identifier component class (`[A-Za-z0-9.\-_+]`).
    pub fn new(
        host: impl Into<String>,
        source: impl IdSource + 'static,
    ) -> Result<Self, ValidationError> {
        let host = host.into();
        if !crate::identifier::is_component(&host) {
            return Err(ValidationError::new("host", "format not known/supported"));
        }
        Ok(Self {
            host,
            source: Box::new(source),
        })
    }

    /// The configured issuer host name.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Mint the next local identifier component.
    pub fn next_local(&self) -> String {
        self.source.next()
    }
}

impl std::fmt::Debug for IssuerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuerContext")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

/// Decode a base64 token back to its numeric value, bounded to `bits` bits.
///
/// This is the inverse of the generator's encoding: URL-safe base64 without
/// padding, big-endian bytes. A token that decodes to more than eight bytes,
/// or to a value that does not fit in `bits` bits, is rejected.
///
/// # Errors
///
/// Returns an error for `bits` outside `1..=64`, malformed base64, or an
/// out-of-range value.
pub fn decode_snowflake(token: &str, bits: u32) -> Result<u64, ValidationError> {
    if bits == 0 || bits > 64 {
        return Err(ValidationError::new("id", "bit width out of bounds"));
    }
    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|_| ValidationError::new("id", "token not valid base64"))?;
    if bytes.is_empty() || bytes.len() > 8 {
        return Err(ValidationError::new("id", "token wider than 64 bits"));
    }
    let value = bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
    if bits < 64 && value >> bits != 0 {
        return Err(ValidationError::new(
            "id",
            format!("value does not fit in {bits} bits"),
        ));
    }
    Ok(value)
}

/// Encode a numeric value as a unique-ID token.
///
/// Big-endian bytes with leading zero bytes stripped (at least one byte is
/// always kept), URL-safe base64 without padding. `decode_snowflake`
/// inverts this exactly.
pub fn encode_snowflake(value: u64) -> String {
    let bytes = value.to_be_bytes();
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(7);
    URL_SAFE_NO_PAD.encode(&bytes[first..])
}

/// A deterministic in-process [`IdSource`] backed by an atomic counter.
///
/// Useful for tests and for embedders that do not run the distributed
/// generator. Tokens are sequential numeric values encoded with
/// [`encode_snowflake`].
#[derive(Debug)]
pub struct CounterIdSource {
    next: AtomicU64,
}

impl CounterIdSource {
    /// A source starting at 1.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// A source whose first token encodes `first`.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for CounterIdSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for CounterIdSource {
    fn next(&self) -> String {
        let value = self.next.fetch_add(1, Ordering::Relaxed);
        encode_snowflake(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_rejects_bad_host() {
        assert!(IssuerContext::new("", CounterIdSource::new()).is_err());
        assert!(IssuerContext::new("bad host", CounterIdSource::new()).is_err());
        assert!(IssuerContext::new("campus@local", CounterIdSource::new()).is_err());
    }

    #[test]
    fn test_context_accepts_hostname_shapes() {
        assert!(IssuerContext::new("school.example.org", CounterIdSource::new()).is_ok());
        assert!(IssuerContext::new("backend-01", CounterIdSource::new()).is_ok());
    }

    #[test]
    fn test_counter_source_is_sequential() {
        let source = CounterIdSource::new();
        let a = source.next();
        let b = source.next();
        assert_ne!(a, b);
        assert_eq!(decode_snowflake(&a, 64).unwrap(), 1);
        assert_eq!(decode_snowflake(&b, 64).unwrap(), 2);
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        for value in [0u64, 1, 255, 256, 0x1234_5678, u64::MAX] {
            let token = encode_snowflake(value);
            assert_eq!(decode_snowflake(&token, 64).unwrap(), value, "value {value}");
        }
    }

    #[test]
    fn test_decode_respects_bit_width() {
        let token = encode_snowflake(1 << 40);
        assert!(decode_snowflake(&token, 64).is_ok());
        assert!(decode_snowflake(&token, 41).is_ok());
        assert!(decode_snowflake(&token, 40).is_err());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_snowflake("", 64).is_err());
        assert!(decode_snowflake("!!!", 64).is_err());
        // Nine bytes of payload is wider than any 64-bit value.
        let wide = URL_SAFE_NO_PAD.encode([1u8; 9]);
        assert!(decode_snowflake(&wide, 64).is_err());
    }

    #[test]
    fn test_decode_rejects_bad_bit_width() {
        let token = encode_snowflake(7);
        assert!(decode_snowflake(&token, 0).is_err());
        assert!(decode_snowflake(&token, 65).is_err());
    }

    #[test]
    fn test_tokens_stay_in_identifier_charset() {
        let source = CounterIdSource::starting_at(u64::MAX - 4);
        for _ in 0..4 {
            let token = source.next();
            assert!(crate::identifier::is_component(&token), "token {token:?}");
        }
    }
}
