//! # Identity Newtypes
//!
//! Domain-primitive newtypes for the two identifier kinds in the registry:
//! account addresses and credential EduIDs. Both validate format at
//! construction time — a held value is always well-formed.
//!
//! ## Formats
//!
//! - Account address: `0x` followed by exactly 40 hex digits, stored in
//!   canonical lowercase form. Checksum casing is a presentation concern
//!   and is not preserved.
//! - EduID: `CREDCHAIN-<CODE>-<TIMESTAMP>-<RANDOM>` where CODE is a
//!   4-character uppercase alphanumeric derivation of the issuer address,
//!   TIMESTAMP is a 13-digit millisecond epoch value, and RANDOM is a
//!   4-character uppercase alphanumeric suffix.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Prefix shared by every EduID issued through the registry.
pub const EDU_ID_PREFIX: &str = "CREDCHAIN";

/// Number of characters in the institution code segment of an EduID.
const CODE_LEN: usize = 4;

/// Number of digits in the millisecond timestamp segment of an EduID.
const TIMESTAMP_LEN: usize = 13;

/// Number of characters in the random suffix segment of an EduID.
const SUFFIX_LEN: usize = 4;

// ---------------------------------------------------------------------------
// AccountAddress
// ---------------------------------------------------------------------------

/// A validated account identifier: `0x` + 40 hex digits.
///
/// One type covers every role an account plays — administrator, issuer,
/// student — because the underlying identifier space is the same. Input is
/// accepted in any case and stored lowercase so that equality and map
/// lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Create an account address from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAddress`] if the string is not
    /// `0x` followed by exactly 40 hex digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let lower = raw.trim().to_ascii_lowercase();

        let hex_part = lower
            .strip_prefix("0x")
            .ok_or_else(|| ValidationError::InvalidAddress(raw.clone()))?;
        if hex_part.len() != 40 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidAddress(raw));
        }

        Ok(Self(lower))
    }

    /// Access the canonical lowercase address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the 4-character uppercase institution code derived from this
    /// address: the first four hex digits after the `0x` prefix.
    ///
    /// This is the CODE segment of every EduID the address issues.
    pub fn short_code(&self) -> String {
        self.0[2..2 + CODE_LEN].to_ascii_uppercase()
    }
}

impl std::fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// EduId
// ---------------------------------------------------------------------------

/// The globally unique identifier assigned to a credential at issuance.
///
/// Format: `CREDCHAIN-MC5D-1708105200000-A3K9`. The segments are
/// accessible via [`EduId::institution_code`] and
/// [`EduId::issued_at_millis`]; the whole identifier is opaque to
/// ordering and comparison beyond string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EduId(String);

impl EduId {
    /// Create an EduID from a string, validating the four-segment format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEduId`] if the string does not
    /// match `CREDCHAIN-XXXX-<13 digits>-XXXX`.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Compose an EduID from its constituent parts.
    ///
    /// The institution code is derived from the issuer address; the
    /// timestamp is zero-padded to 13 digits. The suffix must already be
    /// 4 uppercase alphanumeric characters (the registry supplies random
    /// hex).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEduId`] if the composed string
    /// fails validation, e.g. a malformed suffix or a timestamp outside
    /// the 13-digit range.
    pub fn compose(
        issuer: &AccountAddress,
        epoch_millis: i64,
        suffix: &str,
    ) -> Result<Self, ValidationError> {
        let candidate = format!(
            "{EDU_ID_PREFIX}-{}-{epoch_millis:013}-{suffix}",
            issuer.short_code()
        );
        Self::new(candidate)
    }

    fn validate(s: &str) -> Result<(), ValidationError> {
        let reject = || ValidationError::InvalidEduId(s.to_string());

        let mut parts = s.split('-');
        let (prefix, code, millis, suffix) = match (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) {
            (Some(p), Some(c), Some(m), Some(r), None) => (p, c, m, r),
            _ => return Err(reject()),
        };

        if prefix != EDU_ID_PREFIX {
            return Err(reject());
        }
        if code.len() != CODE_LEN || !code.chars().all(is_upper_alnum) {
            return Err(reject());
        }
        if millis.len() != TIMESTAMP_LEN || !millis.chars().all(|c| c.is_ascii_digit()) {
            return Err(reject());
        }
        if suffix.len() != SUFFIX_LEN || !suffix.chars().all(is_upper_alnum) {
            return Err(reject());
        }

        Ok(())
    }

    /// Access the EduID string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the 4-character institution code segment.
    pub fn institution_code(&self) -> &str {
        self.0
            .split('-')
            .nth(1)
            .expect("validated at construction")
    }

    /// Return the millisecond epoch timestamp embedded in the identifier.
    pub fn issued_at_millis(&self) -> i64 {
        self.0
            .split('-')
            .nth(2)
            .expect("validated at construction")
            .parse()
            .expect("validated at construction")
    }
}

impl std::fmt::Display for EduId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_upper_alnum(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- AccountAddress --

    #[test]
    fn address_valid_lowercase() {
        let addr = AccountAddress::new("0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc").unwrap();
        assert_eq!(addr.as_str(), "0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc");
    }

    #[test]
    fn address_canonicalizes_case() {
        let checksummed = AccountAddress::new("0x3C44CddDB6a900fa2b585dd299e03d12FA4293BC").unwrap();
        let lower = AccountAddress::new("0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc").unwrap();
        assert_eq!(checksummed, lower);
    }

    #[test]
    fn address_trims_whitespace() {
        let addr =
            AccountAddress::new("  0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc  ").unwrap();
        assert_eq!(addr.as_str(), "0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc");
    }

    #[test]
    fn address_rejects_invalid() {
        assert!(AccountAddress::new("").is_err());
        assert!(AccountAddress::new("3c44cdddb6a900fa2b585dd299e03d12fa4293bc").is_err()); // no 0x
        assert!(AccountAddress::new("0x3c44cdddb6a900fa2b585dd299e03d12fa4293b").is_err()); // 39 digits
        assert!(AccountAddress::new("0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc0").is_err()); // 41 digits
        assert!(AccountAddress::new("0x3g44cdddb6a900fa2b585dd299e03d12fa4293bc").is_err()); // non-hex
    }

    #[test]
    fn address_short_code() {
        let addr = AccountAddress::new("0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc").unwrap();
        assert_eq!(addr.short_code(), "3C44");
    }

    #[test]
    fn address_serializes_as_plain_string() {
        let addr = AccountAddress::new("0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc").unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc\"");
    }

    // -- EduId --

    #[test]
    fn edu_id_valid_examples() {
        assert!(EduId::new("CREDCHAIN-MC5D-1708105200000-A3K9").is_ok());
        assert!(EduId::new("CREDCHAIN-3C44-0000000000000-00FF").is_ok());
    }

    #[test]
    fn edu_id_rejects_invalid() {
        assert!(EduId::new("").is_err());
        assert!(EduId::new("CREDCHAIN-MC5D-1708105200000").is_err()); // 3 segments
        assert!(EduId::new("EDUCHAIN-MC5D-1708105200000-A3K9").is_err()); // wrong prefix
        assert!(EduId::new("CREDCHAIN-mc5d-1708105200000-A3K9").is_err()); // lowercase code
        assert!(EduId::new("CREDCHAIN-MC5D-170810520000-A3K9").is_err()); // 12 digits
        assert!(EduId::new("CREDCHAIN-MC5D-1708105200000-A3K").is_err()); // short suffix
        assert!(EduId::new("CREDCHAIN-MC5D-1708105200000-A3K9-X").is_err()); // 5 segments
    }

    #[test]
    fn edu_id_segment_accessors() {
        let id = EduId::new("CREDCHAIN-MC5D-1708105200000-A3K9").unwrap();
        assert_eq!(id.institution_code(), "MC5D");
        assert_eq!(id.issued_at_millis(), 1_708_105_200_000);
    }

    #[test]
    fn edu_id_compose_from_parts() {
        let issuer = AccountAddress::new("0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc").unwrap();
        let id = EduId::compose(&issuer, 1_708_105_200_000, "A3K9").unwrap();
        assert_eq!(id.as_str(), "CREDCHAIN-3C44-1708105200000-A3K9");
    }

    #[test]
    fn edu_id_compose_pads_small_timestamp() {
        let issuer = AccountAddress::new("0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc").unwrap();
        let id = EduId::compose(&issuer, 42, "00AA").unwrap();
        assert_eq!(id.as_str(), "CREDCHAIN-3C44-0000000000042-00AA");
        assert_eq!(id.issued_at_millis(), 42);
    }

    #[test]
    fn edu_id_compose_rejects_bad_suffix() {
        let issuer = AccountAddress::new("0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc").unwrap();
        assert!(EduId::compose(&issuer, 1_708_105_200_000, "a3k9").is_err()); // lowercase
        assert!(EduId::compose(&issuer, 1_708_105_200_000, "A3K").is_err()); // too short
    }

    #[test]
    fn edu_id_serde_round_trip() {
        let id = EduId::new("CREDCHAIN-MC5D-1708105200000-A3K9").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        let back: EduId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
