//! # Document Digests
//!
//! Defines [`DocumentHash`], the fixed 32-byte SHA-256 digest that binds a
//! credential record to an off-chain document (typically a PDF) without
//! storing the document itself.
//!
//! ## Hex Parsing Policy
//!
//! Input shorter than 64 hex digits is right-padded with `'0'`; input
//! longer than 64 digits is rejected. SHA-256 output is always exactly
//! 64 digits, so padding only ever applies to hand-entered values.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::ValidationError;

/// Length in bytes of a document hash.
pub const DOCUMENT_HASH_LEN: usize = 32;

/// A 32-byte SHA-256 document digest.
///
/// Serializes as a `0x`-prefixed lowercase hex string and round-trips
/// byte-for-byte. Once attached to a credential record the digest is
/// immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentHash([u8; DOCUMENT_HASH_LEN]);

impl DocumentHash {
    /// Create a document hash from raw bytes.
    pub fn from_bytes(bytes: [u8; DOCUMENT_HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Compute the SHA-256 digest of the given document content.
    pub fn hash_bytes(data: &[u8]) -> Self {
        let digest = Sha256::digest(data);
        let mut bytes = [0u8; DOCUMENT_HASH_LEN];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    /// Parse a document hash from a hex string, with or without a `0x`
    /// prefix. Input shorter than 64 digits is right-padded with zeros;
    /// longer input is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidHash`] on empty input, non-hex
    /// characters, or more than 64 hex digits.
    pub fn from_hex(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.is_empty() {
            return Err(ValidationError::InvalidHash {
                value: value.to_string(),
                reason: "empty".to_string(),
            });
        }
        if digits.len() > 2 * DOCUMENT_HASH_LEN {
            return Err(ValidationError::InvalidHash {
                value: value.to_string(),
                reason: format!("longer than {DOCUMENT_HASH_LEN} bytes"),
            });
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidHash {
                value: value.to_string(),
                reason: "non-hex character".to_string(),
            });
        }

        // Short input is zero-padded on the right to the full 32 bytes.
        let mut padded = digits.to_ascii_lowercase();
        while padded.len() < 2 * DOCUMENT_HASH_LEN {
            padded.push('0');
        }

        let decoded = hex::decode(&padded).map_err(|e| ValidationError::InvalidHash {
            value: value.to_string(),
            reason: e.to_string(),
        })?;
        let mut bytes = [0u8; DOCUMENT_HASH_LEN];
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }

    /// Access the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DOCUMENT_HASH_LEN] {
        &self.0
    }

    /// Return the digest as a `0x`-prefixed lowercase hex string.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl std::fmt::Display for DocumentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for DocumentHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for DocumentHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(D::Error::custom)
    }
}
