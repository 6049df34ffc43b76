//! # Temporal Types
//!
//! UTC-only timestamp type for the registry. All timestamps are stored in
//! UTC and serialized in ISO 8601 form with a `Z` suffix. Local time
//! conversion is a presentation concern.
//!
//! Issuance timestamps are stamped by the registry at commit time, never
//! supplied by callers, so records cannot be backdated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A UTC timestamp.
///
/// The canonical string form truncates to second precision
/// (e.g., `2026-01-15T12:00:00Z`); the millisecond accessor exists for
/// EduID composition, which embeds a 13-digit millisecond epoch value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current UTC time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Access the underlying `chrono::DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Milliseconds since the Unix epoch.
    pub fn epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Whole seconds since the Unix epoch.
    pub fn epoch_seconds(&self) -> i64 {
        self.0.timestamp()
    }

    /// Return the timestamp as an ISO 8601 string with Z suffix,
    /// truncated to seconds.
    pub fn to_canonical_string(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}
