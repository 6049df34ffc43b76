//! # Issuer Whitelist Records
//!
//! The value side of the issuer whitelist table. Records are upserted
//! only by the administrator and never deleted — removing an institution
//! from the whitelist toggles the flag and leaves the record in place.

use serde::{Deserialize, Serialize};

/// Whitelist state for one issuer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerRecord {
    /// Whether the issuer may currently mint credentials.
    pub whitelisted: bool,
    /// Human-readable institution name, as supplied at whitelisting time.
    pub institution_name: String,
}
