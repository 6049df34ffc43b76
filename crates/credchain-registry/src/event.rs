//! # Audit Events
//!
//! Append-only event records for every registry mutation. The log is
//! observable by any reader and is never truncated or rewritten — one
//! successful mutation appends exactly one event.

use serde::{Deserialize, Serialize};

use credchain_core::{AccountAddress, EduId, Timestamp};

/// One entry in the registry's append-only audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RegistryEvent {
    /// The administrator changed an issuer's whitelist state.
    IssuerWhitelisted {
        /// The issuer whose state changed.
        issuer: AccountAddress,
        /// Institution name recorded with the change.
        institution_name: String,
        /// The new whitelist flag.
        whitelisted: bool,
        /// When the change was committed.
        at: Timestamp,
    },

    /// A credential was issued.
    CredentialIssued {
        /// The new credential's identifier.
        edu_id: EduId,
        /// The issuing account.
        issuer: AccountAddress,
        /// The student (holder) account.
        student_wallet: AccountAddress,
        /// Student display name.
        student_name: String,
        /// When the issuance was committed.
        at: Timestamp,
    },

    /// A credential was permanently revoked.
    CredentialRevoked {
        /// The revoked credential's identifier.
        edu_id: EduId,
        /// The account that revoked it (always the original issuer).
        revoked_by: AccountAddress,
        /// When the revocation was committed.
        at: Timestamp,
    },

    /// The administrator role moved to a new account.
    AdminTransferred {
        /// The outgoing administrator.
        previous_admin: AccountAddress,
        /// The incoming administrator.
        new_admin: AccountAddress,
        /// When the transfer was committed.
        at: Timestamp,
    },
}
