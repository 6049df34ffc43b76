//! # Credential Records
//!
//! The stored credential record, the issuance request that produces one,
//! and the [`Verification`] result returned on the primary lookup path.
//!
//! A record is created by issuance, mutated exactly once by revocation
//! (the `revoked` flag only), and otherwise read-only. The document hash
//! and issuance timestamp never change after commit.

use serde::{Deserialize, Serialize};

use credchain_core::{AccountAddress, DocumentHash, EduId, Timestamp, ValidationError};

/// A credential stored in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Globally unique identifier, immutable once assigned.
    pub edu_id: EduId,
    /// The account that issued this credential.
    pub issuer: AccountAddress,
    /// The student (holder) account.
    pub student_wallet: AccountAddress,
    /// Student display name.
    pub student_name: String,
    /// Institution display name.
    pub institution_name: String,
    /// Credential type. Open string; the set of well-known values
    /// (degree, diploma, certificate, ...) is a presentation concern.
    pub credential_type: String,
    /// Course or program free text.
    pub course_or_program: String,
    /// When the registry committed the issuance. Stamped by the registry,
    /// never caller-supplied.
    pub issued_at: Timestamp,
    /// SHA-256 digest of the associated document.
    pub document_hash: DocumentHash,
    /// Revocation flag. Monotonic: once true, never reverts.
    pub revoked: bool,
}

/// Inputs to credential issuance. The EduID and issuance timestamp are
/// not part of the request — both are assigned by the registry at commit
/// time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRequest {
    /// The student (holder) account.
    pub student_wallet: AccountAddress,
    /// Student display name.
    pub student_name: String,
    /// Institution display name.
    pub institution_name: String,
    /// Credential type.
    pub credential_type: String,
    /// Course or program free text.
    pub course_or_program: String,
    /// SHA-256 digest of the associated document.
    pub document_hash: DocumentHash,
}

impl IssueRequest {
    /// Check that every required text field is non-empty.
    ///
    /// The address and hash fields are valid by construction; the free
    /// text fields are the only inputs that can arrive empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required: [(&'static str, &str); 4] = [
            ("student_name", &self.student_name),
            ("institution_name", &self.institution_name),
            ("credential_type", &self.credential_type),
            ("course_or_program", &self.course_or_program),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyField { field });
            }
        }
        Ok(())
    }
}

/// Result of the primary verification lookup.
///
/// This path never fails: an unknown EduID yields `exists == false` with
/// no record, so callers can distinguish "not found" (render a not-found
/// view) from transport errors (a separate channel entirely).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    /// Whether a credential with the queried EduID exists.
    pub exists: bool,
    /// The record, present iff `exists`.
    pub record: Option<CredentialRecord>,
}

impl Verification {
    /// A successful lookup.
    pub fn found(record: CredentialRecord) -> Self {
        Self {
            exists: true,
            record: Some(record),
        }
    }

    /// An unknown EduID.
    pub fn not_found() -> Self {
        Self {
            exists: false,
            record: None,
        }
    }
}
