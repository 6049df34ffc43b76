//! # Registry Errors
//!
//! Structured error types for registry mutations and lookups. Each
//! variant carries the identifiers involved so callers can render a
//! human-readable rejection reason without access to internal state.

use thiserror::Error;

use credchain_core::{AccountAddress, EduId, ValidationError};

/// Errors raised by registry operations.
///
/// Mutations are all-or-nothing: any error means no record, index, or
/// event changed.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A privileged operation was called by an account that is not the
    /// administrator.
    #[error("caller {caller} is not the registry administrator")]
    NotAdmin {
        /// The rejected caller.
        caller: AccountAddress,
    },

    /// Issuance was attempted by an account whose whitelist flag is not
    /// set (including accounts the registry has never seen).
    #[error("issuer {issuer} is not whitelisted")]
    NotWhitelisted {
        /// The rejected issuer.
        issuer: AccountAddress,
    },

    /// Revocation was attempted by an account other than the credential's
    /// original issuer.
    #[error("caller {caller} did not issue credential {edu_id}")]
    NotIssuer {
        /// The rejected caller.
        caller: AccountAddress,
        /// The credential the caller tried to revoke.
        edu_id: EduId,
    },

    /// The referenced credential does not exist.
    #[error("credential not found: {0}")]
    NotFound(EduId),

    /// The credential is already revoked. Revocation is monotonic, so a
    /// second revoke call is a conflict, not a repeatable success.
    #[error("credential {0} is already revoked")]
    AlreadyRevoked(EduId),

    /// EduID generation collided with existing records on every attempt.
    /// With a millisecond timestamp and a random suffix in the identifier
    /// this requires an astronomically unlikely run of collisions, but it
    /// is handled rather than assumed away.
    #[error("EduID generation for issuer {issuer} collided {attempts} times")]
    IdExhausted {
        /// The issuer whose identifier space collided.
        issuer: AccountAddress,
        /// Number of generation attempts made.
        attempts: u32,
    },

    /// A malformed input: bad address, bad hash, or empty required field.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> AccountAddress {
        AccountAddress::new(s).unwrap()
    }

    #[test]
    fn not_admin_display_names_caller() {
        let err = RegistryError::NotAdmin {
            caller: addr("0x70997970c51812dc3a010c7d01b50e0d17dc79c8"),
        };
        assert!(format!("{err}").contains("0x70997970c51812dc3a010c7d01b50e0d17dc79c8"));
    }

    #[test]
    fn not_issuer_display_names_both() {
        let err = RegistryError::NotIssuer {
            caller: addr("0x70997970c51812dc3a010c7d01b50e0d17dc79c8"),
            edu_id: EduId::new("CREDCHAIN-3C44-1708105200000-A3K9").unwrap(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("0x70997970"));
        assert!(msg.contains("CREDCHAIN-3C44-1708105200000-A3K9"));
    }

    #[test]
    fn validation_error_converts() {
        let core_err = ValidationError::InvalidAddress("nope".to_string());
        let err = RegistryError::from(core_err);
        assert!(format!("{err}").contains("invalid input"));
        assert!(format!("{err}").contains("nope"));
    }
}
