//! # The Registry State Machine
//!
//! All whitelist state, credential records, indices, and the audit log
//! live behind one [`Registry`] value. Mutations take `&mut self`, so the
//! compiler enforces the serialized-mutation model: there is no path to
//! partial visibility, and every precondition is re-validated inside the
//! mutation that depends on it.
//!
//! ## Indices
//!
//! The per-student and global EduID lists are derived views maintained
//! alongside the authoritative credential map. Both preserve insertion
//! order. An EduID enters both indices in the same mutation that inserts
//! its record, and nothing is ever removed, so every indexed EduID
//! resolves and every record is indexed exactly once.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use credchain_core::{AccountAddress, EduId, Timestamp};

use crate::credential::{CredentialRecord, IssueRequest, Verification};
use crate::error::RegistryError;
use crate::event::RegistryEvent;
use crate::issuer::IssuerRecord;

/// Upper bound on EduID generation attempts per issuance before the
/// operation fails instead of spinning.
const MAX_ID_ATTEMPTS: u32 = 8;

/// The authoritative credential registry.
///
/// Serializable as a whole: the CLI persists the complete state as one
/// JSON snapshot and the API can load the same snapshot at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    admin: AccountAddress,
    issuers: HashMap<AccountAddress, IssuerRecord>,
    credentials: HashMap<EduId, CredentialRecord>,
    student_index: HashMap<AccountAddress, Vec<EduId>>,
    global_index: Vec<EduId>,
    events: Vec<RegistryEvent>,
}

impl Registry {
    /// Create an empty registry administered by `admin`.
    pub fn new(admin: AccountAddress) -> Self {
        Self {
            admin,
            issuers: HashMap::new(),
            credentials: HashMap::new(),
            student_index: HashMap::new(),
            global_index: Vec::new(),
            events: Vec::new(),
        }
    }

    fn require_admin(&self, caller: &AccountAddress) -> Result<(), RegistryError> {
        if *caller != self.admin {
            return Err(RegistryError::NotAdmin {
                caller: caller.clone(),
            });
        }
        Ok(())
    }

    // ── Access control ───────────────────────────────────────────────

    /// Upsert the whitelist record for `issuer`. Administrator only.
    ///
    /// Records are never deleted: de-whitelisting stores the record with
    /// the flag cleared, preserving the audit trail of past issuers.
    pub fn set_issuer_status(
        &mut self,
        caller: &AccountAddress,
        issuer: AccountAddress,
        whitelisted: bool,
        institution_name: impl Into<String>,
    ) -> Result<(), RegistryError> {
        self.require_admin(caller)?;
        let institution_name = institution_name.into();
        let at = Timestamp::now();

        self.issuers.insert(
            issuer.clone(),
            IssuerRecord {
                whitelisted,
                institution_name: institution_name.clone(),
            },
        );
        self.events.push(RegistryEvent::IssuerWhitelisted {
            issuer: issuer.clone(),
            institution_name,
            whitelisted,
            at,
        });
        tracing::info!(issuer = %issuer, whitelisted, "issuer whitelist updated");
        Ok(())
    }

    /// Replace the administrator atomically. Administrator only.
    pub fn transfer_admin(
        &mut self,
        caller: &AccountAddress,
        new_admin: AccountAddress,
    ) -> Result<(), RegistryError> {
        self.require_admin(caller)?;
        let previous_admin = std::mem::replace(&mut self.admin, new_admin.clone());
        self.events.push(RegistryEvent::AdminTransferred {
            previous_admin: previous_admin.clone(),
            new_admin: new_admin.clone(),
            at: Timestamp::now(),
        });
        tracing::info!(previous = %previous_admin, new = %new_admin, "administrator transferred");
        Ok(())
    }

    /// Whether `issuer` may currently mint credentials. Unknown issuers
    /// are not whitelisted.
    pub fn is_whitelisted(&self, issuer: &AccountAddress) -> bool {
        self.issuers.get(issuer).is_some_and(|r| r.whitelisted)
    }

    /// The whitelist record for `issuer`, if the registry has ever seen it.
    pub fn issuer_record(&self, issuer: &AccountAddress) -> Option<&IssuerRecord> {
        self.issuers.get(issuer)
    }

    /// The current administrator.
    pub fn admin(&self) -> &AccountAddress {
        &self.admin
    }

    // ── Issuance ─────────────────────────────────────────────────────

    /// Mint a new credential and return its EduID.
    ///
    /// The whitelist check happens here, inside the mutation — a caller
    /// that was whitelisted when it pre-checked but no longer is gets
    /// rejected. The issuance timestamp is stamped from the registry
    /// clock at commit time.
    pub fn issue_credential(
        &mut self,
        caller: &AccountAddress,
        request: IssueRequest,
    ) -> Result<EduId, RegistryError> {
        if !self.is_whitelisted(caller) {
            return Err(RegistryError::NotWhitelisted {
                issuer: caller.clone(),
            });
        }
        request.validate()?;

        let issued_at = Timestamp::now();
        let edu_id = self.generate_edu_id(caller, &issued_at)?;

        let record = CredentialRecord {
            edu_id: edu_id.clone(),
            issuer: caller.clone(),
            student_wallet: request.student_wallet.clone(),
            student_name: request.student_name.clone(),
            institution_name: request.institution_name,
            credential_type: request.credential_type,
            course_or_program: request.course_or_program,
            issued_at: issued_at.clone(),
            document_hash: request.document_hash,
            revoked: false,
        };

        self.credentials.insert(edu_id.clone(), record);
        self.student_index
            .entry(request.student_wallet.clone())
            .or_default()
            .push(edu_id.clone());
        self.global_index.push(edu_id.clone());
        self.events.push(RegistryEvent::CredentialIssued {
            edu_id: edu_id.clone(),
            issuer: caller.clone(),
            student_wallet: request.student_wallet,
            student_name: request.student_name,
            at: issued_at,
        });
        tracing::info!(edu_id = %edu_id, issuer = %caller, "credential issued");
        Ok(edu_id)
    }

    /// Generate a fresh EduID: issuer code + commit-time millis + random
    /// suffix, re-rolled on collision with existing records.
    fn generate_edu_id(
        &self,
        issuer: &AccountAddress,
        at: &Timestamp,
    ) -> Result<EduId, RegistryError> {
        let mut rng = rand::thread_rng();
        for _ in 0..MAX_ID_ATTEMPTS {
            let suffix = format!("{:04X}", rng.gen::<u16>());
            let candidate = EduId::compose(issuer, at.epoch_millis(), &suffix)?;
            if !self.credentials.contains_key(&candidate) {
                return Ok(candidate);
            }
        }
        Err(RegistryError::IdExhausted {
            issuer: issuer.clone(),
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    // ── Verification & query ─────────────────────────────────────────

    /// Primary verification lookup. Never fails: unknown EduIDs yield
    /// `exists == false` with no record.
    pub fn verify_credential(&self, edu_id: &EduId) -> Verification {
        match self.credentials.get(edu_id) {
            Some(record) => Verification::found(record.clone()),
            None => Verification::not_found(),
        }
    }

    /// Detail lookup. Unlike [`Registry::verify_credential`], an unknown
    /// EduID here is an error — callers on this path treat absence as
    /// exceptional.
    pub fn credential_details(&self, edu_id: &EduId) -> Result<&CredentialRecord, RegistryError> {
        self.credentials
            .get(edu_id)
            .ok_or_else(|| RegistryError::NotFound(edu_id.clone()))
    }

    /// True iff the credential exists and has not been revoked.
    pub fn is_credential_valid(&self, edu_id: &EduId) -> bool {
        self.credentials
            .get(edu_id)
            .is_some_and(|record| !record.revoked)
    }

    /// EduIDs of all credentials held by `student`, in issuance order.
    pub fn student_credentials(&self, student: &AccountAddress) -> &[EduId] {
        self.student_index
            .get(student)
            .map_or(&[] as &[EduId], |ids| ids.as_slice())
    }

    /// EduIDs of every credential in the registry, in issuance order.
    pub fn all_credentials(&self) -> &[EduId] {
        &self.global_index
    }

    /// Total number of credentials ever issued (revoked ones included).
    pub fn credential_count(&self) -> usize {
        self.global_index.len()
    }

    /// The append-only audit log, oldest first.
    pub fn events(&self) -> &[RegistryEvent] {
        &self.events
    }

    // ── Revocation ───────────────────────────────────────────────────

    /// Permanently mark a credential invalid. Only the original issuer
    /// may revoke, and only once — re-revoking fails with
    /// [`RegistryError::AlreadyRevoked`].
    pub fn revoke_credential(
        &mut self,
        caller: &AccountAddress,
        edu_id: &EduId,
    ) -> Result<(), RegistryError> {
        let record = self
            .credentials
            .get_mut(edu_id)
            .ok_or_else(|| RegistryError::NotFound(edu_id.clone()))?;
        if record.issuer != *caller {
            return Err(RegistryError::NotIssuer {
                caller: caller.clone(),
                edu_id: edu_id.clone(),
            });
        }
        if record.revoked {
            return Err(RegistryError::AlreadyRevoked(edu_id.clone()));
        }

        record.revoked = true;
        self.events.push(RegistryEvent::CredentialRevoked {
            edu_id: edu_id.clone(),
            revoked_by: caller.clone(),
            at: Timestamp::now(),
        });
        tracing::info!(edu_id = %edu_id, revoked_by = %caller, "credential revoked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credchain_core::DocumentHash;

    const ADMIN: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
    const ISSUER_A: &str = "0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc";
    const ISSUER_B: &str = "0x90f79bf6eb2c4f870365e785982e1f101e93b906";
    const STUDENT: &str = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8";

    fn addr(s: &str) -> AccountAddress {
        AccountAddress::new(s).unwrap()
    }

    fn registry_with_issuer() -> Registry {
        let mut registry = Registry::new(addr(ADMIN));
        registry
            .set_issuer_status(&addr(ADMIN), addr(ISSUER_A), true, "Test Institution")
            .unwrap();
        registry
    }

    fn request() -> IssueRequest {
        IssueRequest {
            student_wallet: addr(STUDENT),
            student_name: "Ada Lovelace".to_string(),
            institution_name: "Test Institution".to_string(),
            credential_type: "degree".to_string(),
            course_or_program: "Mathematics".to_string(),
            document_hash: DocumentHash::hash_bytes(b"diploma.pdf"),
        }
    }

    // -- Access control --

    #[test]
    fn non_admin_cannot_whitelist() {
        let mut registry = Registry::new(addr(ADMIN));
        let err = registry
            .set_issuer_status(&addr(ISSUER_A), addr(ISSUER_B), true, "Rogue U")
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotAdmin { .. }));
        assert!(registry.issuer_record(&addr(ISSUER_B)).is_none());
        assert!(registry.events().is_empty());
    }

    #[test]
    fn unknown_issuer_defaults_to_not_whitelisted() {
        let registry = Registry::new(addr(ADMIN));
        assert!(!registry.is_whitelisted(&addr(ISSUER_A)));
    }

    #[test]
    fn dewhitelisting_keeps_the_record() {
        let mut registry = registry_with_issuer();
        registry
            .set_issuer_status(&addr(ADMIN), addr(ISSUER_A), false, "")
            .unwrap();
        assert!(!registry.is_whitelisted(&addr(ISSUER_A)));
        let record = registry.issuer_record(&addr(ISSUER_A)).unwrap();
        assert!(!record.whitelisted);
    }

    #[test]
    fn admin_transfer_replaces_admin_atomically() {
        let mut registry = Registry::new(addr(ADMIN));
        registry
            .transfer_admin(&addr(ADMIN), addr(ISSUER_B))
            .unwrap();
        assert_eq!(registry.admin(), &addr(ISSUER_B));

        // Old admin loses the role in the same step.
        let err = registry
            .set_issuer_status(&addr(ADMIN), addr(ISSUER_A), true, "X")
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotAdmin { .. }));

        // New admin holds it.
        registry
            .set_issuer_status(&addr(ISSUER_B), addr(ISSUER_A), true, "X")
            .unwrap();
    }

    #[test]
    fn transfer_by_non_admin_rejected() {
        let mut registry = Registry::new(addr(ADMIN));
        let err = registry
            .transfer_admin(&addr(ISSUER_A), addr(ISSUER_A))
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotAdmin { .. }));
        assert_eq!(registry.admin(), &addr(ADMIN));
    }

    // -- Issuance --

    #[test]
    fn issuance_returns_well_formed_edu_id() {
        let mut registry = registry_with_issuer();
        let edu_id = registry
            .issue_credential(&addr(ISSUER_A), request())
            .unwrap();
        assert_eq!(edu_id.institution_code(), "3C44");

        let record = registry.credential_details(&edu_id).unwrap();
        assert_eq!(record.issuer, addr(ISSUER_A));
        assert_eq!(record.student_wallet, addr(STUDENT));
        assert!(!record.revoked);
        assert_eq!(record.issued_at.epoch_millis(), edu_id.issued_at_millis());
    }

    #[test]
    fn issuance_by_non_whitelisted_leaves_no_trace() {
        let mut registry = registry_with_issuer();
        let events_before = registry.events().len();

        let err = registry
            .issue_credential(&addr(ISSUER_B), request())
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotWhitelisted { .. }));
        assert_eq!(registry.credential_count(), 0);
        assert!(registry.student_credentials(&addr(STUDENT)).is_empty());
        assert_eq!(registry.events().len(), events_before);
    }

    #[test]
    fn issuance_by_dewhitelisted_issuer_rejected() {
        let mut registry = registry_with_issuer();
        registry
            .set_issuer_status(&addr(ADMIN), addr(ISSUER_A), false, "")
            .unwrap();
        let err = registry
            .issue_credential(&addr(ISSUER_A), request())
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotWhitelisted { .. }));
    }

    #[test]
    fn issuance_with_empty_field_leaves_no_trace() {
        let mut registry = registry_with_issuer();
        let mut req = request();
        req.student_name = String::new();

        let err = registry.issue_credential(&addr(ISSUER_A), req).unwrap_err();
        assert!(matches!(err, RegistryError::Validation(_)));
        assert_eq!(registry.credential_count(), 0);
        assert_eq!(registry.events().len(), 1); // only the whitelist event
    }

    #[test]
    fn repeated_issuance_yields_distinct_ids() {
        let mut registry = registry_with_issuer();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..50 {
            let edu_id = registry
                .issue_credential(&addr(ISSUER_A), request())
                .unwrap();
            assert!(seen.insert(edu_id), "duplicate EduID");
        }
        assert_eq!(registry.credential_count(), 50);
    }

    #[test]
    fn document_hash_round_trips_through_reads() {
        let mut registry = registry_with_issuer();
        let hash = DocumentHash::from_hex(
            "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
        )
        .unwrap();
        let mut req = request();
        req.document_hash = hash;

        let edu_id = registry.issue_credential(&addr(ISSUER_A), req).unwrap();
        assert_eq!(registry.credential_details(&edu_id).unwrap().document_hash, hash);
        let verification = registry.verify_credential(&edu_id);
        assert_eq!(verification.record.unwrap().document_hash, hash);
    }

    // -- Verification & query --

    #[test]
    fn verify_unknown_id_is_not_an_error() {
        let registry = Registry::new(addr(ADMIN));
        let unknown = EduId::new("CREDCHAIN-3C44-1708105200000-A3K9").unwrap();
        let verification = registry.verify_credential(&unknown);
        assert!(!verification.exists);
        assert!(verification.record.is_none());
    }

    #[test]
    fn details_of_unknown_id_is_not_found() {
        let registry = Registry::new(addr(ADMIN));
        let unknown = EduId::new("CREDCHAIN-3C44-1708105200000-A3K9").unwrap();
        let err = registry.credential_details(&unknown).unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(_)));
    }

    #[test]
    fn student_index_tracks_issuance_order() {
        let mut registry = registry_with_issuer();
        let first = registry
            .issue_credential(&addr(ISSUER_A), request())
            .unwrap();
        let second = registry
            .issue_credential(&addr(ISSUER_A), request())
            .unwrap();
        assert_eq!(
            registry.student_credentials(&addr(STUDENT)),
            &[first.clone(), second.clone()]
        );
        assert_eq!(registry.all_credentials(), &[first, second]);
    }

    #[test]
    fn unknown_student_has_empty_list() {
        let registry = Registry::new(addr(ADMIN));
        assert!(registry.student_credentials(&addr(STUDENT)).is_empty());
    }

    // -- Revocation --

    #[test]
    fn revocation_is_permanent() {
        let mut registry = registry_with_issuer();
        let edu_id = registry
            .issue_credential(&addr(ISSUER_A), request())
            .unwrap();
        assert!(registry.is_credential_valid(&edu_id));

        registry.revoke_credential(&addr(ISSUER_A), &edu_id).unwrap();
        assert!(!registry.is_credential_valid(&edu_id));
        assert!(registry.credential_details(&edu_id).unwrap().revoked);

        // Still revoked on a later read.
        assert!(!registry.is_credential_valid(&edu_id));
    }

    #[test]
    fn revocation_by_non_issuer_rejected() {
        let mut registry = registry_with_issuer();
        registry
            .set_issuer_status(&addr(ADMIN), addr(ISSUER_B), true, "Other Institution")
            .unwrap();
        let edu_id = registry
            .issue_credential(&addr(ISSUER_A), request())
            .unwrap();

        // Another whitelisted issuer is still not the owner. Neither is
        // the administrator.
        for caller in [ISSUER_B, ADMIN] {
            let err = registry
                .revoke_credential(&addr(caller), &edu_id)
                .unwrap_err();
            assert!(matches!(err, RegistryError::NotIssuer { .. }));
        }
        assert!(registry.is_credential_valid(&edu_id));
    }

    #[test]
    fn double_revocation_conflicts() {
        let mut registry = registry_with_issuer();
        let edu_id = registry
            .issue_credential(&addr(ISSUER_A), request())
            .unwrap();
        registry.revoke_credential(&addr(ISSUER_A), &edu_id).unwrap();

        let events_before = registry.events().len();
        let err = registry
            .revoke_credential(&addr(ISSUER_A), &edu_id)
            .unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyRevoked(_)));
        // The failed call appended nothing.
        assert_eq!(registry.events().len(), events_before);
    }

    #[test]
    fn revoking_unknown_id_is_not_found() {
        let mut registry = registry_with_issuer();
        let unknown = EduId::new("CREDCHAIN-3C44-1708105200000-A3K9").unwrap();
        let err = registry
            .revoke_credential(&addr(ISSUER_A), &unknown)
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(_)));
    }

    // -- Audit log --

    #[test]
    fn every_mutation_appends_one_event() {
        let mut registry = Registry::new(addr(ADMIN));
        registry
            .set_issuer_status(&addr(ADMIN), addr(ISSUER_A), true, "Test Institution")
            .unwrap();
        let edu_id = registry
            .issue_credential(&addr(ISSUER_A), request())
            .unwrap();
        registry.revoke_credential(&addr(ISSUER_A), &edu_id).unwrap();
        registry
            .transfer_admin(&addr(ADMIN), addr(ISSUER_B))
            .unwrap();

        let events = registry.events();
        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], RegistryEvent::IssuerWhitelisted { .. }));
        assert!(matches!(events[1], RegistryEvent::CredentialIssued { .. }));
        assert!(matches!(events[2], RegistryEvent::CredentialRevoked { .. }));
        assert!(matches!(events[3], RegistryEvent::AdminTransferred { .. }));
    }

    // -- Snapshot --

    #[test]
    fn snapshot_round_trip_preserves_state() {
        let mut registry = registry_with_issuer();
        let edu_id = registry
            .issue_credential(&addr(ISSUER_A), request())
            .unwrap();
        registry.revoke_credential(&addr(ISSUER_A), &edu_id).unwrap();

        let json = serde_json::to_string(&registry).unwrap();
        let restored: Registry = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.admin(), registry.admin());
        assert_eq!(restored.credential_count(), 1);
        assert!(!restored.is_credential_valid(&edu_id));
        assert_eq!(restored.events().len(), registry.events().len());
        assert_eq!(
            restored.student_credentials(&addr(STUDENT)),
            registry.student_credentials(&addr(STUDENT))
        );
    }
}
