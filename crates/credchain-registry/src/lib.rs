#![deny(missing_docs)]

//! # credchain-registry — The Credential Registry State Machine
//!
//! The authoritative store of issuer whitelist state and credential
//! records. Two parties interact through it: issuers (whitelisted
//! accounts that mint credentials) and the single administrator (the
//! account that manages the whitelist).
//!
//! ## Model
//!
//! [`Registry`] is a single serialized state machine: every mutation runs
//! under one `&mut self` borrow, re-validates its preconditions inside
//! that borrow, and either commits completely or leaves no trace. Callers
//! that pre-checked a precondition (e.g. whitelist status) get it checked
//! again at commit time, so check-then-act races cannot mint through a
//! stale observation.
//!
//! ## Audit Trail
//!
//! Every successful mutation appends exactly one [`RegistryEvent`] to an
//! append-only log observable by any reader.

pub mod credential;
pub mod error;
pub mod event;
pub mod issuer;
pub mod registry;

pub use credential::{CredentialRecord, IssueRequest, Verification};
pub use error::RegistryError;
pub use event::RegistryEvent;
pub use issuer::IssuerRecord;
pub use registry::Registry;
