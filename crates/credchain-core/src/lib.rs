#![deny(missing_docs)]

//! # credchain-core — Foundational Types for the CredChain Registry
//!
//! This crate defines the domain primitives every other crate in the
//! workspace depends on. It has no internal crate dependencies — only
//! `serde`, `thiserror`, `chrono`, `sha2`, and `hex` from the external
//! ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every identifier is a
//!    distinct type. You cannot pass an [`EduId`] where an
//!    [`AccountAddress`] is expected.
//!
//! 2. **Validation at construction.** String-based identifiers validate
//!    format in their constructors and are valid for their entire lifetime.
//!    A held [`AccountAddress`] is always `0x` + 40 hex digits; a held
//!    [`EduId`] always matches the registry identifier format.
//!
//! 3. **[`ValidationError`] hierarchy.** Structured errors with `thiserror`
//!    that carry the rejected input and the expected format — no
//!    `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use digest::{DocumentHash, DOCUMENT_HASH_LEN};
pub use error::ValidationError;
pub use identity::{AccountAddress, EduId, EDU_ID_PREFIX};
pub use temporal::Timestamp;
