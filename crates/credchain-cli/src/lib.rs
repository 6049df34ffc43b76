//! # credchain-cli — CLI for the CredChain Registry
//!
//! Provides the `credchain` command-line interface, replacing the
//! Hardhat administration scripts (`deploy.js`, `whitelist.js`,
//! `transferOwnership.js`) with file-backed registry operations.
//!
//! ## Subcommands
//!
//! - `credchain init` — Create a fresh registry snapshot.
//! - `credchain issuer` — Whitelist management and status lookups.
//! - `credchain admin` — Show or transfer the administrator role.
//! - `credchain credential` — Issue, verify, revoke, and list credentials.
//! - `credchain events` — Print the append-only audit log.
//!
//! All commands operate on one JSON snapshot file (`--state`, default
//! `credchain.state.json`): load, mutate through the registry state
//! machine, save. The snapshot is the same format the API server loads.

pub mod admin;
pub mod credential;
pub mod issuer;
pub mod store;
