//! # Route Modules
//!
//! One module per resource family. Each exposes a `router()` that the
//! top-level [`crate::app`] merges into the full surface.

pub mod admin;
pub mod credentials;
pub mod events;
pub mod issuers;
