//! # epr-core
//!
//! Foundation types for the Event Provenance Registry client.
//!
//! - **Records**: [`Event`], [`EventReceiver`], [`EventReceiverGroup`] with
//!   two explicit serialization modes ([`Projection::Full`] for create
//!   payloads, [`Projection::NonEmpty`] for search filters)
//! - **Fingerprints**: deterministic SHA-256 content identity for receivers
//!   and groups ([`fingerprint`])
//! - **Hashing**: [`hash::hash_string`] and [`hash::hash_file`]
//! - **Constants**: package title and version ([`constants`])

#![deny(unsafe_code)]

pub mod constants;
pub mod errors;
pub mod fingerprint;
pub mod hash;
pub mod models;

pub use errors::{CoreError, Result};
pub use fingerprint::{FingerprintKind, compute_fingerprint, is_truthy};
pub use models::{Event, EventReceiver, EventReceiverGroup, Projection, Record, RecordKind};
