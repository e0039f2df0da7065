//! Foundation types for the ARCA document archive.
//!
//! This crate provides the identity types shared by every other ARCA crate.
//!
//! # Key Types
//!
//! - [`ContentHash`] — Content-addressed identifier (SHA-1 digest of raw file bytes)
//! - [`RecordId`] — UUID v7 record identifier
//! - [`normalize_username`] — Canonical archivist username form (trim + lowercase)

pub mod error;
pub mod hash;
pub mod record_id;
pub mod username;

pub use error::TypeError;
pub use hash::ContentHash;
pub use record_id::RecordId;
pub use username::normalize_username;

/// Timestamp type used on every persisted row.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
