//! Object-storage wrapper for medical record attachments.
//!
//! Uploads land under a fixed bucket with generated `records/...` keys,
//! and the caller gets back the public URL to store on the medical
//! record. The HTTP client lives behind the `remote` feature;
//! [`MemoryBucket`] serves tests and offline development.

pub mod bucket;
pub mod naming;

pub use bucket::*;
pub use naming::*;

use thiserror::Error;

/// Storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Upload rejected: {0}")]
    Rejected(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

pub type StorageResult<T> = Result<T, StorageError>;
