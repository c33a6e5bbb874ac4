//! # Error Handling
//!
//! This module defines the centralized error type for the importer library.
//! It uses `thiserror` to build one `Error` enum covering every failure the
//! library can hand back to its caller, with a `Result<T>` alias used
//! throughout.
//!
//! The variants fall into three groups:
//!
//! - **Catalogue failures** (`Catalogue`, `CatalogueNotFound`,
//!   `MissingRootFolder`): the catalogue cannot be opened or queried. These
//!   are fatal for a run; no partial photo list is ever returned.
//! - **Per-photo failures** (`Metadata`, `Filesystem`): a single photo's
//!   metadata blob or sidecar could not be processed. The exporter logs these
//!   and moves on to the next photo.
//! - **Launch failures** (`Launch`, plus wrapped `Io`/`Json` errors): the
//!   target application could not be prepared or started.
//!
//! Soft outcomes such as a skipped keyword merge or a root-folder fallback are
//! not errors; they are reported through `merge::MergeOutcome` and
//! `path::RootResolution`.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for importer operations
#[derive(Error, Debug)]
pub enum Error {
    /// The catalogue database could not be opened or a query against it failed.
    #[error("Catalogue error: {0}")]
    Catalogue(#[from] rusqlite::Error),

    /// The catalogue file does not exist.
    #[error("Catalogue not found: {}", path.display())]
    CatalogueNotFound { path: PathBuf },

    /// The catalogue has no root folder record, so it is malformed.
    #[error("Catalogue has no root folder record: {}", catalogue.display())]
    MissingRootFolder { catalogue: PathBuf },

    /// A photo's stored metadata is absent, unreadable or corrupt.
    #[error("Metadata error for photo {photo_id}: {message}")]
    Metadata { photo_id: String, message: String },

    /// A sidecar directory or file could not be written.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// The target application could not be launched.
    #[error("Launch error for {binary}: {message}")]
    Launch { binary: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON serialization error, wrapped from `serde_json::Error`.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
