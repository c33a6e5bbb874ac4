//! # darktable Importer Library
//!
//! This library migrates a Lightroom catalogue into darktable. It reads every
//! photo from the catalogue, rewrites the recorded paths onto the folder the
//! photos actually live in today, optionally writes XMP sidecars carrying the
//! photo's keywords, and hands the photo list to darktable for import.
//!
//! It is designed to be used by the `darktable-importer` command-line tool
//! but every step is also usable on its own.
//!
//! ## Quick Example
//!
//! ```
//! use std::path::Path;
//! use darktable_importer::merge::{MergeOutcome, MetadataMerger, XmpTextMerger};
//! use darktable_importer::path::remap_path;
//!
//! let path = remap_path(
//!     r"C:\Pictures\MyLibrary",
//!     Path::new("/mnt/data/MyLibrary"),
//!     r"C:\Pictures\MyLibrary\2020\img1.nef",
//! );
//! assert_eq!(path, Path::new("/mnt/data/MyLibrary/2020/img1.nef"));
//!
//! let packet = "<rdf:Description xmlns:xmp=\"http://ns.adobe.com/xap/1.0/\">\n</rdf:Description>";
//! let merged = XmpTextMerger.add_keywords(packet, &["trip".to_string()]);
//! assert!(matches!(merged, MergeOutcome::Merged(_)));
//! assert!(merged.document().contains("<rdf:li>trip</rdf:li>"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Path remapping (`path`)**: Finds the real root folder from the
//!   catalogue's location and rebases recorded photo paths onto it.
//! - **Catalogue reading (`catalogue`)**: The [`catalogue::CatalogueSource`]
//!   trait and its Lightroom SQLite implementation.
//! - **Metadata merging (`merge`)**: Text-level keyword insertion into XMP
//!   packets behind the [`merge::MetadataMerger`] trait.
//! - **Sidecar export (`sidecar`)**: Decompresses stored packets, merges
//!   keywords and writes `<image>.xmp` files, isolating failures per photo.
//! - **Launching (`launcher`)**: Starts darktable with a generated Lua import
//!   script.
//!
//! ## Execution Flow
//!
//! [`orchestrator::prepare`] opens the catalogue, reads all photos and runs
//! the export when requested. The caller then decides whether to launch
//! darktable on the result.

pub mod catalogue;
pub mod config;
pub mod defaults;
pub mod error;
pub mod launcher;
pub mod merge;
pub mod orchestrator;
pub mod output;
pub mod path;
pub mod sidecar;
