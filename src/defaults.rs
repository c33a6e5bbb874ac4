//! Default values for importer configuration.
//!
//! This module provides centralized default values used across the library
//! and the CLI, ensuring consistency and avoiding duplication.

use std::path::{Path, PathBuf};

/// Binary launched to import the photos.
///
/// This can be overridden by the `--app` CLI flag or the
/// `DARKTABLE_IMPORTER_APP` environment variable.
pub const DEFAULT_APP: &str = "darktable";

/// Extension given to a derived target library.
pub const LIBRARY_EXTENSION: &str = "db";

/// Extension appended to an image's file name to name its sidecar.
pub const SIDECAR_EXTENSION: &str = "xmp";

/// Keyword added to photos flagged as picks.
pub const PICKED_KEYWORD: &str = "picked";

/// Returns the target library path used when none is given.
///
/// The catalogue path with its extension replaced, so
/// `~/Pictures/Lightroom/catalog.lrcat` becomes
/// `~/Pictures/Lightroom/catalog.db`.
pub fn default_library_path(catalogue: &Path) -> PathBuf {
    catalogue.with_extension(LIBRARY_EXTENSION)
}
