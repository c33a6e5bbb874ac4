//! # Import Configuration
//!
//! [`ImportConfig`] gathers everything one import run needs. The CLI builds
//! it from its arguments; library callers can build it directly. It is a
//! plain value: every field is supplied at construction and nothing is
//! shared between instances.

use std::path::PathBuf;

use crate::catalogue::parse_keywords;
use crate::defaults::{default_library_path, DEFAULT_APP};

/// Settings for one import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// Catalogue file to read.
    pub catalogue: PathBuf,
    /// Target library handed to the launched application.
    pub library: PathBuf,
    /// Whether to write XMP sidecars.
    pub export_xmp: bool,
    /// Keywords appended to every exported sidecar.
    pub extra_keywords: Option<Vec<String>>,
    /// Binary to launch once the photos are ready.
    pub app: String,
    /// Whether to launch `app` at all.
    pub launch: bool,
}

impl ImportConfig {
    /// Configuration with defaults for everything but the catalogue: library
    /// derived from the catalogue path, no export, default app, launch on.
    pub fn new(catalogue: impl Into<PathBuf>) -> Self {
        let catalogue = catalogue.into();
        Self {
            library: default_library_path(&catalogue),
            catalogue,
            export_xmp: false,
            extra_keywords: None,
            app: DEFAULT_APP.to_string(),
            launch: true,
        }
    }
}

/// Parse a `--keywords` value.
///
/// Returns `None` when no value was given, so "no extra keywords" and "an
/// empty list" stay distinguishable for logging.
pub fn parse_keyword_list(value: Option<&str>) -> Option<Vec<String>> {
    value.map(parse_keywords)
}
