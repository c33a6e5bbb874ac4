//! # Catalogue Reading
//!
//! This module turns the rows of a source catalogue into [`PhotoRecord`]s
//! whose paths point at the files actually present on disk.
//!
//! The catalogue itself is reached through the [`CatalogueSource`] trait, so
//! the reader does not care how rows are stored. [`lightroom`] provides the
//! SQLite-backed implementation for Lightroom `.lrcat` files.
//!
//! Reading is all-or-nothing: any failing query aborts with an error and no
//! partial photo list is produced.

pub mod lightroom;

use std::path::{Path, PathBuf};

use log::info;

use crate::error::{Error, Result};
use crate::path::{remap_path, resolve_root, RootResolution};

/// One photo row as stored in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRow {
    pub id: String,
    pub path: String,
    /// Comma separated keyword names, if the photo has any.
    pub keywords: Option<String>,
    pub flag: i64,
}

/// A photo ready for export, with its path remapped onto disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    pub id: String,
    pub resolved_path: PathBuf,
    pub keywords: Vec<String>,
    pub picked: bool,
}

/// The root folder recorded in a catalogue together with where the
/// catalogue file really lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueRootInfo {
    pub recorded_root: String,
    pub location: PathBuf,
}

impl CatalogueRootInfo {
    pub fn resolve(&self) -> RootResolution {
        resolve_root(&self.recorded_root, &self.location)
    }
}

/// Read access to a photo catalogue.
pub trait CatalogueSource {
    /// Absolute location of the catalogue file.
    fn location(&self) -> &Path;

    /// The recorded root folder, or `None` if the catalogue has none.
    fn root_folder(&self) -> Result<Option<String>>;

    /// All photo rows in the catalogue's natural order.
    fn photo_rows(&self) -> Result<Vec<PhotoRow>>;

    /// The compressed metadata blob stored for a photo, if any.
    fn metadata_blob(&self, photo_id: &str) -> Result<Option<Vec<u8>>>;
}

/// Split a comma separated keyword list, trimming each entry and dropping
/// empty ones.
///
/// ```
/// use darktable_importer::catalogue::parse_keywords;
///
/// assert_eq!(parse_keywords("trip, sunset ,, beach"), vec!["trip", "sunset", "beach"]);
/// ```
pub fn parse_keywords(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read every photo from the catalogue, remapping paths onto the real root.
///
/// Fails if the catalogue has no root folder or any query fails.
pub fn read_photos<S: CatalogueSource + ?Sized>(source: &S) -> Result<Vec<PhotoRecord>> {
    let recorded_root = source
        .root_folder()?
        .ok_or_else(|| Error::MissingRootFolder {
            catalogue: source.location().to_path_buf(),
        })?;
    let root_info = CatalogueRootInfo {
        recorded_root,
        location: source.location().to_path_buf(),
    };
    let resolution = root_info.resolve();

    info!("Database folder: {}", root_info.location.display());
    info!("Actual root folder: {}", resolution.root.display());
    info!("Root folder: {}", root_info.recorded_root);

    let rows = source.photo_rows()?;
    let photos = rows
        .into_iter()
        .map(|row| PhotoRecord {
            resolved_path: remap_path(&root_info.recorded_root, &resolution.root, &row.path),
            keywords: row.keywords.as_deref().map(parse_keywords).unwrap_or_default(),
            picked: row.flag == 1,
            id: row.id,
        })
        .collect();

    Ok(photos)
}
