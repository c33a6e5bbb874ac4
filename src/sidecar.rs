//! Sidecar export
//!
//! For every photo read from the catalogue, the exporter fetches the
//! compressed XMP packet Lightroom stored for it, merges the photo's keywords
//! into it and writes the result next to the image as `<image>.xmp`.
//!
//! ## Process
//!
//! 1.  **Fetch**: Look up the metadata blob for the photo id.
//!
//! 2.  **Decompress**: Skip the 4-byte header and inflate the zlib stream.
//!     Invalid UTF-8 is replaced rather than rejected.
//!
//! 3.  **Merge**: Add the photo's keywords, any extra keywords, and `picked`
//!     for flagged photos.
//!
//! 4.  **Write**: Create missing directories and write the sidecar.
//!
//! Each photo is handled independently. A failure at any step is logged as a
//! warning naming the photo and recorded in the [`ExportReport`]; the export
//! then moves on to the next photo.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::ZlibDecoder;
use log::{debug, warn};

use crate::catalogue::{CatalogueSource, PhotoRecord};
use crate::defaults::{PICKED_KEYWORD, SIDECAR_EXTENSION};
use crate::error::{Error, Result};
use crate::merge::{MergeOutcome, MetadataMerger, XmpTextMerger};

/// Size of the header Lightroom stores ahead of the compressed packet.
pub const METADATA_HEADER_LEN: usize = 4;

/// Why a photo's sidecar was not written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportWarning {
    /// No metadata blob is stored for the photo.
    MissingMetadata { photo_id: String },
    /// The blob could not be fetched or decompressed.
    UnreadableMetadata { photo_id: String, message: String },
    /// The sidecar could not be written.
    WriteFailed { photo_id: String, message: String },
}

impl ExportWarning {
    pub fn photo_id(&self) -> &str {
        match self {
            ExportWarning::MissingMetadata { photo_id }
            | ExportWarning::UnreadableMetadata { photo_id, .. }
            | ExportWarning::WriteFailed { photo_id, .. } => photo_id,
        }
    }
}

/// Summary of an export run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Sidecars written, in photo order.
    pub written: Vec<PathBuf>,
    /// Photos whose sidecar was written without keywords because the
    /// keyword container could not be located.
    pub merge_skipped: Vec<String>,
    /// Photos whose sidecar was not written.
    pub warnings: Vec<ExportWarning>,
}

/// Inflate a stored metadata blob into text.
///
/// The first [`METADATA_HEADER_LEN`] bytes are skipped. Byte sequences that are
/// not valid UTF-8 become U+FFFD.
pub fn decompress_metadata(photo_id: &str, blob: &[u8]) -> Result<String> {
    let Some(payload) = blob.get(METADATA_HEADER_LEN..) else {
        return Err(Error::Metadata {
            photo_id: photo_id.to_string(),
            message: format!("blob is only {} bytes long", blob.len()),
        });
    };

    let mut decoder = ZlibDecoder::new(payload);
    let mut inflated = Vec::new();
    decoder
        .read_to_end(&mut inflated)
        .map_err(|e| Error::Metadata {
            photo_id: photo_id.to_string(),
            message: format!("failed to decompress: {}", e),
        })?;

    Ok(String::from_utf8_lossy(&inflated).into_owned())
}

/// Sidecar location for an image: the full file name with `.xmp` appended.
///
/// `img1.nef` becomes `img1.nef.xmp`.
pub fn sidecar_path(image: &Path) -> PathBuf {
    let mut name = image.as_os_str().to_os_string();
    name.push(".");
    name.push(SIDECAR_EXTENSION);
    PathBuf::from(name)
}

/// Write a sidecar, creating parent directories as needed.
pub fn write_sidecar(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::Filesystem {
            message: format!("Failed to create directory '{}': {}", parent.display(), e),
        })?;
    }

    fs::write(path, content).map_err(|e| Error::Filesystem {
        message: format!("Failed to write file '{}': {}", path.display(), e),
    })?;

    Ok(())
}

/// Keywords to merge for a photo: its own, then the extras, then `picked`.
pub fn effective_keywords(photo: &PhotoRecord, extra_keywords: Option<&[String]>) -> Vec<String> {
    let mut keywords = photo.keywords.clone();
    if let Some(extra) = extra_keywords {
        keywords.extend(extra.iter().cloned());
    }
    if photo.picked {
        keywords.push(PICKED_KEYWORD.to_string());
    }
    keywords
}

/// Writes merged sidecars for a list of photos.
pub struct SidecarExporter<M: MetadataMerger = XmpTextMerger> {
    merger: M,
}

impl SidecarExporter<XmpTextMerger> {
    pub fn new() -> Self {
        Self {
            merger: XmpTextMerger,
        }
    }
}

impl Default for SidecarExporter<XmpTextMerger> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MetadataMerger> SidecarExporter<M> {
    /// Use a different merger implementation.
    pub fn with_merger(merger: M) -> Self {
        Self { merger }
    }

    /// Export sidecars for every photo, isolating failures per photo.
    pub fn export<S: CatalogueSource + ?Sized>(
        &self,
        photos: &[PhotoRecord],
        catalogue: &S,
        extra_keywords: Option<&[String]>,
    ) -> ExportReport {
        let mut report = ExportReport::default();

        for photo in photos {
            let document = match self.load_document(photo, catalogue) {
                Ok(document) => document,
                Err(warning) => {
                    report.warnings.push(warning);
                    continue;
                }
            };

            let keywords = effective_keywords(photo, extra_keywords);
            let outcome = if keywords.is_empty() {
                MergeOutcome::Unchanged(document)
            } else {
                self.merger.add_keywords(&document, &keywords)
            };
            if outcome.is_skipped() {
                warn!(
                    "Photo {}: no keyword container found, writing metadata without keywords",
                    photo.id
                );
                report.merge_skipped.push(photo.id.clone());
            }

            let target = sidecar_path(&photo.resolved_path);
            match write_sidecar(&target, outcome.document()) {
                Ok(()) => {
                    debug!("Photo {}: wrote {}", photo.id, target.display());
                    report.written.push(target);
                }
                Err(e) => {
                    warn!("Photo {}: {}", photo.id, e);
                    report.warnings.push(ExportWarning::WriteFailed {
                        photo_id: photo.id.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        report
    }

    fn load_document<S: CatalogueSource + ?Sized>(
        &self,
        photo: &PhotoRecord,
        catalogue: &S,
    ) -> std::result::Result<String, ExportWarning> {
        let blob = match catalogue.metadata_blob(&photo.id) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                warn!("Photo {}: no metadata stored in the catalogue", photo.id);
                return Err(ExportWarning::MissingMetadata {
                    photo_id: photo.id.clone(),
                });
            }
            Err(e) => {
                warn!("Photo {}: failed to read metadata: {}", photo.id, e);
                return Err(ExportWarning::UnreadableMetadata {
                    photo_id: photo.id.clone(),
                    message: e.to_string(),
                });
            }
        };

        decompress_metadata(&photo.id, &blob).map_err(|e| {
            warn!("Photo {}: {}", photo.id, e);
            ExportWarning::UnreadableMetadata {
                photo_id: photo.id.clone(),
                message: e.to_string(),
            }
        })
    }
}
