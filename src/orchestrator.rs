//! Import pipeline
//!
//! Ties the pieces together for one run:
//! 1. Open the catalogue read-only
//! 2. Read every photo and remap its path onto disk
//! 3. Export sidecars, when requested
//!
//! Reading is fatal on error; the export never is. Launching the target
//! application is left to the caller so the library never starts processes
//! or exits on its own.

use log::info;

use crate::catalogue::lightroom::LightroomCatalogue;
use crate::catalogue::{read_photos, CatalogueSource, PhotoRecord};
use crate::config::ImportConfig;
use crate::error::Result;
use crate::sidecar::{ExportReport, SidecarExporter};

/// Result of reading (and optionally exporting) a catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparedImport {
    /// Photos read from the catalogue, in catalogue order.
    pub photos: Vec<PhotoRecord>,
    /// Export summary, present when sidecar export was requested.
    pub export: Option<ExportReport>,
}

impl PreparedImport {
    /// Resolved image paths, ready to hand to the target application.
    pub fn image_paths(&self) -> Vec<std::path::PathBuf> {
        self.photos
            .iter()
            .map(|photo| photo.resolved_path.clone())
            .collect()
    }
}

/// Open the configured catalogue and run the pipeline on it.
pub fn prepare(config: &ImportConfig) -> Result<PreparedImport> {
    let catalogue = LightroomCatalogue::open(&config.catalogue)?;
    prepare_from(&catalogue, config)
}

/// Run the pipeline on an already opened catalogue.
pub fn prepare_from<S: CatalogueSource + ?Sized>(
    catalogue: &S,
    config: &ImportConfig,
) -> Result<PreparedImport> {
    let photos = read_photos(catalogue)?;
    info!("Found {} photos", photos.len());

    let export = if config.export_xmp {
        info!("Exporting XMP metadata");
        let report =
            SidecarExporter::new().export(&photos, catalogue, config.extra_keywords.as_deref());
        info!(
            "Wrote {} sidecars ({} without keywords), {} photos skipped",
            report.written.len(),
            report.merge_skipped.len(),
            report.warnings.len()
        );
        Some(report)
    } else {
        None
    };

    Ok(PreparedImport { photos, export })
}
