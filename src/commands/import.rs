//! # Import Command Implementation
//!
//! Reads a Lightroom catalogue, optionally writes XMP sidecars for its
//! photos, and launches darktable on the result.
//!
//! ## Functionality
//!
//! - **Catalogue reading**: Photo paths are remapped onto the folder the
//!   catalogue lives in today. Any catalogue error aborts the run.
//! - **Sidecar export** (`--xmp`): Writes `<image>.xmp` next to every photo,
//!   with catalogue keywords, `--keywords` and `picked` merged in. Per-photo
//!   failures are reported as warnings.
//! - **Launch**: Starts darktable with a generated import script, unless
//!   `--donotlaunch` is given.

use anyhow::Result;
use clap::Args;
use log::info;
use std::path::PathBuf;

use darktable_importer::config::{parse_keyword_list, ImportConfig};
use darktable_importer::defaults::{default_library_path, DEFAULT_APP};
use darktable_importer::launcher::DarktableLauncher;
use darktable_importer::orchestrator::{self, PreparedImport};
use darktable_importer::output::OutputConfig;

/// Arguments for the import
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Lightroom catalogue to import
    #[arg(short, long, value_name = "PATH")]
    pub input: PathBuf,

    /// darktable library to import into (defaults to the catalogue path with a .db extension)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Export XMP sidecar files next to the photos
    #[arg(long)]
    pub xmp: bool,

    /// Comma separated keywords added to every exported sidecar
    #[arg(long, value_name = "CSV")]
    pub keywords: Option<String>,

    /// Application to launch once the photos are ready
    #[arg(long, value_name = "BIN", env = "DARKTABLE_IMPORTER_APP", default_value = DEFAULT_APP)]
    pub app: String,

    /// Do not launch the application
    #[arg(long)]
    pub donotlaunch: bool,
}

impl ImportArgs {
    /// Build the run configuration, deriving the library path when needed.
    pub fn to_config(&self) -> ImportConfig {
        let library = match &self.output {
            Some(output) => output.clone(),
            None => {
                let derived = default_library_path(&self.input);
                info!(
                    "Output library not specified, using: {}",
                    derived.display()
                );
                derived
            }
        };

        ImportConfig {
            catalogue: self.input.clone(),
            library,
            export_xmp: self.xmp,
            extra_keywords: parse_keyword_list(self.keywords.as_deref()),
            app: self.app.clone(),
            launch: !self.donotlaunch,
        }
    }
}

/// Execute the import
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the --color flag ("always", "never", or "auto")
pub fn execute(args: ImportArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let config = args.to_config();

    println!(
        "{} Importing catalogue: {}",
        out.info(),
        config.catalogue.display()
    );

    let prepared = orchestrator::prepare(&config)?;
    if prepared.photos.is_empty() {
        anyhow::bail!("No images found in the catalogue");
    }

    print_summary(&out, &prepared);

    if !config.launch {
        println!("   Not launching {} (--donotlaunch)", config.app);
        return Ok(());
    }

    let status = DarktableLauncher::new(config.app.clone())
        .launch(&config.library, &prepared.image_paths())?;
    if !status.success() {
        anyhow::bail!("{} exited with {}", config.app, status);
    }

    println!("{} {} finished", out.ok(), config.app);
    Ok(())
}

fn print_summary(out: &OutputConfig, prepared: &PreparedImport) {
    println!("{} Found {} photos", out.ok(), prepared.photos.len());

    let Some(report) = &prepared.export else {
        return;
    };
    let marker = if report.warnings.is_empty() && report.merge_skipped.is_empty() {
        out.ok()
    } else {
        out.warn()
    };
    println!("{} Wrote {} sidecars", marker, report.written.len());
    if !report.merge_skipped.is_empty() {
        println!(
            "   {} written without keywords: {}",
            report.merge_skipped.len(),
            report.merge_skipped.join(", ")
        );
    }
    for warning in &report.warnings {
        println!("   Photo {} skipped", warning.photo_id());
    }
}
