//! Root folder discovery and path remapping
//!
//! Catalogues record absolute paths from the machine they were created on,
//! which are often stale by the time the catalogue is imported (another
//! drive letter, another OS, another mount point). This module finds the
//! folder on disk that corresponds to the catalogue's recorded root and
//! rewrites recorded photo paths onto it.
//!
//! Root discovery assumes the catalogue file still lives somewhere below a
//! folder carrying the same name as the recorded root's leaf folder. When no
//! such ancestor exists the catalogue's own directory is used instead, and the
//! fallback is reported in [`RootResolution::fallback`].

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use log::{debug, warn};

/// Outcome of root folder discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootResolution {
    /// Folder that recorded photo paths should be remapped onto.
    pub root: PathBuf,
    /// True when no ancestor matched and the catalogue's directory was used.
    pub fallback: bool,
}

/// Last non-empty segment of a recorded path, accepting either separator.
///
/// Returns `None` for paths with no segments (`""`, `"/"`, `"\\"`).
pub fn leaf_name(recorded: &str) -> Option<&str> {
    recorded
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .last()
}

/// Walk from `start` up to the filesystem root and return the first folder
/// named `leaf`. `start` itself is the first candidate.
pub fn find_matching_ancestor(leaf: &str, start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|candidate| {
        debug!("Searching actual root in: {}", candidate.display());
        if candidate.file_name() == Some(OsStr::new(leaf)) {
            Some(candidate.to_path_buf())
        } else {
            None
        }
    })
}

/// Determine the real root folder for a catalogue.
///
/// `catalogue_path` should be the catalogue file's absolute location. The
/// search starts at its containing directory.
pub fn resolve_root(recorded_root: &str, catalogue_path: &Path) -> RootResolution {
    let catalogue_dir = catalogue_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let matched =
        leaf_name(recorded_root).and_then(|leaf| find_matching_ancestor(leaf, &catalogue_dir));

    match matched {
        Some(root) => RootResolution {
            root,
            fallback: false,
        },
        None => {
            warn!(
                "No folder above {} matches recorded root '{}'; using the catalogue folder",
                catalogue_path.display(),
                recorded_root
            );
            RootResolution {
                root: catalogue_dir,
                fallback: true,
            }
        }
    }
}

/// Rewrite a recorded photo path onto the resolved root.
///
/// Paths that do not start with `recorded_root` are returned unchanged.
/// Otherwise the prefix is stripped, backslashes become forward slashes and
/// the remainder is joined onto `resolved_root`.
pub fn remap_path(recorded_root: &str, resolved_root: &Path, photo_path: &str) -> PathBuf {
    let Some(remainder) = photo_path.strip_prefix(recorded_root) else {
        return PathBuf::from(photo_path);
    };

    let relative = remainder.replace('\\', "/");
    // A leading separator would make the join discard the resolved root
    let relative = relative.trim_start_matches('/');
    if relative.is_empty() {
        resolved_root.to_path_buf()
    } else {
        resolved_root.join(relative)
    }
}
