//! Lightroom catalogue access over SQLite.
//!
//! A `.lrcat` file is a SQLite database. Only a handful of tables matter here:
//!
//! - `AgLibraryRootFolder`: recorded root folders (`absolutePath`)
//! - `AgLibraryFolder` / `AgLibraryFile`: folder and file names below a root
//! - `Adobe_images`: one row per photo, with the pick flag
//! - `AgLibraryKeyword` / `AgLibraryKeywordImage`: keyword assignments
//! - `Adobe_AdditionalMetadata`: the compressed XMP packet per photo
//!
//! The catalogue is opened read-only; nothing is ever written back.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OpenFlags, OptionalExtension};

use super::{CatalogueSource, PhotoRow};
use crate::error::{Error, Result};

const ROOT_FOLDER_QUERY: &str =
    "SELECT absolutePath FROM AgLibraryRootFolder ORDER BY id_local LIMIT 1";

const PHOTO_ROWS_QUERY: &str = "
    SELECT img.id_local,
           root.absolutePath || folder.pathFromRoot || file.baseName || '.' || file.extension,
           GROUP_CONCAT(kw.name, ','),
           CAST(img.pick AS INTEGER)
    FROM Adobe_images img
    JOIN AgLibraryFile file ON file.id_local = img.rootFile
    JOIN AgLibraryFolder folder ON folder.id_local = file.folder
    JOIN AgLibraryRootFolder root ON root.id_local = folder.rootFolder
    LEFT JOIN AgLibraryKeywordImage ki ON ki.image = img.id_local
    LEFT JOIN AgLibraryKeyword kw ON kw.id_local = ki.tag
    GROUP BY img.id_local
    ORDER BY img.id_local";

const METADATA_QUERY: &str = "SELECT xmp FROM Adobe_AdditionalMetadata WHERE image = ?1";

/// Read-only handle on a Lightroom catalogue.
pub struct LightroomCatalogue {
    conn: Connection,
    location: PathBuf,
}

impl LightroomCatalogue {
    /// Open the catalogue at `path` read-only.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::CatalogueNotFound {
                path: path.to_path_buf(),
            });
        }
        let location = path.canonicalize()?;
        let conn = Connection::open_with_flags(
            &location,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn, location })
    }
}

impl CatalogueSource for LightroomCatalogue {
    fn location(&self) -> &Path {
        &self.location
    }

    fn root_folder(&self) -> Result<Option<String>> {
        let root = self
            .conn
            .query_row(ROOT_FOLDER_QUERY, [], |row| row.get(0))
            .optional()?;
        Ok(root)
    }

    fn photo_rows(&self) -> Result<Vec<PhotoRow>> {
        let mut stmt = self.conn.prepare(PHOTO_ROWS_QUERY)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(PhotoRow {
                    id: row.get::<_, i64>(0)?.to_string(),
                    path: row.get(1)?,
                    keywords: row.get(2)?,
                    flag: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn metadata_blob(&self, photo_id: &str) -> Result<Option<Vec<u8>>> {
        let image: i64 = photo_id.parse().map_err(|_| Error::Metadata {
            photo_id: photo_id.to_string(),
            message: "photo id is not a catalogue row id".to_string(),
        })?;
        let blob = self
            .conn
            .query_row(METADATA_QUERY, params![image], |row| {
                row.get::<_, Option<Vec<u8>>>(0)
            })
            .optional()?;
        Ok(blob.flatten())
    }
}
