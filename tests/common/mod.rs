//! Shared test utilities for integration and E2E tests.
//!
//! This module builds small Lightroom catalogues on disk so tests can run
//! the importer against real SQLite files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = CatalogueFixture::new("MyLibrary");
//!     fixture.add_photo(1, "img1.nef", 1.0, &["trip"]);
//!     fixture.add_metadata(1, &compress(packets::MINIMAL));
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use rusqlite::{params, Connection};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::packets;
    #[allow(unused_imports)]
    pub use super::compress;
    pub use super::CatalogueFixture;
}

/// Metadata packets as Lightroom stores them, before compression.
#[allow(dead_code)]
pub mod packets {
    /// Description with an `xmp` namespace and nothing else.
    pub const MINIMAL: &str = "<x:xmpmeta xmlns:x=\"adobe:ns:meta/\">
 <rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\">
  <rdf:Description rdf:about=\"\"
    xmlns:xmp=\"http://ns.adobe.com/xap/1.0/\">
  </rdf:Description>
 </rdf:RDF>
</x:xmpmeta>
";

    /// Description with exif data, as exported from a camera raw file.
    pub const WITH_EXIF: &str = "<x:xmpmeta xmlns:x=\"adobe:ns:meta/\" x:xmptk=\"Adobe XMP Core 5.6-c140\">
 <rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\">
  <rdf:Description rdf:about=\"\"
    xmlns:xmp=\"http://ns.adobe.com/xap/1.0/\"
    xmlns:exif=\"http://ns.adobe.com/exif/1.0/\"
   xmp:Rating=\"3\">
   <exif:ISOSpeedRatings>
    <rdf:Seq>
     <rdf:li>200</rdf:li>
    </rdf:Seq>
   </exif:ISOSpeedRatings>
  </rdf:Description>
 </rdf:RDF>
</x:xmpmeta>
";

    /// Description that already carries keywords.
    pub const WITH_KEYWORDS: &str = "<x:xmpmeta xmlns:x=\"adobe:ns:meta/\">
 <rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\">
  <rdf:Description rdf:about=\"\"
    xmlns:lr=\"http://ns.adobe.com/lightroom/1.0/\"
    xmlns:xmp=\"http://ns.adobe.com/xap/1.0/\">
   <lr:hierarchicalSubject>
    <rdf:Bag>
     <rdf:li>family</rdf:li>
    </rdf:Bag>
   </lr:hierarchicalSubject>
  </rdf:Description>
 </rdf:RDF>
</x:xmpmeta>
";
}

/// Compress a packet the way Lightroom stores it: a 4-byte length header
/// followed by a zlib stream.
pub fn compress(text: &str) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(text.as_bytes())
        .expect("Failed to compress packet");
    let mut blob = (text.len() as u32).to_be_bytes().to_vec();
    blob.extend(encoder.finish().expect("Failed to finish compression"));
    blob
}

const SCHEMA: &str = "
CREATE TABLE AgLibraryRootFolder (id_local INTEGER PRIMARY KEY, absolutePath TEXT, name TEXT);
CREATE TABLE AgLibraryFolder (id_local INTEGER PRIMARY KEY, pathFromRoot TEXT, rootFolder INTEGER);
CREATE TABLE AgLibraryFile (id_local INTEGER PRIMARY KEY, baseName TEXT, extension TEXT, folder INTEGER);
CREATE TABLE Adobe_images (id_local INTEGER PRIMARY KEY, rootFile INTEGER, pick REAL NOT NULL DEFAULT 0);
CREATE TABLE AgLibraryKeyword (id_local INTEGER PRIMARY KEY, name TEXT);
CREATE TABLE AgLibraryKeywordImage (id_local INTEGER PRIMARY KEY, image INTEGER, tag INTEGER);
CREATE TABLE Adobe_AdditionalMetadata (id_local INTEGER PRIMARY KEY, image INTEGER, xmp BLOB);
";

/// Folder id every fixture photo is filed under.
const FOLDER_ID: i64 = 1;

/// A Lightroom catalogue in a temporary directory.
///
/// The catalogue file is created at `<temp>/<library>/catalog.lrcat` and
/// records `C:/Users/alice/Pictures/<library>/` as its root, so photos remap
/// onto `<temp>/<library>/2020/`.
pub struct CatalogueFixture {
    temp_dir: assert_fs::TempDir,
    library: String,
}

impl CatalogueFixture {
    /// Create a catalogue whose recorded root ends in `library`.
    pub fn new(library: &str) -> Self {
        Self::with_recorded_root(library, &format!("C:/Users/alice/Pictures/{}/", library))
    }

    /// Create a catalogue in `<temp>/<library>` with an explicit recorded root.
    pub fn with_recorded_root(library: &str, recorded_root: &str) -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child(library)
            .create_dir_all()
            .expect("Failed to create library directory");

        let fixture = Self {
            temp_dir,
            library: library.to_string(),
        };
        let conn = fixture.connect();
        conn.execute_batch(SCHEMA).expect("Failed to create schema");
        conn.execute(
            "INSERT INTO AgLibraryRootFolder VALUES (1, ?1, ?2)",
            params![recorded_root, library],
        )
        .expect("Failed to insert root folder");
        conn.execute(
            "INSERT INTO AgLibraryFolder VALUES (?1, '2020/', 1)",
            params![FOLDER_ID],
        )
        .expect("Failed to insert folder");
        fixture
    }

    /// Create a catalogue file with the schema but no root folder record.
    #[allow(dead_code)]
    pub fn without_root(library: &str) -> Self {
        let fixture = Self::new(library);
        fixture
            .connect()
            .execute("DELETE FROM AgLibraryRootFolder", [])
            .expect("Failed to delete root folder");
        fixture
    }

    fn connect(&self) -> Connection {
        Connection::open(self.catalogue_path()).expect("Failed to open catalogue")
    }

    /// Add a photo named `file_name` with the given pick flag and keywords.
    pub fn add_photo(&self, id: i64, file_name: &str, pick: f64, keywords: &[&str]) {
        let (base, extension) = file_name.rsplit_once('.').unwrap_or((file_name, ""));
        let conn = self.connect();
        conn.execute(
            "INSERT INTO AgLibraryFile VALUES (?1, ?2, ?3, ?4)",
            params![id, base, extension, FOLDER_ID],
        )
        .expect("Failed to insert file");
        conn.execute(
            "INSERT INTO Adobe_images VALUES (?1, ?1, ?2)",
            params![id, pick],
        )
        .expect("Failed to insert image");

        for keyword in keywords {
            conn.execute(
                "INSERT INTO AgLibraryKeyword (name) VALUES (?1)",
                params![keyword],
            )
            .expect("Failed to insert keyword");
            let tag = conn.last_insert_rowid();
            conn.execute(
                "INSERT INTO AgLibraryKeywordImage (image, tag) VALUES (?1, ?2)",
                params![id, tag],
            )
            .expect("Failed to tag image");
        }
    }

    /// Store a metadata blob for photo `id`.
    pub fn add_metadata(&self, id: i64, blob: &[u8]) {
        self.connect()
            .execute(
                "INSERT INTO Adobe_AdditionalMetadata (image, xmp) VALUES (?1, ?2)",
                params![id, blob],
            )
            .expect("Failed to insert metadata");
    }

    /// Path to the temporary directory.
    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path to the catalogue file.
    pub fn catalogue_path(&self) -> PathBuf {
        self.library_dir().join("catalog.lrcat")
    }

    /// Folder the photos remap onto.
    pub fn library_dir(&self) -> PathBuf {
        self.temp_dir.path().join(&self.library)
    }

    /// Where photo `file_name` is expected after remapping.
    #[allow(dead_code)]
    pub fn photo_path(&self, file_name: &str) -> PathBuf {
        self.library_dir()
            .canonicalize()
            .expect("Failed to resolve library directory")
            .join("2020")
            .join(file_name)
    }

    /// Where the sidecar for photo `file_name` is expected.
    #[allow(dead_code)]
    pub fn sidecar_path(&self, file_name: &str) -> PathBuf {
        self.photo_path(&format!("{}.xmp", file_name))
    }
}
