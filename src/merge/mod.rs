//! Keyword merging for sidecar metadata documents
//!
//! This module merges keyword lists into the metadata documents stored in a
//! catalogue before they are written out as sidecar files. The document is
//! never parsed into a tree: edits are made directly on the text so that
//! everything outside the edited regions survives byte for byte.
//!
//! ## Supported Formats
//!
//! - XMP (xmp.rs) - Adobe XMP packets as stored by Lightroom
//!
//! ## Common Types
//!
//! [`MergeOutcome`] tells the caller whether the document was changed, left
//! alone because there was nothing to do, or left alone because the keyword
//! container could not be located. [`MetadataMerger`] is the seam callers
//! depend on, so a structural implementation can replace the text one.

pub mod xmp;

#[cfg(test)]
mod xmp_proptest;

pub use xmp::XmpTextMerger;

/// Result of merging keywords into a metadata document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Keywords were inserted.
    Merged(String),
    /// Nothing to insert; the document is returned as given.
    Unchanged(String),
    /// The keyword container could not be located or created; the document
    /// is returned as given.
    Skipped(String),
}

impl MergeOutcome {
    /// The resulting document text, whatever the outcome.
    pub fn document(&self) -> &str {
        match self {
            MergeOutcome::Merged(doc) | MergeOutcome::Unchanged(doc) | MergeOutcome::Skipped(doc) => {
                doc
            }
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, MergeOutcome::Skipped(_))
    }
}

/// Inserts keywords into a metadata document.
///
/// Implementations must be purely additive: existing keyword entries keep
/// their order and new entries follow them in the order given.
pub trait MetadataMerger {
    fn add_keywords(&self, document: &str, keywords: &[String]) -> MergeOutcome;
}
