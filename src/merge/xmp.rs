//! XMP keyword merge operations
//!
//! Lightroom keeps a per-photo XMP packet in its catalogue. Before that packet
//! is written next to the image as a sidecar, keywords are added to its
//! `lr:hierarchicalSubject` bag so the importing application picks them up.
//!
//! The merge works in three escalating steps, each one a plain text
//! transform that returns its input untouched when there is nothing to do:
//!
//! 1. [`ensure_namespace`] declares the `lr` prefix next to the `xmp` one.
//! 2. [`ensure_keyword_container`] inserts an empty `lr:hierarchicalSubject`
//!    bag before the first `<exif:` element, or before `</rdf:Description>`.
//! 3. [`add_keywords`] appends one `rdf:li` entry per keyword to the first bag.
//!
//! Keywords are inserted verbatim. No XML escaping is applied.
//!
//! ## Example
//!
//! ```
//! use darktable_importer::merge::xmp::add_keywords;
//! use darktable_importer::merge::MergeOutcome;
//!
//! let doc = "<rdf:Description rdf:about=\"\"\n    xmlns:xmp=\"http://ns.adobe.com/xap/1.0/\">\n  </rdf:Description>";
//! let outcome = add_keywords(doc, &["picked".to_string()]);
//! assert!(matches!(outcome, MergeOutcome::Merged(_)));
//! assert!(outcome.document().contains("<rdf:li>picked</rdf:li>"));
//! ```

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use super::{MergeOutcome, MetadataMerger};

/// Namespace URI bound to the `lr` prefix.
pub const LIGHTROOM_NAMESPACE: &str = "http://ns.adobe.com/lightroom/1.0/";

const XMP_DECLARATION: &str = "xmlns:xmp=";
const LR_DECLARATION: &str = "xmlns:lr=";
const EXIF_ELEMENT: &str = "<exif:";
const DESCRIPTION_CLOSE: &str = "</rdf:Description>";

// Any opening of the element counts, self-closing included
static CONTAINER_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<lr:hierarchicalSubject[\s/>]").expect("container pattern is valid")
});

// Non-greedy so the first bag wins even when several are present
static KEYWORD_BAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)<lr:hierarchicalSubject(?:\s[^>]*)?>\s*(?P<bag><rdf:Bag(?:\s[^>]*)?>)(?P<items>.*?)</rdf:Bag>",
    )
    .expect("keyword bag pattern is valid")
});

/// Leading whitespace of the line containing `pos`, if only whitespace
/// precedes `pos` on that line.
fn line_indent(doc: &str, pos: usize) -> Option<&str> {
    let line_start = doc[..pos].rfind('\n').map(|idx| idx + 1).unwrap_or(0);
    let prefix = &doc[line_start..pos];
    if prefix.chars().all(char::is_whitespace) {
        Some(prefix)
    } else {
        None
    }
}

fn insert_at(doc: &str, pos: usize, fragment: &str) -> String {
    let mut out = String::with_capacity(doc.len() + fragment.len());
    out.push_str(&doc[..pos]);
    out.push_str(fragment);
    out.push_str(&doc[pos..]);
    out
}

/// Declare the `lr` namespace immediately before the `xmp` declaration.
///
/// The document is returned borrowed when `lr` is already declared or `xmp`
/// is not declared at all.
pub fn ensure_namespace(doc: &str) -> Cow<'_, str> {
    if doc.contains(LR_DECLARATION) {
        return Cow::Borrowed(doc);
    }
    let Some(pos) = doc.find(XMP_DECLARATION) else {
        return Cow::Borrowed(doc);
    };

    let separator = match line_indent(doc, pos) {
        Some(indent) => format!("\n{}", indent),
        None => " ".to_string(),
    };
    let declaration = format!("{}\"{}\"{}", LR_DECLARATION, LIGHTROOM_NAMESPACE, separator);
    Cow::Owned(insert_at(doc, pos, &declaration))
}

/// Make sure the document has an `lr:hierarchicalSubject` container.
///
/// Runs [`ensure_namespace`] first. Returns `None` when the container is
/// missing and neither an `<exif:` element nor `</rdf:Description>` exists to
/// anchor a new one.
pub fn ensure_keyword_container(doc: &str) -> Option<Cow<'_, str>> {
    let doc = ensure_namespace(doc);
    if CONTAINER_OPEN.is_match(&doc) {
        return Some(doc);
    }

    // Children of rdf:Description sit one space deeper than its closing tag
    let (anchor, extra_indent) = match doc.find(EXIF_ELEMENT) {
        Some(pos) => (pos, ""),
        None => (doc.find(DESCRIPTION_CLOSE)?, " "),
    };

    let indent = line_indent(&doc, anchor).unwrap_or("");
    let element_indent = format!("{}{}", indent, extra_indent);
    let container = format!(
        "{extra}<lr:hierarchicalSubject>\n{ei} <rdf:Bag>\n{ei} </rdf:Bag>\n{ei}</lr:hierarchicalSubject>\n{indent}",
        extra = extra_indent,
        ei = element_indent,
        indent = indent,
    );
    Some(Cow::Owned(insert_at(&doc, anchor, &container)))
}

/// Append keywords to the first `lr:hierarchicalSubject` bag.
///
/// Existing entries are kept in place; new ones follow them in the order
/// given. An empty keyword list leaves the document untouched. If the bag
/// cannot be found even after [`ensure_keyword_container`], the original
/// document comes back as [`MergeOutcome::Skipped`].
pub fn add_keywords(doc: &str, keywords: &[String]) -> MergeOutcome {
    if keywords.is_empty() {
        return MergeOutcome::Unchanged(doc.to_string());
    }
    let Some(prepared) = ensure_keyword_container(doc) else {
        return MergeOutcome::Skipped(doc.to_string());
    };
    let Some(captures) = KEYWORD_BAG.captures(&prepared) else {
        return MergeOutcome::Skipped(doc.to_string());
    };
    let (Some(bag), Some(items)) = (captures.name("bag"), captures.name("items")) else {
        return MergeOutcome::Skipped(doc.to_string());
    };

    let bag_indent = line_indent(&prepared, bag.start()).unwrap_or("");
    let existing = items.as_str();
    let entry_indent = existing
        .find("<rdf:li")
        .and_then(|offset| line_indent(&prepared, items.start() + offset))
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} ", bag_indent));

    let entries: String = keywords
        .iter()
        .map(|keyword| format!("\n{}<rdf:li>{}</rdf:li>", entry_indent, keyword))
        .collect();

    let merged = if existing.trim().is_empty() {
        let mut out = String::with_capacity(prepared.len() + entries.len());
        out.push_str(&prepared[..items.start()]);
        out.push_str(&entries);
        out.push('\n');
        out.push_str(bag_indent);
        out.push_str(&prepared[items.end()..]);
        out
    } else {
        let insert_pos = items.start() + existing.trim_end().len();
        insert_at(&prepared, insert_pos, &entries)
    };

    MergeOutcome::Merged(merged)
}

/// [`MetadataMerger`] backed by the text transforms in this module.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmpTextMerger;

impl MetadataMerger for XmpTextMerger {
    fn add_keywords(&self, document: &str, keywords: &[String]) -> MergeOutcome {
        add_keywords(document, keywords)
    }
}
