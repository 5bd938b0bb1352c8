//! Page tree access for PDF inputs.
//!
//! Uses `lopdf` for the object model: page enumeration, inheritable page
//! attributes (`MediaBox`, `CropBox`, `Resources`, `Rotate`) and page boxes.
//! The visible page rectangle is the `CropBox` when present, otherwise the
//! `MediaBox`. Page sizes are reported as displayed, with `/Rotate` applied,
//! which is also what a renderer rasterizes.

use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::{Result, SplitError};
use crate::geometry::{PageSize, PdfBox, Rotation};

/// US Letter, used when a page carries no `MediaBox` anywhere in its tree.
const FALLBACK_MEDIA_BOX: PdfBox = PdfBox {
    x0: 0.0,
    y0: 0.0,
    x1: 612.0,
    y1: 792.0,
};

/// Guards against cyclic `Parent` chains in malformed files.
const MAX_TREE_DEPTH: usize = 64;

/// A parsed PDF with its pages in document order.
#[derive(Debug, Clone)]
pub struct PdfLayout {
    doc: Document,
    pages: Vec<ObjectId>,
    path: PathBuf,
}

impl PdfLayout {
    /// Parse a PDF from disk.
    ///
    /// # Errors
    ///
    /// [`SplitError::Input`] if the file cannot be read or parsed, or is
    /// encrypted.
    pub fn open(path: &Path) -> Result<Self> {
        let doc = Document::load(path).map_err(|e| SplitError::Input {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_document(doc, path)
    }

    /// Wrap an already-loaded document. `path` is only used in messages.
    pub fn from_document(doc: Document, path: &Path) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(SplitError::Input {
                path: path.to_path_buf(),
                reason: "encrypted documents are not supported".into(),
            });
        }
        let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
        tracing::debug!("Opened {} ({} pages)", path.display(), pages.len());
        Ok(Self {
            doc,
            pages,
            path: path.to_path_buf(),
        })
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Object ids of all pages, in document order.
    pub fn page_ids(&self) -> &[ObjectId] {
        &self.pages
    }

    pub fn page_id(&self, index: usize) -> Result<ObjectId> {
        self.pages.get(index).copied().ok_or_else(|| SplitError::Render {
            page: index,
            reason: format!("page index out of range (document has {} pages)", self.pages.len()),
        })
    }

    /// The visible page rectangle in PDF user space, before rotation.
    pub fn page_box(&self, index: usize) -> Result<PdfBox> {
        let id = self.page_id(index)?;
        Ok(visible_box(&self.doc, id))
    }

    pub fn page_rotation(&self, index: usize) -> Result<Rotation> {
        let id = self.page_id(index)?;
        Ok(rotation(&self.doc, id))
    }

    /// Size of the visible box as displayed; quarter turns swap the axes.
    pub fn page_size(&self, index: usize) -> Result<PageSize> {
        let id = self.page_id(index)?;
        Ok(visible_box(&self.doc, id).display_size(rotation(&self.doc, id)))
    }
}

/// `CropBox` if present, else `MediaBox`, else US Letter.
pub(crate) fn visible_box(doc: &Document, page_id: ObjectId) -> PdfBox {
    inherited_attribute(doc, page_id, b"CropBox")
        .and_then(|obj| parse_box(doc, obj))
        .unwrap_or_else(|| media_box(doc, page_id))
}

pub(crate) fn media_box(doc: &Document, page_id: ObjectId) -> PdfBox {
    inherited_attribute(doc, page_id, b"MediaBox")
        .and_then(|obj| parse_box(doc, obj))
        .unwrap_or_else(|| {
            tracing::warn!("Page {:?} has no MediaBox, assuming US Letter", page_id);
            FALLBACK_MEDIA_BOX
        })
}

/// Inherited `/Rotate`, none when absent or malformed.
pub(crate) fn rotation(doc: &Document, page_id: ObjectId) -> Rotation {
    inherited_attribute(doc, page_id, b"Rotate")
        .and_then(|obj| number(doc, obj))
        .map_or(Rotation::None, |degrees| Rotation::from_degrees(degrees.round() as i64))
}

/// Look up `key` on the page, walking up `Parent` links for inheritable
/// attributes.
pub(crate) fn inherited_attribute<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Option<&'a Object> {
    let mut node: &Dictionary = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }
    None
}

/// Follow a single indirect reference, if any.
pub(crate) fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

pub(crate) fn number(doc: &Document, obj: &Object) -> Option<f64> {
    match resolve(doc, obj) {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

fn parse_box(doc: &Document, obj: &Object) -> Option<PdfBox> {
    let Object::Array(items) = resolve(doc, obj) else {
        return None;
    };
    if items.len() != 4 {
        return None;
    }
    let v: Vec<f64> = items
        .iter()
        .map(|o| number(doc, o))
        .collect::<Option<_>>()?;
    let b = PdfBox::from_corners(v[0], v[1], v[2], v[3]);
    (b.width() > 0.0 && b.height() > 0.0).then_some(b)
}
