//! Output PDF assembly.
//!
//! The writer starts from a copy of the source document so source content
//! streams and resources can be referenced instead of copied. Each source page
//! that contributes output is wrapped once as a Form XObject; every output
//! page then draws that form through a matrix that turns the source page's
//! `/Rotate` back upright and moves the clip to the page origin, behind a
//! clip rectangle.
//!
//! ```text
//! q
//! a b c d e f cm          % unrotate, scale, move the clip to the origin
//! x0 y0 w h re W n        % hide everything outside the clip
//! /S0 Do                  % draw the source page
//! Q
//! ```
//!
//! On save the old page tree is replaced by the new pages and anything no
//! longer reachable is pruned.

use std::collections::HashMap;
use std::path::Path;

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use super::layout::{inherited_attribute, media_box, rotation, visible_box, PdfLayout};
use super::OutputDocument;
use crate::error::{Result, SplitError};
use crate::geometry::{PageSize, PdfBox, SlideRegion};

/// Catalog entries that point into the replaced page tree.
const STALE_CATALOG_KEYS: [&[u8]; 6] = [
    b"AcroForm",
    b"Outlines",
    b"OpenAction",
    b"PageLabels",
    b"StructTreeRoot",
    b"Names",
];

/// A new output page before it is written into the object table.
#[derive(Debug, Clone)]
struct PendingPage {
    id: ObjectId,
    size: PageSize,
    /// Form resource name and content stream, once a region is shown.
    body: Option<(String, ObjectId, ObjectId)>,
}

/// Builds a PDF whose pages are cropped views of a source PDF.
pub struct PdfWriter {
    doc: Document,
    source_pages: Vec<ObjectId>,
    forms: HashMap<usize, ObjectId>,
    pages_id: ObjectId,
    pages: Vec<PendingPage>,
}

impl PdfWriter {
    /// Start an empty output that can draw from `source`'s pages.
    pub fn from_layout(source: &PdfLayout) -> Self {
        let mut doc = source.document().clone();
        let pages_id = doc.new_object_id();
        Self {
            doc,
            source_pages: source.page_ids().to_vec(),
            forms: HashMap::new(),
            pages_id,
            pages: Vec::new(),
        }
    }

    /// Wrap source page `index` as a Form XObject, reusing an earlier one.
    fn form_for(&mut self, index: usize) -> Result<ObjectId> {
        if let Some(id) = self.forms.get(&index) {
            return Ok(*id);
        }
        let compose_err = |reason: String| SplitError::Compose {
            page: index,
            reason,
        };
        let page_id = *self
            .source_pages
            .get(index)
            .ok_or_else(|| compose_err("source page index out of range".into()))?;

        let content = page_content(&self.doc, page_id).map_err(compose_err)?;
        let bbox = media_box(&self.doc, page_id);
        let resources = inherited_attribute(&self.doc, page_id, b"Resources")
            .cloned()
            .unwrap_or_else(|| Object::Dictionary(Dictionary::new()));

        let form = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "BBox" => box_array(&bbox),
            "Resources" => resources,
        };
        let id = self.doc.add_object(Stream::new(form, content));
        self.forms.insert(index, id);
        Ok(id)
    }

    /// Replace the catalog's page tree with the output pages.
    fn install_page_tree(&mut self) -> Result<()> {
        let kids: Vec<Object> = self.pages.iter().map(|p| p.id.into()).collect();
        let count = i64::try_from(kids.len()).unwrap_or(i64::MAX);

        for page in &self.pages {
            let media = PdfBox::from_corners(0.0, 0.0, page.size.width, page.size.height);
            let mut dict = dictionary! {
                "Type" => "Page",
                "Parent" => self.pages_id,
                "MediaBox" => box_array(&media),
            };
            match &page.body {
                Some((name, form_id, content_id)) => {
                    let mut xobjects = Dictionary::new();
                    xobjects.set(name.as_bytes().to_vec(), *form_id);
                    dict.set("Resources", dictionary! { "XObject" => xobjects });
                    dict.set("Contents", *content_id);
                }
                None => dict.set("Resources", Dictionary::new()),
            }
            self.doc.objects.insert(page.id, Object::Dictionary(dict));
        }

        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let root_id = self
            .doc
            .trailer
            .get(b"Root")
            .and_then(Object::as_reference)
            .map_err(|e| SplitError::Compose {
                page: 0,
                reason: format!("document has no catalog: {e}"),
            })?;
        let catalog = self
            .doc
            .get_object_mut(root_id)
            .and_then(Object::as_dict_mut)
            .map_err(|e| SplitError::Compose {
                page: 0,
                reason: format!("invalid catalog: {e}"),
            })?;
        catalog.set("Pages", self.pages_id);
        for key in STALE_CATALOG_KEYS {
            catalog.remove(key);
        }
        Ok(())
    }
}

impl OutputDocument for PdfWriter {
    fn new_page(&mut self, size: PageSize) -> Result<usize> {
        let id = self.doc.new_object_id();
        self.pages.push(PendingPage {
            id,
            size,
            body: None,
        });
        Ok(self.pages.len() - 1)
    }

    fn show_region(&mut self, page: usize, source_page: usize, clip: &SlideRegion) -> Result<()> {
        let target = self
            .pages
            .get(page)
            .map(|p| p.size)
            .ok_or_else(|| SplitError::Compose {
                page: source_page,
                reason: format!("output page {page} does not exist"),
            })?;
        let form_id = self.form_for(source_page)?;
        let page_id = self.source_pages[source_page];
        let turn = rotation(&self.doc, page_id);
        let user = visible_box(&self.doc, page_id).region_to_user_space(clip, turn);

        let sx = target.width / clip.width;
        let sy = target.height / clip.height;
        let [a, b, c, d, e, f] = turn.placement_matrix(&user, sx, sy);
        let name = format!("S{source_page}");
        let ops = format!(
            "q\n{} {} {} {} {} {} cm\n{} {} {} {} re W n\n/{name} Do\nQ\n",
            num(a),
            num(b),
            num(c),
            num(d),
            num(e),
            num(f),
            num(user.x0),
            num(user.y0),
            num(user.width()),
            num(user.height()),
        );

        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), ops.into_bytes()));
        self.pages[page].body = Some((name, form_id, content_id));
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn save(&mut self, path: &Path) -> Result<()> {
        let write_err = |reason: String| SplitError::OutputWrite {
            path: path.to_path_buf(),
            reason,
        };
        self.install_page_tree()
            .map_err(|e| write_err(e.to_string()))?;
        self.doc.prune_objects();
        self.doc.renumber_objects();
        self.doc.compress();
        self.doc
            .save(path)
            .map_err(|e| write_err(e.to_string()))?;
        tracing::debug!("Wrote {} pages to {}", self.pages.len(), path.display());
        Ok(())
    }
}

/// Every content stream of a page, decoded, in order.
///
/// Streams in a `/Contents` array may end mid-token, so a newline goes
/// between them to keep the last operator of one from fusing with the first
/// of the next.
fn page_content(doc: &Document, page_id: ObjectId) -> std::result::Result<Vec<u8>, String> {
    let mut content = Vec::new();
    for id in doc.get_page_contents(page_id) {
        let stream = doc
            .get_object(id)
            .and_then(Object::as_stream)
            .map_err(|e| format!("content stream {} {} R: {e}", id.0, id.1))?;
        let filtered = stream.filters().is_ok_and(|filters| !filters.is_empty());
        let data = if filtered {
            stream
                .decompressed_content()
                .map_err(|e| format!("cannot decode content stream {} {} R: {e}", id.0, id.1))?
        } else {
            stream.content.clone()
        };
        if !content.is_empty() {
            content.push(b'\n');
        }
        content.extend_from_slice(&data);
    }
    Ok(content)
}

fn box_array(b: &PdfBox) -> Vec<Object> {
    [b.x0, b.y0, b.x1, b.y1]
        .into_iter()
        .map(|v| Object::Real(v as f32))
        .collect()
}

/// Compact decimal for content streams.
fn num(v: f64) -> String {
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}
