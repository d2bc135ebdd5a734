//! Concatenation of cached PDFs into one output document.

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::utils::error::{BinderError, Result};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guards against malformed page trees whose Parent links loop.
const MAX_TREE_DEPTH: usize = 64;

#[derive(Debug, Clone)]
pub struct MergeOptions {
    pub input_paths: Vec<PathBuf>,
    pub output_path: PathBuf,
}

/// Append every page of every input, in order, and write the result to
/// `output_path`. Returns the number of pages written.
pub fn merge_pdfs(options: &MergeOptions) -> Result<usize> {
    if options.input_paths.is_empty() {
        return Err(BinderError::merge(
            &options.output_path,
            "no input documents to merge",
        ));
    }

    let mut next_id = 1;
    let mut pages: Vec<(ObjectId, Dictionary)> = Vec::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for path in &options.input_paths {
        let mut doc = Document::load(path).map_err(|e| BinderError::merge(path, e))?;
        doc.renumber_objects_with(next_id);
        next_id = doc.max_id + 1;

        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        if page_ids.is_empty() {
            return Err(BinderError::merge(path, "document has no pages"));
        }

        for id in page_ids {
            let mut page = doc
                .get_object(id)
                .and_then(Object::as_dict)
                .map_err(|e| BinderError::merge(path, e))?
                .clone();
            inherit_page_attributes(&doc, &mut page);
            pages.push((id, page));
        }

        objects.extend(doc.objects);
    }

    let pages_id: ObjectId = (next_id, 0);
    let catalog_id: ObjectId = (next_id + 1, 0);

    let mut merged = Document::with_version("1.5");
    for (id, object) in objects {
        match type_name(&object) {
            Some(b"Catalog") | Some(b"Pages") | Some(b"Page") | Some(b"Outlines")
            | Some(b"Outline") => {}
            _ => {
                merged.objects.insert(id, object);
            }
        }
    }

    let page_count = pages.len();
    let mut kids = Vec::with_capacity(page_count);
    for (id, mut page) in pages {
        page.set("Parent", pages_id);
        merged.objects.insert(id, Object::Dictionary(page));
        kids.push(Object::Reference(id));
    }

    merged.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        }),
    );
    merged.objects.insert(
        catalog_id,
        Object::Dictionary(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        }),
    );
    merged.trailer.set("Root", catalog_id);
    merged.max_id = catalog_id.0;

    merged
        .save(&options.output_path)
        .map_err(|e| BinderError::merge(&options.output_path, e))?;

    tracing::debug!(
        "Merged {} documents ({} pages) into {}",
        options.input_paths.len(),
        page_count,
        options.output_path.display()
    );
    Ok(page_count)
}

/// `merge_pdfs` for callers that already hold the ordered path list.
pub fn merge(paths: &[PathBuf], output_path: &Path) -> Result<()> {
    merge_pdfs(&MergeOptions {
        input_paths: paths.to_vec(),
        output_path: output_path.to_path_buf(),
    })
    .map(|_| ())
}

fn type_name(object: &Object) -> Option<&[u8]> {
    object.as_dict().ok()?.get(b"Type").ok()?.as_name().ok()
}

fn inherit_page_attributes(doc: &Document, page: &mut Dictionary) {
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;

    while let Some(id) = parent {
        let Ok(node) = doc.get_object(id).and_then(Object::as_dict) else {
            break;
        };

        for key in INHERITABLE {
            if !page.has(key) {
                if let Ok(value) = node.get(key) {
                    page.set(key, value.clone());
                }
            }
        }

        depth += 1;
        if depth >= MAX_TREE_DEPTH {
            break;
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }
}
