#![allow(dead_code)]

use chrono::NaiveDate;
use flight_binder::{BinderEngine, BinderSettings, ChartPipeline, LocalCache};
use httpmock::prelude::*;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::Path;
use tempfile::TempDir;

pub const CYCLE_PAGE: &str = r#"<html><body>
<form action="results/">
  <select id="cycle" name="cycle">
    <option value="2508">Aug 07 - Oct 01</option>
    <option value="2510">Oct 02 - Nov 26</option>
  </select>
  <input name="ident" />
</form>
</body></html>"#;

pub const NO_RESULTS_PAGE: &str = r#"<html><body><p>No results found.</p></body></html>"#;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 19).unwrap()
}

/// Results table listing an older revision before the current one.
pub fn results_page(stale_url: &str, current_url: &str) -> String {
    format!(
        r#"<html><body><table>
<tr><td>SW</td><td><a href="{}">superseded</a></td></tr>
<tr><td>SW</td><td><a href="{}">current</a></td></tr>
</table></body></html>"#,
        stale_url, current_url
    )
}

pub fn settings(server: &MockServer, workdir: &TempDir) -> BinderSettings {
    BinderSettings {
        catalog_url: server.url("/dafd/search/"),
        document_host: server.url("/afd/"),
        cache_dir: workdir.path().join("output").to_str().unwrap().to_string(),
        output_dir: workdir.path().to_str().unwrap().to_string(),
        timeout_secs: 5,
        ..BinderSettings::default()
    }
}

pub fn engine(
    server: &MockServer,
    workdir: &TempDir,
) -> BinderEngine<ChartPipeline<LocalCache, BinderSettings>> {
    let settings = settings(server, workdir);
    let cache = LocalCache::new(settings.cache_dir.clone());
    let pipeline = ChartPipeline::new(cache, settings, today()).unwrap();
    BinderEngine::new(pipeline)
}

/// A PDF with one page per label; each page draws its label.
pub fn sample_pdf(labels: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for label in labels {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*label)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => labels.len() as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Raw content stream of every page, in page order.
pub fn page_contents(path: &Path) -> Vec<Vec<u8>> {
    let doc = Document::load(path).unwrap();
    doc.get_pages()
        .into_values()
        .map(|id| doc.get_page_content(id).unwrap())
        .collect()
}

pub fn draws(content: &[u8], label: &str) -> bool {
    let needle = format!("({})", label);
    content
        .windows(needle.len())
        .any(|window| window == needle.as_bytes())
}
