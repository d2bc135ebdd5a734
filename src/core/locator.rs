//! Waypoint search against the catalog's results endpoint.

use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::adapters::http::fetch_text;
use crate::domain::model::PublicationCycle;
use crate::utils::error::{BinderError, ParseFailure, Result};

/// Literal text the catalog prints when a waypoint has no document.
pub const NO_RESULTS_MARKER: &str = "No results found.";

static LINKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("link selector"));

/// Matches document links on the configured host, accepting either scheme.
#[derive(Debug, Clone)]
pub struct DocumentLinkPattern {
    re: Regex,
}

impl DocumentLinkPattern {
    pub fn for_host(document_host: &str) -> Result<Self> {
        let without_scheme = document_host
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(document_host);

        let re = Regex::new(&format!("^https?://{}", regex::escape(without_scheme))).map_err(
            |e| BinderError::InvalidConfigValueError {
                field: "document_host".to_string(),
                value: document_host.to_string(),
                reason: e.to_string(),
            },
        )?;
        Ok(Self { re })
    }

    pub fn is_match(&self, href: &str) -> bool {
        self.re.is_match(href)
    }
}

/// Interpret a search results page. The last matching link wins since the
/// catalog lists superseding revisions after the ones they replace.
pub fn parse_search_results(
    html: &str,
    waypoint: &str,
    pattern: &DocumentLinkPattern,
) -> Result<Option<String>> {
    if html.contains(NO_RESULTS_MARKER) {
        return Ok(None);
    }

    let document = Html::parse_document(html);
    let last = document
        .select(&LINKS)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| pattern.is_match(href))
        .last();

    match last {
        Some(href) => Ok(Some(href.to_string())),
        None => Err(ParseFailure::NoDocumentLink {
            waypoint: waypoint.to_string(),
        }
        .into()),
    }
}

pub async fn locate(
    client: &Client,
    results_url: &str,
    pattern: &DocumentLinkPattern,
    waypoint: &str,
    cycle: &PublicationCycle,
) -> Result<Option<String>> {
    let html = fetch_text(
        client,
        results_url,
        &[
            ("cycle", cycle.token.as_str()),
            ("ident", waypoint),
            ("navaid", ""),
        ],
    )
    .await?;

    parse_search_results(&html, waypoint, pattern)
}
