//! Publication cycle discovery from the catalog's cycle selector.
//!
//! The search page carries a `<select id="cycle">` whose options look like
//! `<option value="2510">Oct 02 - Nov 27, 2025</option>`. Only the start of
//! the label (before ` - `) is read; it must be `Mon DD` or `Mon DD, YYYY`.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::adapters::http::fetch_text;
use crate::domain::model::PublicationCycle;
use crate::utils::error::{ParseFailure, Result};

static CYCLE_LIST: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#cycle").expect("cycle list selector"));

static CYCLE_OPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("option").expect("cycle option selector"));

/// `Oct 02` or `Oct 02, 2025`.
static START_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]{3}) (\d{2})(?:, (\d{4}))?$").expect("start date regex")
});

/// Parse the start date of a cycle label, assuming `today`'s year when the label omits one.
pub fn parse_start_date(label: &str, today: NaiveDate) -> std::result::Result<NaiveDate, ParseFailure> {
    let label = label.trim();
    let first = label.split(" - ").next().unwrap_or_default().trim();

    let caps = START_DATE_RE
        .captures(first)
        .ok_or_else(|| ParseFailure::UnrecognizedCycleLabel {
            label: label.to_string(),
        })?;

    let year = caps
        .get(3)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| today.year().to_string());

    NaiveDate::parse_from_str(&format!("{} {} {}", &caps[1], &caps[2], year), "%b %d %Y")
        .map_err(|_| ParseFailure::InvalidCycleDate {
            label: label.to_string(),
        })
}

/// Every option of the cycle list, in catalog order.
pub fn parse_cycle_options(html: &str, today: NaiveDate) -> Result<Vec<PublicationCycle>> {
    let document = Html::parse_document(html);
    let list = document
        .select(&CYCLE_LIST)
        .next()
        .ok_or(ParseFailure::MissingCycleList)?;

    let mut cycles = Vec::new();
    for option in list.select(&CYCLE_OPTION) {
        let label = option.text().collect::<String>();
        let token = option
            .value()
            .attr("value")
            .ok_or_else(|| ParseFailure::MissingCycleValue {
                label: label.trim().to_string(),
            })?;

        cycles.push(PublicationCycle {
            token: token.to_string(),
            effective: parse_start_date(&label, today)?,
        });
    }

    if cycles.is_empty() {
        return Err(ParseFailure::EmptyCycleList.into());
    }
    Ok(cycles)
}

/// Latest start date wins, even if it lies in the future. Among equal dates the
/// one listed last is taken.
pub fn select_latest(cycles: Vec<PublicationCycle>) -> Option<PublicationCycle> {
    cycles.into_iter().max_by_key(|cycle| cycle.effective)
}

pub async fn resolve_active_cycle(
    client: &Client,
    catalog_url: &str,
    today: NaiveDate,
) -> Result<PublicationCycle> {
    tracing::debug!("Fetching cycle list from {}", catalog_url);
    let html = fetch_text(client, catalog_url, &[]).await?;

    let cycles = parse_cycle_options(&html, today)?;
    tracing::debug!("Catalog lists {} cycles", cycles.len());

    Ok(select_latest(cycles).ok_or(ParseFailure::EmptyCycleList)?)
}
