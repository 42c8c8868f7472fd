//! Listing page parser
//!
//! Extracts torrent records from search-result items. Every descriptive
//! field is matched independently and falls back to the "unknown"
//! sentinel on its own, so one malformed field never discards a record
//! and one malformed item never aborts the page.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::{GatewayError, Result};
use crate::types::{TorrentRecord, UNKNOWN};
use crate::url::{build_magnet_link, extract_info_hash};

/// Heading prefix of streaming-only items; they carry no magnet link
/// and are skipped entirely.
const STREAM_ONLY_MARKER: &str = "在线播放";

/// Field patterns applied to the first descriptive paragraph. Each is
/// evaluated on its own; a miss yields the sentinel for that field only.
const HOT_PATTERN: &str = r"Hot：(\d+)";
const SIZE_PATTERN: &str = r"Size：([\d\.]+ \w+)";
const CREATED_PATTERN: &str = r"Created：(.+?)\s+";
const FILE_COUNT_PATTERN: &str = r"File Count：(.+)";

struct ItemSelectors {
    item: Selector,
    heading: Selector,
    link: Selector,
    paragraph: Selector,
}

impl ItemSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            item: parse_selector(".item")?,
            heading: parse_selector("h4")?,
            link: parse_selector("a[href]")?,
            paragraph: parse_selector("p")?,
        })
    }
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| GatewayError::Parse(format!("Invalid selector: {e:?}")))
}

/// Parses listing HTML into torrent records, in document order
///
/// Streaming-only items are dropped; everything else is emitted even
/// when individual fields are missing or malformed.
pub fn parse_listing(html: &str) -> Result<Vec<TorrentRecord>> {
    let selectors = ItemSelectors::new()?;
    let document = Html::parse_document(html);

    let mut records = Vec::new();
    for item in document.select(&selectors.item) {
        if let Some(record) = parse_item(&item, &selectors) {
            records.push(record);
        }
    }

    Ok(records)
}

/// Parses a single listing item
///
/// Returns `None` only for streaming-only items; missing sub-elements
/// degrade field by field instead.
fn parse_item(item: &ElementRef, selectors: &ItemSelectors) -> Option<TorrentRecord> {
    let heading = item
        .select(&selectors.heading)
        .next()
        .map(|h| h.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    if heading.starts_with(STREAM_ONLY_MARKER) {
        return None;
    }

    // First token is the category, second the title; a short heading
    // leaves the missing token empty rather than failing the item.
    let mut tokens = heading.split_whitespace();
    let file_type = tokens.next().unwrap_or_default().to_string();
    let file_title = tokens.next().unwrap_or_default().to_string();

    let href = item
        .select(&selectors.link)
        .next()
        .and_then(|a| a.value().attr("href"))
        .unwrap_or_default();
    // A pattern miss still yields a magnet link, with an empty hash.
    let info_hash = extract_info_hash(href).unwrap_or_default();
    let magnet_link = build_magnet_link(&info_hash, &file_title);

    let paragraphs: Vec<ElementRef> = item.select(&selectors.paragraph).collect();

    let summary = paragraphs
        .first()
        .map(|p| p.text().collect::<String>())
        .unwrap_or_default();

    let hot = capture_field(&summary, HOT_PATTERN);
    let size = capture_field(&summary, SIZE_PATTERN);
    let created = capture_field(&summary, CREATED_PATTERN);
    let file_count = capture_field(&summary, FILE_COUNT_PATTERN);

    let file_names = paragraphs
        .get(1)
        .map(|p| split_manifest(&p.inner_html()))
        .unwrap_or_default();

    Some(TorrentRecord {
        file_type,
        file_title,
        magnet_link,
        hot,
        size,
        created,
        file_count,
        file_names,
    })
}

/// Applies one field pattern, falling back to the sentinel on any miss
fn capture_field(text: &str, pattern: &str) -> String {
    if let Ok(re) = Regex::new(pattern)
        && let Some(caps) = re.captures(text)
        && let Some(m) = caps.get(1)
    {
        return m.as_str().trim().to_string();
    }
    UNKNOWN.to_string()
}

/// Splits the raw manifest paragraph into file names
///
/// The manifest arrives as line-break-delimited inner HTML padded with
/// non-breaking spaces; empty lines are dropped.
fn split_manifest(inner_html: &str) -> Vec<String> {
    inner_html
        .replace("&nbsp;", "")
        .split("<br>")
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
