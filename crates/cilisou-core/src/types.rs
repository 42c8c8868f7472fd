//! Core data types for the cilisou gateway
//!
//! Contains the record shape produced by the listing parser and the
//! output format selector used by the formatter.

use serde::{Deserialize, Serialize};

/// Sentinel emitted when a descriptive field cannot be extracted
///
/// One malformed field never discards an otherwise-valid record; the
/// field degrades to this value instead.
pub const UNKNOWN: &str = "unknown";

/// A single torrent entry extracted from a listing page
///
/// Fields other than the title, type and magnet link fall back to
/// [`UNKNOWN`] when their pattern does not match. Records are collected
/// in listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TorrentRecord {
    /// Category token, first whitespace-delimited token of the heading
    pub file_type: String,

    /// Display title, second whitespace-delimited token of the heading
    pub file_title: String,

    /// Magnet URI built from the extracted info hash and the title
    pub magnet_link: String,

    /// Popularity count (e.g. "42")
    pub hot: String,

    /// Size with unit (e.g. "1.2 GB")
    pub size: String,

    /// Creation date token (e.g. "2023-01-01")
    pub created: String,

    /// Number of files advertised by the listing
    pub file_count: String,

    /// Line-break-delimited file manifest, listing order preserved
    pub file_names: Vec<String>,
}

/// Rendering selected by the caller via the `type` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Structured `{page, results}` body (the default)
    #[default]
    Json,
    /// One section per record with bold labels and a bulleted manifest
    Markdown,
    /// One label-per-line block per record
    Text,
}

impl OutputFormat {
    /// Maps the raw `type` parameter onto a format
    ///
    /// Anything other than the two textual spellings (including absence)
    /// selects the structured output.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("markdown") => Self::Markdown,
            Some("text") => Self::Text,
            _ => Self::Json,
        }
    }
}
