//! Output rendering for extracted records
//!
//! Three purely presentational transforms over the same record
//! sequence; order and field values (sentinel included) pass through
//! verbatim.

use serde_json::{Value, json};

use crate::types::{OutputFormat, TorrentRecord};

/// Structured `{page, results}` body
pub fn to_json(page: &str, records: &[TorrentRecord]) -> Value {
    json!({
        "page": page,
        "results": records,
    })
}

/// One Markdown section per record with a bulleted file manifest
pub fn to_markdown(records: &[TorrentRecord]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&format!("### {}\n", record.file_title));
        out.push_str(&format!("- **Type**: {}\n", record.file_type));
        out.push_str(&format!(
            "- **Magnet**: [{}]({})\n",
            record.file_title, record.magnet_link
        ));
        out.push_str(&format!("- **Hot**: {}\n", record.hot));
        out.push_str(&format!("- **Size**: {}\n", record.size));
        out.push_str(&format!("- **Created**: {}\n", record.created));
        out.push_str(&format!("- **File Count**: {}\n", record.file_count));
        out.push_str("- **Files**:\n");
        for name in &record.file_names {
            out.push_str(&format!("  - {}\n", name));
        }
        out.push('\n');
    }
    out
}

/// One plain-text block per record, manifest lines tab-indented
pub fn to_text(records: &[TorrentRecord]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&format!("{}\n", record.file_title));
        out.push_str(&format!("Type: {}\n", record.file_type));
        out.push_str(&format!("Magnet: {}\n", record.magnet_link));
        out.push_str(&format!("Hot: {}\n", record.hot));
        out.push_str(&format!("Size: {}\n", record.size));
        out.push_str(&format!("Created: {}\n", record.created));
        out.push_str(&format!("File Count: {}\n", record.file_count));
        out.push_str(&format!("Files: {}\n", record.file_names.join("\n\t")));
        out.push('\n');
    }
    out
}

/// Renders records per the requested format
///
/// The two textual formats come back as plain text; the structured one
/// as a serialized JSON body.
pub fn render(page: &str, records: &[TorrentRecord], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(page, records).to_string(),
        OutputFormat::Markdown => to_markdown(records),
        OutputFormat::Text => to_text(records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<TorrentRecord> {
        vec![
            TorrentRecord {
                file_type: "高清".to_string(),
                file_title: "ExampleTitle".to_string(),
                magnet_link: "magnet:?xt=urn:btih:abc123&dn=ExampleTitle".to_string(),
                hot: "42".to_string(),
                size: "1.2 GB".to_string(),
                created: "2023-01-01".to_string(),
                file_count: "3".to_string(),
                file_names: vec!["a.mkv".to_string(), "b.srt".to_string()],
            },
            TorrentRecord {
                file_type: "BD".to_string(),
                file_title: "SecondTitle".to_string(),
                magnet_link: "magnet:?xt=urn:btih:def456&dn=SecondTitle".to_string(),
                hot: "unknown".to_string(),
                size: "unknown".to_string(),
                created: "unknown".to_string(),
                file_count: "unknown".to_string(),
                file_names: vec!["movie.mp4".to_string()],
            },
        ]
    }

    #[test]
    fn test_json_round_trip_preserves_records() {
        let records = sample_records();
        let value = to_json("2", &records);

        assert_eq!(value["page"], "2");
        let restored: Vec<TorrentRecord> =
            serde_json::from_value(value["results"].clone()).expect("results should deserialize");
        assert_eq!(restored, records);
    }

    /// Every title and manifest entry must appear exactly once, in order.
    fn assert_mentions_once_in_order(rendered: &str, records: &[TorrentRecord]) {
        let mut needles = Vec::new();
        for record in records {
            needles.push(record.file_title.as_str());
            for name in &record.file_names {
                needles.push(name.as_str());
            }
        }

        let mut cursor = 0;
        for needle in &needles {
            let at = rendered[cursor..]
                .find(needle)
                .unwrap_or_else(|| panic!("{needle} missing or out of order"));
            cursor += at + needle.len();
        }
    }

    #[test]
    fn test_markdown_mentions_titles_and_manifest_in_order() {
        let records = sample_records();
        let markdown = to_markdown(&records);
        assert_mentions_once_in_order(&markdown, &records);
        // Manifest entries appear exactly once.
        assert_eq!(markdown.matches("a.mkv").count(), 1);
        assert_eq!(markdown.matches("movie.mp4").count(), 1);
    }

    #[test]
    fn test_text_mentions_titles_and_manifest_in_order() {
        let records = sample_records();
        let text = to_text(&records);
        assert_mentions_once_in_order(&text, &records);
        assert_eq!(text.matches("b.srt").count(), 1);
    }

    #[test]
    fn test_markdown_preserves_unknown_sentinel() {
        let markdown = to_markdown(&sample_records());
        assert!(markdown.contains("- **Hot**: unknown"));
        assert!(markdown.contains("- **Hot**: 42"));
    }

    #[test]
    fn test_text_manifest_tab_indented() {
        let text = to_text(&sample_records());
        assert!(text.contains("Files: a.mkv\n\tb.srt\n"));
    }

    #[test]
    fn test_text_blocks_separated_by_blank_line() {
        let text = to_text(&sample_records());
        assert!(text.contains("\n\nSecondTitle\n"));
    }

    #[test]
    fn test_render_dispatch() {
        let records = sample_records();
        assert!(render("1", &records, OutputFormat::Json).starts_with('{'));
        assert!(render("1", &records, OutputFormat::Markdown).starts_with("### "));
        assert!(render("1", &records, OutputFormat::Text).starts_with("ExampleTitle\n"));
    }

    #[test]
    fn test_empty_records_render_empty_bodies() {
        assert_eq!(to_markdown(&[]), "");
        assert_eq!(to_text(&[]), "");
        let value = to_json("1", &[]);
        assert_eq!(value["results"].as_array().map(Vec::len), Some(0));
    }
}
