//! Selected-candidate report export.
//!
//! One row per selected document: file name, full path, the non-zero
//! keyword:count pairs, and a preview of the extracted text. Serialized as
//! CSV or as an aligned plain-text table, written to a caller-chosen path.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::screening::matching::KeywordCount;

/// Characters of extracted text kept in the report preview column.
pub const PREVIEW_CHARS: usize = 200;

const REPORT_HEADERS: [&str; 4] = ["File Name", "Path", "Keyword Matches", "Preview"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub file_name: String,
    pub path: String,
    pub keyword_matches: String,
    pub preview: String,
}

/// Report output format, chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    Csv,
    Text,
}

/// Final path component of a document identifier, used to label report rows
/// and document listings.
pub fn file_name_of(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// First 200 characters of the text, with a trailing ellipsis when truncated.
pub fn preview_of(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Builds one report row from a selected document's extracted text and match
/// results. Only keywords with a non-zero count appear, in match order.
pub fn build_row(path: &str, matches: &[KeywordCount], text: &str) -> ReportRow {
    let keyword_matches = matches
        .iter()
        .filter(|m| m.count > 0)
        .map(|m| format!("{}:{}", m.keyword, m.count))
        .collect::<Vec<_>>()
        .join("; ");

    ReportRow {
        file_name: file_name_of(path),
        path: path.to_string(),
        keyword_matches,
        preview: preview_of(text),
    }
}

fn csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn csv_line(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Renders rows as CSV with a header line. Fields containing the delimiter,
/// quotes, or line breaks are quoted; embedded quotes are doubled.
pub fn render_csv(rows: &[ReportRow]) -> String {
    let mut out = csv_line(&REPORT_HEADERS);
    out.push('\n');
    for row in rows {
        out.push_str(&csv_line(&[
            row.file_name.as_str(),
            row.path.as_str(),
            row.keyword_matches.as_str(),
            row.preview.as_str(),
        ]));
        out.push('\n');
    }
    out
}

/// Renders rows as an aligned plain-text table. Line breaks inside a cell
/// would break the row layout, so they are flattened to spaces.
pub fn render_table(rows: &[ReportRow]) -> String {
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|row| {
            [
                flatten(&row.file_name),
                flatten(&row.path),
                flatten(&row.keyword_matches),
                flatten(&row.preview),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = REPORT_HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for (i, header) in REPORT_HEADERS.iter().enumerate() {
        push_padded(&mut out, header, widths[i], i == REPORT_HEADERS.len() - 1);
    }
    out.push('\n');
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            push_padded(&mut out, cell, widths[i], i == row.len() - 1);
        }
        out.push('\n');
    }
    out
}

fn flatten(cell: &str) -> String {
    cell.replace(['\n', '\r'], " ")
}

fn push_padded(out: &mut String, cell: &str, width: usize, last: bool) {
    out.push_str(cell);
    if !last {
        for _ in cell.chars().count()..width {
            out.push(' ');
        }
        out.push_str("  ");
    }
}

/// Writes the rendered report to `destination`. An unwritable destination is
/// an export error; nothing is retried.
pub fn write_report(
    destination: &Path,
    rows: &[ReportRow],
    format: ReportFormat,
) -> Result<(), AppError> {
    let rendered = match format {
        ReportFormat::Csv => render_csv(rows),
        ReportFormat::Text => render_table(rows),
    };
    std::fs::write(destination, rendered).map_err(|e| {
        AppError::Export(format!("cannot write {}: {e}", destination.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, usize)]) -> Vec<KeywordCount> {
        pairs
            .iter()
            .map(|(k, c)| KeywordCount {
                keyword: k.to_string(),
                count: *c,
            })
            .collect()
    }

    /// Minimal CSV reader for round-trip checks: handles quoted fields,
    /// doubled quotes, and line breaks inside quotes.
    fn parse_csv(input: &str) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            if in_quotes {
                match c {
                    '"' if chars.peek() == Some(&'"') => {
                        chars.next();
                        field.push('"');
                    }
                    '"' => in_quotes = false,
                    _ => field.push(c),
                }
            } else {
                match c {
                    '"' => in_quotes = true,
                    ',' => row.push(std::mem::take(&mut field)),
                    '\n' => {
                        row.push(std::mem::take(&mut field));
                        rows.push(std::mem::take(&mut row));
                    }
                    _ => field.push(c),
                }
            }
        }
        if !field.is_empty() || !row.is_empty() {
            row.push(field);
            rows.push(row);
        }
        rows
    }

    #[test]
    fn test_preview_is_truncated_with_ellipsis() {
        let text = "x".repeat(PREVIEW_CHARS + 1);
        let preview = preview_of(&text);
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_preview_at_limit_is_untouched() {
        let text = "x".repeat(PREVIEW_CHARS);
        assert_eq!(preview_of(&text), text);
    }

    #[test]
    fn test_build_row_keeps_only_nonzero_counts() {
        let row = build_row(
            "/cvs/jane.pdf",
            &counts(&[("SQL", 3), ("Rust", 0), ("Python", 1)]),
            "some text",
        );
        assert_eq!(row.file_name, "jane.pdf");
        assert_eq!(row.path, "/cvs/jane.pdf");
        assert_eq!(row.keyword_matches, "SQL:3; Python:1");
    }

    #[test]
    fn test_build_row_with_no_matches_has_empty_column() {
        let row = build_row("/cvs/jane.pdf", &[], "text");
        assert_eq!(row.keyword_matches, "");
    }

    #[test]
    fn test_csv_quotes_delimiters_and_doubles_quotes() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_csv_round_trip_recovers_names_and_counts() {
        let rows = vec![
            build_row(
                "/cvs/smith, jane.pdf",
                &counts(&[("SQL", 3), ("Rust", 0), ("C++", 2)]),
                "Jane's resume\nwith a line break",
            ),
            build_row("/cvs/bob.txt", &counts(&[("Python", 1)]), "Bob"),
        ];
        let parsed = parse_csv(&render_csv(&rows));

        assert_eq!(parsed[0], vec!["File Name", "Path", "Keyword Matches", "Preview"]);
        assert_eq!(parsed.len(), 3);

        assert_eq!(parsed[1][0], "smith, jane.pdf");
        assert_eq!(parsed[1][2], "SQL:3; C++:2");
        assert_eq!(parsed[2][0], "bob.txt");
        assert_eq!(parsed[2][2], "Python:1");
    }

    #[test]
    fn test_table_aligns_columns() {
        let rows = vec![
            build_row("/cvs/a.txt", &counts(&[("SQL", 1)]), "short"),
            build_row("/cvs/longer-name.txt", &counts(&[("SQL", 12)]), "longer preview"),
        ];
        let table = render_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);

        // Each column starts at the same offset on every line.
        let offset = lines[1].find("/cvs/a.txt").unwrap();
        assert_eq!(lines[2].find("/cvs/longer-name.txt").unwrap(), offset);
    }

    #[test]
    fn test_table_flattens_line_breaks() {
        let rows = vec![build_row("/cvs/a.txt", &[], "two\nlines")];
        let table = render_table(&rows);
        assert_eq!(table.lines().count(), 2);
        assert!(table.contains("two lines"));
    }

    #[test]
    fn test_write_report_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("report.csv");
        let rows = vec![build_row("/cvs/a.txt", &counts(&[("SQL", 1)]), "text")];

        write_report(&destination, &rows, ReportFormat::Csv).unwrap();
        let written = std::fs::read_to_string(&destination).unwrap();
        assert!(written.contains("a.txt"));
        assert!(written.contains("SQL:1"));
    }

    #[test]
    fn test_unwritable_destination_is_export_error() {
        let err = write_report(
            Path::new("/nonexistent-dir/report.csv"),
            &[],
            ReportFormat::Csv,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Export(_)));
    }
}
