//! Turns a contents search page into [`FileRecord`]s.
//!
//! The page lists matches in a `table.pure-table` whose first row is the
//! header. Each later row carries the file path, package, branch, repository
//! and architecture cells in that order.

use std::fmt;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::ApkFileError;
use crate::record::{FileRecord, MAPPED_COLUMNS, RecordSet};

/// Class that marks the result table.
pub const RESULT_TABLE_CLASS: &str = "pure-table";

/// Parsed HTML document with the small traversal surface the extractor needs.
pub struct ContentsDocument {
    dom: RcDom,
}

impl ContentsDocument {
    pub fn parse(body: &[u8]) -> Result<Self, ApkFileError> {
        let mut input = body;
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut input)
            .map_err(|err| ApkFileError::Parse(err.to_string()))?;
        Ok(Self { dom })
    }

    /// First `table` element whose class list contains `class`.
    pub fn find_table(&self, class: &str) -> Option<Handle> {
        find_element(&self.dom.document, &|handle: &Handle| {
            element_name(handle) == Some("table") && has_class(handle, class)
        })
    }
}

/// Non-fatal problem found while mapping a row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractionWarning {
    /// Zero-based data row index (header excluded).
    pub row: usize,
    pub kind: WarningKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WarningKind {
    UnmappedColumn { column: usize, value: String },
    MissingCells { found: usize },
}

impl fmt::Display for ExtractionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::UnmappedColumn { column, value } => write!(
                f,
                "row {}: unmapped value for column {column} with value {value:?}",
                self.row
            ),
            WarningKind::MissingCells { found } => write!(
                f,
                "row {}: expected {MAPPED_COLUMNS} cells, found {found}",
                self.row
            ),
        }
    }
}

/// Records in document order plus the warnings raised while mapping them.
#[derive(Clone, Debug, Default)]
pub struct Extraction {
    pub records: RecordSet,
    pub warnings: Vec<ExtractionWarning>,
}

/// Walks the result table, skipping exactly the first row. A page without the
/// table or without data rows yields an empty record set.
pub fn extract(document: &ContentsDocument) -> Extraction {
    let mut extraction = Extraction::default();
    let Some(table) = document.find_table(RESULT_TABLE_CLASS) else {
        tracing::debug!("no result table found");
        return extraction;
    };

    for (row, tr) in table_rows(&table).into_iter().skip(1).enumerate() {
        let cells: Vec<String> = row_cells(&tr)
            .iter()
            .map(|cell| text_content(cell).trim().to_string())
            .collect();

        if cells.len() < MAPPED_COLUMNS {
            extraction.warnings.push(ExtractionWarning {
                row,
                kind: WarningKind::MissingCells { found: cells.len() },
            });
        }
        for (column, value) in cells.iter().enumerate().skip(MAPPED_COLUMNS) {
            extraction.warnings.push(ExtractionWarning {
                row,
                kind: WarningKind::UnmappedColumn {
                    column,
                    value: value.clone(),
                },
            });
        }

        extraction.records.push(FileRecord::from_cells(&cells));
    }

    for warning in &extraction.warnings {
        tracing::warn!("{warning}");
    }
    extraction
}

/// `tr` elements of `table`, through `thead`/`tbody`/`tfoot`, but not of nested tables.
fn table_rows(table: &Handle) -> Vec<Handle> {
    let mut rows = Vec::new();
    collect_rows(table, &mut rows);
    rows
}

fn collect_rows(parent: &Handle, rows: &mut Vec<Handle>) {
    for child in parent.children.borrow().iter() {
        match element_name(child) {
            Some("tr") => rows.push(child.clone()),
            Some("table") | None => {}
            Some(_) => collect_rows(child, rows),
        }
    }
}

fn row_cells(row: &Handle) -> Vec<Handle> {
    row.children
        .borrow()
        .iter()
        .filter(|child| element_name(child) == Some("td"))
        .cloned()
        .collect()
}

fn find_element(handle: &Handle, predicate: &dyn Fn(&Handle) -> bool) -> Option<Handle> {
    if predicate(handle) {
        return Some(handle.clone());
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, predicate))
}

fn element_name(handle: &Handle) -> Option<&str> {
    match &handle.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

fn has_class(handle: &Handle, class: &str) -> bool {
    let NodeData::Element { attrs, .. } = &handle.data else {
        return false;
    };
    attrs
        .borrow()
        .iter()
        .filter(|attr| attr.name.local.as_ref() == "class")
        .any(|attr| attr.value.split_whitespace().any(|name| name == class))
}

fn text_content(handle: &Handle) -> String {
    let mut text = String::new();
    for child in handle.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => text.push_str(&contents.borrow()),
            NodeData::Element { .. } => text.push_str(&text_content(child)),
            _ => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_html(html: &str) -> Extraction {
        let document = ContentsDocument::parse(html.as_bytes()).unwrap();
        extract(&document)
    }

    fn page(rows: &str) -> String {
        format!(
            r#"<html><body>
<table class="pure-table pure-table-striped">
<thead><tr><th>File</th><th>Package</th><th>Branch</th><th>Repository</th><th>Architecture</th></tr></thead>
<tbody>{rows}</tbody>
</table>
</body></html>"#
        )
    }

    #[test]
    fn skips_header_and_keeps_row_order() {
        let extraction = extract_html(&page(
            r#"<tr><td>/usr/bin/a</td><td>pkg-a</td><td>edge</td><td>main</td><td>x86</td></tr>
<tr><td>/usr/bin/c</td><td>pkg-c</td><td>edge</td><td>main</td><td>x86</td></tr>
<tr><td>/usr/bin/b</td><td>pkg-b</td><td>edge</td><td>main</td><td>x86</td></tr>"#,
        ));

        let paths: Vec<_> = extraction.records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["/usr/bin/a", "/usr/bin/c", "/usr/bin/b"]);
        assert!(extraction.warnings.is_empty());
    }

    #[test]
    fn cell_text_includes_nested_links_and_is_trimmed() {
        let extraction = extract_html(&page(
            r#"<tr><td>
  /usr/lib/libz.so.1
</td><td><a href="/package/edge/main/x86_64/zlib">zlib</a></td><td>edge</td><td>main</td><td>x86_64</td></tr>"#,
        ));
        assert_eq!(
            extraction.records,
            vec![FileRecord::new("/usr/lib/libz.so.1", "zlib", "edge", "main", "x86_64")]
        );
    }

    #[test]
    fn extra_cells_are_ignored_with_a_warning() {
        let extraction = extract_html(&page(
            r#"<tr><td>f</td><td>p</td><td>b</td><td>r</td><td>a</td><td>surplus</td></tr>"#,
        ));
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].architecture, "a");
        assert_eq!(
            extraction.warnings,
            vec![ExtractionWarning {
                row: 0,
                kind: WarningKind::UnmappedColumn {
                    column: 5,
                    value: "surplus".into()
                },
            }]
        );
        assert!(extraction.warnings[0].to_string().contains("column 5"));
    }

    #[test]
    fn short_rows_leave_trailing_fields_empty() {
        let extraction = extract_html(&page(r#"<tr><td>f</td><td>p</td></tr>"#));
        assert_eq!(extraction.records, vec![FileRecord::new("f", "p", "", "", "")]);
        assert_eq!(
            extraction.warnings[0].kind,
            WarningKind::MissingCells { found: 2 }
        );
    }

    #[test]
    fn header_only_and_missing_table_are_empty() {
        assert!(extract_html(&page("")).records.is_empty());
        assert!(extract_html("<html><body><p>nothing here</p></body></html>").records.is_empty());
        assert!(extract_html("").records.is_empty());
    }

    #[test]
    fn other_tables_are_ignored() {
        let html = r#"<table class="layout"><tr><td>x</td></tr><tr><td>nav</td></tr></table>
<table class="pure-table"><tr><th>h</th></tr><tr><td>f</td><td>p</td><td>b</td><td>r</td><td>a</td></tr></table>"#;
        let extraction = extract_html(html);
        assert_eq!(extraction.records, vec![FileRecord::new("f", "p", "b", "r", "a")]);
    }
}
