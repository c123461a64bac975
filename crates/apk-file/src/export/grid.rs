//! Human-readable grids: ASCII box, Markdown pipe table and HTML table.

use quick_xml::escape::escape;

use crate::record::{HEADER, RecordSet};

/// Cell text for every record, flattened onto one line by `flatten`.
fn grid_cells(records: &RecordSet, flatten: impl Fn(&str) -> String) -> Vec<[String; 5]> {
    records
        .iter()
        .map(|record| record.values().map(&flatten))
        .collect()
}

fn column_widths(rows: &[[String; 5]], min: usize) -> Vec<usize> {
    HEADER
        .iter()
        .enumerate()
        .map(|(col, title)| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .fold(title.chars().count(), usize::max)
                .max(min)
        })
        .collect()
}

fn replace_line_breaks(value: &str, with: &str) -> String {
    value.replace("\r\n", with).replace(['\r', '\n'], with)
}

fn padded_line<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let cells: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!(" {:<width$} ", cell.as_ref()))
        .collect();
    format!("|{}|\n", cells.join("|"))
}

fn rule(widths: &[usize], fill: char) -> String {
    let segments: Vec<String> = widths
        .iter()
        .map(|width| fill.to_string().repeat(width + 2))
        .collect();
    format!("+{}+\n", segments.join("+"))
}

pub(super) fn ascii(records: &RecordSet) -> String {
    let rows = grid_cells(records, |value| replace_line_breaks(value, " "));
    let widths = column_widths(&rows, 0);
    let mut out = rule(&widths, '-');
    out.push_str(&padded_line(&HEADER, &widths));
    out.push_str(&rule(&widths, '='));
    for row in &rows {
        out.push_str(&padded_line(row, &widths));
        out.push_str(&rule(&widths, '-'));
    }
    out
}

pub(super) fn markdown(records: &RecordSet) -> String {
    let rows = grid_cells(records, |value| {
        replace_line_breaks(&value.replace('|', "\\|"), "<br>")
    });
    let widths = column_widths(&rows, 3);

    let mut out = padded_line(&HEADER, &widths);
    let separators: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    out.push_str(&padded_line(&separators, &widths));
    for row in &rows {
        out.push_str(&padded_line(row, &widths));
    }
    out
}

pub(super) fn html(records: &RecordSet) -> String {
    let mut out = String::from("<table>\n<thead>\n<tr>");
    for title in HEADER {
        out.push_str(&format!("<th>{title}</th>"));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for record in records {
        out.push_str("<tr>");
        for value in record.values() {
            out.push_str(&format!("<td>{}</td>", escape(value)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
    out
}
