//! Renders a [`RecordSet`] into exactly one output representation.
//!
//! Every format shares the column header in [`HEADER`](crate::record::HEADER).
//! Rendering never touches the output sink; callers decide where the bytes go.

mod delimited;
mod grid;
mod spreadsheet;
mod sql;
mod structured;

use std::fmt;
use std::str::FromStr;

use crate::error::ApkFileError;
use crate::record::RecordSet;

/// Supported output representations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Yaml,
    Json,
    Xlsx,
    Xml,
    Mysql,
    Postgres,
    Html,
    Ascii,
    Markdown,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 11] = [
        ExportFormat::Markdown,
        ExportFormat::Csv,
        ExportFormat::Yaml,
        ExportFormat::Json,
        ExportFormat::Xlsx,
        ExportFormat::Xml,
        ExportFormat::Tsv,
        ExportFormat::Mysql,
        ExportFormat::Postgres,
        ExportFormat::Html,
        ExportFormat::Ascii,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Yaml => "yaml",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Xml => "xml",
            ExportFormat::Mysql => "mysql",
            ExportFormat::Postgres => "postgres",
            ExportFormat::Html => "html",
            ExportFormat::Ascii => "ascii",
            ExportFormat::Markdown => "markdown",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|format| format.as_str()).collect()
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Tsv => "text/tab-separated-values",
            ExportFormat::Yaml => "application/yaml",
            ExportFormat::Json => "application/json",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Xml => "application/xml",
            ExportFormat::Mysql | ExportFormat::Postgres => "application/sql",
            ExportFormat::Html => "text/html",
            ExportFormat::Ascii => "text/plain",
            ExportFormat::Markdown => "text/markdown",
        }
    }

    /// File extension used when the export is written to disk.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Mysql | ExportFormat::Postgres => "sql",
            ExportFormat::Ascii => "txt",
            ExportFormat::Markdown => "md",
            other => other.as_str(),
        }
    }

    /// Whether the rendered output is UTF-8 text.
    pub fn is_text(self) -> bool {
        self != ExportFormat::Xlsx
    }
}

impl FromStr for ExportFormat {
    type Err = ApkFileError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|format| format.as_str() == value)
            .ok_or_else(|| ApkFileError::UnsupportedFormat {
                format: value.to_string(),
                valid: Self::names(),
            })
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendered output plus the content type matching its format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exported {
    pub format: ExportFormat,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Exported {
    fn text(format: ExportFormat, text: String) -> Self {
        Self::binary(format, text.into_bytes())
    }

    fn binary(format: ExportFormat, bytes: Vec<u8>) -> Self {
        Self {
            format,
            content_type: format.content_type(),
            bytes,
        }
    }

    /// Text view of the output, `None` for binary formats.
    pub fn as_text(&self) -> Option<&str> {
        if self.format.is_text() {
            std::str::from_utf8(&self.bytes).ok()
        } else {
            None
        }
    }
}

/// Renders `records` as `format`. `output_name` names the SQL target table and
/// the worksheet.
pub fn export(
    records: &RecordSet,
    format: ExportFormat,
    output_name: &str,
) -> Result<Exported, ApkFileError> {
    tracing::debug!(format = %format, records = records.len(), "exporting records");
    let exported = match format {
        ExportFormat::Csv => Exported::text(format, delimited::render(records, b',')?),
        ExportFormat::Tsv => Exported::text(format, delimited::render(records, b'\t')?),
        ExportFormat::Json => Exported::text(format, structured::json(records)?),
        ExportFormat::Yaml => Exported::text(format, structured::yaml(records)?),
        ExportFormat::Xml => Exported::text(format, structured::xml(records)?),
        ExportFormat::Xlsx => {
            Exported::binary(format, spreadsheet::render(records, output_name)?)
        }
        ExportFormat::Mysql => Exported::text(
            format,
            sql::render(records, output_name, sql::Dialect::MySql),
        ),
        ExportFormat::Postgres => Exported::text(
            format,
            sql::render(records, output_name, sql::Dialect::Postgres),
        ),
        ExportFormat::Ascii => Exported::text(format, grid::ascii(records)),
        ExportFormat::Markdown => Exported::text(format, grid::markdown(records)),
        ExportFormat::Html => Exported::text(format, grid::html(records)),
    };
    Ok(exported)
}

/// Parses `format` and renders in one step; unknown names fail before any rendering.
pub fn export_named(
    records: &RecordSet,
    format: &str,
    output_name: &str,
) -> Result<Exported, ApkFileError> {
    export(records, format.parse()?, output_name)
}
