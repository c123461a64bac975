use rust_xlsxwriter::{Format, Workbook};

use crate::error::ApkFileError;
use crate::record::{HEADER, RecordSet};

const FALLBACK_SHEET_NAME: &str = "results";
const MAX_SHEET_NAME_LEN: usize = 31;
const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Single worksheet: bold header row, then one row per record.
pub(super) fn render(records: &RecordSet, output_name: &str) -> Result<Vec<u8>, ApkFileError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name(output_name))?;

    for (col, title) in HEADER.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
    }
    for (idx, record) in records.iter().enumerate() {
        let row = u32::try_from(idx + 1)
            .map_err(|_| ApkFileError::Export("too many rows for a worksheet".into()))?;
        for (col, value) in record.values().iter().enumerate() {
            worksheet.write_string(row, col as u16, *value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn sheet_name(output_name: &str) -> &str {
    let valid = !output_name.trim().is_empty()
        && output_name.chars().count() <= MAX_SHEET_NAME_LEN
        && !output_name.contains(FORBIDDEN_SHEET_CHARS)
        && !output_name.starts_with('\'')
        && !output_name.ends_with('\'');
    if valid { output_name } else { FALLBACK_SHEET_NAME }
}
