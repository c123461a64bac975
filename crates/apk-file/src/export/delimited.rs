use csv::WriterBuilder;

use crate::error::ApkFileError;
use crate::record::{HEADER, RecordSet};

/// Header line followed by one line per record. Fields holding the delimiter,
/// a quote or a line break are quoted.
pub(super) fn render(records: &RecordSet, delimiter: u8) -> Result<String, ApkFileError> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for record in records {
        writer.write_record(record.values())?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ApkFileError::Export(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ApkFileError::Export(err.to_string()))
}
