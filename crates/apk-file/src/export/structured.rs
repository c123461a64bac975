use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::ApkFileError;
use crate::record::{HEADER, RecordSet};

const XML_ROOT: &str = "dataset";
const XML_ROW: &str = "row";

/// Pretty-printed array of objects keyed by the header names.
pub(super) fn json(records: &RecordSet) -> Result<String, ApkFileError> {
    let mut text = serde_json::to_string_pretty(records)?;
    text.push('\n');
    Ok(text)
}

/// Sequence of mappings keyed by the header names.
pub(super) fn yaml(records: &RecordSet) -> Result<String, ApkFileError> {
    Ok(serde_yaml::to_string(records)?)
}

/// `<dataset>` of `<row>` elements with one child per column.
pub(super) fn xml(records: &RecordSet) -> Result<String, ApkFileError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_xml(&mut writer, records)?;
    let mut text = String::from_utf8(writer.into_inner())
        .map_err(|err| ApkFileError::Export(err.to_string()))?;
    text.push('\n');
    Ok(text)
}

fn write_xml(writer: &mut Writer<Vec<u8>>, records: &RecordSet) -> Result<(), ApkFileError> {
    let mut emit = |event: Event<'_>| {
        writer
            .write_event(event)
            .map_err(|err| ApkFileError::Export(err.to_string()))
    };
    emit(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    emit(Event::Start(BytesStart::new(XML_ROOT)))?;
    for record in records {
        emit(Event::Start(BytesStart::new(XML_ROW)))?;
        for (column, value) in HEADER.iter().zip(record.values()) {
            emit(Event::Start(BytesStart::new(*column)))?;
            emit(Event::Text(BytesText::new(value)))?;
            emit(Event::End(BytesEnd::new(*column)))?;
        }
        emit(Event::End(BytesEnd::new(XML_ROW)))?;
    }
    emit(Event::End(BytesEnd::new(XML_ROOT)))
}
