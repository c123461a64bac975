use apk_file::{ApkFileError, ExportFormat, FileRecord, RecordSet, export, export_named};

fn records() -> RecordSet {
    vec![
        FileRecord::new("usr/lib/libssl.so.1.1", "openssl", "v3.8", "main", "x86_64"),
        FileRecord::new(
            "usr/share/doc/a, \"quoted\"\tname",
            "doc-pkg",
            "edge",
            "community",
            "armhf",
        ),
        FileRecord::new("etc/motd", "alpine-base", "", "", ""),
    ]
}

fn read_delimited(bytes: &[u8], delimiter: u8) -> (Vec<String>, RecordSet) {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(bytes);
    let header = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|row| {
            let row = row.unwrap();
            FileRecord::from_cells(&row.iter().collect::<Vec<_>>())
        })
        .collect();
    (header, rows)
}

#[test]
fn csv_round_trips_field_values() {
    let exported = export(&records(), ExportFormat::Csv, "results").unwrap();
    let (header, rows) = read_delimited(&exported.bytes, b',');
    assert_eq!(
        header,
        ["file", "package", "branch", "repository", "architecture"]
    );
    assert_eq!(rows, records());
}

#[test]
fn tsv_round_trips_field_values() {
    let exported = export(&records(), ExportFormat::Tsv, "results").unwrap();
    assert_eq!(exported.content_type, "text/tab-separated-values");
    let (_, rows) = read_delimited(&exported.bytes, b'\t');
    assert_eq!(rows, records());
}

#[test]
fn json_round_trips_field_values() {
    let exported = export(&records(), ExportFormat::Json, "results").unwrap();
    let parsed: RecordSet = serde_json::from_slice(&exported.bytes).unwrap();
    assert_eq!(parsed, records());
}

#[test]
fn sql_formats_target_the_output_name() {
    let mysql = export(&records(), ExportFormat::Mysql, "contents").unwrap();
    let text = mysql.as_text().unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.lines().all(|line| line.starts_with("INSERT INTO `contents`")));

    let postgres = export(&records(), ExportFormat::Postgres, "contents").unwrap();
    assert!(postgres.as_text().unwrap().starts_with("INSERT INTO \"contents\""));
    assert_eq!(postgres.content_type, "application/sql");
}

#[test]
fn every_format_renders() {
    for format in ExportFormat::ALL {
        let exported = export(&records(), format, "results").unwrap();
        assert!(!exported.bytes.is_empty(), "{format} rendered nothing");
        assert_eq!(exported.format, format);
        assert_eq!(exported.as_text().is_some(), format != ExportFormat::Xlsx);
    }
}

#[test]
fn bogus_format_is_rejected_without_output() {
    let err = export_named(&records(), "bogus", "results").unwrap_err();
    let ApkFileError::UnsupportedFormat { format, valid } = err else {
        panic!("expected unsupported format error");
    };
    assert_eq!(format, "bogus");
    assert!(valid.contains(&"csv") && valid.contains(&"markdown"));
}
