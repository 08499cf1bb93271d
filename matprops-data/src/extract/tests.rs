use super::*;
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use std::fs;
use tempfile::TempDir;

#[fixture]
fn fixture_csv() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/materials.csv")
}

fn headerless_semicolons() -> Dialect {
    Dialect::default().with_delimiter(b';').with_header(false)
}

#[rstest]
fn extracts_every_fixture_record(fixture_csv: Utf8PathBuf) {
    let records = extract_records(&fixture_csv).expect("extract fixture");
    assert_eq!(records.len(), 100);
    assert_eq!(
        records[0],
        PropertyRecord::new("Cd1I2", Some(3.19), Some("White".into()))
    );
}

#[rstest]
fn fixture_keeps_rows_with_other_tags(fixture_csv: Utf8PathBuf) {
    let records = extract_records(&fixture_csv).expect("extract fixture");
    let without_band_gap = records.iter().filter(|r| r.band_gap.is_none()).count();
    let without_color = records.iter().filter(|r| r.color.is_none()).count();
    assert_eq!(without_band_gap, 4);
    assert_eq!(without_color, 4);
}

#[rstest]
fn other_tags_leave_values_absent() {
    let source = b"Rb2Br1,Melting point,682,Density,3.35\n\
                   Cd1I2,Band gap,3.19,Color,White\n";
    let records = RecordExtractor::new(FixedDialect(Dialect::default().with_header(false)))
        .extract_from_bytes(source)
        .expect("extract records");
    assert_eq!(records[0], PropertyRecord::new("Rb2Br1", None, None));
    assert_eq!(records[1].band_gap, Some(3.19));
}

#[rstest]
fn band_gap_values_are_trimmed() {
    let records = RecordExtractor::new(FixedDialect(headerless_semicolons()))
        .extract_from_bytes(b"P;Band gap; 1.5 ;Color;Red\n")
        .expect("extract records");
    assert_eq!(records[0].band_gap, Some(1.5));
}

#[rstest]
fn partly_quoted_colors_are_copied_verbatim() {
    let source = b"Material,Property 1,Value 1,Property 2,Value 2\n\
                   Cd1I2,Band gap,3.19,Color,'Off' white\n\
                   P,Band gap,1.5,Color,Red\n";
    let records = RecordExtractor::default()
        .extract_from_bytes(source)
        .expect("extract records");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].color.as_deref(), Some("'Off' white"));
}

#[rstest]
fn initial_space_skipping_keeps_trailing_space() {
    let dialect = Dialect {
        skip_initial_space: true,
        ..Dialect::default().with_header(false)
    };
    let records = RecordExtractor::new(FixedDialect(dialect))
        .extract_from_bytes(b"P, Band gap, 1.5, Color, White \n")
        .expect("extract records");
    assert_eq!(
        records[0],
        PropertyRecord::new("P", Some(1.5), Some("White ".into()))
    );
}

#[rstest]
fn fixed_dialect_pins_the_layout() {
    let source = b"Cd1I2;Band gap;3.19;Color;White\nP;Band gap;1.5;Color;Red\n";
    let records = RecordExtractor::new(FixedDialect(headerless_semicolons()))
        .extract_from_bytes(source)
        .expect("extract records");
    assert_eq!(records.len(), 2, "first row is data, not a header");
    assert_eq!(records[1].color.as_deref(), Some("Red"));
}

#[rstest]
fn sniffs_headerless_semicolon_sources() {
    let source = b"Cd1I2;Band gap;3.19;Color;White\n\
                   P;Band gap;1.5;Color;Red\n\
                   Zn1Se1;Band gap;2.1;Color;Yellow\n";
    let records = RecordExtractor::default()
        .extract_from_bytes(source)
        .expect("extract records");
    assert_eq!(records.len(), 3);
    assert_eq!(records[2].name, "Zn1Se1");
}

#[rstest]
fn short_rows_are_malformed() {
    let err = RecordExtractor::new(FixedDialect(Dialect::default().with_header(false)))
        .extract_from_bytes(b"Cd1I2,Band gap,3.19,Color,White\nP,Band gap,1.5\n")
        .expect_err("short row");
    assert!(
        matches!(err, ExtractError::MalformedRow { line: 2, fields: 3 }),
        "unexpected error: {err:?}"
    );
}

#[rstest]
fn non_numeric_band_gap_is_rejected() {
    let err = RecordExtractor::new(FixedDialect(Dialect::default().with_header(false)))
        .extract_from_bytes(b"Cd1I2,Band gap,wide,Color,White\n")
        .expect_err("non-numeric band gap");
    match err {
        ExtractError::InvalidBandGap { line, value, .. } => {
            assert_eq!(line, 1);
            assert_eq!(value, "wide");
        }
        other => panic!("expected invalid band gap, got {other:?}"),
    }
}

#[rstest]
fn untagged_values_are_not_parsed() {
    let records = RecordExtractor::new(FixedDialect(Dialect::default().with_header(false)))
        .extract_from_bytes(b"Cd1I2,Gap,wide,Color,White\n")
        .expect("value is ignored when the tag differs");
    assert_eq!(records[0].band_gap, None);
}

#[rstest]
fn missing_source_is_not_found() {
    let dir = TempDir::new().expect("create temp dir");
    let path =
        Utf8PathBuf::from_path_buf(dir.path().join("absent.csv")).expect("utf-8 temp path");
    let err = extract_records(&path).expect_err("missing file");
    match err {
        ExtractError::NotFound { path: reported } => assert_eq!(reported, path),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[rstest]
fn empty_source_cannot_be_sniffed() {
    let dir = TempDir::new().expect("create temp dir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("empty.csv")).expect("utf-8 temp path");
    fs::write(&path, b"").expect("write empty file");
    let err = extract_records(&path).expect_err("empty source");
    assert!(matches!(
        err,
        ExtractError::Dialect(DialectError::EmptySample)
    ));
}

#[rstest]
fn extraction_restarts_from_the_top(fixture_csv: Utf8PathBuf) {
    let extractor = RecordExtractor::default();
    let first = extractor.extract(&fixture_csv).expect("first pass");
    let second = extractor.extract(&fixture_csv).expect("second pass");
    assert_eq!(first, second);
}
