//! Record extraction from delimited material-property sources.
//!
//! Rows follow a fixed positional layout: the material name, a kind tag and
//! its value, then a second kind tag and its value. The band gap is kept only
//! when the first tag reads `Band gap` and the color only when the second tag
//! reads `Color`.

mod dialect;
mod error;

use std::io;

use camino::Utf8Path;
use csv::StringRecord;
use log::{debug, info};
use matprops_core::{BAND_GAP_TAG, COLOR_TAG, PropertyRecord};

pub use dialect::{Dialect, DialectDetector, FixedDialect, SAMPLE_SIZE, Sniffer, sample_of};
pub use error::{DialectError, ExtractError};

/// Minimum number of fields in a data row.
const ROW_FIELDS: usize = 5;

/// Turns delimited sources into [`PropertyRecord`]s.
///
/// # Examples
///
/// ```
/// use matprops_data::RecordExtractor;
///
/// let source = b"Material,Property 1,Value 1,Property 2,Value 2\n\
///                Cd1I2,Band gap,3.19,Color,White\n\
///                P,Band gap,1.5,Color,Red\n\
///                Zn1Se1,Band gap,2.1,Color,Yellow\n";
/// let records = RecordExtractor::default()
///     .extract_from_bytes(source)
///     .expect("extract records");
/// assert_eq!(records.len(), 3);
/// assert_eq!(records[0].name, "Cd1I2");
/// assert_eq!(records[0].band_gap, Some(3.19));
/// ```
#[derive(Debug, Clone)]
pub struct RecordExtractor<D = Sniffer> {
    detector: D,
}

impl Default for RecordExtractor<Sniffer> {
    /// Extractor that sniffs the dialect of every source.
    fn default() -> Self {
        Self::new(Sniffer)
    }
}

impl<D: DialectDetector> RecordExtractor<D> {
    /// Extractor using `detector` to decide each source's dialect.
    pub const fn new(detector: D) -> Self {
        Self { detector }
    }

    /// Read the file at `path` and extract its records in source order.
    pub fn extract(&self, path: &Utf8Path) -> Result<Vec<PropertyRecord>, ExtractError> {
        let bytes = matprops_fs::read_file_bytes(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ExtractError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ExtractError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let records = self.extract_from_bytes(&bytes)?;
        info!("extracted {} records from {path}", records.len());
        Ok(records)
    }

    /// Extract records from an in-memory source.
    pub fn extract_from_bytes(&self, source: &[u8]) -> Result<Vec<PropertyRecord>, ExtractError> {
        let dialect = self.detector.detect(sample_of(source))?;
        debug!("using dialect {dialect:?}");

        let mut reader = dialect.reader_builder().from_reader(source);
        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|source| ExtractError::Csv { source })?;
            records.push(record_from_row(&row, &dialect)?);
        }
        Ok(records)
    }
}

/// Extract the records of the file at `path`, sniffing its dialect.
pub fn extract_records(path: &Utf8Path) -> Result<Vec<PropertyRecord>, ExtractError> {
    RecordExtractor::new(Sniffer).extract(path)
}

fn record_from_row(
    row: &StringRecord,
    dialect: &Dialect,
) -> Result<PropertyRecord, ExtractError> {
    let line = row.position().map_or(0, csv::Position::line);
    let field = |index: usize| {
        row.get(index)
            .map(|raw| dialect.field(raw))
            .ok_or(ExtractError::MalformedRow {
                line,
                fields: row.len(),
            })
    };
    if row.len() < ROW_FIELDS {
        return Err(ExtractError::MalformedRow {
            line,
            fields: row.len(),
        });
    }

    let band_gap = if field(1)? == BAND_GAP_TAG {
        let value = field(2)?;
        let parsed = value
            .trim()
            .parse::<f64>()
            .map_err(|source| ExtractError::InvalidBandGap {
                line,
                value: value.to_owned(),
                source,
            })?;
        Some(parsed)
    } else {
        None
    };
    let color = (field(3)? == COLOR_TAG)
        .then(|| field(4).map(str::to_owned))
        .transpose()?;

    Ok(PropertyRecord::new(field(0)?, band_gap, color))
}

#[cfg(test)]
mod tests;
