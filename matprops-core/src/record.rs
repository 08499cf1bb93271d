//! Record and projection types exchanged between ingestion and the store.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tag that marks the band-gap value column of a source row.
pub const BAND_GAP_TAG: &str = "Band gap";

/// Tag that marks the color value column of a source row.
pub const COLOR_TAG: &str = "Color";

/// A single material with its optional band gap and color.
///
/// Records are produced by the extractor and stored as one row each. The same
/// shape is returned by the full-width band-gap queries.
///
/// # Examples
///
/// ```
/// use matprops_core::PropertyRecord;
///
/// let record = PropertyRecord::new("Cd1I2", Some(3.19), Some("White".into()));
/// assert_eq!(record.name, "Cd1I2");
/// assert_eq!(record.band_gap, Some(3.19));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropertyRecord {
    /// Material name, copied verbatim from the source.
    pub name: String,
    /// Band gap in electronvolts when the source row carried one.
    pub band_gap: Option<f64>,
    /// Color when the source row carried one.
    pub color: Option<String>,
}

impl PropertyRecord {
    /// Construct a record from its three fields.
    pub fn new(name: impl Into<String>, band_gap: Option<f64>, color: Option<String>) -> Self {
        Self {
            name: name.into(),
            band_gap,
            color,
        }
    }
}

/// Row projection returned when searching by material name.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NameMatch {
    /// Stored band gap, if any.
    pub band_gap: Option<f64>,
    /// Stored color, if any.
    pub color: Option<String>,
}

/// Row projection returned when searching by color.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColorMatch {
    /// Stored material name.
    pub material: String,
    /// Stored band gap, if any.
    pub band_gap: Option<f64>,
}

impl From<&PropertyRecord> for NameMatch {
    fn from(record: &PropertyRecord) -> Self {
        Self {
            band_gap: record.band_gap,
            color: record.color.clone(),
        }
    }
}

impl From<&PropertyRecord> for ColorMatch {
    fn from(record: &PropertyRecord) -> Self {
        Self {
            material: record.name.clone(),
            band_gap: record.band_gap,
        }
    }
}
