//! In-memory store and fixture records for tests.

use crate::{
    BandGapWindow, ColorMatch, NameMatch, PropertyRecord, PropertyStore, RowLimit, StoreError,
};

/// A [`PropertyStore`] holding its rows in a vector.
///
/// Lookups scan the rows in insertion order, so results keep the order the
/// records were supplied in.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    rows: Vec<PropertyRecord>,
}

impl MemoryStore {
    /// Build a store over `records`.
    pub fn with_records(records: impl IntoIterator<Item = PropertyRecord>) -> Self {
        Self {
            rows: records.into_iter().collect(),
        }
    }

    /// Rows currently held.
    #[must_use]
    pub fn rows(&self) -> &[PropertyRecord] {
        &self.rows
    }
}

impl PropertyStore for MemoryStore {
    fn search_by_name(&self, name: &str) -> Result<Vec<NameMatch>, StoreError> {
        Ok(self
            .rows
            .iter()
            .filter(|row| row.name == name)
            .map(NameMatch::from)
            .collect())
    }

    fn search_by_color(&self, color: &str) -> Result<Vec<ColorMatch>, StoreError> {
        Ok(self
            .rows
            .iter()
            .filter(|row| row.color.as_deref() == Some(color))
            .map(ColorMatch::from)
            .collect())
    }

    fn search_by_band_gap_window(
        &self,
        window: &BandGapWindow,
    ) -> Result<Vec<PropertyRecord>, StoreError> {
        Ok(self
            .rows
            .iter()
            .filter(|row| row.band_gap.is_some_and(|gap| window.contains(gap)))
            .cloned()
            .collect())
    }

    fn first_rows(&self, limit: RowLimit) -> Result<Vec<PropertyRecord>, StoreError> {
        let take = usize::try_from(limit.get()).unwrap_or(usize::MAX);
        Ok(self.rows.iter().take(take).cloned().collect())
    }
}

/// A small mixed set of records: duplicate names, shared colors, and rows
/// missing either property.
#[must_use]
pub fn sample_records() -> Vec<PropertyRecord> {
    vec![
        PropertyRecord::new("Cd1I2", Some(3.19), Some("White".into())),
        PropertyRecord::new("P", Some(1.9), Some("Black".into())),
        PropertyRecord::new("Zn1Se1", Some(2.1), Some("Yellow".into())),
        PropertyRecord::new("P", Some(2.0), Some("Violet".into())),
        PropertyRecord::new("Ga1As1", Some(1.42), Some("Black".into())),
        PropertyRecord::new("Tl1Cl3", None, Some("Green".into())),
        PropertyRecord::new("Rb2Br1", Some(0.74), None),
        PropertyRecord::new("Si1", Some(1.11), Some("Black".into())),
    ]
}
