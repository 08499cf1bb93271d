//! Plain-text table rendering for query results.

use crate::{ColorMatch, NameMatch, PropertyRecord};

const ABSENT: &str = "-";

/// A row type that can be laid out as a text table.
pub trait TableRow {
    /// Column headings in display order.
    const HEADERS: &'static [&'static str];

    /// Index of the right-aligned band-gap column, if any.
    const NUMERIC_COLUMN: Option<usize>;

    /// Cell text for each column, in the same order as [`Self::HEADERS`].
    fn cells(&self) -> Vec<String>;
}

fn band_gap_cell(band_gap: Option<f64>) -> String {
    band_gap.map_or_else(|| ABSENT.to_owned(), |value| value.to_string())
}

fn text_cell(text: Option<&str>) -> String {
    text.unwrap_or(ABSENT).to_owned()
}

impl TableRow for PropertyRecord {
    const HEADERS: &'static [&'static str] = &["material", "band_gap", "color"];
    const NUMERIC_COLUMN: Option<usize> = Some(1);

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            band_gap_cell(self.band_gap),
            text_cell(self.color.as_deref()),
        ]
    }
}

impl TableRow for NameMatch {
    const HEADERS: &'static [&'static str] = &["band_gap", "color"];
    const NUMERIC_COLUMN: Option<usize> = Some(0);

    fn cells(&self) -> Vec<String> {
        vec![band_gap_cell(self.band_gap), text_cell(self.color.as_deref())]
    }
}

impl TableRow for ColorMatch {
    const HEADERS: &'static [&'static str] = &["material", "band_gap"];
    const NUMERIC_COLUMN: Option<usize> = Some(1);

    fn cells(&self) -> Vec<String> {
        vec![self.material.clone(), band_gap_cell(self.band_gap)]
    }
}

/// Render rows as an aligned table with a header and separator line.
///
/// Absent values render as `-`; the band-gap column is right-aligned.
///
/// # Examples
///
/// ```
/// use matprops_core::{PropertyRecord, render_table};
///
/// let rows = [PropertyRecord::new("Cd1I2", Some(3.19), Some("White".into()))];
/// let table = render_table(&rows);
/// assert_eq!(
///     table,
///     "material | band_gap | color\n\
///      ---------+----------+------\n\
///      Cd1I2    |     3.19 | White\n"
/// );
/// ```
#[must_use]
pub fn render_table<T: TableRow>(rows: &[T]) -> String {
    let body: Vec<Vec<String>> = rows.iter().map(T::cells).collect();
    let mut widths: Vec<usize> = T::HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let headers: Vec<String> = T::HEADERS.iter().map(|h| (*h).to_owned()).collect();
    push_line(&mut out, &headers, &widths, None);
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&separator.join("-+-"));
    out.push('\n');
    for row in &body {
        push_line(&mut out, row, &widths, T::NUMERIC_COLUMN);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize], numeric: Option<usize>) {
    let last = cells.len().saturating_sub(1);
    for (index, (cell, &width)) in cells.iter().zip(widths).enumerate() {
        if index > 0 {
            out.push_str(" | ");
        }
        let padded = if Some(index) == numeric {
            format!("{cell:>width$}")
        } else if index == last {
            cell.clone()
        } else {
            format!("{cell:<width$}")
        };
        out.push_str(&padded);
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn renders_absent_values_as_dashes() {
        let rows = [
            PropertyRecord::new("Tl1Cl3", None, Some("Green".into())),
            PropertyRecord::new("Rb2Br1", Some(0.74), None),
        ];
        let table = render_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "Tl1Cl3   |        - | Green");
        assert_eq!(lines[3], "Rb2Br1   |     0.74 | -");
    }

    #[rstest]
    fn band_gaps_align_right_and_last_column_is_unpadded() {
        let rows = [
            ColorMatch {
                material: "Cd1I2".into(),
                band_gap: Some(3.19),
            },
            ColorMatch {
                material: "Zn1Se1".into(),
                band_gap: Some(12.375),
            },
        ];
        let table = render_table(&rows);
        assert_eq!(
            table,
            "material | band_gap\n\
             ---------+---------\n\
             Cd1I2    |     3.19\n\
             Zn1Se1   |   12.375\n"
        );
    }

    #[rstest]
    fn empty_results_still_render_headers() {
        let table = render_table::<ColorMatch>(&[]);
        assert_eq!(table, "material | band_gap\n---------+---------\n");
    }

    #[rstest]
    fn projections_use_their_own_headers() {
        let rows = [NameMatch {
            band_gap: Some(1.5),
            color: Some("Red".into()),
        }];
        let table = render_table(&rows);
        assert_eq!(
            table,
            "band_gap | color\n---------+------\n     1.5 | Red\n"
        );
    }
}
