//! Dialect inference for delimited sources.

use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord};

use super::DialectError;

/// Number of leading bytes inspected when sniffing a source.
pub const SAMPLE_SIZE: usize = 1024;

/// Delimiters tried by [`Sniffer`], most preferred first.
const DELIMITER_CANDIDATES: [u8; 6] = [b',', b'\t', b';', b'|', b':', b' '];

/// Rows compared against the first row by the header heuristic.
const HEADER_PROBE_ROWS: usize = 20;

/// Shape of a delimited source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// Field separator.
    pub delimiter: u8,
    /// Quote character.
    pub quote: u8,
    /// Whether whitespace directly after a delimiter is dropped from the
    /// following field. Trailing whitespace is always kept.
    pub skip_initial_space: bool,
    /// Whether the first row names the columns rather than holding data.
    pub has_header: bool,
}

impl Default for Dialect {
    /// Comma separated, double quoted, with a header row.
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            skip_initial_space: false,
            has_header: true,
        }
    }
}

impl Dialect {
    /// Replace the delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Declare whether the first row is a header.
    #[must_use]
    pub const fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// A `csv` reader configured for this dialect.
    ///
    /// Rows of any width are accepted so short rows can be reported with their
    /// line number instead of as a generic parse failure. Fields are not
    /// trimmed; see [`Dialect::field`].
    #[must_use]
    pub fn reader_builder(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .quote(self.quote)
            .has_headers(self.has_header)
            .flexible(true);
        builder
    }

    /// The text of a parsed field, without leading whitespace when
    /// [`Dialect::skip_initial_space`] is set.
    #[must_use]
    pub fn field<'a>(&self, raw: &'a str) -> &'a str {
        if self.skip_initial_space {
            raw.trim_start()
        } else {
            raw
        }
    }
}

/// Strategy for deciding the dialect of a source from a leading sample.
pub trait DialectDetector {
    /// Infer the dialect of the source that `sample` was taken from.
    fn detect(&self, sample: &[u8]) -> Result<Dialect, DialectError>;
}

/// Detector that always answers with the same dialect.
///
/// # Examples
///
/// ```
/// use matprops_data::{Dialect, DialectDetector, FixedDialect};
///
/// let pinned = Dialect::default().with_delimiter(b';').with_header(false);
/// assert_eq!(FixedDialect(pinned).detect(b"anything"), Ok(pinned));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDialect(pub Dialect);

impl DialectDetector for FixedDialect {
    fn detect(&self, _sample: &[u8]) -> Result<Dialect, DialectError> {
        Ok(self.0)
    }
}

/// Heuristic detector inspecting delimiter frequencies and column types.
///
/// The delimiter is the candidate whose per-line count is most consistent
/// across the sample; at least nine lines in ten must agree. The first row is
/// treated as a header when its cells disagree with the type or length that
/// the following rows share in each column.
///
/// # Examples
///
/// ```
/// use matprops_data::{DialectDetector, Sniffer};
///
/// let sample = b"Material;Kind;Value;Kind;Value\n\
///                Cd1I2;Band gap;3.19;Color;White\n\
///                P;Band gap;1.5;Color;Red\n";
/// let dialect = Sniffer.detect(sample).expect("sniff dialect");
/// assert_eq!(dialect.delimiter, b';');
/// assert!(dialect.has_header);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sniffer;

impl DialectDetector for Sniffer {
    fn detect(&self, sample: &[u8]) -> Result<Dialect, DialectError> {
        let text = String::from_utf8_lossy(sample);
        let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
        if lines.is_empty() {
            return Err(DialectError::EmptySample);
        }

        let quote = infer_quote(&lines);
        let delimiter = infer_delimiter(&lines, quote)?;
        let mut dialect = Dialect {
            delimiter,
            quote,
            skip_initial_space: spaces_follow_delimiter(&lines, delimiter, quote),
            has_header: false,
        };
        dialect.has_header = looks_like_header(sample, &dialect);
        Ok(dialect)
    }
}

/// The leading part of `source` handed to a [`DialectDetector`].
///
/// When the source is longer than [`SAMPLE_SIZE`] the sample is cut back to
/// the last complete line so a truncated row cannot skew the counts.
#[must_use]
pub fn sample_of(source: &[u8]) -> &[u8] {
    let Some(head) = source.get(..SAMPLE_SIZE) else {
        return source;
    };
    if source.len() == SAMPLE_SIZE {
        return head;
    }
    match head.iter().rposition(|&byte| byte == b'\n') {
        Some(end) => &head[..=end],
        None => head,
    }
}

fn infer_quote(lines: &[&str]) -> u8 {
    let any_double = lines.iter().any(|line| line.contains('"'));
    if !any_double && lines.iter().any(|line| quotes_whole_field(line, b'\'')) {
        b'\''
    } else {
        b'"'
    }
}

/// Whether some field of `line` is wrapped in `quote` at both ends.
///
/// The opening quote must start the line or follow a delimiter, optionally
/// with one space between. The closing quote must end the line or be followed
/// by the same delimiter.
fn quotes_whole_field(line: &str, quote: u8) -> bool {
    let bytes = line.as_bytes();
    let is_delimiter = |byte: &u8| DELIMITER_CANDIDATES.contains(byte);
    let before = |index: usize| index.checked_sub(1).and_then(|prev| bytes.get(prev));

    for (open, _) in bytes.iter().enumerate().filter(|&(_, &byte)| byte == quote) {
        let leading = match before(open) {
            None => None,
            Some(byte) if is_delimiter(byte) => Some(*byte),
            Some(b' ') => match before(open - 1) {
                None => None,
                Some(byte) if is_delimiter(byte) => Some(*byte),
                Some(_) => continue,
            },
            Some(_) => continue,
        };
        let closed = bytes
            .iter()
            .enumerate()
            .skip(open + 1)
            .filter(|&(_, &byte)| byte == quote)
            .any(|(close, _)| match (bytes.get(close + 1), leading) {
                (None, _) => true,
                (Some(next), Some(delimiter)) => *next == delimiter,
                (Some(next), None) => is_delimiter(next),
            });
        if closed {
            return true;
        }
    }
    false
}

/// Occurrences of `delimiter` outside quoted sections of `line`.
fn count_unquoted(line: &str, delimiter: u8, quote: u8) -> usize {
    let mut quoted = false;
    let mut count = 0;
    for byte in line.bytes() {
        if byte == quote {
            quoted = !quoted;
        } else if byte == delimiter && !quoted {
            count += 1;
        }
    }
    count
}

fn infer_delimiter(lines: &[&str], quote: u8) -> Result<u8, DialectError> {
    let mut best: Option<(u8, usize)> = None;
    for delimiter in DELIMITER_CANDIDATES {
        let mut frequencies: HashMap<usize, usize> = HashMap::new();
        for line in lines {
            *frequencies
                .entry(count_unquoted(line, delimiter, quote))
                .or_default() += 1;
        }
        let modal = frequencies
            .into_iter()
            .max_by_key(|&(count, lines_with_count)| (lines_with_count, count));
        let Some((modal_count, agreeing)) = modal else {
            continue;
        };
        if modal_count == 0 || agreeing * 10 < lines.len() * 9 {
            continue;
        }
        if best.is_none_or(|(_, best_agreeing)| agreeing > best_agreeing) {
            best = Some((delimiter, agreeing));
        }
    }
    best.map(|(delimiter, _)| delimiter)
        .ok_or(DialectError::UndeterminedDelimiter)
}

fn spaces_follow_delimiter(lines: &[&str], delimiter: u8, quote: u8) -> bool {
    if delimiter == b' ' {
        return false;
    }
    let mut seen = false;
    for line in lines {
        let bytes = line.as_bytes();
        let mut quoted = false;
        for (index, &byte) in bytes.iter().enumerate() {
            if byte == quote {
                quoted = !quoted;
            } else if byte == delimiter && !quoted {
                seen = true;
                if bytes.get(index + 1) != Some(&b' ') {
                    return false;
                }
            }
        }
    }
    seen
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Numeric,
    Length(usize),
}

impl CellKind {
    fn of(cell: &str) -> Self {
        if cell.trim().parse::<f64>().is_ok() {
            Self::Numeric
        } else {
            Self::Length(cell.chars().count())
        }
    }
}

fn looks_like_header(sample: &[u8], dialect: &Dialect) -> bool {
    let mut reader = dialect.with_header(false).reader_builder().from_reader(sample);
    let rows: Vec<StringRecord> = reader.records().map_while(Result::ok).collect();
    let Some((first, rest)) = rows.split_first() else {
        return false;
    };

    let probes: Vec<&StringRecord> = rest
        .iter()
        .filter(|row| row.len() == first.len())
        .take(HEADER_PROBE_ROWS)
        .collect();
    if probes.is_empty() {
        return false;
    }

    let mut votes: i64 = 0;
    for (column, header_cell) in first.iter().enumerate() {
        let mut kinds = probes.iter().filter_map(|row| row.get(column)).map(CellKind::of);
        let Some(kind) = kinds.next() else {
            continue;
        };
        if kinds.any(|other| other != kind) {
            continue;
        }
        if CellKind::of(header_cell) == kind {
            votes -= 1;
        } else {
            votes += 1;
        }
    }
    votes > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(b"a,b,c\n1,2,3\n4,5,6\n".as_slice(), b',')]
    #[case(b"a\tb\tc\n1\t2\t3\n4\t5\t6\n".as_slice(), b'\t')]
    #[case(b"a;b;c\n1;2;3\n4;5;6\n".as_slice(), b';')]
    #[case(b"a|b|c\n1|2|3\n4|5|6\n".as_slice(), b'|')]
    fn picks_the_consistent_delimiter(#[case] sample: &[u8], #[case] expected: u8) {
        let dialect = Sniffer.detect(sample).expect("sniff dialect");
        assert_eq!(dialect.delimiter, expected);
    }

    #[rstest]
    fn prefers_earlier_candidates_on_ties() {
        let sample = b"Cd1I2;Band gap;3.19\nP;Band gap;1.5\n";
        let dialect = Sniffer.detect(sample).expect("sniff dialect");
        assert_eq!(dialect.delimiter, b';', "semicolon precedes space");
    }

    #[rstest]
    fn ignores_delimiters_inside_quotes() {
        let sample = b"name;note\n\"a;b\";x\n\"c;d;e\";y\n";
        let dialect = Sniffer.detect(sample).expect("sniff dialect");
        assert_eq!(dialect.delimiter, b';');
        assert_eq!(dialect.quote, b'"');
    }

    #[rstest]
    fn recognises_single_quotes() {
        let sample = b"'Cd1I2','Band gap',3.19\n'P','Band gap',1.5\n";
        let dialect = Sniffer.detect(sample).expect("sniff dialect");
        assert_eq!(dialect.quote, b'\'');
    }

    #[rstest]
    #[case(b"a,b\nCd1I2,'Off' white\nP,Red\n".as_slice())]
    #[case(b"a,b\nCd1I2,it's\nP,Red\n".as_slice())]
    fn partly_quoted_fields_keep_double_quotes(#[case] sample: &[u8]) {
        let dialect = Sniffer.detect(sample).expect("sniff dialect");
        assert_eq!(dialect.quote, b'"');
    }

    #[rstest]
    #[case("'Cd1I2',3.19", true)]
    #[case("Cd1I2, 'White'", true)]
    #[case("Cd1I2,'White',3.19", true)]
    #[case("Cd1I2,'Off' white", false)]
    #[case("Cd1I2,'White'x,3.19", false)]
    fn whole_field_quoting_is_required(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(quotes_whole_field(line, b'\''), expected);
    }

    #[rstest]
    #[case(b"".as_slice())]
    #[case(b"\n   \n".as_slice())]
    fn rejects_empty_samples(#[case] sample: &[u8]) {
        assert_eq!(Sniffer.detect(sample), Err(DialectError::EmptySample));
    }

    #[rstest]
    fn rejects_samples_without_a_delimiter() {
        assert_eq!(
            Sniffer.detect(b"alpha\nbeta\ngamma\n"),
            Err(DialectError::UndeterminedDelimiter)
        );
    }

    #[rstest]
    fn rejects_inconsistent_delimiters() {
        let sample = b"a,b\nc\nd,e,f,g\nh\n";
        assert_eq!(
            Sniffer.detect(sample),
            Err(DialectError::UndeterminedDelimiter)
        );
    }

    #[rstest]
    fn detects_space_after_delimiter() {
        let sample = b"a, b, c\n1, 2, 3\n4, 5, 6\n";
        let dialect = Sniffer.detect(sample).expect("sniff dialect");
        assert_eq!(dialect.delimiter, b',');
        assert!(dialect.skip_initial_space);
    }

    #[rstest]
    fn detects_header_over_typed_columns() {
        let sample = b"Material,Property 1,Value 1,Property 2,Value 2\n\
                       Cd1I2,Band gap,3.19,Color,White\n\
                       P,Band gap,1.5,Color,Red\n\
                       Zn1Se1,Band gap,2.1,Color,Yellow\n";
        let dialect = Sniffer.detect(sample).expect("sniff dialect");
        assert!(dialect.has_header);
    }

    #[rstest]
    fn headerless_sources_are_recognised() {
        let sample = b"Cd1I2,Band gap,3.19,Color,White\n\
                       P,Band gap,1.5,Color,Red\n\
                       Zn1Se1,Band gap,2.1,Color,Yellow\n";
        let dialect = Sniffer.detect(sample).expect("sniff dialect");
        assert!(!dialect.has_header);
    }

    #[rstest]
    fn single_row_has_no_header() {
        let dialect = Sniffer.detect(b"a,b,c\n").expect("sniff dialect");
        assert!(!dialect.has_header);
    }

    #[rstest]
    fn sample_of_short_source_is_whole() {
        let source = b"a,b\n1,2";
        assert_eq!(sample_of(source), source.as_slice());
    }

    #[rstest]
    fn sample_of_long_source_drops_partial_line() {
        let mut source = Vec::new();
        while source.len() <= SAMPLE_SIZE {
            source.extend_from_slice(b"Cd1I2,Band gap,3.19,Color,White\n");
        }
        let sample = sample_of(&source);
        assert!(sample.len() <= SAMPLE_SIZE);
        assert_eq!(sample.last(), Some(&b'\n'));
    }
}
