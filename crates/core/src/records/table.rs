//! Header-keyed sheet records.

use std::collections::HashMap;
use std::sync::Arc;

use super::csv::parse_csv;

/// Normalizes a header for lookup: lowercase with all whitespace removed.
///
/// `"Booking Date"`, `" booking date "` and `"BookingDate"` all map to
/// `"bookingdate"`.
#[must_use]
pub fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Column positions keyed by normalized header.
#[derive(Debug, Default)]
struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    fn new<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut positions = HashMap::new();
        for (position, header) in headers.into_iter().enumerate() {
            // Later duplicates win, matching a keyed object built left to right.
            positions.insert(normalize_header(header), position);
        }
        Self { positions }
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(&normalize_header(column)).copied()
    }
}

/// One data row of a sheet, addressable by header or by position.
///
/// Missing columns and short rows read as the empty string.
#[derive(Debug, Clone)]
pub struct Record {
    columns: Arc<ColumnIndex>,
    cells: Vec<String>,
}

impl Record {
    /// Builds a standalone record from `(header, value)` pairs.
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let (headers, cells): (Vec<K>, Vec<String>) =
            pairs.into_iter().map(|(k, v)| (k, v.into())).unzip();
        Self {
            columns: Arc::new(ColumnIndex::new(headers.iter().map(AsRef::as_ref))),
            cells,
        }
    }

    /// Returns the trimmed cell under `column`, or `""` when absent.
    #[must_use]
    pub fn get(&self, column: &str) -> &str {
        self.columns
            .position(column)
            .and_then(|position| self.cells.get(position))
            .map_or("", |cell| cell.trim())
    }

    /// Returns true if the record has a non-blank value under `column`.
    #[must_use]
    pub fn has(&self, column: &str) -> bool {
        !self.get(column).is_empty()
    }

    /// Returns the cell at `position`, or `""` when the row is shorter.
    #[must_use]
    pub fn cell(&self, position: usize) -> &str {
        self.cells.get(position).map_or("", |cell| cell.trim())
    }

    /// Returns the raw cells in sheet order.
    #[must_use]
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Returns true if every cell is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|cell| cell.trim().is_empty())
    }
}

/// A parsed sheet: the header row plus its data records.
#[derive(Debug, Clone, Default)]
pub struct SheetTable {
    headers: Vec<String>,
    records: Vec<Record>,
}

impl SheetTable {
    /// Builds a table from rows whose first row is the header.
    ///
    /// Rows with every cell blank are skipped. Cells beyond the header stay
    /// reachable by position only.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let mut rows = rows.into_iter();
        let Some(headers) = rows.next() else {
            return Self::default();
        };
        let headers: Vec<String> = headers
            .into_iter()
            .map(|header| header.replace('"', "").trim().to_string())
            .collect();

        let columns = Arc::new(ColumnIndex::new(headers.iter().map(String::as_str)));
        let records = rows
            .map(|cells| Record {
                columns: Arc::clone(&columns),
                cells,
            })
            .filter(|record| !record.is_blank())
            .collect();

        Self { headers, records }
    }

    /// Parses CSV text into a table.
    #[must_use]
    pub fn from_csv(text: &str) -> Self {
        Self::from_rows(parse_csv(text))
    }

    /// Returns the header row.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Returns the data records.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consumes the table, returning its records.
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Returns the number of data records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the table has no data records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
