//! Tabular reader. Decodes the first sheet of a workbook into one of two
//! explicit table shapes.
//!
//! * [`RecordTable`] (record mode): the first row is the header and every
//!   following non-blank row becomes a map from header name to value. Empty
//!   cells are absent keys.
//! * [`GridTable`] (grid mode): the raw 2-D array with empty-string defaults,
//!   a header row for name → index lookup, and a fixed number of leading
//!   non-data rows skipped positionally after the header.
//!
//! Only the first sheet is ever read. Both modes fail with
//! [`RekapError::EmptyInput`] when no data rows remain.

use calamine::{open_workbook_auto, Data, DataType, Range, Reader};
use chrono::Timelike;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{RekapError, Result};
use crate::types::CellValue;

/// Rendering used for spreadsheet date-time cells.
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Name given to blank header cells in record mode.
const EMPTY_HEADER: &str = "__EMPTY";

/// One data row in record mode.
pub type Record = HashMap<String, CellValue>;

// ---------------------------------------------------------------------------
// Record mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordTable {
    /// Header names in sheet order, made unique.
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl RecordTable {
    /// Build a record table from an already decoded sheet range.
    pub fn from_range(range: &Range<Data>) -> Result<Self> {
        let mut rows = range.rows();
        let headers = match rows.next() {
            Some(header) => record_headers(header),
            None => return Err(RekapError::EmptyInput),
        };

        let records: Vec<Record> = rows
            .map(|row| {
                headers
                    .iter()
                    .zip(row)
                    .map(|(name, cell)| (name.clone(), CellValue::from(cell)))
                    .filter(|(_, value)| *value != CellValue::Empty)
                    .collect::<Record>()
            })
            .filter(|record| !record.is_empty())
            .collect();

        if records.is_empty() {
            return Err(RekapError::EmptyInput);
        }
        Ok(Self { headers, records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Header names for record mode: trimmed, blanks named `__EMPTY`, and
/// duplicates suffixed `_1`, `_2`, … so every key is unique.
fn record_headers(row: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    row.iter()
        .map(|cell| {
            let text = CellValue::from(cell).to_text();
            let base = match text.trim() {
                "" => EMPTY_HEADER.to_string(),
                name => name.to_string(),
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}_{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

/// Decode the first sheet at `path` in record mode.
pub fn decode_records(path: &Path) -> Result<RecordTable> {
    RecordTable::from_range(&first_sheet(path)?)
}

// ---------------------------------------------------------------------------
// Grid mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridTable {
    /// Header cells as trimmed text. Blank cells stay `""`.
    pub header: Vec<String>,
    /// Data rows, each padded to the header width. Missing cells are `""`.
    pub rows: Vec<Vec<CellValue>>,
}

impl GridTable {
    /// Build a grid table from a decoded range, discarding `skip_rows`
    /// rows directly after the header whatever they contain.
    ///
    /// After the skip, rows whose cells are all empty are dropped rather
    /// than kept as empty-string rows, so a normalizer never emits an order
    /// with no values. The skip is positional and happens first: a blank
    /// description row still counts towards `skip_rows`.
    pub fn from_range(range: &Range<Data>, skip_rows: usize) -> Result<Self> {
        let mut rows = range.rows();
        let header: Vec<String> = match rows.next() {
            Some(row) => row
                .iter()
                .map(|cell| CellValue::from(cell).to_text().trim().to_string())
                .collect(),
            None => return Err(RekapError::EmptyInput),
        };
        let width = header.len();

        let rows: Vec<Vec<CellValue>> = rows
            .skip(skip_rows)
            .map(|row| {
                let mut cells: Vec<CellValue> = row.iter().map(grid_cell).collect();
                cells.resize(width.max(cells.len()), CellValue::text(""));
                cells
            })
            .filter(|cells| !cells.iter().all(CellValue::is_blank))
            .collect();

        if rows.is_empty() {
            return Err(RekapError::EmptyInput);
        }
        Ok(Self { header, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn grid_cell(cell: &Data) -> CellValue {
    match CellValue::from(cell) {
        CellValue::Empty => CellValue::text(""),
        value => value,
    }
}

/// Decode the first sheet at `path` in grid mode.
pub fn decode_grid(path: &Path, skip_rows: usize) -> Result<GridTable> {
    GridTable::from_range(&first_sheet(path)?, skip_rows)
}

// ---------------------------------------------------------------------------
// Workbook access
// ---------------------------------------------------------------------------

/// Open a workbook (xlsx, xls, xlsb or ods, by extension) and return the
/// cell range of its first sheet.
pub fn first_sheet(path: &Path) -> Result<Range<Data>> {
    let mut workbook = open_workbook_auto(path)?;
    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(RekapError::NoSheets)?;
    tracing::debug!(path = %path.display(), sheet = %name, "reading first sheet");
    Ok(workbook.worksheet_range(&name)?)
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty | Data::Error(_) => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::Int(*i),
            Data::Float(f) => float_cell(*f),
            Data::Bool(b) => CellValue::Text(b.to_string()),
            Data::DateTime(_) => match cell.as_datetime() {
                Some(dt) if dt.num_seconds_from_midnight() == 0 => {
                    CellValue::Text(dt.format(DATE_FORMAT).to_string())
                }
                Some(dt) => CellValue::Text(dt.format(DATETIME_FORMAT).to_string()),
                None => CellValue::Text(cell.to_string()),
            },
            Data::DateTimeIso(s) => CellValue::Text(s.clone()),
            other => CellValue::Text(other.to_string()),
        }
    }
}

/// Largest float that still converts to `i64` without losing precision.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

fn float_cell(f: f64) -> CellValue {
    if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT {
        CellValue::Int(f as i64)
    } else {
        CellValue::Float(f)
    }
}

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Build a range from rows of cells, anchored at `A1`.
#[cfg(test)]
pub(crate) fn range_from_rows(rows: &[Vec<Data>]) -> Range<Data> {
    let height = rows.len();
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if height == 0 || width == 0 {
        return Range::empty();
    }
    let mut range = Range::new((0, 0), ((height - 1) as u32, (width - 1) as u32));
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            range.set_value((r as u32, c as u32), cell.clone());
        }
    }
    range
}

/// A row of text cells; `""` becomes an empty cell.
#[cfg(test)]
pub(crate) fn text_row(cells: &[&str]) -> Vec<Data> {
    cells
        .iter()
        .map(|c| {
            if c.is_empty() {
                Data::Empty
            } else {
                Data::String(c.to_string())
            }
        })
        .collect()
}
