//! Test builders — ergonomic constructors for sheets, tables and multipart
//! request bodies.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use calamine::{Data, Range};
use rekap_core::reader::{GridTable, RecordTable};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::path::{Path, PathBuf};

use super::fixtures::{
    LAZADA_HEADER, SHOPEE_HEADER, TIKTOK_DESCRIPTION, TIKTOK_HEADER, TIKTOK_TRACKING_HEADER,
};

// ---------------------------------------------------------------------------
// SheetBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for an in-memory first sheet.
///
/// # Example
///
/// ```rust
/// let range = SheetBuilder::new(&["orderNumber", "sellerSku"])
///     .text_row(&["9001", "BARBIE 533-BIRU"])
///     .build();
/// ```
pub struct SheetBuilder {
    rows: Vec<Vec<Data>>,
}

impl SheetBuilder {
    pub fn new(header: &[&str]) -> Self {
        Self {
            rows: vec![text_cells(header)],
        }
    }

    /// Append a row of text cells. `""` becomes an empty cell.
    pub fn text_row(mut self, cells: &[&str]) -> Self {
        self.rows.push(text_cells(cells));
        self
    }

    pub fn row(mut self, cells: Vec<Data>) -> Self {
        self.rows.push(cells);
        self
    }

    pub fn blank_row(mut self) -> Self {
        self.rows.push(Vec::new());
        self
    }

    pub fn build(self) -> Range<Data> {
        let height = self.rows.len();
        let width = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return Range::empty();
        }
        let mut range = Range::new((0, 0), ((height - 1) as u32, (width - 1) as u32));
        for (r, row) in self.rows.into_iter().enumerate() {
            for (c, cell) in row.into_iter().enumerate() {
                range.set_value((r as u32, c as u32), cell);
            }
        }
        range
    }

    pub fn records(self) -> RecordTable {
        RecordTable::from_range(&self.build()).expect("sheet should decode in record mode")
    }

    pub fn grid(self, skip_rows: usize) -> GridTable {
        GridTable::from_range(&self.build(), skip_rows).expect("sheet should decode in grid mode")
    }

    /// Serialize as a single-sheet xlsx workbook.
    ///
    /// `Data::DateTimeIso` cells are written as real date cells (number plus
    /// date format), the way vendor exports store them.
    pub fn xlsx_bytes(&self) -> Vec<u8> {
        let date = Format::new().set_num_format("yyyy-mm-dd");
        let datetime = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();

        for (r, row) in self.rows.iter().enumerate() {
            let r = r as u32;
            for (c, cell) in row.iter().enumerate() {
                let c = c as u16;
                match cell {
                    Data::String(s) => {
                        sheet.write_string(r, c, s.as_str()).unwrap();
                    }
                    Data::Float(f) => {
                        sheet.write_number(r, c, *f).unwrap();
                    }
                    Data::Int(i) => {
                        sheet.write_number(r, c, *i as f64).unwrap();
                    }
                    Data::Bool(b) => {
                        sheet.write_boolean(r, c, *b).unwrap();
                    }
                    Data::DateTimeIso(iso) => {
                        let value = ExcelDateTime::parse_from_str(&iso.replacen(' ', "T", 1)).unwrap();
                        let format = if iso.contains(' ') { &datetime } else { &date };
                        sheet.write_datetime_with_format(r, c, &value, format).unwrap();
                    }
                    _ => {}
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    /// Write the workbook to `dir/name` and return the path.
    pub fn save(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.xlsx_bytes()).unwrap();
        path
    }
}

fn text_cells(cells: &[&str]) -> Vec<Data> {
    cells
        .iter()
        .map(|cell| {
            if cell.is_empty() {
                Data::Empty
            } else {
                Data::String(cell.to_string())
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Vendor sheets
// ---------------------------------------------------------------------------

/// Shopee sheet with one order per blob: `order_sn` = `SO{n}`,
/// `tracking_number` = `SPX{n}`.
pub fn shopee_sheet(blobs: &[&str], order_date: &str) -> SheetBuilder {
    blobs
        .iter()
        .enumerate()
        .fold(SheetBuilder::new(&SHOPEE_HEADER), |sheet, (n, blob)| {
            let order = format!("SO{n}");
            let tracking = format!("SPX{n}");
            sheet.text_row(&[order.as_str(), tracking.as_str(), order_date, *blob])
        })
}

/// Lazada sheet with one row per `(sellerSku, variation)`: `orderNumber` =
/// `{9000 + n}` as a number cell.
pub fn lazada_sheet(items: &[(&str, &str)], create_time: Data) -> SheetBuilder {
    items
        .iter()
        .enumerate()
        .fold(SheetBuilder::new(&LAZADA_HEADER), |sheet, (n, (sku, variation))| {
            sheet.row(vec![
                Data::Float(9000.0 + n as f64),
                Data::String(format!("LZ{n}")),
                create_time.clone(),
                Data::String(sku.to_string()),
                Data::String(variation.to_string()),
            ])
        })
}

/// TikTok sheet from `(Order ID, Seller SKU, Variation, Quantity, Created
/// Time, Tracking ID)` tuples, including the description row.
pub fn tiktok_sheet(orders: &[[&str; 6]]) -> SheetBuilder {
    let mut header = TIKTOK_HEADER.to_vec();
    header.push(TIKTOK_TRACKING_HEADER);
    let sheet = SheetBuilder::new(&header).text_row(&TIKTOK_DESCRIPTION);

    orders.iter().fold(sheet, |sheet, [order, sku, variation, quantity, created, tracking]| {
        let quantity = quantity
            .parse::<f64>()
            .map(Data::Float)
            .unwrap_or_else(|_| Data::String(quantity.to_string()));
        sheet.row(vec![
            Data::String(order.to_string()),
            Data::String("Awaiting shipment".into()),
            Data::String(sku.to_string()),
            Data::String(variation.to_string()),
            quantity,
            Data::String(created.to_string()),
            Data::String(tracking.to_string()),
        ])
    })
}

// ---------------------------------------------------------------------------
// MultipartBuilder
// ---------------------------------------------------------------------------

pub const BOUNDARY: &str = "rekap-test-boundary";

/// Hand-rolled `multipart/form-data` body for `POST /upload`.
#[derive(Default)]
pub struct MultipartBuilder {
    body: Vec<u8>,
}

impl MultipartBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
                 Content-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn content_type() -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    pub fn build(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}
