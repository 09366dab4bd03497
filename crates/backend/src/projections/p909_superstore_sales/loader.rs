use chrono::{Datelike, NaiveDate, NaiveTime};
use contracts::projections::p909_superstore_sales::SalesRecord;
use csv::StringRecord;
use std::io::Read;
use std::path::Path;

use super::dataset::Dataset;
use crate::shared::error::LoadError;

pub const COL_ORDER_DATE: &str = "Order_Date";
pub const COL_CATEGORY: &str = "Category";
pub const COL_SUB_CATEGORY: &str = "Sub_Category";
pub const COL_SALES: &str = "Sales";
pub const COL_PROFIT: &str = "Profit";
pub const COL_QUANTITY: &str = "Quantity";
pub const COL_ORDER_ID: &str = "Order_ID";

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Positions of the known columns in the header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    order_date: usize,
    category: usize,
    sub_category: usize,
    sales: usize,
    profit: usize,
    quantity: Option<usize>,
    order_id: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self, LoadError> {
        let required = |name: &str| {
            find_column(headers, name).ok_or_else(|| LoadError::missing_column(name))
        };

        Ok(Self {
            order_date: required(COL_ORDER_DATE)?,
            category: required(COL_CATEGORY)?,
            sub_category: required(COL_SUB_CATEGORY)?,
            sales: required(COL_SALES)?,
            profit: required(COL_PROFIT)?,
            quantity: find_column(headers, COL_QUANTITY),
            order_id: find_column(headers, COL_ORDER_ID),
        })
    }
}

/// Load and normalize the sales file at `path`
pub fn load_from_path(path: &Path) -> Result<Dataset, LoadError> {
    let file = std::fs::File::open(path)?;
    let dataset = load_from_reader(file)?;

    tracing::info!(
        "Loaded {} sales records from {}",
        dataset.len(),
        path.display()
    );

    Ok(dataset)
}

/// Load and normalize sales CSV from any reader
pub fn load_from_reader<R: Read>(mut reader: R) -> Result<Dataset, LoadError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    load_from_str(&text)
}

/// Load and normalize sales CSV text
pub fn load_from_str(csv_text: &str) -> Result<Dataset, LoadError> {
    // Strip UTF-8 BOM if present
    let text = csv_text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::resolve(&headers)?;

    tracing::debug!(
        "Sales CSV headers: {:?}",
        headers.iter().collect::<Vec<_>>()
    );

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row = idx + 1;
        let record = result?;
        records.push(normalize_row(&record, &columns, row)?);
    }

    Dataset::from_records(records)
}

fn normalize_row(
    record: &StringRecord,
    columns: &ColumnIndex,
    row: usize,
) -> Result<SalesRecord, LoadError> {
    let raw_date = field(record, columns.order_date);
    let order_date = parse_order_date(raw_date).ok_or_else(|| LoadError::Parse {
        row,
        column: COL_ORDER_DATE.to_string(),
        value: raw_date.to_string(),
    })?;

    let category = required_text(record, columns.category, COL_CATEGORY, row)?;
    let sub_category = required_text(record, columns.sub_category, COL_SUB_CATEGORY, row)?;

    let sales = parse_amount(record, columns.sales, COL_SALES, row)?;
    if sales < 0.0 {
        return Err(LoadError::schema(
            row,
            COL_SALES,
            format!("must not be negative: {}", sales),
        ));
    }
    let profit = parse_amount(record, columns.profit, COL_PROFIT, row)?;

    let quantity = match columns.quantity.map(|i| field(record, i)) {
        Some(raw) if !raw.is_empty() => Some(raw.parse::<i64>().map_err(|_| {
            LoadError::schema(row, COL_QUANTITY, format!("is not an integer: '{}'", raw))
        })?),
        _ => None,
    };

    let order_id = columns
        .order_id
        .map(|i| field(record, i))
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    Ok(SalesRecord {
        order_date,
        category,
        sub_category,
        sales,
        profit,
        order_id,
        quantity,
    })
}

/// Parse an order date in one of the accepted layouts, optionally followed
/// by a time of day (` HH:MM[:SS]` or `THH:MM:SS`).
///
/// Slash-separated dates are month-first unless the first field is a
/// four-digit year; a two-digit last field is read as `%y`. Years before
/// 1000 are rejected.
pub fn parse_order_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    let (date_part, time_part) = match s.split_once(|c: char| c == ' ' || c == 'T') {
        Some((date, time)) => (date, Some(time.trim())),
        None => (s, None),
    };

    if let Some(time) = time_part {
        TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(time, fmt).ok())?;
    }

    let date = NaiveDate::parse_from_str(date_part, date_layout(date_part)?).ok()?;
    (date.year() >= 1000).then_some(date)
}

/// Pick the `chrono` layout of a date by its separators and field widths
fn date_layout(date: &str) -> Option<&'static str> {
    if date.contains('/') {
        let fields: Vec<&str> = date.split('/').collect();
        return match fields.as_slice() {
            [year, _, _] if year.len() == 4 => Some("%Y/%m/%d"),
            [_, _, year] if year.len() == 2 => Some("%m/%d/%y"),
            [_, _, year] if year.len() == 4 => Some("%m/%d/%Y"),
            _ => None,
        };
    }
    if date.contains('.') {
        return Some("%d.%m.%Y");
    }
    if date.contains('-') {
        return Some("%Y-%m-%d");
    }
    None
}

/// Find a column by header name, ignoring case and `_`/`-`/space differences
fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    let wanted = header_key(name);
    headers.iter().position(|h| header_key(h) == wanted)
}

fn header_key(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).map(str::trim).unwrap_or("")
}

fn required_text(
    record: &StringRecord,
    index: usize,
    column: &str,
    row: usize,
) -> Result<String, LoadError> {
    let value = field(record, index);
    if value.is_empty() {
        return Err(LoadError::schema(row, column, "is empty"));
    }
    Ok(value.to_string())
}

fn parse_amount(
    record: &StringRecord,
    index: usize,
    column: &str,
    row: usize,
) -> Result<f64, LoadError> {
    let raw = field(record, index);
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LoadError::schema(row, column, format!("is not numeric: '{}'", raw)))
}
