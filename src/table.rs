//! Tabular layout data and its normalization into element records.
//!
//! A [`Table`] holds one layout element per row and one attribute per
//! column. [`normalize`] turns it into the ordered [`ElementRecord`]s the
//! loader dispatches on: it parses textual geometry, resolves the variant
//! tag, synthesizes identifiers for text blocks and drops missing cells.

use serde_json::{Number, Value};
use std::io::Read;

use crate::error::{Error, Result};
use crate::model::{ElementRecord, TextBlock, BLOCK_TYPE_KEY};
use crate::points::parse_points;

/// Column holding textual geometry.
pub const POINTS_COLUMN: &str = "points";

/// Column holding element identifiers.
pub const ID_COLUMN: &str = "id";

/// Cell texts read as missing values.
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Rows of cells under named columns. Missing cells are `Value::Null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table with the given columns and no rows.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Its length must match the number of columns.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::MalformedInput(format!(
                "row has {} cells, table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Builder-style variant of [`Table::push_row`].
    pub fn with_row(mut self, row: Vec<Value>) -> Result<Self> {
        self.push_row(row)?;
        Ok(self)
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in order.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Position of a column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Check whether a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Read a table from CSV text with a header row.
    ///
    /// Cells are typed per column: NA markers become missing, and a column
    /// whose remaining cells all read as integers, floats or booleans is
    /// stored as that type. Everything else stays text.
    pub fn from_csv_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_reader(reader);

        let columns: Vec<String> = csv_reader.headers()?.iter().map(String::from).collect();

        let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); columns.len()];
        let mut row_count = 0;
        for record in csv_reader.records() {
            let record = record?;
            for (column, field) in raw.iter_mut().zip(record.iter()) {
                column.push(if NA_VALUES.contains(&field) {
                    None
                } else {
                    Some(field.to_string())
                });
            }
            row_count += 1;
        }

        let typed: Vec<Vec<Value>> = raw.into_iter().map(infer_column).collect();
        let rows = (0..row_count)
            .map(|i| typed.iter().map(|column| column[i].clone()).collect())
            .collect();

        log::debug!(
            "read CSV table: {} columns, {} rows",
            columns.len(),
            row_count
        );
        Ok(Self { columns, rows })
    }

    /// Overwrite a column, appending it if it does not exist.
    fn set_column(&mut self, name: &str, mut cell: impl FnMut(usize) -> Value) {
        let index = match self.column_index(name) {
            Some(index) => index,
            None => {
                self.columns.push(name.to_string());
                for row in &mut self.rows {
                    row.push(Value::Null);
                }
                self.columns.len() - 1
            }
        };
        for (i, row) in self.rows.iter_mut().enumerate() {
            row[index] = cell(i);
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum ColumnKind {
    Integer,
    Float,
    Boolean,
    Text,
}

fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn infer_column(cells: Vec<Option<String>>) -> Vec<Value> {
    let present = || cells.iter().flatten();
    let kind = if present().all(|s| s.parse::<i64>().is_ok()) {
        ColumnKind::Integer
    } else if present().all(|s| parse_finite(s).is_some()) {
        ColumnKind::Float
    } else if present().all(|s| parse_bool(s).is_some()) {
        ColumnKind::Boolean
    } else {
        ColumnKind::Text
    };

    cells
        .into_iter()
        .map(|cell| match cell {
            None => Value::Null,
            Some(s) => match kind {
                ColumnKind::Integer => s.parse::<i64>().map_or(Value::Null, Value::from),
                ColumnKind::Float => parse_finite(&s)
                    .and_then(Number::from_f64)
                    .map_or(Value::Null, Value::Number),
                ColumnKind::Boolean => parse_bool(&s).map_or(Value::Null, Value::Bool),
                ColumnKind::Text => Value::String(s),
            },
        })
        .collect()
}

/// Normalize a table into element records, one per row, in row order.
///
/// `declared_type`, when given, stamps every row's `block_type` and
/// replaces any existing `block_type` column. Without it the table must
/// carry a `block_type` column, even when it has no rows. A table with no
/// columns normalizes to no records. The caller's table is never modified.
pub fn normalize(table: &Table, declared_type: Option<&str>) -> Result<Vec<ElementRecord>> {
    // No columns at all: nothing was read, so there is nothing to type.
    if table.columns.is_empty() {
        return Ok(Vec::new());
    }

    let mut table = table.clone();

    if let Some(index) = table.column_index(POINTS_COLUMN) {
        for row in &mut table.rows {
            let parsed = match &row[index] {
                Value::String(text) if text.trim().is_empty() => Value::Null,
                Value::String(text) => parse_points(text)?,
                _ => continue,
            };
            row[index] = parsed;
        }
    }

    match declared_type {
        Some(block_type) => {
            table.set_column(BLOCK_TYPE_KEY, |_| Value::String(block_type.to_string()))
        }
        None if !table.has_column(BLOCK_TYPE_KEY) => return Err(Error::MissingBlockType),
        None => {}
    }

    if TextBlock::has_text_columns(table.columns.as_slice()) && !table.has_column(ID_COLUMN) {
        table.set_column(ID_COLUMN, |i| Value::from(i as u64));
    }

    let Table { columns, rows } = table;
    Ok(rows
        .into_iter()
        .map(|row| {
            columns
                .iter()
                .zip(row)
                .filter(|(_, cell)| !cell.is_null())
                .map(|(name, cell)| (name.clone(), cell))
                .collect::<ElementRecord>()
        })
        .collect())
}
