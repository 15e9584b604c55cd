//! # layoutio
//!
//! Load document-layout data for Rust.
//!
//! This library reconstructs layout elements (text blocks, intervals,
//! rectangles, quadrilaterals) and whole page layouts from their JSON and
//! CSV interchange forms. The shape of the input does not need to be known
//! in advance: a single element, a list of elements and a page layout with
//! metadata are all told apart automatically.
//!
//! ## Quick Start
//!
//! ```no_run
//! use layoutio::{load_csv, load_json};
//!
//! fn main() -> layoutio::Result<()> {
//!     // A JSON file may hold one element, a list, or a page layout
//!     let loaded = load_json("page.json")?;
//!     if let Some(layout) = loaded.as_layout() {
//!         println!("{} elements", layout.len());
//!     }
//!
//!     // A CSV file without a block_type column needs the type spelled out
//!     let layout = load_csv("words.csv", Some("rectangle"))?;
//!     for element in &layout {
//!         println!("{:?}", element.text());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Wire shapes
//!
//! - Element: `{"block_type": "rectangle", "x_1": 0, ...}`
//! - Layout: `[{...}, {...}]`
//! - Layout with page metadata: `{"page_data": {...}, "blocks": [...]}`
//! - CSV: one element per row; `block_type`, `id` and `points` columns are
//!   recognized, other columns pass through as attributes

pub mod error;
pub mod format;
pub mod loader;
pub mod model;
pub mod options;
pub mod points;
pub mod table;

// Re-export commonly used types
pub use error::{Error, Result};
pub use format::Format;
pub use loader::{load_element, load_records, load_value, Loaded};
pub use model::{
    Axis, BlockType, Element, ElementRecord, Interval, Layout, PageData, Points, Quadrilateral,
    Rectangle, Shape, TextBlock,
};
pub use options::CsvOptions;
pub use table::{normalize, Table};

use rayon::prelude::*;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Load a JSON layout file.
///
/// # Arguments
///
/// * `path` - Path to the JSON file
///
/// # Returns
///
/// A [`Loaded`] holding either a single element or a layout, depending on
/// the shape of the file's content.
///
/// # Example
///
/// ```no_run
/// use layoutio::load_json;
///
/// let loaded = load_json("page.json").unwrap();
/// println!("single element: {}", loaded.is_element());
/// ```
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Loaded> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let loaded = load_json_reader(BufReader::new(file))?;
    log::debug!("loaded JSON layout data from {}", path.display());
    Ok(loaded)
}

/// Load JSON layout data from a reader.
pub fn load_json_reader<R: Read>(reader: R) -> Result<Loaded> {
    let value: Value = serde_json::from_reader(reader)?;
    load_value(&value)
}

/// Load JSON layout data from a string.
///
/// # Example
///
/// ```
/// use layoutio::load_json_str;
///
/// let loaded = load_json_str(r#"{"block_type": "rectangle", "x_1": 0, "y_1": 0, "x_2": 4, "y_2": 2}"#)
///     .unwrap();
/// assert!(loaded.is_element());
/// ```
pub fn load_json_str(text: &str) -> Result<Loaded> {
    let value: Value = serde_json::from_str(text)?;
    load_value(&value)
}

/// Load already-decoded JSON layout data.
pub fn load_structured(data: &Value) -> Result<Loaded> {
    load_value(data)
}

/// Load a CSV layout file.
///
/// # Arguments
///
/// * `path` - Path to the CSV file, one element per row
/// * `block_type` - Variant tag for every row. Required when the file has
///   no `block_type` column; overrides the column when it has one.
///
/// # Example
///
/// ```no_run
/// use layoutio::load_csv;
///
/// let layout = load_csv("tokens.csv", Some("rectangle")).unwrap();
/// println!("{} elements", layout.len());
/// ```
pub fn load_csv<P: AsRef<Path>>(path: P, block_type: Option<&str>) -> Result<Layout> {
    let options = CsvOptions {
        block_type: block_type.map(String::from),
        ..CsvOptions::default()
    };
    load_csv_with_options(path, &options)
}

/// Load a CSV layout file with custom options.
///
/// # Example
///
/// ```no_run
/// use layoutio::{load_csv_with_options, CsvOptions};
///
/// let options = CsvOptions::new()
///     .with_block_type("interval")
///     .with_delimiter(b';');
/// let layout = load_csv_with_options("columns.csv", &options).unwrap();
/// ```
pub fn load_csv_with_options<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<Layout> {
    let path = path.as_ref();
    let delimiter = options
        .delimiter
        .unwrap_or_else(|| Format::default_delimiter(path));
    let file = File::open(path)?;
    let table = Table::from_csv_reader(BufReader::new(file), delimiter)?;
    let layout = load_table(&table, options.block_type())?;
    log::debug!(
        "loaded {} elements from {}",
        layout.len(),
        path.display()
    );
    Ok(layout)
}

/// Load CSV layout data from a reader.
pub fn load_csv_reader<R: Read>(reader: R, options: &CsvOptions) -> Result<Layout> {
    let table = Table::from_csv_reader(reader, options.delimiter.unwrap_or(b','))?;
    load_table(&table, options.block_type())
}

/// Load an in-memory table, one element per row.
///
/// # Example
///
/// ```
/// use layoutio::{load_table, Table};
/// use serde_json::json;
///
/// let table = Table::new(["x_1", "y_1", "x_2", "y_2", "text"])
///     .with_row(vec![json!(0), json!(0), json!(8), json!(2), json!("Title")])?;
/// let layout = load_table(&table, Some("rectangle"))?;
/// assert_eq!(layout.get(0).and_then(|e| e.text()), Some("Title"));
/// # Ok::<(), layoutio::Error>(())
/// ```
pub fn load_table(table: &Table, block_type: Option<&str>) -> Result<Layout> {
    load_records(normalize(table, block_type)?)
}

/// Load a layout file, choosing the format from its extension.
///
/// `options` only applies to tabular files.
pub fn load_path<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<Loaded> {
    let path = path.as_ref();
    match Format::from_path(path)? {
        Format::Json => load_json(path),
        Format::Csv => load_csv_with_options(path, options).map(Loaded::Layout),
    }
}

/// Load several layout files in parallel.
///
/// Each file is loaded independently; the results are returned in the
/// order of `paths`.
///
/// # Example
///
/// ```no_run
/// use layoutio::{load_many, CsvOptions};
///
/// let results = load_many(&["a.json", "b.csv"], &CsvOptions::default());
/// for result in results {
///     match result {
///         Ok(loaded) => println!("ok: {}", loaded.is_layout()),
///         Err(e) => eprintln!("failed: {}", e),
///     }
/// }
/// ```
pub fn load_many<P: AsRef<Path> + Sync>(paths: &[P], options: &CsvOptions) -> Vec<Result<Loaded>> {
    paths
        .par_iter()
        .map(|path| load_path(path, options))
        .collect()
}

/// Load a JSON layout file asynchronously.
#[cfg(feature = "async")]
pub async fn load_json_async<P: AsRef<Path>>(path: P) -> Result<Loaded> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    let value: Value = serde_json::from_slice(&bytes)?;
    load_value(&value)
}

/// Load a CSV layout file asynchronously.
#[cfg(feature = "async")]
pub async fn load_csv_async<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<Layout> {
    let path = path.as_ref();
    let delimiter = options
        .delimiter
        .unwrap_or_else(|| Format::default_delimiter(path));
    let bytes = tokio::fs::read(path).await?;
    let table = Table::from_csv_reader(bytes.as_slice(), delimiter)?;
    load_table(&table, options.block_type())
}
