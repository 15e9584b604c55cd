//! Type dispatch from decoded data to layout elements.
//!
//! [`load_value`] accepts any of the three JSON wire shapes and decides
//! which one it is looking at:
//!
//! 1. an object with a `page_data` key is a page layout; its `blocks` list
//!    is loaded and the metadata re-attached,
//! 2. any other object is a single element record,
//! 3. an array is a list of element records,
//! 4. anything else is rejected.
//!
//! Any failure aborts the whole load; there is no partial result.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::model::{Element, ElementRecord, Layout, Shape, TextBlock, BLOCKS_KEY, PAGE_DATA_KEY};

/// The result of loading data whose shape was not known in advance.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded {
    /// The data held a single element
    Element(Element),

    /// The data held a list of elements or a page layout
    Layout(Layout),
}

impl Loaded {
    /// Check if a single element was loaded.
    pub fn is_element(&self) -> bool {
        matches!(self, Loaded::Element(_))
    }

    /// Check if a layout was loaded.
    pub fn is_layout(&self) -> bool {
        matches!(self, Loaded::Layout(_))
    }

    /// Get the element, if one was loaded.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Loaded::Element(element) => Some(element),
            Loaded::Layout(_) => None,
        }
    }

    /// Get the layout, if one was loaded.
    pub fn as_layout(&self) -> Option<&Layout> {
        match self {
            Loaded::Layout(layout) => Some(layout),
            Loaded::Element(_) => None,
        }
    }

    /// Take the element, if one was loaded.
    pub fn into_element(self) -> Option<Element> {
        match self {
            Loaded::Element(element) => Some(element),
            Loaded::Layout(_) => None,
        }
    }

    /// Take the layout, if one was loaded.
    pub fn into_layout(self) -> Option<Layout> {
        match self {
            Loaded::Layout(layout) => Some(layout),
            Loaded::Element(_) => None,
        }
    }

    /// Convert to the JSON wire shape.
    pub fn to_value(&self) -> Value {
        match self {
            Loaded::Element(element) => element.to_record().into(),
            Loaded::Layout(layout) => layout.to_value(),
        }
    }
}

impl From<Element> for Loaded {
    fn from(element: Element) -> Self {
        Loaded::Element(element)
    }
}

impl From<Layout> for Loaded {
    fn from(layout: Layout) -> Self {
        Loaded::Layout(layout)
    }
}

/// Load a decoded JSON value of unknown shape.
pub fn load_value(data: &Value) -> Result<Loaded> {
    match data {
        Value::Object(map) if map.contains_key(PAGE_DATA_KEY) => load_page(map).map(Loaded::Layout),
        Value::Object(map) => load_element(&ElementRecord::from(map.clone())).map(Loaded::Element),
        Value::Array(items) => Ok(Loaded::Layout(Layout::new(load_blocks(items)?))),
        other => Err(Error::MalformedInput(format!(
            "expected an object or an array, found {}",
            value_kind(other)
        ))),
    }
}

/// Reconstruct a single element from its record.
///
/// The record's `block_type` must name a registered variant. A record
/// carrying any text-block attribute becomes a [`TextBlock`] wrapping that
/// variant; otherwise the bare shape is built.
pub fn load_element(record: &ElementRecord) -> Result<Element> {
    if TextBlock::is_text_record(record) {
        let block = TextBlock::from_record(record)?;
        log::trace!("loaded {} text block", block.block.block_type());
        Ok(Element::Text(block))
    } else {
        let shape = Shape::from_record(record)?;
        log::trace!("loaded {} element", shape.block_type());
        Ok(Element::Shape(shape))
    }
}

/// Reconstruct an ordered layout from element records.
pub fn load_records<I>(records: I) -> Result<Layout>
where
    I: IntoIterator<Item = ElementRecord>,
{
    records
        .into_iter()
        .map(|record| load_element(&record))
        .collect::<Result<Vec<_>>>()
        .map(Layout::new)
}

fn load_blocks(items: &[Value]) -> Result<Vec<Element>> {
    let blocks = items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => load_element(&ElementRecord::from(map.clone())),
            other => Err(Error::MalformedInput(format!(
                "element {} is {}, expected an object",
                index,
                value_kind(other)
            ))),
        })
        .collect::<Result<Vec<_>>>()?;
    log::debug!("loaded layout with {} elements", blocks.len());
    Ok(blocks)
}

fn load_page(map: &Map<String, Value>) -> Result<Layout> {
    let page_data = match map.get(PAGE_DATA_KEY) {
        Some(Value::Object(page_data)) => page_data.clone(),
        Some(Value::Null) | None => Map::new(),
        Some(other) => {
            return Err(Error::MalformedInput(format!(
                "`{}` is {}, expected an object",
                PAGE_DATA_KEY,
                value_kind(other)
            )))
        }
    };
    let blocks = match map.get(BLOCKS_KEY) {
        Some(Value::Array(items)) => load_blocks(items)?,
        Some(other) => {
            return Err(Error::MalformedInput(format!(
                "`{}` is {}, expected an array",
                BLOCKS_KEY,
                value_kind(other)
            )))
        }
        None => {
            return Err(Error::MalformedInput(format!(
                "page layout has no `{}`",
                BLOCKS_KEY
            )))
        }
    };
    Ok(Layout::with_page_data(blocks, page_data))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
