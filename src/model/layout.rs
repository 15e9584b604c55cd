//! Ordered collections of layout elements.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::Element;

/// Key of the page metadata object in a wrapped layout.
pub const PAGE_DATA_KEY: &str = "page_data";

/// Key of the element list in a wrapped layout.
pub const BLOCKS_KEY: &str = "blocks";

/// Page-level metadata attached to a [`Layout`].
pub type PageData = Map<String, Value>;

/// An ordered group of elements, optionally with page metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    blocks: Vec<Element>,
    page_data: Option<PageData>,
}

impl Layout {
    /// Create a layout without page metadata.
    pub fn new(blocks: Vec<Element>) -> Self {
        Self {
            blocks,
            page_data: None,
        }
    }

    /// Create a layout with page metadata attached.
    pub fn with_page_data(blocks: Vec<Element>, page_data: PageData) -> Self {
        Self {
            blocks,
            page_data: Some(page_data),
        }
    }

    /// Elements in order.
    pub fn blocks(&self) -> &[Element] {
        &self.blocks
    }

    /// Page metadata, if the layout carries any.
    pub fn page_data(&self) -> Option<&PageData> {
        self.page_data.as_ref()
    }

    /// Replace the page metadata.
    pub fn set_page_data(&mut self, page_data: Option<PageData>) {
        self.page_data = page_data;
    }

    /// Add an element at the end.
    pub fn push(&mut self, element: impl Into<Element>) {
        self.blocks.push(element.into());
    }

    /// Get an element by position.
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.blocks.get(index)
    }

    /// Iterate over elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.blocks.iter()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the layout has no elements.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Split into elements and page metadata.
    pub fn into_parts(self) -> (Vec<Element>, Option<PageData>) {
        (self.blocks, self.page_data)
    }

    /// Serialize into the JSON wire shape: a page wrapper object when page
    /// metadata is attached, otherwise a bare array of element records.
    pub fn to_value(&self) -> Value {
        let blocks = Value::Array(
            self.blocks
                .iter()
                .map(|element| element.to_record().into())
                .collect(),
        );
        match &self.page_data {
            Some(page_data) => {
                let mut wrapper = Map::new();
                wrapper.insert(PAGE_DATA_KEY.into(), Value::Object(page_data.clone()));
                wrapper.insert(BLOCKS_KEY.into(), blocks);
                Value::Object(wrapper)
            }
            None => blocks,
        }
    }
}

impl Serialize for Layout {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl FromIterator<Element> for Layout {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Layout {
    type Item = Element;
    type IntoIter = std::vec::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}

impl<'a> IntoIterator for &'a Layout {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Axis, Interval, Rectangle, TextBlock};
    use serde_json::json;

    #[test]
    fn test_layout_new() {
        let layout = Layout::new(Vec::new());
        assert!(layout.is_empty());
        assert!(layout.page_data().is_none());
    }

    #[test]
    fn test_layout_push_preserves_order() {
        let mut layout = Layout::default();
        layout.push(Rectangle::new(0.0, 0.0, 1.0, 1.0));
        layout.push(Interval::new(0.0, 5.0, Axis::X));
        layout.push(TextBlock::new(Rectangle::new(2.0, 2.0, 3.0, 3.0)).with_text("c"));

        assert_eq!(layout.len(), 3);
        assert!(!layout.get(0).unwrap().is_text_block());
        assert_eq!(layout.get(2).unwrap().text(), Some("c"));
    }

    #[test]
    fn test_to_value_without_page_data() {
        let layout: Layout = vec![Element::from(Rectangle::new(0.0, 0.0, 1.0, 1.0))]
            .into_iter()
            .collect();
        let value = layout.to_value();
        assert!(value.is_array());
        assert_eq!(value[0]["block_type"], json!("rectangle"));
    }

    #[test]
    fn test_to_value_with_page_data() {
        let mut page_data = PageData::new();
        page_data.insert("width".into(), json!(10));
        let layout = Layout::with_page_data(Vec::new(), page_data);

        assert_eq!(
            layout.to_value(),
            json!({"page_data": {"width": 10}, "blocks": []})
        );
    }
}
