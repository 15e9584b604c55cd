//! A single reconstructed layout element.

use serde::{Serialize, Serializer};

use super::{BlockType, ElementRecord, Interval, Quadrilateral, Rectangle, Shape, TextBlock};

/// One layout item: a bare shape or a text-bearing block.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A plain coordinate variant
    Shape(Shape),

    /// A shape carrying text attributes
    Text(TextBlock),
}

impl Element {
    /// Registry tag of the underlying shape.
    pub fn block_type(&self) -> BlockType {
        self.shape().block_type()
    }

    /// The underlying shape.
    pub fn shape(&self) -> &Shape {
        match self {
            Element::Shape(shape) => shape,
            Element::Text(block) => &block.block,
        }
    }

    /// Check if this element is a text block.
    pub fn is_text_block(&self) -> bool {
        matches!(self, Element::Text(_))
    }

    /// Get the text block, if this is one.
    pub fn as_text_block(&self) -> Option<&TextBlock> {
        match self {
            Element::Text(block) => Some(block),
            Element::Shape(_) => None,
        }
    }

    /// Text content, if any.
    pub fn text(&self) -> Option<&str> {
        self.as_text_block().and_then(|b| b.text.as_deref())
    }

    /// Serialize into record form.
    pub fn to_record(&self) -> ElementRecord {
        match self {
            Element::Shape(shape) => shape.to_record(),
            Element::Text(block) => block.to_record(),
        }
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

impl From<Shape> for Element {
    fn from(shape: Shape) -> Self {
        Element::Shape(shape)
    }
}

impl From<TextBlock> for Element {
    fn from(block: TextBlock) -> Self {
        Element::Text(block)
    }
}

impl From<Interval> for Element {
    fn from(interval: Interval) -> Self {
        Element::Shape(interval.into())
    }
}

impl From<Rectangle> for Element {
    fn from(rect: Rectangle) -> Self {
        Element::Shape(rect.into())
    }
}

impl From<Quadrilateral> for Element {
    fn from(quad: Quadrilateral) -> Self {
        Element::Shape(quad.into())
    }
}
