//! Text-bearing layout elements.

use serde_json::Value;

use super::{BlockType, ElementRecord, Shape};
use crate::error::{Error, Result};

/// A shape annotated with text and identity attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// The region the text occupies
    pub block: Shape,

    /// Text content
    pub text: Option<String>,

    /// Element identifier
    pub id: Option<Value>,

    /// Category of the block (e.g. "title", "list"), serialized as `type`
    pub kind: Option<Value>,

    /// Identifier of the enclosing block
    pub parent: Option<Value>,

    /// Identifier of the following block in reading order
    pub next: Option<Value>,

    /// Detection confidence
    pub score: Option<f64>,
}

impl TextBlock {
    /// Attribute names that mark a record as text-bearing.
    pub const FEATURES: [&'static str; 6] = ["text", "id", "type", "parent", "next", "score"];

    /// Create a text block with no text attributes.
    pub fn new(block: impl Into<Shape>) -> Self {
        Self {
            block: block.into(),
            text: None,
            id: None,
            kind: None,
            parent: None,
            next: None,
            score: None,
        }
    }

    /// Set the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: impl Into<Value>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the block category.
    pub fn with_kind(mut self, kind: impl Into<Value>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Set the parent identifier.
    pub fn with_parent(mut self, parent: impl Into<Value>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set the next identifier.
    pub fn with_next(mut self, next: impl Into<Value>) -> Self {
        self.next = Some(next.into());
        self
    }

    /// Set the detection score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Check whether a record carries any text-block attribute.
    ///
    /// This is the discriminator the loader uses: such a record becomes a
    /// `TextBlock` whatever shape its `block_type` names.
    pub fn is_text_record(record: &ElementRecord) -> bool {
        Self::FEATURES.iter().any(|f| record.contains_key(f))
    }

    /// Check whether a column set names any text-block attribute.
    pub fn has_text_columns<S: AsRef<str>>(columns: &[S]) -> bool {
        columns
            .iter()
            .any(|c| Self::FEATURES.contains(&c.as_ref()))
    }

    /// Build a text block from a record.
    ///
    /// The wrapped shape is built from the record's `block_type`, which must
    /// be a registered tag.
    pub fn from_record(record: &ElementRecord) -> Result<Self> {
        let block_type = BlockType::from_record(record)?;
        let block = block_type.build(record)?;
        let invalid = |message: String| Error::InvalidElement {
            block_type: block_type.to_string(),
            message,
        };

        let text = match record.get("text") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(v @ (Value::Number(_) | Value::Bool(_))) => Some(v.to_string()),
            Some(other) => return Err(invalid(format!("`text` must be a scalar, got {}", other))),
        };

        let score = match record.get("score") {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => n.as_f64(),
            Some(other) => return Err(invalid(format!("`score` must be a number, got {}", other))),
        };

        Ok(Self {
            block,
            text,
            id: attribute(record, "id"),
            kind: attribute(record, "type"),
            parent: attribute(record, "parent"),
            next: attribute(record, "next"),
            score,
        })
    }

    /// Serialize into record form: the shape's attributes plus every
    /// text attribute that is set.
    ///
    /// `text` is always written, as `null` when unset, so a block with no
    /// attributes still loads back as a text block.
    pub fn to_record(&self) -> ElementRecord {
        let mut record = self.block.to_record();
        match &self.text {
            Some(text) => record.insert("text", text.as_str()),
            None => record.insert("text", Value::Null),
        };
        for (key, value) in [
            ("id", &self.id),
            ("type", &self.kind),
            ("parent", &self.parent),
            ("next", &self.next),
        ] {
            if let Some(value) = value {
                record.insert(key, value.clone());
            }
        }
        if let Some(score) = self.score {
            if !score.is_finite() {
                log::warn!("score {} is not finite, writing null", score);
            }
            record.insert("score", score);
        }
        record
    }
}

fn attribute(record: &ElementRecord, key: &str) -> Option<Value> {
    record.get(key).filter(|v| !v.is_null()).cloned()
}
