//! Coordinate-bearing element variants and the closed registry of their tags.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use super::ElementRecord;
use crate::error::{Error, Result};

/// The registry of element variants, keyed by the `block_type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    /// A one-dimensional span along an axis
    Interval,
    /// An axis-aligned box
    Rectangle,
    /// A four-point polygon
    Quadrilateral,
}

impl BlockType {
    /// Every registered variant.
    pub const ALL: [BlockType; 3] = [
        BlockType::Interval,
        BlockType::Rectangle,
        BlockType::Quadrilateral,
    ];

    /// The tag string used in serialized records.
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Interval => "interval",
            BlockType::Rectangle => "rectangle",
            BlockType::Quadrilateral => "quadrilateral",
        }
    }

    /// Resolve the raw `block_type` attribute of a record.
    ///
    /// Absent tags are a [`Error::MissingBlockType`]; any other value that
    /// is not a registered tag string is an [`Error::UnknownBlockType`]
    /// naming the value.
    pub fn from_record(record: &ElementRecord) -> Result<Self> {
        match record.block_type() {
            None | Some(Value::Null) => Err(Error::MissingBlockType),
            Some(Value::String(tag)) => tag.parse(),
            Some(other) => Err(Error::UnknownBlockType(other.to_string())),
        }
    }

    /// Build the variant this tag names from a record.
    pub fn build(self, record: &ElementRecord) -> Result<Shape> {
        match self {
            BlockType::Interval => record.decode(self).map(Shape::Interval),
            BlockType::Rectangle => Rectangle::canonical_record(record)
                .decode(self)
                .map(Shape::Rectangle),
            BlockType::Quadrilateral => record.decode(self).map(Shape::Quadrilateral),
        }
    }
}

impl FromStr for BlockType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BlockType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnknownBlockType(s.to_string()))
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis an [`Interval`] spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal
    X,
    /// Vertical
    Y,
}

impl Axis {
    fn as_str(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }
}

/// A span `[start, end]` along one axis of a canvas.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Interval {
    /// Span start coordinate
    pub start: f64,
    /// Span end coordinate
    pub end: f64,
    /// Axis the span lies on
    pub axis: Axis,
    /// Height of the canvas the interval belongs to
    #[serde(default)]
    pub canvas_height: f64,
    /// Width of the canvas the interval belongs to
    #[serde(default)]
    pub canvas_width: f64,
}

impl Interval {
    /// Create an interval on a zero-sized canvas.
    pub fn new(start: f64, end: f64, axis: Axis) -> Self {
        Self {
            start,
            end,
            axis,
            canvas_height: 0.0,
            canvas_width: 0.0,
        }
    }

    /// Set the canvas dimensions.
    pub fn with_canvas(mut self, width: f64, height: f64) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    fn write_fields(&self, map: &mut Map<String, Value>) {
        map.insert("start".into(), self.start.into());
        map.insert("end".into(), self.end.into());
        map.insert("axis".into(), self.axis.as_str().into());
        map.insert("canvas_height".into(), self.canvas_height.into());
        map.insert("canvas_width".into(), self.canvas_width.into());
    }
}

const RECTANGLE_ALIASES: [(&str, &str); 4] = [("x_1", "x1"), ("y_1", "y1"), ("x_2", "x2"), ("y_2", "y2")];

/// An axis-aligned box given by its top-left and bottom-right corners.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Rectangle {
    /// Left edge
    #[serde(alias = "x1")]
    pub x_1: f64,
    /// Top edge
    #[serde(alias = "y1")]
    pub y_1: f64,
    /// Right edge
    #[serde(alias = "x2")]
    pub x_2: f64,
    /// Bottom edge
    #[serde(alias = "y2")]
    pub y_2: f64,
}

impl Rectangle {
    /// Create a rectangle from its corner coordinates.
    pub fn new(x_1: f64, y_1: f64, x_2: f64, y_2: f64) -> Self {
        Self { x_1, y_1, x_2, y_2 }
    }

    /// Drop alias keys whose canonical key is also present, so the
    /// canonical value wins.
    fn canonical_record(record: &ElementRecord) -> ElementRecord {
        let mut record = record.clone();
        for (canonical, alias) in RECTANGLE_ALIASES {
            if record.contains_key(canonical) {
                record.remove(alias);
            }
        }
        record
    }

    fn write_fields(&self, map: &mut Map<String, Value>) {
        map.insert("x_1".into(), self.x_1.into());
        map.insert("y_1".into(), self.y_1.into());
        map.insert("x_2".into(), self.x_2.into());
        map.insert("y_2".into(), self.y_2.into());
    }
}

/// The four corner points of a [`Quadrilateral`], in drawing order.
///
/// Decodes from either four `[x, y]` pairs or eight flat numbers.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawPoints")]
pub struct Points(pub [[f64; 2]; 4]);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPoints {
    Pairs(Vec<[f64; 2]>),
    Flat(Vec<f64>),
}

impl TryFrom<RawPoints> for Points {
    type Error = String;

    fn try_from(raw: RawPoints) -> std::result::Result<Self, Self::Error> {
        let pairs: Vec<[f64; 2]> = match raw {
            RawPoints::Pairs(pairs) => pairs,
            RawPoints::Flat(flat) if flat.len() % 2 == 0 => {
                flat.chunks_exact(2).map(|c| [c[0], c[1]]).collect()
            }
            RawPoints::Flat(flat) => {
                return Err(format!("expected coordinate pairs, got {} numbers", flat.len()))
            }
        };
        let count = pairs.len();
        <[[f64; 2]; 4]>::try_from(pairs)
            .map(Points)
            .map_err(|_| format!("expected 4 points, got {}", count))
    }
}

impl Points {
    fn to_value(self) -> Value {
        Value::Array(
            self.0
                .iter()
                .map(|[x, y]| Value::Array(vec![(*x).into(), (*y).into()]))
                .collect(),
        )
    }
}

/// A polygon with exactly four corners.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Quadrilateral {
    /// Corner points
    pub points: Points,
    /// Explicit height, when the source carried one
    #[serde(default)]
    pub height: Option<f64>,
    /// Explicit width, when the source carried one
    #[serde(default)]
    pub width: Option<f64>,
}

impl Quadrilateral {
    /// Create a quadrilateral from its corner points.
    pub fn new(points: [[f64; 2]; 4]) -> Self {
        Self {
            points: Points(points),
            height: None,
            width: None,
        }
    }

    fn write_fields(&self, map: &mut Map<String, Value>) {
        map.insert("points".into(), self.points.to_value());
        if let Some(height) = self.height {
            map.insert("height".into(), height.into());
        }
        if let Some(width) = self.width {
            map.insert("width".into(), width.into());
        }
    }
}

/// Closed union of the coordinate variants in the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// See [`Interval`]
    Interval(Interval),
    /// See [`Rectangle`]
    Rectangle(Rectangle),
    /// See [`Quadrilateral`]
    Quadrilateral(Quadrilateral),
}

impl Shape {
    /// Validate the record's tag and build the variant it names.
    pub fn from_record(record: &ElementRecord) -> Result<Self> {
        BlockType::from_record(record)?.build(record)
    }

    /// The registry tag of this shape.
    pub fn block_type(&self) -> BlockType {
        match self {
            Shape::Interval(_) => BlockType::Interval,
            Shape::Rectangle(_) => BlockType::Rectangle,
            Shape::Quadrilateral(_) => BlockType::Quadrilateral,
        }
    }

    /// Serialize into record form, `block_type` included.
    pub fn to_record(&self) -> ElementRecord {
        let mut map = Map::new();
        map.insert(
            super::BLOCK_TYPE_KEY.into(),
            self.block_type().as_str().into(),
        );
        match self {
            Shape::Interval(interval) => interval.write_fields(&mut map),
            Shape::Rectangle(rect) => rect.write_fields(&mut map),
            Shape::Quadrilateral(quad) => quad.write_fields(&mut map),
        }
        map.into()
    }
}

impl From<Interval> for Shape {
    fn from(interval: Interval) -> Self {
        Shape::Interval(interval)
    }
}

impl From<Rectangle> for Shape {
    fn from(rect: Rectangle) -> Self {
        Shape::Rectangle(rect)
    }
}

impl From<Quadrilateral> for Shape {
    fn from(quad: Quadrilateral) -> Self {
        Shape::Quadrilateral(quad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> ElementRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_block_type_parse() {
        assert_eq!("rectangle".parse::<BlockType>().unwrap(), BlockType::Rectangle);
        assert_eq!("interval".parse::<BlockType>().unwrap(), BlockType::Interval);
        assert!(matches!(
            "Rectangle".parse::<BlockType>(),
            Err(Error::UnknownBlockType(ref s)) if s == "Rectangle"
        ));
    }

    #[test]
    fn test_block_type_from_record_non_string() {
        let result = BlockType::from_record(&record(json!({"block_type": 3})));
        assert!(matches!(result, Err(Error::UnknownBlockType(ref s)) if s == "3"));

        let result = BlockType::from_record(&record(json!({"x_1": 0})));
        assert!(matches!(result, Err(Error::MissingBlockType)));
    }

    #[test]
    fn test_rectangle_aliases() {
        let shape = Shape::from_record(&record(
            json!({"block_type": "rectangle", "x1": 0, "y1": 0, "x2": 1, "y2": 1}),
        ))
        .unwrap();
        assert_eq!(shape, Shape::Rectangle(Rectangle::new(0.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn test_rectangle_canonical_key_wins() {
        let shape = Shape::from_record(&record(json!({
            "block_type": "rectangle",
            "x_1": 0, "x1": 9,
            "y_1": 0, "x_2": 1, "y_2": 1, "y2": 7
        })))
        .unwrap();
        assert_eq!(shape, Shape::Rectangle(Rectangle::new(0.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn test_rectangle_missing_field() {
        let result = Shape::from_record(&record(json!({"block_type": "rectangle", "x_1": 0})));
        match result {
            Err(Error::InvalidElement { block_type, .. }) => assert_eq!(block_type, "rectangle"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_interval_defaults_canvas() {
        let shape = Shape::from_record(&record(
            json!({"block_type": "interval", "start": 2, "end": 5, "axis": "y"}),
        ))
        .unwrap();
        assert_eq!(shape, Shape::Interval(Interval::new(2.0, 5.0, Axis::Y)));
    }

    #[test]
    fn test_interval_bad_axis() {
        let result = Shape::from_record(&record(
            json!({"block_type": "interval", "start": 2, "end": 5, "axis": "z"}),
        ));
        assert!(matches!(result, Err(Error::InvalidElement { .. })));
    }

    #[test]
    fn test_quadrilateral_points_shapes() {
        let expected = [[0.0, 0.0], [4.0, 0.0], [4.0, 3.0], [0.0, 3.0]];

        let pairs = Shape::from_record(&record(json!({
            "block_type": "quadrilateral",
            "points": [[0, 0], [4, 0], [4, 3], [0, 3]]
        })))
        .unwrap();
        let flat = Shape::from_record(&record(json!({
            "block_type": "quadrilateral",
            "points": [0, 0, 4, 0, 4, 3, 0, 3]
        })))
        .unwrap();

        assert_eq!(pairs, Shape::Quadrilateral(Quadrilateral::new(expected)));
        assert_eq!(pairs, flat);
    }

    #[test]
    fn test_quadrilateral_wrong_point_count() {
        let result = Shape::from_record(&record(json!({
            "block_type": "quadrilateral",
            "points": [[0, 0], [1, 1]]
        })));
        assert!(matches!(result, Err(Error::InvalidElement { .. })));
    }

    #[test]
    fn test_shape_to_record() {
        let rec = Shape::from(Rectangle::new(1.0, 2.0, 3.0, 4.0)).to_record();
        assert_eq!(
            Value::from(rec),
            json!({"block_type": "rectangle", "x_1": 1.0, "y_1": 2.0, "x_2": 3.0, "y_2": 4.0})
        );

        let rec = Shape::from(Quadrilateral::new([[0.0, 0.0]; 4])).to_record();
        assert!(!rec.contains_key("height"));
        assert_eq!(rec.block_type(), Some(&json!("quadrilateral")));
    }
}
