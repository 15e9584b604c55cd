//! Layout element model.
//!
//! This module defines the in-memory types that loaded data is reconstructed
//! into: coordinate shapes, text blocks wrapping them, and ordered layouts.
//! Every element also converts back into the flat [`ElementRecord`] form the
//! loader consumes.

mod element;
mod layout;
mod record;
mod shape;
mod text_block;

pub use element::Element;
pub use layout::{Layout, PageData, BLOCKS_KEY, PAGE_DATA_KEY};
pub use record::{ElementRecord, BLOCK_TYPE_KEY};
pub use shape::{Axis, BlockType, Interval, Points, Quadrilateral, Rectangle, Shape};
pub use text_block::TextBlock;
