//! # Domain Model: Blocks, Columns and Compositions
//!
//! A checkout page is a [`Composition`]: a named set of positional
//! [`Column`]s arranged around the fixed checkout form. Each column holds an
//! ordered sequence of [`Block`]s, and insertion order is render order.
//!
//! ```text
//! Composition "Promo"
//! ├── Column top    [countdown]
//! ├── Column left   [advantages, testimonial]
//! ├── Column right  [video]
//! └── Column bottom [social]
//! ```
//!
//! ## Content Is Decoded Once
//!
//! On the wire a block's `content` is always a string: plain text or a URL
//! for `text`/`image`/`video`, JSON for the structured variants. In memory a
//! [`Block`] holds the decoded [`BlockContent`] instead, so rendering never
//! parses. Decoding happens when a block is loaded or its content is edited,
//! and always succeeds (see [`crate::content`]).
//!
//! The variant is not stored separately: [`Block::variant`] reads it off the
//! content, so content and variant cannot drift apart.
//!
//! ## Wire Format
//!
//! ```json
//! {"id": "text-1718000000000-1a2b3c4d5e", "type": "text",
//!  "content": "Texto personalizado", "props": {"textAlign": "center"}}
//! ```
//!
//! Columns serialise their blocks under `components`, the key the stored
//! records have always used.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;
use uuid::Uuid;

use crate::content::{self, BlockContent};
use crate::style::BlockStyle;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

string_id!(
    /// Identifies a block for its whole lifetime.
    BlockId
);
string_id!(ColumnId);
string_id!(
    /// Assigned by the store on first successful save.
    CompositionId
);

impl CompositionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockVariant {
    Text,
    Image,
    Advantages,
    Testimonial,
    Countdown,
    Video,
    Social,
}

impl BlockVariant {
    /// Palette order.
    pub const ALL: [BlockVariant; 7] = [
        BlockVariant::Text,
        BlockVariant::Image,
        BlockVariant::Advantages,
        BlockVariant::Testimonial,
        BlockVariant::Countdown,
        BlockVariant::Video,
        BlockVariant::Social,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BlockVariant::Text => "text",
            BlockVariant::Image => "image",
            BlockVariant::Advantages => "advantages",
            BlockVariant::Testimonial => "testimonial",
            BlockVariant::Countdown => "countdown",
            BlockVariant::Video => "video",
            BlockVariant::Social => "social",
        }
    }

    /// Variants whose content is JSON on the wire.
    pub fn is_structured(self) -> bool {
        matches!(
            self,
            BlockVariant::Advantages
                | BlockVariant::Testimonial
                | BlockVariant::Countdown
                | BlockVariant::Social
        )
    }
}

impl fmt::Display for BlockVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockVariant::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown block type: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnPosition {
    Top,
    Left,
    Right,
    Bottom,
}

impl ColumnPosition {
    /// Document order, used by the stacked mobile layout (checkout sits between left and right).
    pub const ALL: [ColumnPosition; 4] = [
        ColumnPosition::Top,
        ColumnPosition::Left,
        ColumnPosition::Right,
        ColumnPosition::Bottom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnPosition::Top => "top",
            ColumnPosition::Left => "left",
            ColumnPosition::Right => "right",
            ColumnPosition::Bottom => "bottom",
        }
    }

    pub fn is_rail(self) -> bool {
        matches!(self, ColumnPosition::Left | ColumnPosition::Right)
    }
}

impl fmt::Display for ColumnPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnPosition::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown column position: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Desktop,
    Mobile,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Desktop => "desktop",
            ViewMode::Mobile => "mobile",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "desktop" => Ok(ViewMode::Desktop),
            "mobile" => Ok(ViewMode::Mobile),
            other => Err(format!("unknown view mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    pub content: BlockContent,
    pub style: Option<BlockStyle>,
}

impl Block {
    /// A fresh block holding the variant's default content.
    pub fn new(id: BlockId, variant: BlockVariant) -> Self {
        Self {
            id,
            content: content::default_content(variant),
            style: None,
        }
    }

    pub fn variant(&self) -> BlockVariant {
        self.content.variant()
    }
}

/// The stored shape of a block. `content` is a JSON value so records written
/// with structured content inline still load.
#[derive(Serialize, Deserialize)]
pub(crate) struct BlockWire {
    id: BlockId,
    #[serde(rename = "type")]
    variant: String,
    #[serde(default)]
    content: serde_json::Value,
    #[serde(
        default,
        deserialize_with = "crate::style::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    props: Option<BlockStyle>,
}

impl BlockWire {
    /// `None` when the stored type is not one we know.
    pub(crate) fn into_block(self) -> Option<Block> {
        let variant = match self.variant.parse::<BlockVariant>() {
            Ok(v) => v,
            Err(reason) => {
                debug!(block = %self.id, %reason, "skipping stored block");
                return None;
            }
        };
        let raw = match self.content {
            serde_json::Value::String(s) => s,
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        };
        Some(Block {
            id: self.id,
            content: content::decode(variant, &raw),
            style: self.props.filter(|s| !s.is_empty()),
        })
    }
}

impl From<&Block> for BlockWire {
    fn from(block: &Block) -> Self {
        Self {
            id: block.id.clone(),
            variant: block.variant().as_str().to_string(),
            content: serde_json::Value::String(content::encode(&block.content)),
            props: block.style.clone(),
        }
    }
}

impl Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        BlockWire::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = BlockWire::deserialize(deserializer)?;
        let variant = wire.variant.clone();
        wire.into_block()
            .ok_or_else(|| serde::de::Error::custom(format!("unknown block type: {}", variant)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub id: ColumnId,
    pub position: ColumnPosition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(rename = "components")]
    pub blocks: Vec<Block>,
}

impl Column {
    pub fn new(id: ColumnId, position: ColumnPosition) -> Self {
        Self {
            id,
            position,
            width: None,
            blocks: Vec::new(),
        }
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.block(id).is_some()
    }
}

#[derive(Deserialize)]
struct ColumnHelper {
    id: ColumnId,
    position: ColumnPosition,
    #[serde(default)]
    width: Option<String>,
    #[serde(default, alias = "blocks")]
    components: Vec<BlockWire>,
}

// Unknown block types are dropped instead of failing the whole column.
impl<'de> Deserialize<'de> for Column {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let helper = ColumnHelper::deserialize(deserializer)?;
        Ok(Column {
            id: helper.id,
            position: helper.position,
            width: helper.width,
            blocks: decode_blocks(helper.components),
        })
    }
}

pub(crate) fn decode_blocks(wire: Vec<BlockWire>) -> Vec<Block> {
    wire.into_iter().filter_map(BlockWire::into_block).collect()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Composition {
    pub id: Option<CompositionId>,
    pub name: String,
    pub columns: Vec<Column>,
    pub view_mode: ViewMode,
}

impl Composition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub fn column_mut(&mut self, id: &ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| &c.id == id)
    }

    /// Columns at `position`, in append order.
    pub fn columns_at(&self, position: ColumnPosition) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(move |c| c.position == position)
    }

    /// Linear scan over every column for the block and its owner.
    pub fn find_block(&self, id: &BlockId) -> Option<(&Column, &Block)> {
        self.columns
            .iter()
            .find_map(|c| c.block(id).map(|b| (c, b)))
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.columns.iter().flat_map(|c| c.blocks.iter())
    }

    pub fn block_count(&self) -> usize {
        self.columns.iter().map(|c| c.blocks.len()).sum()
    }
}
