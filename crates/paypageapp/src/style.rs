//! # Style Resolver
//!
//! Blocks carry an optional, sparse [`BlockStyle`]: only the attributes the
//! operator actually touched are present. Rendering needs every attribute, so
//! [`resolve_style`] overlays those overrides on the built-in defaults and
//! yields a complete [`StyleDescriptor`].
//!
//! ## Defaults
//!
//! | Attribute | Default |
//! |-----------|---------|
//! | `backgroundColor` | `#ffffff` |
//! | `borderColor` | `#e5e7eb` |
//! | `borderWidth` | `2` |
//! | `borderRadius` | `8` |
//! | `textAlign` | `left` |
//! | `fontSize` | `medium` |
//! | `fontWeight` | `normal` |
//! | `fontStyle` | `normal` |
//! | `textDecoration` | `none` |
//! | `color` | `#000000` |
//!
//! Missing keys fall back silently, and so do stored values that do not fit
//! their attribute (a negative width, an unknown alignment): those are
//! dropped on load as if they were never set. Resolution is pure and idempotent: feeding
//! a resolved descriptor back in as overrides resolves to the same descriptor.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::model::Block;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
    Huge,
}

impl FontSize {
    /// Pixel size of the bucket.
    pub fn px(self) -> u16 {
        match self {
            FontSize::Small => 14,
            FontSize::Medium => 16,
            FontSize::Large => 18,
            FontSize::Huge => 24,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
}

/// Sparse style overrides stored on a block (the `props` of the wire format).
///
/// Doubles as the patch type for style edits: [`BlockStyle::merge`] copies
/// every present field of the patch over `self`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStyle {
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub background_color: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub border_color: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub border_width: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub border_radius: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub text_align: Option<TextAlign>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub font_size: Option<FontSize>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub font_weight: Option<FontWeight>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub font_style: Option<FontStyle>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub text_decoration: Option<TextDecoration>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<String>,
}

impl BlockStyle {
    pub fn is_empty(&self) -> bool {
        *self == BlockStyle::default()
    }

    /// Shallow merge: fields present in `patch` replace ours.
    pub fn merge(&mut self, patch: &BlockStyle) {
        fn take<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                slot.clone_from(value);
            }
        }
        take(&mut self.background_color, &patch.background_color);
        take(&mut self.border_color, &patch.border_color);
        take(&mut self.border_width, &patch.border_width);
        take(&mut self.border_radius, &patch.border_radius);
        take(&mut self.text_align, &patch.text_align);
        take(&mut self.font_size, &patch.font_size);
        take(&mut self.font_weight, &patch.font_weight);
        take(&mut self.font_style, &patch.font_style);
        take(&mut self.text_decoration, &patch.text_decoration);
        take(&mut self.color, &patch.color);
    }
}

/// Reads an optional stored value, dropping it when it does not fit `T`.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match T::deserialize(&value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => {
            debug!(%value, error = %err, "ignoring stored value");
            Ok(None)
        }
    }
}

/// Fully resolved style, every attribute present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDescriptor {
    pub background_color: String,
    pub border_color: String,
    pub border_width: u32,
    pub border_radius: u32,
    pub text_align: TextAlign,
    pub font_size: FontSize,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub text_decoration: TextDecoration,
    pub color: String,
}

impl Default for StyleDescriptor {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            border_color: "#e5e7eb".to_string(),
            border_width: 2,
            border_radius: 8,
            text_align: TextAlign::Left,
            font_size: FontSize::Medium,
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            text_decoration: TextDecoration::None,
            color: "#000000".to_string(),
        }
    }
}

impl StyleDescriptor {
    pub fn apply(mut self, overrides: &BlockStyle) -> Self {
        if let Some(v) = &overrides.background_color {
            self.background_color = v.clone();
        }
        if let Some(v) = &overrides.border_color {
            self.border_color = v.clone();
        }
        if let Some(v) = overrides.border_width {
            self.border_width = v;
        }
        if let Some(v) = overrides.border_radius {
            self.border_radius = v;
        }
        if let Some(v) = overrides.text_align {
            self.text_align = v;
        }
        if let Some(v) = overrides.font_size {
            self.font_size = v;
        }
        if let Some(v) = overrides.font_weight {
            self.font_weight = v;
        }
        if let Some(v) = overrides.font_style {
            self.font_style = v;
        }
        if let Some(v) = overrides.text_decoration {
            self.text_decoration = v;
        }
        if let Some(v) = &overrides.color {
            self.color = v.clone();
        }
        self
    }
}

impl From<StyleDescriptor> for BlockStyle {
    fn from(d: StyleDescriptor) -> Self {
        Self {
            background_color: Some(d.background_color),
            border_color: Some(d.border_color),
            border_width: Some(d.border_width),
            border_radius: Some(d.border_radius),
            text_align: Some(d.text_align),
            font_size: Some(d.font_size),
            font_weight: Some(d.font_weight),
            font_style: Some(d.font_style),
            text_decoration: Some(d.text_decoration),
            color: Some(d.color),
        }
    }
}

/// Overlay the block's overrides on the defaults.
pub fn resolve_style(block: &Block) -> StyleDescriptor {
    let base = StyleDescriptor::default();
    match &block.style {
        Some(overrides) => base.apply(overrides),
        None => base,
    }
}
