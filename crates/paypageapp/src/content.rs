//! # Content Codec
//!
//! Every block variant has a content schema. Literal variants (`text`,
//! `image`, `video`) store the string as-is. Structured variants store JSON
//! inside the string:
//!
//! | Variant | Structured form | Default |
//! |---------|-----------------|---------|
//! | `advantages` | `["…", …]` | three placeholder lines |
//! | `testimonial` | [`Testimonial`] | five-star placeholder |
//! | `countdown` | [`CountdownSettings`] | 15 minutes on red |
//! | `social` | `["facebook", …]` | facebook, instagram, whatsapp |
//!
//! ## Fail-Soft Decoding
//!
//! Stored content is user-editable, so [`decode`] never fails. A payload that
//! does not parse yields the variant's empty value: `[]` for the list
//! variants, field defaults for the record variants. Records are read field
//! by field: a missing field, or one whose value does not fit (a `null`
//! rating, a number where text belongs), takes its default and the rest of
//! the record survives.
//!
//! [`encode`] is the inverse: `decode(v, &encode(&c)) == c` for any content
//! `c` of variant `v`.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::model::BlockVariant;

pub const DEFAULT_TEXT: &str = "Texto personalizado";
pub const DEFAULT_IMAGE: &str = "https://via.placeholder.com/300x200";
pub const DEFAULT_VIDEO: &str = "https://www.youtube.com/embed/dQw4w9WgXcQ";

#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    Text(String),
    Image(String),
    Advantages(Vec<String>),
    Testimonial(Testimonial),
    Countdown(CountdownSettings),
    Video(String),
    Social(Vec<String>),
}

impl BlockContent {
    pub fn variant(&self) -> BlockVariant {
        match self {
            BlockContent::Text(_) => BlockVariant::Text,
            BlockContent::Image(_) => BlockVariant::Image,
            BlockContent::Advantages(_) => BlockVariant::Advantages,
            BlockContent::Testimonial(_) => BlockVariant::Testimonial,
            BlockContent::Countdown(_) => BlockVariant::Countdown,
            BlockContent::Video(_) => BlockVariant::Video,
            BlockContent::Social(_) => BlockVariant::Social,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Testimonial {
    pub name: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Stored as entered. Star display clamps it to 1..=5.
    #[serde(deserialize_with = "rating")]
    pub rating: i64,
    pub background_color: String,
    pub text_color: String,
    pub horizontal_mode: bool,
}

impl Default for Testimonial {
    fn default() -> Self {
        Self {
            name: "Cliente".to_string(),
            text: "Excelente produto!".to_string(),
            image: None,
            rating: 5,
            background_color: "#ffffff".to_string(),
            text_color: "#000000".to_string(),
            horizontal_mode: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownKind {
    #[default]
    Minutes,
    Hours,
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CountdownSettings {
    #[serde(rename = "type")]
    pub kind: CountdownKind,
    pub background_color: String,
    pub text_color: String,
    /// `HH:MM:SS`.
    pub duration: String,
    pub active_text: String,
    pub finished_text: String,
    pub sticky_top: bool,
}

impl Default for CountdownSettings {
    fn default() -> Self {
        Self {
            kind: CountdownKind::Minutes,
            background_color: "#ef4444".to_string(),
            text_color: "#ffffff".to_string(),
            duration: "00:15:00".to_string(),
            active_text: "Oferta por tempo limitado".to_string(),
            finished_text: "O tempo acabou!".to_string(),
            sticky_top: false,
        }
    }
}

pub fn default_advantages() -> Vec<String> {
    vec![
        "Vantagem 1".to_string(),
        "Vantagem 2".to_string(),
        "Vantagem 3".to_string(),
    ]
}

pub fn default_social() -> Vec<String> {
    vec![
        "facebook".to_string(),
        "instagram".to_string(),
        "whatsapp".to_string(),
    ]
}

/// Content a freshly added block starts with.
pub fn default_content(variant: BlockVariant) -> BlockContent {
    match variant {
        BlockVariant::Text => BlockContent::Text(DEFAULT_TEXT.to_string()),
        BlockVariant::Image => BlockContent::Image(DEFAULT_IMAGE.to_string()),
        BlockVariant::Advantages => BlockContent::Advantages(default_advantages()),
        BlockVariant::Testimonial => BlockContent::Testimonial(Testimonial::default()),
        BlockVariant::Countdown => BlockContent::Countdown(CountdownSettings::default()),
        BlockVariant::Video => BlockContent::Video(DEFAULT_VIDEO.to_string()),
        BlockVariant::Social => BlockContent::Social(default_social()),
    }
}

/// Parse a stored payload. Never fails; see the module docs for fallbacks.
pub fn decode(variant: BlockVariant, raw: &str) -> BlockContent {
    match variant {
        BlockVariant::Text => BlockContent::Text(raw.to_string()),
        BlockVariant::Image => BlockContent::Image(raw.to_string()),
        BlockVariant::Video => BlockContent::Video(raw.to_string()),
        BlockVariant::Advantages => BlockContent::Advantages(parse_or_default(variant, raw)),
        BlockVariant::Social => BlockContent::Social(parse_or_default(variant, raw)),
        BlockVariant::Testimonial => BlockContent::Testimonial(parse_record(variant, raw)),
        BlockVariant::Countdown => BlockContent::Countdown(parse_record(variant, raw)),
    }
}

fn parse_or_default<T>(variant: BlockVariant, raw: &str) -> T
where
    T: for<'de> Deserialize<'de> + Default,
{
    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            debug!(%variant, error = %err, "content did not decode, using default");
            T::default()
        }
    }
}

// Start from the defaults and take each stored field that still decodes.
fn parse_record<T>(variant: BlockVariant, raw: &str) -> T
where
    T: Serialize + DeserializeOwned + Default,
{
    let fields = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(fields)) => fields,
        Ok(other) => {
            debug!(%variant, found = %other, "content is not a record, using default");
            return T::default();
        }
        Err(err) => {
            debug!(%variant, error = %err, "content did not decode, using default");
            return T::default();
        }
    };

    let mut record = serde_json::to_value(T::default()).unwrap_or_default();
    for (key, value) in fields {
        let mut candidate = record.clone();
        if let Some(map) = candidate.as_object_mut() {
            map.insert(key.clone(), value);
        }
        match T::deserialize(&candidate) {
            Ok(_) => record = candidate,
            Err(err) => debug!(%variant, field = %key, error = %err, "dropping stored field"),
        }
    }
    T::deserialize(&record).unwrap_or_default()
}

// Settings forms write ratings as floats, numeric strings or `null`.
fn rating<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let whole = |f: f64| f.is_finite().then(|| f.trunc() as i64);
    let parsed = match &value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole)),
        Value::String(s) => s.trim().parse::<f64>().ok().and_then(whole),
        _ => None,
    };
    parsed.ok_or_else(|| de::Error::custom(format!("not a rating: {}", value)))
}

/// Serialise content back to its stored string.
pub fn encode(content: &BlockContent) -> String {
    match content {
        BlockContent::Text(s) | BlockContent::Image(s) | BlockContent::Video(s) => s.clone(),
        BlockContent::Advantages(items) | BlockContent::Social(items) => to_json(items),
        BlockContent::Testimonial(t) => to_json(t),
        BlockContent::Countdown(c) => to_json(c),
    }
}

// Plain strings, bools and integers: serialisation cannot fail.
fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}
