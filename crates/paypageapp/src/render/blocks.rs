//! Per-variant renderers and the dispatch table that picks them.
//!
//! Adding a variant means one new function here and one arm in
//! [`renderer_for`].

use serde::Serialize;
use url::Url;

use super::RenderContext;
use crate::content::BlockContent;
use crate::countdown::{self, CountdownState, CountdownTimer};
use crate::model::{Block, BlockVariant};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Visual {
    Text {
        text: String,
    },
    Image {
        src: String,
        /// The stored reference was unusable and `src` is the placeholder.
        placeholder: bool,
    },
    List {
        items: Vec<String>,
    },
    Testimonial {
        name: String,
        text: String,
        image: Option<String>,
        stars: u8,
        background_color: String,
        text_color: String,
        horizontal: bool,
    },
    Countdown {
        state: CountdownState,
        text: String,
        clock: Option<String>,
        background_color: String,
        text_color: String,
        sticky_top: bool,
    },
    Video {
        src: Option<String>,
    },
    Social {
        icons: Vec<SocialIcon>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialIcon {
    pub platform: String,
    pub color: String,
    pub known: bool,
}

pub type BlockRenderer = fn(&Block, &RenderContext<'_>) -> Visual;

pub fn renderer_for(variant: BlockVariant) -> BlockRenderer {
    match variant {
        BlockVariant::Text => render_text,
        BlockVariant::Image => render_image,
        BlockVariant::Advantages => render_advantages,
        BlockVariant::Testimonial => render_testimonial,
        BlockVariant::Countdown => render_countdown,
        BlockVariant::Video => render_video,
        BlockVariant::Social => render_social,
    }
}

// Each renderer is only reached through `renderer_for`, so the content arm
// always matches; the fallbacks keep them total anyway.

fn render_text(block: &Block, _: &RenderContext<'_>) -> Visual {
    let text = match &block.content {
        BlockContent::Text(s) => s.clone(),
        _ => String::new(),
    };
    Visual::Text { text }
}

fn render_image(block: &Block, ctx: &RenderContext<'_>) -> Visual {
    let reference = match &block.content {
        BlockContent::Image(s) => s.trim(),
        _ => "",
    };
    if is_displayable_image(reference) {
        Visual::Image {
            src: reference.to_string(),
            placeholder: false,
        }
    } else {
        Visual::Image {
            src: ctx.options.image_placeholder.clone(),
            placeholder: true,
        }
    }
}

pub fn is_displayable_image(reference: &str) -> bool {
    Url::parse(reference)
        .map(|u| matches!(u.scheme(), "http" | "https" | "data"))
        .unwrap_or(false)
}

fn render_advantages(block: &Block, _: &RenderContext<'_>) -> Visual {
    let items = match &block.content {
        BlockContent::Advantages(items) => items.clone(),
        _ => Vec::new(),
    };
    Visual::List { items }
}

/// Star count for a stored rating, clamped to 1..=5.
pub fn stars(rating: i64) -> u8 {
    rating.clamp(1, 5) as u8
}

fn render_testimonial(block: &Block, _: &RenderContext<'_>) -> Visual {
    let BlockContent::Testimonial(t) = &block.content else {
        return Visual::Text {
            text: String::new(),
        };
    };
    Visual::Testimonial {
        name: t.name.clone(),
        text: t.text.clone(),
        image: t.image.clone().filter(|i| is_displayable_image(i)),
        stars: stars(t.rating),
        background_color: t.background_color.clone(),
        text_color: t.text_color.clone(),
        horizontal: t.horizontal_mode,
    }
}

fn render_countdown(block: &Block, ctx: &RenderContext<'_>) -> Visual {
    let BlockContent::Countdown(settings) = &block.content else {
        return Visual::Text {
            text: String::new(),
        };
    };
    let state = ctx
        .timers
        .and_then(|t| t.get(&block.id).copied())
        .unwrap_or_else(|| CountdownTimer::new(&settings.duration).state());
    let shown = countdown::display(settings, state);
    Visual::Countdown {
        state,
        text: shown.text,
        clock: shown.clock,
        background_color: settings.background_color.clone(),
        text_color: settings.text_color.clone(),
        sticky_top: settings.sticky_top,
    }
}

fn render_video(block: &Block, _: &RenderContext<'_>) -> Visual {
    let src = match &block.content {
        BlockContent::Video(s) => embed_url(s),
        _ => None,
    };
    Visual::Video { src }
}

/// YouTube watch and short links become embed links. Other URLs pass
/// through. `None` when there is nothing usable.
pub fn embed_url(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    let host = url.host_str().unwrap_or_default();
    let video_id = match host {
        "youtube.com" | "www.youtube.com" | "m.youtube.com" if url.path() == "/watch" => url
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.into_owned()),
        "youtu.be" => url
            .path_segments()
            .and_then(|mut s| s.next())
            .map(str::to_string),
        _ => None,
    };
    match video_id {
        Some(id) if !id.is_empty() => Some(format!("https://www.youtube.com/embed/{}", id)),
        _ => Some(url.to_string()),
    }
}

fn platform_color(platform: &str) -> Option<&'static str> {
    let color = match platform {
        "facebook" => "#1877f2",
        "instagram" => "#e4405f",
        "whatsapp" => "#25d366",
        "youtube" => "#ff0000",
        "tiktok" => "#000000",
        "twitter" => "#1da1f2",
        "x" => "#000000",
        _ => return None,
    };
    Some(color)
}

fn render_social(block: &Block, _: &RenderContext<'_>) -> Visual {
    let platforms: &[String] = match &block.content {
        BlockContent::Social(p) => p.as_slice(),
        _ => &[],
    };
    let icons = platforms
        .iter()
        .map(|p| {
            let key = p.trim().to_ascii_lowercase();
            match platform_color(&key) {
                Some(color) => SocialIcon {
                    platform: key,
                    color: color.to_string(),
                    known: true,
                },
                None => SocialIcon {
                    platform: key,
                    color: "#6b7280".to_string(),
                    known: false,
                },
            }
        })
        .collect();
    Visual::Social { icons }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_are_clamped() {
        assert_eq!(stars(7), 5);
        assert_eq!(stars(0), 1);
        assert_eq!(stars(-3), 1);
        assert_eq!(stars(4), 4);
    }

    #[test]
    fn youtube_links_become_embeds() {
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=abc123&t=10").as_deref(),
            Some("https://www.youtube.com/embed/abc123")
        );
        assert_eq!(
            embed_url("https://youtu.be/xyz").as_deref(),
            Some("https://www.youtube.com/embed/xyz")
        );
    }

    #[test]
    fn other_video_urls_pass_through() {
        assert_eq!(
            embed_url("https://player.vimeo.com/video/1").as_deref(),
            Some("https://player.vimeo.com/video/1")
        );
        assert_eq!(embed_url("not a url"), None);
        assert_eq!(embed_url(""), None);
    }

    #[test]
    fn only_absolute_web_images_are_displayable() {
        assert!(is_displayable_image("https://cdn.example.com/a.png"));
        assert!(is_displayable_image("data:image/png;base64,AAAA"));
        assert!(!is_displayable_image(""));
        assert!(!is_displayable_image("/relative.png"));
        assert!(!is_displayable_image("ftp://host/a.png"));
    }
}
