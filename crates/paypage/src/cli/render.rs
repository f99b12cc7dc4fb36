//! # Rendering Module
//!
//! Turns library results into terminal text. Every `render_*` function
//! returns a `String` and takes an explicit `color` switch so tests can
//! check plain output; the `print_*` wrappers write to stdout with the
//! terminal's own colour detection.
//!
//! Layout math (widths, truncation, padding) is Unicode-aware through
//! `unicode-width`.

use super::styles::{self, paint};
use chrono::{DateTime, Utc};
use paypageapp::commands::{CmdMessage, MessageLevel};
use paypageapp::countdown::CountdownDisplay;
use paypageapp::render::{BlockView, Node, Visual, VisualTree};
use paypageapp::store::CompositionSummary;
use std::fmt::Write;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const TIME_WIDTH: usize = 14;
const INDENT: &str = "  ";

pub fn render_messages(messages: &[CmdMessage], color: bool) -> String {
    let mut out = String::new();
    for message in messages {
        let style = match message.level {
            MessageLevel::Info => &*styles::MUTED,
            MessageLevel::Success => &*styles::SUCCESS,
            MessageLevel::Warning => &*styles::WARNING,
            MessageLevel::Error => &*styles::ERROR,
        };
        let _ = writeln!(out, "{}", paint(style, &message.content, color));
    }
    out
}

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages, console::colors_enabled()));
}

pub fn render_list(compositions: &[CompositionSummary], color: bool) -> String {
    let mut out = String::new();
    for summary in compositions {
        let id = summary.id.to_string();
        let blocks = match summary.blocks {
            1 => "1 block".to_string(),
            n => format!("{} blocks", n),
        };
        let fixed = id.width() + 2 + 2 + 10 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let name = truncate_to_width(&summary.name, available);
        let padding = " ".repeat(available.saturating_sub(name.width()));
        let _ = writeln!(
            out,
            "{}  {}{}  {:>10}{}",
            paint(&styles::ID, &id, color),
            paint(&styles::TITLE, &name, color),
            padding,
            blocks,
            paint(&styles::MUTED, format_time_ago(summary.updated_at), color),
        );
    }
    out
}

pub fn print_list(compositions: &[CompositionSummary]) {
    print!("{}", render_list(compositions, console::colors_enabled()));
}

pub fn render_tree(tree: &VisualTree, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        paint(&styles::TITLE, &tree.name, color),
        paint(&styles::MUTED, format!("({})", tree.view_mode), color)
    );
    write_node(&mut out, &tree.root, 1, color);
    out
}

pub fn print_tree(tree: &VisualTree) {
    print!("{}", render_tree(tree, console::colors_enabled()));
}

fn write_node(out: &mut String, node: &Node, depth: usize, color: bool) {
    let pad = INDENT.repeat(depth);
    match node {
        // The root stack only groups; draw its children at this depth.
        Node::Stack { children } => {
            for child in children {
                write_node(out, child, depth, color);
            }
        }
        Node::Row { children } => {
            let _ = writeln!(out, "{}{}", pad, paint(&styles::MUTED, "row", color));
            for child in children {
                write_node(out, child, depth + 1, color);
            }
        }
        Node::Region {
            column,
            position,
            width,
            children,
        } => {
            let width = width.map(|w| format!(" {}px", w)).unwrap_or_default();
            let _ = writeln!(
                out,
                "{}{} {}{}",
                pad,
                paint(&styles::REGION, position, color),
                paint(&styles::ID, column, color),
                paint(&styles::MUTED, width, color),
            );
            if children.is_empty() {
                let _ = writeln!(
                    out,
                    "{}{}{}",
                    pad,
                    INDENT,
                    paint(&styles::MUTED, "(empty)", color)
                );
            }
            for child in children {
                write_node(out, child, depth + 1, color);
            }
        }
        Node::CheckoutForm => {
            let _ = writeln!(
                out,
                "{}{}",
                pad,
                paint(&styles::CHECKOUT, "[ checkout form ]", color)
            );
        }
        Node::Block(view) => write_block(out, view, depth, color),
    }
}

fn write_block(out: &mut String, view: &BlockView, depth: usize, color: bool) {
    let pad = INDENT.repeat(depth);
    let inner = INDENT.repeat(depth + 1);
    let _ = writeln!(
        out,
        "{}{} {}",
        pad,
        paint(&styles::VARIANT, format!("[{}]", view.variant), color),
        paint(&styles::ID, &view.id, color)
    );
    for line in visual_lines(&view.visual, color) {
        let _ = writeln!(out, "{}{}", inner, line);
    }
}

fn visual_lines(visual: &Visual, color: bool) -> Vec<String> {
    match visual {
        Visual::Text { text } => text.lines().map(str::to_string).collect(),
        Visual::Image { src, placeholder } => {
            if *placeholder {
                vec![format!(
                    "{} {}",
                    src,
                    paint(&styles::MUTED, "(placeholder)", color)
                )]
            } else {
                vec![src.clone()]
            }
        }
        Visual::List { items } => items.iter().map(|i| format!("✓ {}", i)).collect(),
        Visual::Testimonial {
            name,
            text,
            image,
            stars,
            horizontal,
            ..
        } => {
            let filled = usize::from(*stars);
            let rating = format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled));
            let mut lines = vec![format!(
                "{} {}",
                paint(&styles::STARS, rating, color),
                paint(&styles::TITLE, name, color)
            )];
            lines.push(format!("“{}”", text));
            if let Some(image) = image {
                lines.push(image.clone());
            }
            if *horizontal {
                lines.push(paint(&styles::MUTED, "(horizontal)", color));
            }
            lines
        }
        Visual::Countdown {
            text,
            clock,
            sticky_top,
            ..
        } => {
            let mut line = countdown_line(text, clock.as_deref(), color);
            if *sticky_top {
                line.push_str(&paint(&styles::MUTED, " (sticky)", color));
            }
            vec![line]
        }
        Visual::Video { src } => match src {
            Some(src) => vec![format!("▶ {}", src)],
            None => vec![format!("▶ {}", paint(&styles::MUTED, "(no source)", color))],
        },
        Visual::Social { icons } => {
            let names: Vec<String> = icons
                .iter()
                .map(|icon| {
                    if icon.known {
                        icon.platform.clone()
                    } else {
                        format!("{}?", icon.platform)
                    }
                })
                .collect();
            vec![names.join(" · ")]
        }
    }
}

fn countdown_line(text: &str, clock: Option<&str>, color: bool) -> String {
    match clock {
        Some(clock) => format!("{}  {}", text, paint(&styles::CLOCK, clock, color)),
        None => text.to_string(),
    }
}

pub fn render_countdown(display: &CountdownDisplay, color: bool) -> String {
    countdown_line(&display.text, display.clock.as_deref(), color)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use paypageapp::commands::block::{self, BlockUpdate};
    use paypageapp::commands::column;
    use paypageapp::model::{
        BlockId, BlockVariant, ColumnId, ColumnPosition, Composition, CompositionId, ViewMode,
    };
    use paypageapp::render::render;

    fn page() -> Composition {
        let comp = Composition::new("Promo");
        let col = ColumnId::new("column-left-1");
        let comp = column::add(&comp, col.clone(), ColumnPosition::Left);
        let blk = BlockId::new("advantages-1");
        let comp = block::add(&comp, &col, blk.clone(), BlockVariant::Advantages);
        block::update(&comp, &col, &blk, &BlockUpdate::content(r#"["A","B"]"#))
    }

    #[test]
    fn test_tree_shows_rails_checkout_and_items() {
        let out = render_tree(&render(&page(), ViewMode::Desktop), false);
        assert!(out.starts_with("Promo (desktop)\n"));
        assert!(out.contains("left column-left-1 320px"));
        assert!(out.contains("[advantages] advantages-1"));
        assert!(out.contains("✓ A\n"));
        assert!(out.contains("[ checkout form ]"));
        let a = out.find("✓ A").unwrap();
        let b = out.find("✓ B").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_mobile_tree_has_no_widths() {
        let out = render_tree(&render(&page(), ViewMode::Mobile), false);
        assert!(out.contains("(mobile)"));
        assert!(!out.contains("px"));
        assert!(!out.contains("row"));
    }

    #[test]
    fn test_countdown_line() {
        let running = CountdownDisplay {
            text: "Oferta".into(),
            clock: Some("00:00:05".into()),
        };
        assert_eq!(render_countdown(&running, false), "Oferta  00:00:05");
        let finished = CountdownDisplay {
            text: "Acabou".into(),
            clock: None,
        };
        assert_eq!(render_countdown(&finished, false), "Acabou");
    }

    #[test]
    fn test_messages_plain() {
        let out = render_messages(
            &[CmdMessage::success("Saved"), CmdMessage::warning("Careful")],
            false,
        );
        assert_eq!(out, "Saved\nCareful\n");
    }

    #[test]
    fn test_list_truncates_long_names() {
        let summary = CompositionSummary {
            id: CompositionId::new("abc"),
            name: "x".repeat(200),
            columns: 1,
            blocks: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let out = render_list(&[summary], false);
        assert!(out.contains('…'));
        assert!(out.contains("1 block"));
        assert!(out.trim_end().width() <= LINE_WIDTH);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
    }
}
