//! # Renderer
//!
//! [`render`] turns a [`Composition`] into a [`VisualTree`]: a plain,
//! serialisable description of what the page shows. It reads nothing but
//! the composition and never fails. Content was decoded with fallbacks when
//! it entered the model, so every block has something to show.
//!
//! ## Layout
//!
//! Columns are grouped by position around the fixed checkout form.
//!
//! Desktop:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ top columns (full-width rows)        │
//! ├────────┬──────────────────┬──────────┤
//! │ left   │  checkout form   │  right   │
//! │ rails  │                  │  rails   │
//! ├────────┴──────────────────┴──────────┤
//! │ bottom columns (full-width rows)     │
//! └──────────────────────────────────────┘
//! ```
//!
//! Mobile stacks everything in document order: top, left, checkout, right,
//! bottom. Same-position columns keep their append order in both modes.
//!
//! Rails take the column's `width` hint when it reads as pixels (`"280"`,
//! `"280px"`), otherwise the configured rail width.
//!
//! ## Blocks
//!
//! Each block becomes a [`BlockView`]: its resolved style plus a
//! [`Visual`] produced by the variant's renderer from the dispatch table in
//! [`blocks`].

use std::collections::HashMap;

use serde::Serialize;

use crate::config::{PaypageConfig, DEFAULT_IMAGE_PLACEHOLDER};
use crate::countdown::CountdownState;
use crate::model::{
    Block, BlockId, BlockVariant, Column, ColumnId, ColumnPosition, Composition, ViewMode,
};
use crate::style::{resolve_style, StyleDescriptor};

pub mod blocks;

pub use blocks::{renderer_for, BlockRenderer, SocialIcon, Visual};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub rail_width: u32,
    pub image_placeholder: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            rail_width: 320,
            image_placeholder: DEFAULT_IMAGE_PLACEHOLDER.to_string(),
        }
    }
}

impl From<&PaypageConfig> for RenderOptions {
    fn from(config: &PaypageConfig) -> Self {
        Self {
            rail_width: config.rail_width,
            image_placeholder: config.image_placeholder.clone(),
        }
    }
}

/// What a block renderer may look at besides the block.
pub struct RenderContext<'a> {
    pub options: &'a RenderOptions,
    /// Live countdown states; blocks not listed use their initial state.
    pub timers: Option<&'a HashMap<BlockId, CountdownState>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualTree {
    pub name: String,
    pub view_mode: ViewMode,
    pub root: Node,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// Children laid out top to bottom.
    Stack { children: Vec<Node> },
    /// Children laid out left to right.
    Row { children: Vec<Node> },
    /// One column. `width` is set for desktop rails only.
    Region {
        column: ColumnId,
        position: ColumnPosition,
        width: Option<u32>,
        children: Vec<Node>,
    },
    CheckoutForm,
    Block(BlockView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockView {
    pub id: BlockId,
    pub variant: BlockVariant,
    pub style: StyleDescriptor,
    pub visual: Visual,
}

impl Node {
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Stack { children } | Node::Row { children } | Node::Region { children, .. } => {
                children
            }
            Node::CheckoutForm | Node::Block(_) => &[],
        }
    }

    fn collect_blocks<'a>(&'a self, out: &mut Vec<&'a BlockView>) {
        if let Node::Block(view) = self {
            out.push(view);
        }
        for child in self.children() {
            child.collect_blocks(out);
        }
    }
}

impl VisualTree {
    /// Every block, in document order.
    pub fn blocks(&self) -> Vec<&BlockView> {
        let mut out = Vec::new();
        self.root.collect_blocks(&mut out);
        out
    }

    pub fn block(&self, id: &BlockId) -> Option<&BlockView> {
        self.blocks().into_iter().find(|b| &b.id == id)
    }
}

/// Render with default options and each countdown at its starting state.
pub fn render(composition: &Composition, view_mode: ViewMode) -> VisualTree {
    render_with(composition, view_mode, &RenderOptions::default())
}

pub fn render_with(
    composition: &Composition,
    view_mode: ViewMode,
    options: &RenderOptions,
) -> VisualTree {
    let ctx = RenderContext {
        options,
        timers: None,
    };
    layout(composition, view_mode, &ctx)
}

/// Render with live countdown states, e.g. from a [`crate::timer::TimerBoard`].
pub fn render_with_timers(
    composition: &Composition,
    view_mode: ViewMode,
    options: &RenderOptions,
    timers: &HashMap<BlockId, CountdownState>,
) -> VisualTree {
    let ctx = RenderContext {
        options,
        timers: Some(timers),
    };
    layout(composition, view_mode, &ctx)
}

pub fn render_block(block: &Block, ctx: &RenderContext<'_>) -> BlockView {
    let variant = block.variant();
    BlockView {
        id: block.id.clone(),
        variant,
        style: resolve_style(block),
        visual: renderer_for(variant)(block, ctx),
    }
}

fn layout(composition: &Composition, view_mode: ViewMode, ctx: &RenderContext<'_>) -> VisualTree {
    let regions = |position: ColumnPosition, rail: bool| -> Vec<Node> {
        composition
            .columns_at(position)
            .map(|c| region(c, rail.then(|| rail_width(c, ctx.options)), ctx))
            .collect()
    };

    let root = match view_mode {
        ViewMode::Desktop => {
            let mut middle = regions(ColumnPosition::Left, true);
            middle.push(Node::CheckoutForm);
            middle.extend(regions(ColumnPosition::Right, true));

            let mut children = regions(ColumnPosition::Top, false);
            children.push(Node::Row { children: middle });
            children.extend(regions(ColumnPosition::Bottom, false));
            Node::Stack { children }
        }
        ViewMode::Mobile => {
            let mut children = regions(ColumnPosition::Top, false);
            children.extend(regions(ColumnPosition::Left, false));
            children.push(Node::CheckoutForm);
            children.extend(regions(ColumnPosition::Right, false));
            children.extend(regions(ColumnPosition::Bottom, false));
            Node::Stack { children }
        }
    };

    VisualTree {
        name: composition.name.clone(),
        view_mode,
        root,
    }
}

fn region(column: &Column, width: Option<u32>, ctx: &RenderContext<'_>) -> Node {
    Node::Region {
        column: column.id.clone(),
        position: column.position,
        width,
        children: column
            .blocks
            .iter()
            .map(|b| Node::Block(render_block(b, ctx)))
            .collect(),
    }
}

/// The column's pixel hint, or the configured default.
pub fn rail_width(column: &Column, options: &RenderOptions) -> u32 {
    column
        .width
        .as_deref()
        .map(str::trim)
        .map(|w| w.strip_suffix("px").unwrap_or(w).trim())
        .and_then(|w| w.parse::<u32>().ok())
        .filter(|w| *w > 0)
        .unwrap_or(options.rail_width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::block::{self as block_cmd, BlockUpdate};
    use crate::commands::column as column_cmd;
    use crate::content::{self, BlockContent};
    use crate::session::EditingSession;
    use crate::style::{BlockStyle, FontWeight, TextAlign};

    fn layout_kinds(node: &Node) -> Vec<String> {
        node.children()
            .iter()
            .map(|n| match n {
                Node::Region { position, .. } => position.to_string(),
                Node::CheckoutForm => "checkout".to_string(),
                Node::Row { children } => format!(
                    "row[{}]",
                    layout_kinds(&Node::Stack {
                        children: children.clone()
                    })
                    .join(",")
                ),
                Node::Stack { .. } => "stack".to_string(),
                Node::Block(_) => "block".to_string(),
            })
            .collect()
    }

    fn all_positions() -> Composition {
        let mut session = EditingSession::new("Layout");
        for position in [
            ColumnPosition::Bottom,
            ColumnPosition::Right,
            ColumnPosition::Left,
            ColumnPosition::Top,
        ] {
            session.add_column(position);
        }
        session.into_composition()
    }

    #[test]
    fn desktop_puts_rails_beside_checkout() {
        let tree = render(&all_positions(), ViewMode::Desktop);
        assert_eq!(
            layout_kinds(&tree.root),
            vec!["top", "row[left,checkout,right]", "bottom"]
        );
    }

    #[test]
    fn mobile_stacks_in_document_order() {
        let tree = render(&all_positions(), ViewMode::Mobile);
        assert_eq!(
            layout_kinds(&tree.root),
            vec!["top", "left", "checkout", "right", "bottom"]
        );
        let widths: Vec<_> = tree
            .root
            .children()
            .iter()
            .filter_map(|n| match n {
                Node::Region { width, .. } => Some(*width),
                _ => None,
            })
            .collect();
        assert!(widths.iter().all(Option::is_none));
    }

    #[test]
    fn empty_composition_still_shows_checkout() {
        let tree = render(&Composition::new("Empty"), ViewMode::Desktop);
        assert_eq!(layout_kinds(&tree.root), vec!["row[checkout]"]);
        assert!(tree.blocks().is_empty());
    }

    #[test]
    fn rails_use_width_hint_or_default() {
        let comp = Composition::new("Rails");
        let comp = column_cmd::add(&comp, ColumnId::new("l"), ColumnPosition::Left);
        let comp = column_cmd::add(&comp, ColumnId::new("r"), ColumnPosition::Right);
        let comp = column_cmd::set_width(&comp, &ColumnId::new("l"), Some("256px".into()));
        let comp = column_cmd::set_width(&comp, &ColumnId::new("r"), Some("wide".into()));
        let options = RenderOptions {
            rail_width: 300,
            ..Default::default()
        };

        let tree = render_with(&comp, ViewMode::Desktop, &options);
        let Node::Row { children } = &tree.root.children()[0] else {
            panic!("expected middle row");
        };
        let widths: Vec<_> = children
            .iter()
            .filter_map(|n| match n {
                Node::Region { width, .. } => *width,
                _ => None,
            })
            .collect();
        assert_eq!(widths, vec![256, 300]);
    }

    #[test]
    fn advantages_edit_renders_two_items_in_order() {
        let mut session = EditingSession::new("Promo");
        let col = session.add_column(ColumnPosition::Left);
        let id = session.add_block(&col, BlockVariant::Advantages).unwrap();
        let raw = content::encode(&BlockContent::Advantages(vec!["A".into(), "B".into()]));
        session.update_block(&col, &id, &BlockUpdate::content(raw));

        let tree = render(session.composition(), ViewMode::Desktop);
        let view = tree.block(&id).unwrap();
        assert_eq!(
            view.visual,
            Visual::List {
                items: vec!["A".into(), "B".into()]
            }
        );
    }

    #[test]
    fn text_carries_resolved_style() {
        let col = ColumnId::new("top");
        let comp = column_cmd::add(&Composition::new("x"), col.clone(), ColumnPosition::Top);
        let comp = block_cmd::add(&comp, &col, BlockId::new("t"), BlockVariant::Text);
        let comp = block_cmd::update(
            &comp,
            &col,
            &BlockId::new("t"),
            &BlockUpdate::style(BlockStyle {
                text_align: Some(TextAlign::Center),
                font_weight: Some(FontWeight::Bold),
                ..Default::default()
            }),
        );
        let tree = render(&comp, ViewMode::Desktop);
        let view = tree.block(&BlockId::new("t")).unwrap();
        assert_eq!(view.style.text_align, TextAlign::Center);
        assert_eq!(view.style.font_weight, FontWeight::Bold);
        assert_eq!(view.style.border_radius, 8);
        assert_eq!(
            view.visual,
            Visual::Text {
                text: "Texto personalizado".into()
            }
        );
    }

    fn single(variant: BlockVariant, raw: &str) -> VisualTree {
        let col = ColumnId::new("c");
        let comp = column_cmd::add(&Composition::new("x"), col.clone(), ColumnPosition::Top);
        let comp = block_cmd::add(&comp, &col, BlockId::new("b"), variant);
        let comp = block_cmd::update(&comp, &col, &BlockId::new("b"), &BlockUpdate::content(raw));
        render(&comp, ViewMode::Desktop)
    }

    #[test]
    fn testimonial_rating_is_clamped_for_display() {
        let high = single(BlockVariant::Testimonial, r#"{"rating":7}"#);
        match &high.block(&BlockId::new("b")).unwrap().visual {
            Visual::Testimonial { stars, .. } => assert_eq!(*stars, 5),
            other => panic!("unexpected {:?}", other),
        }
        let low = single(BlockVariant::Testimonial, r#"{"rating":-2}"#);
        match &low.block(&BlockId::new("b")).unwrap().visual {
            Visual::Testimonial { stars, .. } => assert_eq!(*stars, 1),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn broken_image_shows_placeholder() {
        let tree = single(BlockVariant::Image, "");
        assert_eq!(
            tree.block(&BlockId::new("b")).unwrap().visual,
            Visual::Image {
                src: DEFAULT_IMAGE_PLACEHOLDER.into(),
                placeholder: true
            }
        );
    }

    #[test]
    fn malformed_content_renders_defaults_and_siblings() {
        let col = ColumnId::new("c");
        let comp = column_cmd::add(&Composition::new("x"), col.clone(), ColumnPosition::Top);
        let comp = block_cmd::add(&comp, &col, BlockId::new("bad"), BlockVariant::Social);
        let comp = block_cmd::add(&comp, &col, BlockId::new("ok"), BlockVariant::Text);
        let comp = block_cmd::update(
            &comp,
            &col,
            &BlockId::new("bad"),
            &BlockUpdate::content("{{"),
        );

        let tree = render(&comp, ViewMode::Desktop);
        assert_eq!(tree.blocks().len(), 2);
        assert_eq!(
            tree.block(&BlockId::new("bad")).unwrap().visual,
            Visual::Social { icons: vec![] }
        );
    }

    #[test]
    fn social_icons_carry_platform_colors() {
        let tree = single(BlockVariant::Social, r#"["Instagram","myspace"]"#);
        let Visual::Social { icons } = &tree.block(&BlockId::new("b")).unwrap().visual else {
            panic!("expected social");
        };
        assert_eq!(icons[0].platform, "instagram");
        assert!(icons[0].known);
        assert!(!icons[1].known);
    }

    #[test]
    fn countdown_uses_initial_state_without_timers() {
        let tree = single(BlockVariant::Countdown, r#"{"duration":"00:00:00"}"#);
        match &tree.block(&BlockId::new("b")).unwrap().visual {
            Visual::Countdown { state, text, clock, .. } => {
                assert_eq!(*state, CountdownState::Finished);
                assert_eq!(text, "O tempo acabou!");
                assert!(clock.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn countdown_shows_live_state() {
        let col = ColumnId::new("c");
        let comp = column_cmd::add(&Composition::new("x"), col.clone(), ColumnPosition::Top);
        let comp = block_cmd::add(&comp, &col, BlockId::new("cd"), BlockVariant::Countdown);
        let timers = HashMap::from([(BlockId::new("cd"), CountdownState::Running(61))]);

        let tree = render_with_timers(&comp, ViewMode::Mobile, &RenderOptions::default(), &timers);
        match &tree.block(&BlockId::new("cd")).unwrap().visual {
            Visual::Countdown { clock, .. } => assert_eq!(clock.as_deref(), Some("00:01:01")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let comp = all_positions();
        let top = comp.columns[3].id.clone();
        let comp = block_cmd::add(&comp, &top, BlockId::new("v"), BlockVariant::Video);
        let comp = block_cmd::add(&comp, &top, BlockId::new("t"), BlockVariant::Testimonial);
        assert_eq!(comp.columns[3].blocks[1].variant(), BlockVariant::Testimonial);
        assert_eq!(
            render(&comp, ViewMode::Desktop),
            render(&comp, ViewMode::Desktop)
        );
    }
}
