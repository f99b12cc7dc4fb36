use console::Style;
use once_cell::sync::Lazy;

pub static TITLE: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static MUTED: Lazy<Style> = Lazy::new(|| Style::new().color256(246).italic());
pub static ID: Lazy<Style> = Lazy::new(|| Style::new().cyan());
pub static REGION: Lazy<Style> = Lazy::new(|| Style::new().blue().bold());
pub static CHECKOUT: Lazy<Style> = Lazy::new(|| Style::new().green().bold());
pub static VARIANT: Lazy<Style> = Lazy::new(|| Style::new().magenta());
pub static STARS: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static CLOCK: Lazy<Style> = Lazy::new(|| Style::new().red().bold());

pub static SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static WARNING: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static ERROR: Lazy<Style> = Lazy::new(|| Style::new().red());

/// Apply `style` only when `color` is on, whatever the terminal says.
pub fn paint(style: &Style, text: impl std::fmt::Display, color: bool) -> String {
    style
        .clone()
        .force_styling(color)
        .apply_to(text)
        .to_string()
}
