use clap::{Args, Parser, Subcommand, ValueEnum};
use paypageapp::model::{BlockVariant, ColumnPosition};
use paypageapp::style::{BlockStyle, FontSize, FontStyle, FontWeight, TextAlign, TextDecoration};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "paypage", bin_name = "paypage", version)]
#[command(about = "Compose, store and preview checkout pages", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (defaults to $PAYPAGE_DATA, then the OS data directory)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty composition
    New {
        /// Name words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// List stored compositions, most recently edited first
    #[command(alias = "ls")]
    List,

    /// Render a composition to the terminal
    Show {
        id: String,
        /// Stack everything vertically like a phone screen
        #[arg(long)]
        mobile: bool,
        /// Print the visual tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rename a composition
    Rename {
        id: String,
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Delete a composition
    #[command(alias = "rm")]
    Delete { id: String },

    /// Add, resize or remove columns
    #[command(subcommand)]
    Column(ColumnCommands),

    /// Add, edit, copy, move or remove blocks
    #[command(subcommand)]
    Block(BlockCommands),

    /// Print a self-contained preview snapshot (JSON)
    Preview {
        id: String,
        #[arg(long)]
        mobile: bool,
    },

    /// Run a countdown timer in the terminal
    Countdown {
        /// HH:MM:SS
        duration: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ColumnCommands {
    /// Add a column at top, left, right or bottom
    Add {
        id: String,
        position: ColumnPosition,
        /// Layout hint, e.g. 280px
        #[arg(long)]
        width: Option<String>,
    },
    /// Set or clear a column's width hint
    Width {
        id: String,
        column: String,
        width: Option<String>,
    },
    /// Remove a column and all its blocks
    Rm { id: String, column: String },
}

#[derive(Subcommand, Debug)]
pub enum BlockCommands {
    /// Add a block with default content
    Add {
        id: String,
        column: String,
        variant: BlockVariant,
    },
    /// Change a block's content or style
    Set {
        id: String,
        column: String,
        block: String,
        /// Raw content; structured blocks take JSON
        #[arg(long)]
        content: Option<String>,
        #[command(flatten)]
        style: StyleArgs,
    },
    /// Duplicate a block right after itself
    Dup {
        id: String,
        column: String,
        block: String,
    },
    /// Move a block to the end of another column
    Mv {
        id: String,
        from: String,
        to: String,
        block: String,
    },
    /// Remove a block
    Rm {
        id: String,
        column: String,
        block: String,
    },
}

#[derive(Args, Debug, Default)]
#[command(next_help_heading = "Style")]
pub struct StyleArgs {
    #[arg(long, value_name = "COLOR")]
    pub bg: Option<String>,
    #[arg(long, value_name = "COLOR")]
    pub border_color: Option<String>,
    #[arg(long, value_name = "PX")]
    pub border_width: Option<u32>,
    #[arg(long, value_name = "PX")]
    pub radius: Option<u32>,
    #[arg(long, value_enum)]
    pub align: Option<AlignArg>,
    #[arg(long, value_enum)]
    pub size: Option<SizeArg>,
    #[arg(long)]
    pub bold: bool,
    #[arg(long)]
    pub italic: bool,
    #[arg(long)]
    pub underline: bool,
    #[arg(long, value_name = "COLOR")]
    pub color: Option<String>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum AlignArg {
    Left,
    Center,
    Right,
    Justify,
}

impl From<AlignArg> for TextAlign {
    fn from(arg: AlignArg) -> Self {
        match arg {
            AlignArg::Left => TextAlign::Left,
            AlignArg::Center => TextAlign::Center,
            AlignArg::Right => TextAlign::Right,
            AlignArg::Justify => TextAlign::Justify,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum SizeArg {
    Small,
    Medium,
    Large,
    Huge,
}

impl From<SizeArg> for FontSize {
    fn from(arg: SizeArg) -> Self {
        match arg {
            SizeArg::Small => FontSize::Small,
            SizeArg::Medium => FontSize::Medium,
            SizeArg::Large => FontSize::Large,
            SizeArg::Huge => FontSize::Huge,
        }
    }
}

impl StyleArgs {
    /// Only the flags given on the command line end up in the patch.
    pub fn to_patch(&self) -> BlockStyle {
        BlockStyle {
            background_color: self.bg.clone(),
            border_color: self.border_color.clone(),
            border_width: self.border_width,
            border_radius: self.radius,
            text_align: self.align.map(Into::into),
            font_size: self.size.map(Into::into),
            font_weight: self.bold.then_some(FontWeight::Bold),
            font_style: self.italic.then_some(FontStyle::Italic),
            text_decoration: self.underline.then_some(TextDecoration::Underline),
            color: self.color.clone(),
        }
    }
}
