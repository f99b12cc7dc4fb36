//! # CLI Layer
//!
//! This module is **one possible UI client** for paypage. It is not the
//! application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the tracing subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: parse, set up logging and context, dispatch
//! - `handle_*()`: per-command handlers that call the API and print
//!
//! Every edit is `load → EditingSession → save` inside the library; the
//! handlers only translate arguments and print what comes back.

use super::render::{print_list, print_messages, print_tree, render_countdown};
use super::setup::{BlockCommands, Cli, ColumnCommands, Commands, StyleArgs};
use anyhow::{Context, Result};
use clap::Parser;
use paypageapp::api::PaypageApi;
use paypageapp::commands::block::BlockUpdate;
use paypageapp::content::CountdownSettings;
use paypageapp::countdown;
use paypageapp::init::initialize;
use paypageapp::model::{BlockId, BlockVariant, ColumnId, ColumnPosition, CompositionId, ViewMode};
use paypageapp::store::fs::FileStore;
use paypageapp::timer::spawn_countdown;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

struct AppContext {
    api: PaypageApi<FileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = initialize(cli.data.clone()).context("could not open the data directory")?;
    debug!(data_dir = %ctx.data_dir.display(), "context ready");
    let mut ctx = AppContext { api: ctx.api };

    match cli.command {
        Commands::New { name } => handle_new(&mut ctx, &name.join(" ")),
        Commands::List => handle_list(&ctx),
        Commands::Show { id, mobile, json } => handle_show(&ctx, &id, mobile, json),
        Commands::Rename { id, name } => handle_rename(&mut ctx, &id, &name.join(" ")),
        Commands::Delete { id } => handle_delete(&mut ctx, &id),
        Commands::Column(cmd) => match cmd {
            ColumnCommands::Add {
                id,
                position,
                width,
            } => handle_column_add(&mut ctx, &id, position, width),
            ColumnCommands::Width { id, column, width } => {
                handle_column_width(&mut ctx, &id, &column, width)
            }
            ColumnCommands::Rm { id, column } => handle_column_rm(&mut ctx, &id, &column),
        },
        Commands::Block(cmd) => match cmd {
            BlockCommands::Add {
                id,
                column,
                variant,
            } => handle_block_add(&mut ctx, &id, &column, variant),
            BlockCommands::Set {
                id,
                column,
                block,
                content,
                style,
            } => handle_block_set(&mut ctx, &id, &column, &block, content, &style),
            BlockCommands::Dup { id, column, block } => {
                handle_block_dup(&mut ctx, &id, &column, &block)
            }
            BlockCommands::Mv {
                id,
                from,
                to,
                block,
            } => handle_block_mv(&mut ctx, &id, &from, &to, &block),
            BlockCommands::Rm { id, column, block } => {
                handle_block_rm(&mut ctx, &id, &column, &block)
            }
        },
        Commands::Preview { id, mobile } => handle_preview(&ctx, &id, mobile),
        Commands::Countdown { duration } => handle_countdown(&ctx, &duration),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "paypage=debug,paypageapp=debug"
    } else {
        "paypage=warn,paypageapp=warn"
    };
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn mode(mobile: bool) -> Option<ViewMode> {
    mobile.then_some(ViewMode::Mobile)
}

fn handle_new(ctx: &mut AppContext, name: &str) -> Result<()> {
    let result = ctx.api.create(name)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list()?;
    print_list(&result.listed);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, id: &str, mobile: bool, json: bool) -> Result<()> {
    let tree = ctx.api.render(&CompositionId::from(id), mode(mobile))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else {
        print_tree(&tree);
    }
    Ok(())
}

fn handle_rename(ctx: &mut AppContext, id: &str, name: &str) -> Result<()> {
    let result = ctx.api.rename(&CompositionId::from(id), name)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.delete(&CompositionId::from(id))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_column_add(
    ctx: &mut AppContext,
    id: &str,
    position: ColumnPosition,
    width: Option<String>,
) -> Result<()> {
    let result = ctx
        .api
        .add_column(&CompositionId::from(id), position, width)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_column_width(
    ctx: &mut AppContext,
    id: &str,
    column: &str,
    width: Option<String>,
) -> Result<()> {
    let result =
        ctx.api
            .set_column_width(&CompositionId::from(id), &ColumnId::from(column), width)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_column_rm(ctx: &mut AppContext, id: &str, column: &str) -> Result<()> {
    let result = ctx
        .api
        .delete_column(&CompositionId::from(id), &ColumnId::from(column))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_block_add(
    ctx: &mut AppContext,
    id: &str,
    column: &str,
    variant: BlockVariant,
) -> Result<()> {
    let result = ctx
        .api
        .add_block(&CompositionId::from(id), &ColumnId::from(column), variant)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_block_set(
    ctx: &mut AppContext,
    id: &str,
    column: &str,
    block: &str,
    content: Option<String>,
    style: &StyleArgs,
) -> Result<()> {
    let patch = style.to_patch();
    let update = BlockUpdate {
        content,
        style: (!patch.is_empty()).then_some(patch),
    };
    if update.is_empty() {
        anyhow::bail!("nothing to set: pass --content or a style flag");
    }
    let result = ctx.api.update_block(
        &CompositionId::from(id),
        &ColumnId::from(column),
        &BlockId::from(block),
        &update,
    )?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_block_dup(ctx: &mut AppContext, id: &str, column: &str, block: &str) -> Result<()> {
    let result = ctx.api.duplicate_block(
        &CompositionId::from(id),
        &ColumnId::from(column),
        &BlockId::from(block),
    )?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_block_mv(
    ctx: &mut AppContext,
    id: &str,
    from: &str,
    to: &str,
    block: &str,
) -> Result<()> {
    let result = ctx.api.move_block(
        &CompositionId::from(id),
        &ColumnId::from(from),
        &ColumnId::from(to),
        &BlockId::from(block),
    )?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_block_rm(ctx: &mut AppContext, id: &str, column: &str, block: &str) -> Result<()> {
    let result = ctx.api.delete_block(
        &CompositionId::from(id),
        &ColumnId::from(column),
        &BlockId::from(block),
    )?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_preview(ctx: &AppContext, id: &str, mobile: bool) -> Result<()> {
    let snapshot = ctx.api.preview(&CompositionId::from(id), mode(mobile))?;
    println!("{}", snapshot.to_json()?);
    Ok(())
}

/// Prints one line per state change until the timer finishes.
fn handle_countdown(ctx: &AppContext, duration: &str) -> Result<()> {
    let settings = CountdownSettings {
        duration: duration.to_string(),
        ..Default::default()
    };
    let period = ctx.api.config().tick_period();
    let color = console::colors_enabled();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("could not start the timer runtime")?;

    runtime.block_on(async {
        let handle = spawn_countdown(&settings.duration, period);
        let mut states = handle.subscribe();
        loop {
            let state = *states.borrow_and_update();
            let shown = countdown::display(&settings, state);
            println!("{}", render_countdown(&shown, color));
            if state.is_finished() || states.changed().await.is_err() {
                break;
            }
        }
    });
    Ok(())
}
