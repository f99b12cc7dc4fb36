//! # Paypage Architecture
//!
//! Paypage is a **UI-agnostic checkout-page builder library**. An operator
//! composes a payment page from blocks (text, image, advantages,
//! testimonial, countdown, video, social) placed in positional columns
//! around a fixed checkout form. The library edits, stores, previews and
//! renders those compositions. The `paypage` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (crates/paypage)                                       │
//! │  - Parses arguments, draws the visual tree, exit codes      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs, init.rs, config.rs)                           │
//! │  - load → EditingSession → save                             │
//! │  - Returns CmdResult / VisualTree / PreviewSnapshot         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session (session.rs)                                       │
//! │  - Selection, drag state, unsaved-changes flag, id minting  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - Pure &Composition → Composition transformations          │
//! │  - Unknown ids are no-ops                                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Model (model.rs, content.rs, style.rs)                     │
//! │  - Blocks, columns, compositions, content codec, styles     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Beside the stack sit the renderer ([`render`], with the [`countdown`]
//! state machine and its [`timer`] tasks), the persistence boundary
//! ([`store`]), the preview hand-off ([`preview`]) and the customer-facing
//! payment form ([`checkout`]).
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Library code never writes to stdout/stderr and never exits the process.
//! Diagnostics go through `tracing`; whoever embeds the library decides
//! where they end up.
//!
//! ## Failure Model
//!
//! - Malformed block content decodes to the variant's default. Never an error.
//! - Edits naming unknown columns or blocks change nothing. Never an error.
//! - Storage failures are `Err(PaypageError)`; a session whose save failed
//!   keeps its edits and its unsaved flag.
//! - Payment callback failures are returned to the caller unchanged.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade over stored compositions
//! - [`session`]: Editing session (selection, drag, unsaved flag)
//! - [`commands`]: Column and block operations
//! - [`model`]: Blocks, columns, compositions and their ids
//! - [`content`]: Per-variant content codec and defaults
//! - [`style`]: Style overrides and their resolution
//! - [`render`]: Composition → visual tree
//! - [`countdown`] / [`timer`]: Countdown state machine and its tick tasks
//! - [`store`]: Storage trait, file and memory backends
//! - [`preview`]: Self-contained preview snapshot
//! - [`checkout`]: Payment form and customer field helpers
//! - [`config`] / [`init`]: Configuration and data directory

pub mod api;
pub mod checkout;
pub mod commands;
pub mod config;
pub mod content;
pub mod countdown;
pub mod error;
pub mod ids;
pub mod init;
pub mod model;
pub mod preview;
pub mod render;
pub mod session;
pub mod store;
pub mod style;
pub mod timer;
