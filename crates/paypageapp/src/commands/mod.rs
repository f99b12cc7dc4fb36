//! # Command Layer: the Column Store
//!
//! This module holds the editing operations of the builder. Every operation
//! is a pure transformation: it borrows the current [`Composition`] and
//! returns the next one. Nothing is mutated in place, so a caller either sees
//! the whole change or none of it.
//!
//! ```text
//!   &Composition ──▶ column::add / block::update / … ──▶ Composition'
//! ```
//!
//! ## Reference Errors Are No-Ops
//!
//! The builder UI fires events with ids that may already be stale (a block
//! dragged twice, a column deleted under a pending click). Operations on an
//! unknown column or block return the input unchanged and emit a `debug!`
//! event. They never return an error.
//!
//! ## What Commands Do NOT Do
//!
//! - **Id generation**: ids are passed in. The session owns the generator.
//! - **Selection**: the session reconciles its selection after each call.
//! - **Persistence**: the API facade loads and saves around a session.
//!
//! ## Command Modules
//!
//! - [`column`]: add, delete and resize columns
//! - [`block`]: add, delete, update, duplicate and move blocks
//!
//! [`CmdResult`] and [`CmdMessage`] are the structured returns of the API
//! facade; the UI decides how to show them.

use serde::Serialize;

use crate::model::Composition;
use crate::store::CompositionSummary;

pub mod block;
pub mod column;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// The composition the command worked on, after the change.
    pub composition: Option<Composition>,
    pub listed: Vec<CompositionSummary>,
    pub messages: Vec<CmdMessage>,
    /// An edit went through and was saved.
    pub changed: bool,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_composition(mut self, composition: Composition) -> Self {
        self.composition = Some(composition);
        self
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn with_listed(mut self, listed: Vec<CompositionSummary>) -> Self {
        self.listed = listed;
        self
    }
}
