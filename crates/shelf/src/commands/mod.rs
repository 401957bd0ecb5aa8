//! # Command Layer
//!
//! Business logic for changing the product collection. Each command is a plain
//! function over a [`CollectionStore`] that returns a structured [`CmdResult`].
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O beyond the store**: no stdout, stderr or terminal concerns
//! - **Form handling**: products arrive here already validated
//! - **Fail on unsaved changes**: a failed write-through becomes a warning message,
//!   the in-memory change stands
//!
//! ## Command Modules
//!
//! - [`submit`]: Merge a submitted product (create or update by id)
//! - [`delete`]: Remove a product

use crate::error::ShelfError;
use crate::model::Product;
use crate::store::CollectionStore;
use serde::Serialize;

pub mod delete;
pub mod submit;

/// The collection every command operates on.
pub type Products<B> = CollectionStore<Vec<Product>, B>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
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
    pub affected_products: Vec<Product>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn has_level(&self, level: MessageLevel) -> bool {
        self.messages.iter().any(|m| m.level == level)
    }

    /// Record the outcome of a write-through. A failure is a warning, not an error:
    /// the change is live in memory.
    pub(crate) fn note_persisted(&mut self, outcome: Result<(), ShelfError>) {
        if let Err(e) = outcome {
            self.add_message(CmdMessage::warning(format!(
                "Change kept but not saved: {}",
                e
            )));
        }
    }
}
