//! Command implementations.

pub mod catalog;
pub mod domains;
pub mod funds;
pub mod hosting;

use hostpanel_core::{Catalog, QuoteError, SlugError};
use thiserror::Error;

use crate::config::OutputFormat;
use crate::output::{self, QuoteDocument};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The selections could not be quoted or submitted.
    #[error(transparent)]
    Quote(#[from] QuoteError),

    /// An id given on the command line is malformed.
    #[error("Invalid {kind} id {input:?}: {source}")]
    InvalidId {
        kind: &'static str,
        input: String,
        source: SlugError,
    },

    /// JSON rendering failed.
    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

impl CommandError {
    fn invalid_id(kind: &'static str, input: &str, source: SlugError) -> Self {
        Self::InvalidId {
            kind,
            input: input.to_owned(),
            source,
        }
    }
}

/// Shared state for every command.
pub struct Context<'a> {
    pub catalog: &'a Catalog,
    pub format: OutputFormat,
    /// Apply checkout validation after quoting.
    pub check: bool,
}

impl Context<'_> {
    fn print(&self, document: &QuoteDocument<'_>) -> Result<(), CommandError> {
        let rendered = document.render(self.format)?;
        output::emit(&rendered);
        Ok(())
    }
}
