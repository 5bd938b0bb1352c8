//! Error taxonomy for the split pipeline.
//!
//! Every variant is fatal to a run. A page with too few detected regions is
//! not an error; it is recorded in [`crate::splitter::SplitReport`].

use std::path::PathBuf;

use thiserror::Error;

/// Split pipeline errors
#[derive(Error, Debug)]
pub enum SplitError {
    /// The input cannot be opened or parsed as a document.
    #[error("cannot open input document {}: {reason}", path.display())]
    Input { path: PathBuf, reason: String },

    /// Rasterizing a page failed. `page` is 0-based; the message is 1-based.
    #[error("failed to render page {}: {reason}", page + 1)]
    Render { page: usize, reason: String },

    /// Building an output page from a source page failed.
    #[error("failed to compose output page from page {}: {reason}", page + 1)]
    Compose { page: usize, reason: String },

    /// Persisting the output document failed.
    #[error("failed to write output document {}: {reason}", path.display())]
    OutputWrite { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("PDF rendering unavailable: {0}")]
    RendererUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SplitError>;
