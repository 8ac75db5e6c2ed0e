//! Error types for bookshelf-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from template loading and rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera error while building a rendering context.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Filesystem error while reading a template.
    #[error("template io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template file exists but does not parse.
    #[error("failed to parse template '{template}': {source}")]
    Parse {
        template: String,
        #[source]
        source: tera::Error,
    },

    /// Template execution failed (usually a binding/template mismatch).
    #[error("failed to execute template '{template}': {source}")]
    Execute {
        template: String,
        #[source]
        source: tera::Error,
    },

    /// A name outside the fixed set of page templates.
    #[error("unknown template '{0}'")]
    UnknownTemplate(String),
}
