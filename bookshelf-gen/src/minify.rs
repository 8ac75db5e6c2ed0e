//! HTML minification seam.
//!
//! Minification is best effort: the render sink falls back to the raw bytes
//! whenever a [`Minifier`] returns an error.

use thiserror::Error;

pub const CONTENT_TYPE_HTML: &str = "text/html";

#[derive(Debug, Error)]
pub enum MinifyError {
    #[error("unsupported content type '{0}'")]
    UnsupportedContentType(String),

    #[error("minification failed: {0}")]
    Failed(String),
}

/// Transforms content of a given MIME type into a smaller equivalent.
pub trait Minifier: Send + Sync {
    fn minify(&self, content_type: &str, input: &[u8]) -> Result<Vec<u8>, MinifyError>;
}

/// [`Minifier`] backed by the `minify-html` crate.
pub struct HtmlMinifier {
    cfg: minify_html::Cfg,
}

impl HtmlMinifier {
    pub fn new() -> Self {
        let mut cfg = minify_html::Cfg::new();
        cfg.keep_closing_tags = true;
        cfg.keep_html_and_head_opening_tags = true;
        cfg.keep_comments = false;
        cfg.minify_css = true;
        cfg.minify_js = true;
        cfg.remove_bangs = true;
        cfg.remove_processing_instructions = true;
        HtmlMinifier { cfg }
    }
}

impl Default for HtmlMinifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Minifier for HtmlMinifier {
    fn minify(&self, content_type: &str, input: &[u8]) -> Result<Vec<u8>, MinifyError> {
        if content_type != CONTENT_TYPE_HTML {
            return Err(MinifyError::UnsupportedContentType(content_type.to_string()));
        }
        Ok(minify_html::minify(input, &self.cfg))
    }
}
