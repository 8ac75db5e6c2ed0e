//! # bookshelf-renderer
//!
//! Tera-based page templates for the static book site: the fixed set of
//! [`PageKind`]s, a [`TemplateCache`] that loads them from the templates
//! directory, and the serializable page bindings in [`context`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bookshelf_core::{SiteConfig, SiteLayout};
//! use bookshelf_renderer::{context::{IndexContext, SiteChrome}, PageKind, TemplateCache};
//!
//! fn render_index(config: &SiteConfig) -> Result<Option<String>, bookshelf_renderer::RenderError> {
//!     let cache = TemplateCache::from_config(config)?;
//!     let layout = SiteLayout::from_config(config);
//!     let chrome = SiteChrome::from_config(config);
//!     let ctx = IndexContext::new(&layout, std::iter::empty(), &chrome);
//!     match cache.get(PageKind::Index)? {
//!         Some(template) => template.render(&ctx).map(Some),
//!         None => Ok(None),
//!     }
//! }
//! ```

pub mod context;
pub mod error;
pub mod template;

pub use error::RenderError;
pub use template::{PageKind, Template, TemplateCache};
