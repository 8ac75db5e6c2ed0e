//! Page templates: [`PageKind`] and the [`TemplateCache`].
//!
//! # Template files
//!
//! | Kind        | File in templates dir   |
//! |-------------|-------------------------|
//! | Index       | `index.tmpl.html`       |
//! | IndexGrid   | `index-grid.tmpl.html`  |
//! | BookIndex   | `book_index.tmpl.html`  |
//! | Chapter     | `chapter.tmpl.html`     |
//! | Article     | `article.tmpl.html`     |
//! | About       | `about.tmpl.html`       |
//! | Feedback    | `feedback.tmpl.html`    |
//!
//! All names end in `.html`, so tera autoescaping is on; raw HTML fields
//! (bodies, the analytics snippet) must be piped through `| safe`.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use tera::Tera;

use bookshelf_core::SiteConfig;

use crate::error::RenderError;

// ---------------------------------------------------------------------------
// PageKind
// ---------------------------------------------------------------------------

/// The closed set of page templates the generator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Index,
    IndexGrid,
    BookIndex,
    Chapter,
    Article,
    About,
    Feedback,
}

impl PageKind {
    /// All kinds in a stable order.
    pub fn all() -> &'static [PageKind] {
        &[
            PageKind::Index,
            PageKind::IndexGrid,
            PageKind::BookIndex,
            PageKind::Chapter,
            PageKind::Article,
            PageKind::About,
            PageKind::Feedback,
        ]
    }

    /// Template file name, relative to the templates directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            PageKind::Index     => "index.tmpl.html",
            PageKind::IndexGrid => "index-grid.tmpl.html",
            PageKind::BookIndex => "book_index.tmpl.html",
            PageKind::Chapter   => "chapter.tmpl.html",
            PageKind::Article   => "article.tmpl.html",
            PageKind::About     => "about.tmpl.html",
            PageKind::Feedback  => "feedback.tmpl.html",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

impl FromStr for PageKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageKind::all()
            .iter()
            .copied()
            .find(|k| k.file_name() == s)
            .ok_or_else(|| RenderError::UnknownTemplate(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

/// One parsed page template.
pub struct Template {
    kind: PageKind,
    tera: Tera,
}

impl Template {
    /// Parse template source for `kind`.
    pub fn parse(kind: PageKind, source: &str) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_template(kind.file_name(), source)
            .map_err(|e| RenderError::Parse {
                template: kind.file_name().to_string(),
                source: e,
            })?;
        Ok(Template { kind, tera })
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    /// Execute the template against a serializable binding.
    pub fn render<T: Serialize>(&self, data: &T) -> Result<String, RenderError> {
        let ctx = tera::Context::from_serialize(data)?;
        self.tera
            .render(self.kind.file_name(), &ctx)
            .map_err(|e| RenderError::Execute {
                template: self.kind.file_name().to_string(),
                source: e,
            })
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template").field("kind", &self.kind).finish()
    }
}

// ---------------------------------------------------------------------------
// TemplateCache
// ---------------------------------------------------------------------------

/// Lazily loads and memoizes page templates from a directory.
///
/// A loaded template is never re-read until [`TemplateCache::unload`].
/// Population goes through a write lock, so concurrent first use is sound,
/// but callers rendering in parallel should [`preload_all`](Self::preload_all)
/// first so workers only ever take the read path.
pub struct TemplateCache {
    dir: PathBuf,
    disabled: HashSet<PageKind>,
    loaded: RwLock<HashMap<PageKind, Arc<Template>>>,
}

impl TemplateCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        TemplateCache {
            dir: dir.into(),
            disabled: HashSet::new(),
            loaded: RwLock::new(HashMap::new()),
        }
    }

    /// Mark kinds whose pages should be skipped instead of rendered.
    pub fn with_disabled(mut self, kinds: impl IntoIterator<Item = PageKind>) -> Self {
        self.disabled.extend(kinds);
        self
    }

    /// Build from config. Unknown names in `disabled_templates` are fatal.
    pub fn from_config(config: &SiteConfig) -> Result<Self, RenderError> {
        let disabled = config
            .disabled_templates
            .iter()
            .map(|name| name.parse::<PageKind>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TemplateCache::new(&config.templates_dir).with_disabled(disabled))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn template_path(&self, kind: PageKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    pub fn is_disabled(&self, kind: PageKind) -> bool {
        self.disabled.contains(&kind)
    }

    pub fn is_loaded(&self, kind: PageKind) -> bool {
        self.loaded
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&kind)
    }

    /// Resolve a template, loading it on first use.
    ///
    /// `Ok(None)` means the kind is disabled and the page should be skipped.
    pub fn get(&self, kind: PageKind) -> Result<Option<Arc<Template>>, RenderError> {
        if self.is_disabled(kind) {
            return Ok(None);
        }

        if let Some(t) = self
            .loaded
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
        {
            return Ok(Some(Arc::clone(t)));
        }

        let mut loaded = self.loaded.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(t) = loaded.get(&kind) {
            return Ok(Some(Arc::clone(t)));
        }
        let template = Arc::new(self.load(kind)?);
        loaded.insert(kind, Arc::clone(&template));
        Ok(Some(template))
    }

    /// Resolve by file name; names outside [`PageKind::all`] are an error.
    pub fn get_by_name(&self, name: &str) -> Result<Option<Arc<Template>>, RenderError> {
        self.get(name.parse()?)
    }

    /// Load every enabled template. Returns how many are now cached.
    pub fn preload_all(&self) -> Result<usize, RenderError> {
        let mut count = 0;
        for kind in PageKind::all() {
            if self.get(*kind)?.is_some() {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Drop every cached template; the next `get` reloads from disk.
    pub fn unload(&self) {
        self.loaded
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn load(&self, kind: PageKind) -> Result<Template, RenderError> {
        let path = self.template_path(kind);
        let source = std::fs::read_to_string(&path).map_err(|e| RenderError::Io {
            path: path.clone(),
            source: e,
        })?;
        tracing::debug!(template = %kind, path = %path.display(), "loaded template");
        Template::parse(kind, &source)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
