//! # bookshelf-gen
//!
//! Static site generation for the book library.
//!
//! [`pipeline::run`] renders the top-level pages, then each book in turn
//! through [`Generator::gen_book`], which fans chapters out to at most K
//! blocking workers and joins them all before returning. Pages go through a
//! single [`RenderSink`] that optionally minifies and keeps byte counts.

pub mod book;
pub mod copier;
pub mod error;
pub mod minify;
pub mod pages;
pub mod pipeline;
pub mod search_index;
pub mod sink;
pub mod sitemap;
pub mod stats;

pub use book::BookReport;
pub use copier::{FileCopier, FsCopier};
pub use error::GenError;
pub use minify::{HtmlMinifier, Minifier, MinifyError};
pub use pages::{Collaborators, Generator};
pub use pipeline::{CheckReport, SiteReport};
pub use search_index::{SearchIndexBuilder, TocSearchIndex};
pub use sink::{RenderOutcome, RenderSink};
pub use sitemap::{Sitemap, SitemapCollector};
pub use stats::{RenderStats, StatsSnapshot};
