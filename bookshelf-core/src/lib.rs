//! Bookshelf core library: content model, library loading, configuration,
//! output layout, errors.
//!
//! - [`types`]: [`Book`] / [`Chapter`] / [`Article`] and the [`Slug`] newtype
//! - [`library`]: load books from YAML files
//! - [`config`]: [`SiteConfig`] and `bookshelf.yaml` loading
//! - [`layout`]: destination paths and canonical URLs
//! - [`error`]: [`LibraryError`], [`ConfigError`]

pub mod config;
pub mod error;
pub mod layout;
pub mod library;
pub mod types;

pub use config::SiteConfig;
pub use error::{ConfigError, LibraryError};
pub use layout::SiteLayout;
pub use types::{Article, Book, Chapter, Slug};
