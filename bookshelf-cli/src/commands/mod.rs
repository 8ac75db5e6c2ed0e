pub mod build;
pub mod check;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use bookshelf_core::{config, SiteConfig};

/// Config file and directory overrides shared by every command.
#[derive(Args, Debug, Default)]
pub struct SiteArgs {
    /// Config file (defaults to `bookshelf.yaml` in the working directory, if present).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding one YAML file per book.
    #[arg(long, value_name = "DIR")]
    pub content: Option<PathBuf>,

    /// Directory holding the `*.tmpl.html` templates.
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,
}

impl SiteArgs {
    /// Load the config file, then apply flag overrides.
    pub fn load(&self) -> Result<SiteConfig> {
        let mut site = config::load_or_default(self.config.as_deref()).context("failed to load config")?;
        if let Some(dir) = &self.content {
            site.content_dir = dir.clone();
        }
        if let Some(dir) = &self.templates {
            site.templates_dir = dir.clone();
        }
        Ok(site)
    }
}
