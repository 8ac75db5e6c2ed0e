//! `bookshelf check`: validate content and templates without writing.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use bookshelf_gen::pipeline;

use super::SiteArgs;

/// Arguments for `bookshelf check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub site: SiteArgs,
}

impl CheckArgs {
    pub fn run(self) -> Result<()> {
        let config = self.site.load()?;
        let report = pipeline::check(&config).context("check failed")?;
        println!(
            "{} {} books, {} chapters, {} articles; {} templates parsed",
            "✓".green().bold(),
            report.books,
            report.chapters,
            report.articles,
            report.templates
        );
        Ok(())
    }
}
