//! `bookshelf build`: generate the whole site.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use bookshelf_gen::{pipeline, SiteReport};

use super::SiteArgs;

/// Arguments for `bookshelf build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Root of the generated site.
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Minify generated HTML.
    #[arg(long)]
    pub minify: bool,

    /// Chapters rendered in parallel per book.
    #[arg(long, value_name = "K", value_parser = clap::value_parser!(u64).range(1..))]
    pub concurrency: Option<u64>,
}

impl BuildArgs {
    pub fn run(self) -> Result<()> {
        let mut config = self.site.load()?;
        if let Some(dir) = self.output {
            config.output_dir = dir;
        }
        if self.minify {
            config.minify = true;
        }
        if let Some(k) = self.concurrency {
            config.concurrency = Some(k as usize);
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("failed to start tokio runtime")?;
        let report = runtime
            .block_on(pipeline::run(&config))
            .context("site generation failed")?;

        print_report(&report, &config.output_dir);
        Ok(())
    }
}

fn print_report(report: &SiteReport, output: &std::path::Path) {
    for book in &report.books {
        println!(
            "{} {} ({} chapters, {} articles) in {} ms",
            "✓".green().bold(),
            book.title,
            book.chapters,
            book.articles,
            book.elapsed.as_millis()
        );
    }

    let stats = &report.stats;
    println!(
        "{} {} pages, {} sitemap URLs written to {} in {} ms",
        "Done.".bold(),
        stats.pages_written,
        report.sitemap_urls,
        output.display(),
        report.elapsed.as_millis()
    );
    if let Some(saved) = stats.savings_percent() {
        println!(
            "  html {} bytes, minified {} bytes ({:.1}% saved)",
            stats.html_bytes,
            stats.minified_bytes,
            saved
        );
    }
}
