//! Site configuration, loaded from `bookshelf.yaml`.
//!
//! Every field has a default, so an empty (or absent) file is a valid
//! configuration. CLI flags are applied on top by the binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE: &str = "bookshelf.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory holding one YAML file per book.
    pub content_dir: PathBuf,
    /// Directory holding the `*.tmpl.html` templates.
    pub templates_dir: PathBuf,
    /// Root of the generated site.
    pub output_dir: PathBuf,
    /// Public origin used for canonical URLs, without trailing slash.
    pub base_url: String,
    pub github_url: String,
    /// Raw HTML analytics snippet injected into every page.
    pub analytics: String,
    pub path_app_js: String,
    pub path_main_css: String,
    /// Run generated HTML through the minifier.
    pub minify: bool,
    /// Chapters rendered in parallel per book; `None` uses available parallelism.
    pub concurrency: Option<usize>,
    /// Template file names whose pages are skipped.
    pub disabled_templates: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("books"),
            templates_dir: PathBuf::from("tmpl"),
            output_dir: PathBuf::from("www"),
            base_url: "https://www.programming-books.io".to_string(),
            github_url: "https://github.com/essentialbooks/books".to_string(),
            analytics: String::new(),
            path_app_js: "/s/app.js".to_string(),
            path_main_css: "/s/main.css".to_string(),
            minify: false,
            concurrency: None,
            disabled_templates: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Per-book chapter concurrency limit.
    pub fn effective_concurrency(&self) -> usize {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        self.concurrency.unwrap_or(cores).max(1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == Some(0) {
            return Err(ConfigError::ZeroConcurrency);
        }
        Ok(())
    }
}

/// Load and validate a config file.
pub fn load_at(path: &Path) -> Result<SiteConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: SiteConfig = if contents.trim().is_empty() {
        SiteConfig::default()
    } else {
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?
    };
    config.validate()?;
    Ok(config)
}

/// Load `path` when given, else `./bookshelf.yaml` if present, else defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<SiteConfig, ConfigError> {
    match path {
        Some(p) => load_at(p),
        None => {
            let default = Path::new(CONFIG_FILE);
            if default.exists() {
                load_at(default)
            } else {
                Ok(SiteConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bookshelf.yaml");
        fs::write(&path, "minify: true\nconcurrency: 3\n").unwrap();

        let config = load_at(&path).expect("load");
        assert!(config.minify);
        assert_eq!(config.effective_concurrency(), 3);
        assert_eq!(config.output_dir, PathBuf::from("www"));
        assert_eq!(config.path_main_css, "/s/main.css");
    }

    #[test]
    fn empty_file_is_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bookshelf.yaml");
        fs::write(&path, "").unwrap();
        assert_eq!(load_at(&path).unwrap(), SiteConfig::default());
    }

    #[test]
    fn unknown_field_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bookshelf.yaml");
        fs::write(&path, "minfy: true\n").unwrap();
        let err = load_at(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bookshelf.yaml");
        fs::write(&path, "concurrency: 0\n").unwrap();
        assert!(matches!(load_at(&path), Err(ConfigError::ZeroConcurrency)));
    }

    #[test]
    fn explicit_missing_path_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = load_or_default(Some(&dir.path().join("missing.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[rstest]
    #[case(Some(1), 1)]
    #[case(Some(8), 8)]
    fn configured_concurrency_is_used(#[case] configured: Option<usize>, #[case] expected: usize) {
        let config = SiteConfig {
            concurrency: configured,
            ..SiteConfig::default()
        };
        assert_eq!(config.effective_concurrency(), expected);
    }

    #[test]
    fn default_concurrency_is_at_least_one() {
        assert!(SiteConfig::default().effective_concurrency() >= 1);
    }
}
