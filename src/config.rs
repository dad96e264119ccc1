use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Page
    pub page_file: String,
    pub output_file: Option<String>,

    // Dictionaries: an http(s) URL or a local site root
    pub translations_base: String,

    // Persisted region choice
    pub preferences_file: String,
}

/// Where dictionaries are loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationBase {
    Http(String),
    Directory(PathBuf),
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            page_file: std::env::var("PAGE_FILE").unwrap_or_else(|_| "index.html".to_string()),
            output_file: std::env::var("OUTPUT_FILE").ok().filter(|v| !v.is_empty()),

            translations_base: std::env::var("TRANSLATIONS_BASE")
                .unwrap_or_else(|_| ".".to_string()),

            preferences_file: std::env::var("PREFERENCES_FILE")
                .unwrap_or_else(|_| "data/preferences.json".to_string()),
        };

        if config.page_file.trim().is_empty() {
            anyhow::bail!("PAGE_FILE must not be empty");
        }
        if config.translations_base.trim().is_empty() {
            anyhow::bail!("TRANSLATIONS_BASE must not be empty");
        }

        Ok(config)
    }

    pub fn translation_base(&self) -> TranslationBase {
        let base = self.translations_base.trim();
        if base.starts_with("http://") || base.starts_with("https://") {
            TranslationBase::Http(base.to_string())
        } else {
            TranslationBase::Directory(PathBuf::from(base))
        }
    }

    /// Read the configured page file
    pub fn read_page(&self) -> Result<String> {
        std::fs::read_to_string(&self.page_file)
            .with_context(|| format!("Failed to read page {}", self.page_file))
    }
}
