//! Apply the page enhancements ahead of time.
//!
//! Usage:
//!   intro-page                         # Enhance PAGE_FILE, print to stdout
//!   intro-page --toggle                # Also press the region switch once
//!   intro-page --page a.html --output b.html
//!
//! The page must be well-formed markup: every element closed (or
//! self-closed) and every attribute quoted with a value. Named HTML
//! entities such as `&nbsp;` are decoded and written back as characters.
//! Script and style bodies containing `<` or `&` are emitted as CDATA.
//!
//! Optional environment variables:
//! - PAGE_FILE (defaults to index.html)
//! - OUTPUT_FILE (defaults to stdout)
//! - TRANSLATIONS_BASE (http(s) URL or site root directory, defaults to .)
//! - PREFERENCES_FILE (defaults to data/preferences.json)

use anyhow::{Context, Result};
use intro_page::config::{Config, TranslationBase};
use intro_page::i18n::{FileTranslationSource, HttpTranslationSource, TranslationSource};
use intro_page::page::{self, Page};
use intro_page::storage::FilePreferenceStore;
use intro_page::toggle::{ControlEvent, RegionToggle};
use tracing::info;

#[derive(Debug, Default)]
struct Args {
    page: Option<String>,
    output: Option<String>,
    toggles: usize,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut parsed = Args::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--toggle" => parsed.toggles += 1,
                "--page" => parsed.page = Some(args.next().context("--page needs a file")?),
                "--output" => parsed.output = Some(args.next().context("--output needs a file")?),
                other => anyhow::bail!("Unknown argument: {}", other),
            }
        }

        Ok(parsed)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so the rendered page can be piped
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("intro_page=info".parse()?),
        )
        .init();

    let args = Args::parse(std::env::args().skip(1))?;

    let mut config = Config::from_env()?;
    if let Some(page) = args.page.clone() {
        config.page_file = page;
    }
    if let Some(output) = args.output.clone() {
        config.output_file = Some(output);
    }

    info!("Enhancing {}", config.page_file);

    let rendered = match config.translation_base() {
        TranslationBase::Http(url) => {
            render(&config, args.toggles, HttpTranslationSource::new(url)).await?
        }
        TranslationBase::Directory(root) => {
            render(&config, args.toggles, FileTranslationSource::new(root)).await?
        }
    };

    match &config.output_file {
        Some(path) => {
            std::fs::write(path, rendered).with_context(|| format!("Failed to write {}", path))?;
            info!("✓ Wrote {}", path);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Run document-ready on the page, then press the switch `toggles` times
async fn render<S: TranslationSource>(config: &Config, toggles: usize, source: S) -> Result<String> {
    let mut document = Page::parse(&config.read_page()?)
        .with_context(|| format!("Failed to parse {}", config.page_file))?;

    let store = FilePreferenceStore::new(&config.preferences_file);
    let mut toggle = RegionToggle::from_saved(store, source);

    page::on_document_ready(&mut document, &mut toggle).await;

    for _ in 0..toggles {
        toggle.handle_event(&mut document, &ControlEvent::Click).await;
    }

    info!("Rendered page for region {}", toggle.region());
    Ok(document.render())
}
