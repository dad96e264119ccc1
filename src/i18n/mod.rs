//! Region-specific display strings.
//!
//! This module holds everything the region toggle needs that does not touch
//! the page: the two supported regions, the key→string dictionaries, and the
//! sources those dictionaries are loaded from.
//!
//! # Architecture
//!
//! - `region`: The `Region` enum (MY or SG) and its fixed per-region metadata
//! - `dictionary`: `TranslationDictionary` and the built-in fallback strings
//! - `source`: `TranslationSource` trait with HTTP and filesystem loaders
//!
//! # Example
//!
//! ```rust,ignore
//! use intro_page::i18n::{HttpTranslationSource, Region, TranslationSource};
//!
//! let source = HttpTranslationSource::new("https://example.com");
//! let dictionary = source.fetch(Region::SG).await?;
//! ```

mod dictionary;
mod region;
mod source;

pub use dictionary::TranslationDictionary;
pub use region::{ParseRegionError, Region, RESOURCE_DIR};
pub use source::{FileTranslationSource, HttpTranslationSource, TranslationSource};
