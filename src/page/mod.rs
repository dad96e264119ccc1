//! Page adapter: the only code that reads or mutates the document.
//!
//! - `document`: the `Document` trait the enhancements are written against
//! - `markup`: `Page`, an in-memory document read from and written to XHTML

mod document;
mod markup;

pub use document::{Document, ElementId};
pub use markup::Page;

use crate::date::{convert_date, decorate_date};
use crate::i18n::TranslationSource;
use crate::storage::PreferenceStore;
use crate::toggle::RegionToggle;
use tracing::debug;

/// Attribute holding the raw date of an "updated" stamp
pub const DATE_ATTRIBUTE: &str = "data-date";

/// Attribute holding a dictionary key
pub const TRANSLATION_ATTRIBUTE: &str = "data-i18n";

/// Rewrite every `data-date` element with its decorated, formatted date.
///
/// Elements whose date cannot be parsed are left as they are. Returns the
/// number of elements rewritten.
pub fn convert_dates<D: Document>(doc: &mut D) -> usize {
    let mut converted = 0;
    for element in doc.elements_with_attribute(DATE_ATTRIBUTE) {
        let Some(raw) = doc.attribute(element, DATE_ATTRIBUTE) else {
            continue;
        };
        match convert_date(&raw) {
            Some(formatted) => {
                doc.set_text(element, &decorate_date(&formatted));
                converted += 1;
            }
            None => debug!("Skipping unrecognized date {:?}", raw),
        }
    }
    converted
}

/// Run both enhancements, as the page does once its document is ready
pub async fn on_document_ready<D, P, S>(doc: &mut D, toggle: &mut RegionToggle<P, S>)
where
    D: Document,
    P: PreferenceStore,
    S: TranslationSource,
{
    let converted = convert_dates(doc);
    debug!("Converted {} date stamps", converted);

    toggle.initialize(doc).await;
}
