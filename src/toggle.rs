//! MY/SG region switch.
//!
//! `RegionToggle` owns the active region, persists it through a
//! [`PreferenceStore`], loads the matching dictionary from a
//! [`TranslationSource`] and rewrites every `data-i18n` element of the page.
//! Both collaborators are injected so the toggle can run without a real
//! store or network.
//!
//! Every state change takes `&mut self`, so a toggle cannot start while the
//! previous load-and-apply is still running. The last toggle always wins.

use crate::i18n::{Region, TranslationDictionary, TranslationSource};
use crate::page::{Document, ElementId, TRANSLATION_ATTRIBUTE};
use crate::storage::{PreferenceStore, REGION_KEY};
use tracing::{debug, error, info, warn};

/// `id` of the generated control container
pub const CONTROL_ID: &str = "region-toggle";

/// Accessible name of the switch
pub const ARIA_LABEL: &str = "区域切换：马来西亚/新加坡";

/// Input delivered to the switch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    Click,
    /// Key name as reported by the browser, e.g. `"Enter"` or `" "`
    KeyDown(String),
}

impl ControlEvent {
    /// Whether this event activates the switch
    pub fn activates(&self) -> bool {
        match self {
            ControlEvent::Click => true,
            ControlEvent::KeyDown(key) => key == "Enter" || key == " ",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ControlHandles {
    button: ElementId,
    slider: ElementId,
}

pub struct RegionToggle<P, S> {
    region: Region,
    translations: Option<TranslationDictionary>,
    store: P,
    source: S,
    control: Option<ControlHandles>,
}

impl<P: PreferenceStore, S: TranslationSource> RegionToggle<P, S> {
    pub fn new(initial: Region, store: P, source: S) -> Self {
        Self {
            region: initial,
            translations: None,
            store,
            source,
            control: None,
        }
    }

    /// Start from the persisted region, or Singapore if none is saved
    pub fn from_saved(store: P, source: S) -> Self {
        let initial = saved_region(&store).unwrap_or_default();
        info!("Starting with region {}", initial);
        Self::new(initial, store, source)
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Most recently loaded dictionary
    pub fn translations(&self) -> Option<&TranslationDictionary> {
        self.translations.as_ref()
    }

    /// The switch element, once the control exists
    pub fn control(&self) -> Option<ElementId> {
        self.control.map(|handles| handles.button)
    }

    /// Build (or adopt) the control, then load and apply the dictionary.
    ///
    /// Running it again never creates a second control.
    pub async fn initialize<D: Document>(&mut self, doc: &mut D) {
        self.create_control(doc);
        self.setup_accessibility(doc);
        self.update_toggle_state(doc);

        self.load_translations().await;
        self.apply_translations(doc);
    }

    /// Switch to the other region, persist it and re-apply the page text
    pub async fn toggle_region<D: Document>(&mut self, doc: &mut D) {
        self.region = self.region.toggled();
        info!("Region switched to {}", self.region);

        self.save_region();
        self.update_toggle_state(doc);

        self.load_translations().await;
        self.apply_translations(doc);
    }

    /// Feed an input event to the switch.
    ///
    /// Returns `true` when the event toggled the region (and the browser's
    /// default action should be suppressed).
    pub async fn handle_event<D: Document>(&mut self, doc: &mut D, event: &ControlEvent) -> bool {
        if !event.activates() {
            return false;
        }
        self.toggle_region(doc).await;
        true
    }

    /// Load the dictionary for the current region.
    ///
    /// Any failure is logged and replaced by the built-in fallback strings.
    pub async fn load_translations(&mut self) {
        let dictionary = match self.source.fetch(self.region).await {
            Ok(dictionary) => {
                debug!(
                    "Loaded {} strings for region {}",
                    dictionary.len(),
                    self.region
                );
                dictionary
            }
            Err(e) => {
                error!("Failed to load translations: {:#}", e);
                if self.region != Region::SG {
                    warn!(
                        "Fallback strings are the {} set; region {} will show them",
                        Region::SG,
                        self.region
                    );
                }
                TranslationDictionary::fallback()
            }
        };

        self.translations = Some(dictionary);
    }

    /// Write the loaded strings into the page and set the title.
    ///
    /// Does nothing until a dictionary is loaded. Elements whose key is not
    /// in the dictionary keep their text. Returns the number of elements
    /// rewritten.
    pub fn apply_translations<D: Document>(&self, doc: &mut D) -> usize {
        let Some(translations) = &self.translations else {
            return 0;
        };

        let mut applied = 0;
        for element in doc.elements_with_attribute(TRANSLATION_ATTRIBUTE) {
            let Some(key) = doc.attribute(element, TRANSLATION_ATTRIBUTE) else {
                continue;
            };
            if let Some(text) = translations.get(&key) {
                doc.set_text(element, text);
                applied += 1;
            }
        }

        doc.set_title(self.region.page_title());
        applied
    }

    fn save_region(&self) {
        if let Err(e) = self.store.set(REGION_KEY, self.region.code()) {
            error!("Failed to save region: {}", e);
        }
    }

    fn create_control<D: Document>(&mut self, doc: &mut D) {
        if self.control.is_some() {
            return;
        }

        if let Some(existing) = doc.element_by_id(CONTROL_ID) {
            self.control = adopt_control(doc, existing);
            if self.control.is_none() {
                warn!("Element #{} exists but is not a region switch", CONTROL_ID);
            }
            return;
        }

        let container = doc.create_element("div");
        doc.set_attribute(container, "id", CONTROL_ID);
        doc.set_attribute(container, "class", "region-toggle");

        let button = doc.create_element("div");
        doc.set_attribute(button, "class", "toggle-container");

        let slider = doc.create_element("div");
        doc.set_attribute(slider, "class", "toggle-slider");
        doc.set_text(slider, self.region.code());

        let labels = doc.create_element("div");
        doc.set_attribute(labels, "class", "region-labels");

        for class in ["region-label malaysia", "region-label singapore"] {
            let label = doc.create_element("span");
            doc.set_attribute(label, "class", class);
            doc.append_child(labels, label);
        }

        doc.append_child(button, slider);
        doc.append_child(button, labels);
        doc.append_child(container, button);
        doc.append_to_body(container);

        self.control = Some(ControlHandles { button, slider });
    }

    fn setup_accessibility<D: Document>(&self, doc: &mut D) {
        let Some(handles) = self.control else {
            return;
        };
        doc.set_attribute(handles.button, "tabindex", "0");
        doc.set_attribute(handles.button, "role", "switch");
        doc.set_attribute(handles.button, "aria-label", ARIA_LABEL);
    }

    /// Make the switch reflect the current region
    fn update_toggle_state<D: Document>(&self, doc: &mut D) {
        let Some(handles) = self.control else {
            return;
        };

        if self.region.is_checked() {
            doc.add_class(handles.button, "active");
        } else {
            doc.remove_class(handles.button, "active");
        }
        doc.set_text(handles.slider, self.region.code());
        doc.set_attribute(
            handles.button,
            "aria-checked",
            if self.region.is_checked() { "true" } else { "false" },
        );
    }
}

/// Read the persisted region.
///
/// Store failures and unknown values are logged and read as "no preference".
pub fn saved_region<P: PreferenceStore>(store: &P) -> Option<Region> {
    match store.get(REGION_KEY) {
        Ok(Some(value)) => match value.parse() {
            Ok(region) => Some(region),
            Err(e) => {
                warn!("Ignoring saved region: {}", e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            error!("Failed to get saved region: {}", e);
            None
        }
    }
}

/// Find the switch and slider inside a control already present in the page
fn adopt_control<D: Document>(doc: &D, container: ElementId) -> Option<ControlHandles> {
    let inside = doc.descendants(container);
    let first_with_class = |class: &str| {
        inside
            .iter()
            .copied()
            .find(|&element| doc.has_class(element, class))
    };

    Some(ControlHandles {
        button: first_with_class("toggle-container")?,
        slider: first_with_class("toggle-slider")?,
    })
}
