//! The document operations the enhancements need.

/// Handle to an element inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub(crate) usize);

/// Minimal document surface used by the date converter and region toggle.
///
/// All queries and mutations of the page go through this trait so the
/// parsing, formatting and lookup logic never touches markup directly.
pub trait Document {
    /// Elements carrying `name`, in document order
    fn elements_with_attribute(&self, name: &str) -> Vec<ElementId>;

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    /// Concatenated text of the element and its descendants
    fn text(&self, element: ElementId) -> String;

    /// Replace all children of the element with a single text node
    fn set_text(&mut self, element: ElementId, text: &str);

    /// Elements below `element`, in document order, excluding itself
    fn descendants(&self, element: ElementId) -> Vec<ElementId>;

    /// Element whose `id` attribute equals `id`
    fn element_by_id(&self, id: &str) -> Option<ElementId>;

    /// Create a detached element
    fn create_element(&mut self, tag: &str) -> ElementId;

    fn append_child(&mut self, parent: ElementId, child: ElementId);

    fn append_to_body(&mut self, child: ElementId);

    fn title(&self) -> String;

    fn set_title(&mut self, title: &str);

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.attribute(element, "class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if self.has_class(element, class) {
            return;
        }
        let classes = match self.attribute(element, "class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {}", existing.trim(), class)
            }
            _ => class.to_string(),
        };
        self.set_attribute(element, "class", &classes);
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        let Some(existing) = self.attribute(element, "class") else {
            return;
        };
        let classes = existing
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(element, "class", &classes);
    }
}
