//! In-memory page built from XHTML markup.

use crate::page::{Document, ElementId};
use anyhow::{Context, Result};
use quick_xml::escape::{escape, resolve_html5_entity};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Elements rendered as `<tag/>` when they have no children
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Elements whose text is written as-is, or as CDATA when it holds markup
/// characters
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

#[derive(Debug, Clone)]
enum Node {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<usize>,
    },
    Text(String),
}

/// Arena-backed document tree.
///
/// Nodes replaced by [`Document::set_text`] stay in the arena but are no
/// longer reachable from the roots, so queries never see them.
#[derive(Debug, Clone, Default)]
pub struct Page {
    nodes: Vec<Node>,
    roots: Vec<usize>,
    doctype: Option<String>,
}

impl Page {
    /// An empty `<html><head><title/></head><body/></html>` page
    pub fn new() -> Self {
        let mut page = Self {
            doctype: Some("html".to_string()),
            ..Self::default()
        };
        let html = page.create_element("html");
        let head = page.create_element("head");
        let title = page.create_element("title");
        let body = page.create_element("body");
        page.append_child(head, title);
        page.append_child(html, head);
        page.append_child(html, body);
        page.roots.push(html.0);
        page
    }

    /// Parse well-formed XHTML.
    ///
    /// Attributes must have values. Named HTML5 entities (`&nbsp;`,
    /// `&copy;`, ...) and numeric references are decoded; any other entity is
    /// an error. Comments and processing instructions are dropped.
    pub fn parse(markup: &str) -> Result<Self> {
        let mut reader = Reader::from_str(markup);
        let mut page = Self::default();
        let mut open: Vec<usize> = Vec::new();

        loop {
            let event = reader.read_event().with_context(|| {
                format!("Malformed page markup at byte {}", reader.buffer_position())
            })?;

            match event {
                Event::Start(e) => {
                    let id = page.element_from_tag(&e)?;
                    page.attach(open.last().copied(), id);
                    open.push(id);
                }
                Event::Empty(e) => {
                    let id = page.element_from_tag(&e)?;
                    page.attach(open.last().copied(), id);
                }
                Event::End(_) => {
                    open.pop();
                }
                Event::Text(e) => {
                    let text = e
                        .unescape_with(resolve_html5_entity)
                        .context("Invalid text in page markup")?;
                    // Whitespace outside the root element is not kept
                    let outside_root = open.is_empty() && text.trim().is_empty();
                    if !text.is_empty() && !outside_root {
                        let id = page.push(Node::Text(text.into_owned()));
                        page.attach(open.last().copied(), id);
                    }
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    let id = page.push(Node::Text(text));
                    page.attach(open.last().copied(), id);
                }
                Event::DocType(e) => {
                    page.doctype = Some(String::from_utf8_lossy(&e).trim().to_string());
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(page)
    }

    /// Serialize the reachable tree back to markup
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(doctype) = &self.doctype {
            out.push_str(&format!("<!DOCTYPE {}>\n", doctype));
        }
        for &root in &self.roots {
            self.render_node(root, false, &mut out);
        }
        out
    }

    fn render_node(&self, index: usize, raw_text: bool, out: &mut String) {
        match &self.nodes[index] {
            Node::Text(text) if raw_text => push_raw_text(text, out),
            Node::Text(text) => out.push_str(&escape(text.as_str())),
            Node::Element {
                tag,
                attributes,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push_str(&format!(" {}=\"{}\"", name, escape(value.as_str())));
                }

                if children.is_empty() && VOID_ELEMENTS.contains(&tag.as_str()) {
                    out.push_str("/>");
                    return;
                }

                out.push('>');
                let raw = RAW_TEXT_ELEMENTS.contains(&tag.as_str());
                for &child in children {
                    self.render_node(child, raw, out);
                }
                out.push_str(&format!("</{}>", tag));
            }
        }
    }

    fn element_from_tag(&mut self, start: &BytesStart<'_>) -> Result<usize> {
        let tag = std::str::from_utf8(start.name().as_ref())
            .context("Non UTF-8 tag name")?
            .to_string();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.with_context(|| format!("Invalid attribute on <{}>", tag))?;
            let name = std::str::from_utf8(attr.key.as_ref())
                .context("Non UTF-8 attribute name")?
                .to_string();
            let value = attr
                .unescape_value_with(resolve_html5_entity)
                .with_context(|| format!("Invalid value for attribute {}", name))?
                .into_owned();
            attributes.push((name, value));
        }

        Ok(self.push(Node::Element {
            tag,
            attributes,
            children: Vec::new(),
        }))
    }

    fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn attach(&mut self, parent: Option<usize>, child: usize) {
        match parent {
            Some(parent) => {
                if let Node::Element { children, .. } = &mut self.nodes[parent] {
                    children.push(child);
                }
            }
            None => self.roots.push(child),
        }
    }

    /// Reachable element indices in document order
    fn elements(&self) -> Vec<usize> {
        self.elements_below(&self.roots)
    }

    /// Elements in the subtrees rooted at `starts`, in document order
    fn elements_below(&self, starts: &[usize]) -> Vec<usize> {
        let mut found = Vec::new();
        let mut stack: Vec<usize> = starts.iter().rev().copied().collect();
        while let Some(index) = stack.pop() {
            if let Node::Element { children, .. } = &self.nodes[index] {
                found.push(index);
                stack.extend(children.iter().rev().copied());
            }
        }
        found
    }

    fn tag(&self, index: usize) -> Option<&str> {
        match &self.nodes[index] {
            Node::Element { tag, .. } => Some(tag.as_str()),
            Node::Text(_) => None,
        }
    }

    fn first_element_named(&self, name: &str) -> Option<usize> {
        self.elements()
            .into_iter()
            .find(|&index| self.tag(index).is_some_and(|tag| tag.eq_ignore_ascii_case(name)))
    }

    fn collect_text(&self, index: usize, out: &mut String) {
        match &self.nodes[index] {
            Node::Text(text) => out.push_str(text),
            Node::Element { children, .. } => {
                for &child in children {
                    self.collect_text(child, out);
                }
            }
        }
    }
}

/// Script and style text is not escaped; text that would not survive a
/// re-parse goes into CDATA sections instead
fn push_raw_text(text: &str, out: &mut String) {
    if !text.contains('<') && !text.contains('&') {
        out.push_str(text);
        return;
    }
    out.push_str("<![CDATA[");
    out.push_str(&text.replace("]]>", "]]]]><![CDATA[>"));
    out.push_str("]]>");
}

impl Document for Page {
    fn elements_with_attribute(&self, name: &str) -> Vec<ElementId> {
        self.elements()
            .into_iter()
            .filter(|&index| self.attribute(ElementId(index), name).is_some())
            .map(ElementId)
            .collect()
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        match self.nodes.get(element.0)? {
            Node::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone()),
            Node::Text(_) => None,
        }
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(Node::Element { attributes, .. }) = self.nodes.get_mut(element.0) {
            match attributes.iter_mut().find(|(key, _)| key == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn text(&self, element: ElementId) -> String {
        let mut out = String::new();
        if element.0 < self.nodes.len() {
            self.collect_text(element.0, &mut out);
        }
        out
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if !matches!(self.nodes.get(element.0), Some(Node::Element { .. })) {
            return;
        }
        let replacement = if text.is_empty() {
            Vec::new()
        } else {
            vec![self.push(Node::Text(text.to_string()))]
        };
        if let Node::Element { children, .. } = &mut self.nodes[element.0] {
            *children = replacement;
        }
    }

    fn descendants(&self, element: ElementId) -> Vec<ElementId> {
        match self.nodes.get(element.0) {
            Some(Node::Element { children, .. }) => self
                .elements_below(children)
                .into_iter()
                .map(ElementId)
                .collect(),
            _ => Vec::new(),
        }
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.elements()
            .into_iter()
            .map(ElementId)
            .find(|&element| self.attribute(element, "id").as_deref() == Some(id))
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        ElementId(self.push(Node::Element {
            tag: tag.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }))
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        self.attach(Some(parent.0), child.0);
    }

    /// Falls back to the top level when the page has no `<body>`
    fn append_to_body(&mut self, child: ElementId) {
        let body = self.first_element_named("body");
        self.attach(body, child.0);
    }

    fn title(&self) -> String {
        self.first_element_named("title")
            .map(|index| self.text(ElementId(index)))
            .unwrap_or_default()
    }

    /// Creates a `<title>` in `<head>` (or at the top level) if missing
    fn set_title(&mut self, title: &str) {
        let element = match self.first_element_named("title") {
            Some(index) => ElementId(index),
            None => {
                let created = self.create_element("title");
                let head = self.first_element_named("head");
                self.attach(head, created.0);
                created
            }
        };
        self.set_text(element, title);
    }
}
