//! Owned XML element tree with dotted-path lookups.
//!
//! Product Advertising API responses are deeply nested and live in a default
//! namespace (`http://webservices.amazon.com/AWSECommerceService/2013-08-01`).
//! The tree stores every element and attribute by its local name so views can
//! address nodes with plain paths such as `"Offers.Offer.OfferListing.Price.Amount"`.

use crate::error::{AmazonError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::BTreeMap;
use std::fmt;

/// A parsed XML element and its subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: BTreeMap<String, String>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Creates an empty element with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Parses a complete XML document and returns its root element.
    pub fn parse(xml: &str) -> Result<Element> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => stack.push(Self::from_start(e)?),
                Ok(Event::Empty(ref e)) => {
                    let element = Self::from_start(e)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let mut element = stack
                        .pop()
                        .ok_or_else(|| AmazonError::Xml("unexpected closing tag".to_string()))?;
                    // CDATA chunks are not trimmed by the reader.
                    if element.text.trim().len() != element.text.len() {
                        element.text = element.text.trim().to_string();
                    }
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(t)) => {
                    let text = t.unescape().map_err(|e| AmazonError::Xml(e.to_string()))?;
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&text);
                    }
                }
                Ok(Event::CData(c)) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&c));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(AmazonError::Xml(format!(
                        "XML error at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(AmazonError::Xml(format!("unclosed element <{}>", open.name)));
        }

        root.ok_or_else(|| AmazonError::Xml("document has no root element".to_string()))
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Element> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attributes = BTreeMap::new();

        for attr in start.attributes() {
            let attr = attr.map_err(|e| AmazonError::Xml(e.to_string()))?;
            // Namespace declarations carry no data.
            if attr.key.as_ref().starts_with(b"xmlns") {
                continue;
            }
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.unescape_value().map_err(|e| AmazonError::Xml(e.to_string()))?;
            attributes.insert(key, value.into_owned());
        }

        Ok(Element { name, attributes, text: String::new(), children: Vec::new() })
    }

    /// Local name of the element.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text content (trimmed; empty when the element has none).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Value of an XML attribute.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// All XML attributes, ordered by name.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Direct children in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Moves every direct child with the given name out of this element.
    pub fn into_children_named(self, name: &str) -> Vec<Element> {
        self.children.into_iter().filter(|c| c.name == name).collect()
    }

    /// Follows a dotted path, taking the first matching child at every step.
    ///
    /// The empty path resolves to `self`.
    pub fn find(&self, path: &str) -> Option<&Element> {
        if path.is_empty() {
            return Some(self);
        }
        path.split('.').try_fold(self, |node, segment| node.child(segment))
    }

    /// Resolves the parent of the last path segment, then returns every
    /// child of that parent named by the last segment.
    pub fn find_all(&self, path: &str) -> Vec<&Element> {
        let (parent, last) = match path.rsplit_once('.') {
            Some((parent, last)) => (self.find(parent), last),
            None => (Some(self), path),
        };

        match parent {
            Some(parent) => parent.children_named(last).collect(),
            None => Vec::new(),
        }
    }

    /// Text at a dotted path, `None` when the element is missing or empty.
    pub fn find_text(&self, path: &str) -> Option<&str> {
        self.find(path).map(Element::text).filter(|t| !t.is_empty())
    }

    /// Non-empty texts of every element matched by [`Element::find_all`].
    pub fn find_all_text(&self, path: &str) -> Vec<&str> {
        self.find_all(path).into_iter().map(Element::text).filter(|t| !t.is_empty()).collect()
    }

    /// Pretty-printed XML for this subtree.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_into(&mut out, 0);
        out
    }

    fn write_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push_str(&format!(" {}=\"{}\"", key, quick_xml::escape::escape(value.as_str())));
        }

        if self.children.is_empty() && self.text.is_empty() {
            out.push_str("/>\n");
            return;
        }

        out.push('>');
        if self.children.is_empty() {
            out.push_str(&quick_xml::escape::escape(self.text.as_str()));
        } else {
            out.push('\n');
            if !self.text.is_empty() {
                out.push_str(&indent);
                out.push_str("  ");
                out.push_str(&quick_xml::escape::escape(self.text.as_str()));
                out.push('\n');
            }
            for child in &self.children {
                child.write_into(out, depth + 1);
            }
            out.push_str(&indent);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push_str(">\n");
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml())
    }
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(AmazonError::Xml(format!(
            "multiple root elements (second root <{}>)",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}
