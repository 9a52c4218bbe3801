//! XML document handling
//!
//! A small owned, namespace-resolved element tree built with quick-xml.
//! Only elements and their attributes are kept; text, comments and
//! processing instructions carry nothing the element graph needs.

use crate::error::{Error, ParseError, Result};
use crate::limits::Limits;
use crate::namespaces::QName;
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

/// XML Element in the document tree
#[derive(Debug, Clone)]
pub struct Element {
    /// Element qualified name, namespace resolved
    pub qname: QName,
    /// Element attributes keyed by their name as written (`name`, `xml:lang`)
    pub attributes: IndexMap<String, String>,
    /// Child elements
    pub children: Vec<Element>,
}

impl Element {
    /// Create a new element
    pub fn new(qname: QName) -> Self {
        Self {
            qname,
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        &self.qname.local_name
    }

    /// Get the namespace of the element
    pub fn namespace(&self) -> Option<&str> {
        self.qname.namespace.as_deref()
    }

    /// Whether this is the XSD component with the given local name
    pub fn is_xsd(&self, local_name: &str) -> bool {
        self.qname.is_xsd(local_name)
    }

    /// Get an attribute value by name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Find direct child elements in the XSD namespace by local name
    pub fn xsd_children<'a>(&'a self, local_name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |e| e.is_xsd(local_name))
    }

    /// Iterate over all descendants in document order, excluding `self`
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }
}

/// Pre-order iterator over the descendants of an [`Element`]
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

/// XML Document representation
#[derive(Debug, Default)]
pub struct Document {
    /// Root element of the document
    pub root: Option<Element>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an XML document from a string
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse(xml.as_bytes())
    }

    /// Parse an XML document from bytes with default limits
    pub fn parse(xml: &[u8]) -> Result<Self> {
        Self::parse_with_limits(xml, &Limits::default())
    }

    /// Parse an XML document from bytes
    pub fn parse_with_limits(xml: &[u8], limits: &Limits) -> Result<Self> {
        let mut reader = NsReader::from_reader(xml);

        let mut doc = Document::new();
        let mut element_stack: Vec<Element> = Vec::new();
        let mut buf = Vec::new();

        loop {
            let position = reader.buffer_position() as u64;
            let (namespace, event) = reader
                .read_resolved_event_into(&mut buf)
                .map_err(|e| malformed(e.to_string(), position))?;
            let namespace = resolve_namespace(namespace, position)?;

            match event {
                Event::Start(e) => {
                    limits.check_xml_depth(element_stack.len() + 1)?;
                    if element_stack.is_empty() && doc.root.is_some() {
                        return Err(malformed("multiple root elements", position));
                    }
                    element_stack.push(Self::parse_element(&e, namespace, position)?);
                }
                Event::End(_) => {
                    if let Some(current) = element_stack.pop() {
                        if let Some(parent) = element_stack.last_mut() {
                            parent.add_child(current);
                        } else {
                            doc.root = Some(current);
                        }
                    }
                }
                Event::Empty(e) => {
                    limits.check_xml_depth(element_stack.len() + 1)?;
                    let element = Self::parse_element(&e, namespace, position)?;
                    if let Some(parent) = element_stack.last_mut() {
                        parent.add_child(element);
                    } else if doc.root.is_some() {
                        return Err(malformed("multiple root elements", position));
                    } else {
                        doc.root = Some(element);
                    }
                }
                Event::Eof => break,
                _ => {} // Ignore other events (text, comments, processing instructions, etc.)
            }
            buf.clear();
        }

        if let Some(open) = element_stack.last() {
            return Err(malformed(
                format!("unexpected end of document, <{}> is not closed", open.local_name()),
                reader.buffer_position() as u64,
            ));
        }

        if doc.root.is_none() {
            return Err(malformed("document has no root element", 0));
        }

        Ok(doc)
    }

    /// Parse element from a start tag whose namespace is already resolved
    fn parse_element(start: &BytesStart, namespace: Option<String>, position: u64) -> Result<Element> {
        let local_name = std::str::from_utf8(start.local_name().as_ref())
            .map_err(|e| malformed(format!("invalid element name: {}", e), position))?
            .to_string();

        let mut element = Element::new(QName::new(namespace, local_name));

        for attr_result in start.attributes() {
            let attr = attr_result
                .map_err(|e| malformed(format!("failed to parse attribute: {}", e), position))?;

            let attr_name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| malformed(format!("invalid attribute name: {}", e), position))?;

            // Namespace declarations are consumed by the reader
            if attr_name == "xmlns" || attr_name.starts_with("xmlns:") {
                continue;
            }

            let attr_value = attr
                .unescape_value()
                .map_err(|e| malformed(format!("failed to unescape attribute value: {}", e), position))?
                .to_string();

            element.attributes.insert(attr_name.to_string(), attr_value);
        }

        Ok(element)
    }

    /// Get the root element
    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    /// Get the root element, which must be `xs:schema`
    pub fn schema_root(&self) -> Result<&Element> {
        let root = self
            .root()
            .ok_or_else(|| Error::Query("document has no root element".to_string()))?;

        if !root.is_xsd("schema") {
            return Err(Error::Query(format!(
                "expected xs:schema root element, got {}",
                root.qname
            )));
        }

        Ok(root)
    }
}

fn malformed(message: impl Into<String>, position: u64) -> Error {
    Error::MalformedXml(ParseError::new(message).with_position(position))
}

fn resolve_namespace(namespace: ResolveResult<'_>, position: u64) -> Result<Option<String>> {
    match namespace {
        ResolveResult::Bound(ns) => Ok(Some(String::from_utf8_lossy(ns.as_ref()).into_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(malformed(
            format!("unknown namespace prefix '{}'", String::from_utf8_lossy(&prefix)),
            position,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::XSD_NAMESPACE;

    #[test]
    fn test_parse_simple_xml() {
        let xml = r#"<root><child>text</child></root>"#;
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root.unwrap();
        assert_eq!(root.local_name(), "root");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].local_name(), "child");
    }

    #[test]
    fn test_parse_with_attributes() {
        let xml = r#"<root attr1="value1" attr2="a &amp; b"><child/></root>"#;
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root.unwrap();
        assert_eq!(root.get_attribute("attr1"), Some("value1"));
        assert_eq!(root.get_attribute("attr2"), Some("a & b"));
    }

    #[test]
    fn test_namespaces_are_resolved() {
        let xml = format!(
            r#"<xs:schema xmlns:xs="{0}"><xs:element name="a"/><element xmlns="{0}" name="b"/><element name="c"/></xs:schema>"#,
            XSD_NAMESPACE
        );
        let doc = Document::from_string(&xml).unwrap();

        let root = doc.schema_root().unwrap();
        assert_eq!(root.namespace(), Some(XSD_NAMESPACE));
        let names: Vec<_> = root
            .xsd_children("element")
            .filter_map(|e| e.get_attribute("name"))
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(root.get_attribute("xmlns:xs").is_none());
    }

    #[test]
    fn test_descendants_pre_order() {
        let xml = r#"<r><a><b/><c/></a><d/></r>"#;
        let doc = Document::from_string(xml).unwrap();

        let names: Vec<_> = doc.root().unwrap().descendants().map(|e| e.local_name()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_mismatched_end_tag_is_malformed() {
        let result = Document::from_string("<root><child></root>");
        assert!(matches!(result, Err(Error::MalformedXml(_))));
    }

    #[test]
    fn test_unclosed_element_is_malformed() {
        let result = Document::from_string("<root><child/>");
        assert!(matches!(result, Err(Error::MalformedXml(_))));
    }

    #[test]
    fn test_empty_document_is_malformed() {
        let result = Document::from_string("   ");
        assert!(matches!(result, Err(Error::MalformedXml(_))));
    }

    #[test]
    fn test_unknown_prefix_is_malformed() {
        let result = Document::from_string("<xs:schema/>");
        assert!(matches!(result, Err(Error::MalformedXml(_))));
    }

    #[test]
    fn test_non_schema_root_is_query_error() {
        let doc = Document::from_string("<root/>").unwrap();
        assert!(matches!(doc.schema_root(), Err(Error::Query(_))));
    }

    #[test]
    fn test_depth_limit() {
        let limits = Limits {
            max_xml_depth: 2,
            ..Limits::default()
        };
        let result = Document::parse_with_limits(b"<a><b><c/></b></a>", &limits);
        assert!(matches!(result, Err(Error::LimitExceeded(_))));
    }
}
