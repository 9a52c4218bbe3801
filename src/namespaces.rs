//! XML namespace handling
//!
//! Qualified names for parsed document nodes, and splitting of prefixed
//! attribute values such as `ref="ns:Foo"`.

use std::fmt;

/// XSD 1.0 namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// XML Namespace URI
pub type NamespaceUri = String;

/// Qualified name (QName) - combination of namespace and local name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<NamespaceUri>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a new QName
    pub fn new(namespace: Option<impl Into<String>>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(|s| s.into()),
            local_name: local_name.into(),
        }
    }

    /// Whether this names the given XSD component (e.g. `element`, `include`)
    pub fn is_xsd(&self, local_name: &str) -> bool {
        self.namespace.as_deref() == Some(XSD_NAMESPACE) && self.local_name == local_name
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

/// A possibly prefixed name as written in an attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixedName<'a> {
    /// Namespace prefix, if any
    pub prefix: Option<&'a str>,
    /// Name after the prefix
    pub local_name: &'a str,
}

impl<'a> PrefixedName<'a> {
    /// Split `prefix:local` at the first colon
    pub fn parse(value: &'a str) -> Self {
        match value.split_once(':') {
            Some((prefix, local_name)) => Self {
                prefix: Some(prefix),
                local_name,
            },
            None => Self {
                prefix: None,
                local_name: value,
            },
        }
    }

    /// Whether the name carries a namespace prefix
    pub fn is_qualified(&self) -> bool {
        self.prefix.is_some()
    }
}
