//! Element graph construction
//!
//! Every named `xs:element` becomes a vertex identified by the names of its
//! named ancestors plus its own name (`Order/Item/Sku`). The synthetic root
//! vertex has the empty path and points at every top-level declaration.
//! `ref` attributes add reference edges between bare element names.
//!
//! The graph is built in two passes over all files: first every top-level
//! element is registered, then nested elements and references are added, so
//! a reference may point at a root element declared in any file.

use crate::documents::{Document, Element};
use crate::error::{Error, Result};
use crate::events::{EventSink, NullSink, SchemaEvent};
use crate::limits::Limits;
use crate::namespaces::PrefixedName;
use crate::resolver::{FileGraph, SchemaFile};
use indexmap::IndexMap;
use log::{debug, info, trace, warn};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::fmt;

/// Separator between segments of an element path string
pub const PATH_SEPARATOR: &str = "/";

/// Position of an element in the nesting hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ElementPath {
    segments: Vec<String>,
}

impl ElementPath {
    /// The synthetic root path (no segments)
    pub fn root() -> Self {
        Self::default()
    }

    /// Create a path from its segments, outermost first
    pub fn new<I, T>(segments: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a path string back into segments
    pub fn parse(path: &str) -> Self {
        if path.is_empty() {
            return Self::root();
        }
        Self::new(path.split(PATH_SEPARATOR))
    }

    /// Segments, outermost first
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Whether this is the synthetic root
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Element name, the last segment (empty for the root)
    pub fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// Graph key: segments joined by [`PATH_SEPARATOR`]
    pub fn path_string(&self) -> String {
        self.segments.join(PATH_SEPARATOR)
    }

    /// Path of the enclosing element, `None` for the root
    pub fn parent(&self) -> Option<ElementPath> {
        let (_, parent) = self.segments.split_last()?;
        Some(Self::new(parent.iter().cloned()))
    }

    /// Path of a child element
    pub fn child(&self, name: impl Into<String>) -> ElementPath {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self { segments }
    }

    /// Every prefix of this path with at least two segments, shortest first
    ///
    /// For `a/b/c` this yields `a/b` and `a/b/c`; the single-segment root
    /// element is registered separately.
    pub fn nested_prefixes(&self) -> impl Iterator<Item = ElementPath> + '_ {
        (2..=self.segments.len()).map(move |len| Self::new(self.segments[..len].iter().cloned()))
    }

    /// Whether this path's last segment equals `name` below some parent
    pub fn ends_with_nested(&self, name: &str) -> bool {
        self.segments.len() > 1 && self.name() == name
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_string())
    }
}

/// Meaning of an element graph edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Parent path to direct child path
    Containment,
    /// Owning element name to a referenced element name
    Reference,
}

/// Directed graph of element paths
#[derive(Debug, Clone)]
pub struct ElementGraph {
    graph: DiGraph<ElementPath, EdgeKind>,
    index: IndexMap<String, NodeIndex>,
    root: NodeIndex,
}

impl Default for ElementGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementGraph {
    /// Create a graph holding only the synthetic root
    pub fn new() -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(ElementPath::root());
        let mut index = IndexMap::new();
        index.insert(String::new(), root);

        Self { graph, index, root }
    }

    /// The synthetic root vertex
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// Number of vertices, the root included
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges of both kinds
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether a vertex exists for this path string
    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// Vertex index for a path string
    pub fn node_index(&self, path: &str) -> Option<NodeIndex> {
        self.index.get(path).copied()
    }

    /// Element path stored at a vertex
    pub fn element(&self, node: NodeIndex) -> &ElementPath {
        &self.graph[node]
    }

    /// All vertices in insertion order, the root first
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.index.values().copied()
    }

    /// All element paths in insertion order, the root first
    pub fn elements(&self) -> impl Iterator<Item = &ElementPath> + '_ {
        self.nodes().map(move |node| self.element(node))
    }

    /// Top-level elements: vertices one containment hop from the root
    pub fn root_elements(&self) -> Vec<NodeIndex> {
        self.successors(self.root)
            .into_iter()
            .filter(|&(_, kind)| kind == EdgeKind::Containment)
            .map(|(node, _)| node)
            .collect()
    }

    /// Outgoing neighbours with the edge kind, in edge insertion order
    pub fn successors(&self, node: NodeIndex) -> Vec<(NodeIndex, EdgeKind)> {
        let mut edges: Vec<_> = self
            .graph
            .edges(node)
            .map(|edge| (edge.id(), edge.target(), *edge.weight()))
            .collect();
        edges.sort_by_key(|&(id, _, _)| id);
        edges.into_iter().map(|(_, target, kind)| (target, kind)).collect()
    }

    /// Kind of the edge `from -> to`, if any
    pub fn edge_kind(&self, from: NodeIndex, to: NodeIndex) -> Option<EdgeKind> {
        self.graph.find_edge(from, to).map(|edge| self.graph[edge])
    }

    /// Add a vertex; its path string must not be registered yet
    pub fn add_element(&mut self, path: ElementPath) -> Result<NodeIndex> {
        let key = path.path_string();
        if self.index.contains_key(&key) {
            return Err(Error::Graph(format!("element '{}' already exists", key)));
        }

        let node = self.graph.add_node(path);
        self.index.insert(key, node);
        Ok(node)
    }

    /// Add an edge between two registered path strings
    ///
    /// Returns `false` when the edge already exists.
    pub fn add_edge(&mut self, from: &str, to: &str, kind: EdgeKind) -> Result<bool> {
        let source = self
            .node_index(from)
            .ok_or_else(|| Error::Graph(format!("source element '{}' does not exist", from)))?;
        let target = self
            .node_index(to)
            .ok_or_else(|| Error::Graph(format!("target element '{}' does not exist", to)))?;

        if self.graph.contains_edge(source, target) {
            return Ok(false);
        }

        self.graph.add_edge(source, target, kind);
        Ok(true)
    }
}

/// What one walk over a root element's subtree found
#[derive(Debug, Default)]
struct SubtreeScan {
    /// Paths of named elements without named descendants, in document order
    leaves: Vec<ElementPath>,
    /// `(owner name, referenced name)` for every `ref` element
    references: Vec<(String, String)>,
}

impl SubtreeScan {
    fn of(root: &Element, root_name: &str) -> Self {
        let mut scan = Self::default();
        let mut ancestors = vec![root_name.to_string()];
        scan.walk(root, &mut ancestors);
        scan
    }

    /// Walk the children of `element`; `ancestors` holds the named element chain.
    /// Returns whether any named element was found below `element`.
    fn walk(&mut self, element: &Element, ancestors: &mut Vec<String>) -> bool {
        let mut found_named = false;

        for child in &element.children {
            let is_element = child.is_xsd("element");

            match (is_element, child.get_attribute("name")) {
                (true, Some(name)) => {
                    ancestors.push(name.to_string());
                    if !self.walk(child, ancestors) {
                        self.leaves.push(ElementPath::new(ancestors.iter().cloned()));
                    }
                    ancestors.pop();
                    found_named = true;
                }
                _ => {
                    if is_element {
                        if let (Some(target), Some(owner)) = (child.get_attribute("ref"), ancestors.last()) {
                            self.references.push((owner.clone(), target.to_string()));
                        }
                    }
                    found_named |= self.walk(child, ancestors);
                }
            }
        }

        found_named
    }
}

/// Builds an [`ElementGraph`] from a resolved [`FileGraph`]
#[derive(Debug)]
pub struct ElementGraphBuilder<S = NullSink> {
    limits: Limits,
    sink: S,
}

impl ElementGraphBuilder<NullSink> {
    /// Create a builder with default limits that reports nothing
    pub fn new() -> Self {
        Self {
            limits: Limits::default(),
            sink: NullSink,
        }
    }
}

impl Default for ElementGraphBuilder<NullSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> ElementGraphBuilder<S> {
    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Report events to another sink
    pub fn with_sink<T: EventSink>(self, sink: T) -> ElementGraphBuilder<T> {
        ElementGraphBuilder {
            limits: self.limits,
            sink,
        }
    }

    /// Give back the event sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Build the element graph of every file in `files`
    pub fn build(&mut self, files: &FileGraph) -> Result<ElementGraph> {
        let documents = files
            .files()
            .map(|file| self.parse(file))
            .collect::<Result<Vec<_>>>()?;
        let schemas = documents
            .iter()
            .map(Document::schema_root)
            .collect::<Result<Vec<_>>>()?;

        let mut graph = ElementGraph::new();

        for schema in &schemas {
            self.add_root_elements(&mut graph, schema)?;
        }

        for schema in &schemas {
            self.add_nested_elements(&mut graph, schema)?;
        }

        info!(
            files = files.len(),
            elements = graph.vertex_count() - 1,
            edges = graph.edge_count();
            "Built element graph"
        );
        Ok(graph)
    }

    fn parse(&self, file: &SchemaFile) -> Result<Document> {
        let location = file.path().display().to_string();
        let document = Document::parse_with_limits(file.content(), &self.limits)
            .map_err(|e| e.with_location(location.as_str()))?;

        if let Err(Error::Query(message)) = document.schema_root() {
            return Err(Error::Query(format!("{} in '{}'", message, location)));
        }

        Ok(document)
    }

    /// Register the file's top-level element declarations.
    ///
    /// The first name that is already registered ends the pass for the whole
    /// file: later declarations of the same file are not registered either.
    fn add_root_elements(&mut self, graph: &mut ElementGraph, schema: &Element) -> Result<()> {
        for name in root_element_names(schema) {
            if graph.contains(name) {
                self.sink.emit(&SchemaEvent::ElementDuplicate(name.to_string()));
                debug!(name = name; "Duplicate root element, skipping rest of file");
                return Ok(());
            }

            self.sink.emit(&SchemaEvent::ElementAdded(name.to_string()));
            graph.add_element(ElementPath::new([name]))?;
            graph.add_edge("", name, EdgeKind::Containment)?;
        }

        Ok(())
    }

    fn add_nested_elements(&mut self, graph: &mut ElementGraph, schema: &Element) -> Result<()> {
        for root in schema.xsd_children("element") {
            let Some(name) = root.get_attribute("name") else {
                continue;
            };

            self.sink.emit(&SchemaEvent::ElementHeadline(name.to_string()));

            if !graph.contains(name) {
                warn!(name = name; "Root element was not registered, skipping its content");
                continue;
            }

            let scan = SubtreeScan::of(root, name);
            self.add_leaf_elements(graph, &scan.leaves)?;
            self.add_references(graph, &scan.references);
        }

        Ok(())
    }

    /// Create every missing vertex on the way from a root element to each leaf
    fn add_leaf_elements(&mut self, graph: &mut ElementGraph, leaves: &[ElementPath]) -> Result<()> {
        self.sink.emit(&SchemaEvent::LeafCount(leaves.len()));

        for leaf in leaves {
            for path in leaf.nested_prefixes() {
                let key = path.path_string();
                if graph.contains(&key) {
                    continue;
                }

                let parent = path
                    .parent()
                    .map(|parent| parent.path_string())
                    .unwrap_or_default();

                self.sink.emit(&SchemaEvent::ElementAdded(key.clone()));
                graph.add_element(path)?;

                self.sink.emit(&SchemaEvent::EdgeAdded {
                    from: parent.clone(),
                    to: key.clone(),
                    kind: EdgeKind::Containment,
                });
                trace!(from = parent.as_str(), to = key.as_str(); "Containment edge");
                graph.add_edge(&parent, &key, EdgeKind::Containment)?;
            }
        }

        Ok(())
    }

    /// Best-effort reference edges between bare element names
    fn add_references(&mut self, graph: &mut ElementGraph, references: &[(String, String)]) {
        self.sink.emit(&SchemaEvent::ReferenceCount(references.len()));

        for (owner, target) in references {
            if PrefixedName::parse(target).is_qualified() {
                debug!(target = target.as_str(); "Skipping qualified element reference");
                continue;
            }

            self.sink.emit(&SchemaEvent::EdgeAdded {
                from: owner.clone(),
                to: target.clone(),
                kind: EdgeKind::Reference,
            });

            match graph.add_edge(owner, target, EdgeKind::Reference) {
                Ok(true) => trace!(from = owner.as_str(), to = target.as_str(); "Reference edge"),
                Ok(false) => {}
                Err(e) => warn!(from = owner.as_str(), to = target.as_str(); "Unresolved element reference: {}", e),
            }
        }
    }
}

/// Names of top-level `xs:element` declarations carrying a `name`
fn root_element_names(schema: &Element) -> impl Iterator<Item = &str> + '_ {
    schema
        .xsd_children("element")
        .filter_map(|element| element.get_attribute("name"))
}

/// Build the element graph of `files` with default settings
pub fn build_element_graph(files: &FileGraph) -> Result<ElementGraph> {
    ElementGraphBuilder::new().build(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RecordingSink;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::collections::{HashSet, VecDeque};

    fn schema(body: &str) -> String {
        format!(
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">{}</xs:schema>"#,
            body
        )
    }

    fn files(bodies: &[&str]) -> FileGraph {
        let mut graph = FileGraph::new();
        for (i, body) in bodies.iter().enumerate() {
            graph.add_file(SchemaFile::new(format!("/schemas/{}.xsd", i), schema(body)));
        }
        graph
    }

    fn paths(graph: &ElementGraph) -> Vec<String> {
        graph.elements().map(|e| e.path_string()).collect()
    }

    fn containment_reachable(graph: &ElementGraph) -> HashSet<NodeIndex> {
        let mut seen = HashSet::from([graph.root()]);
        let mut queue = VecDeque::from([graph.root()]);
        while let Some(node) = queue.pop_front() {
            for (next, kind) in graph.successors(node) {
                if kind == EdgeKind::Containment && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    #[test]
    fn test_element_path() {
        let path = ElementPath::parse("a/b/c");
        assert_eq!(path.name(), "c");
        assert_eq!(path.depth(), 3);
        assert_eq!(path.parent(), Some(ElementPath::new(["a", "b"])));
        assert_eq!(path.to_string(), "a/b/c");
        assert_eq!(
            path.nested_prefixes().map(|p| p.path_string()).collect::<Vec<_>>(),
            vec!["a/b", "a/b/c"]
        );
        assert!(path.ends_with_nested("c"));
        assert!(!ElementPath::new(["c"]).ends_with_nested("c"));

        let root = ElementPath::root();
        assert!(root.is_root());
        assert_eq!(root.name(), "");
        assert_eq!(root.parent(), None);
        assert_eq!(root.child("x"), ElementPath::new(["x"]));
        assert_eq!(ElementPath::parse(""), root);
    }

    #[test]
    fn test_graph_rejects_duplicate_vertex_and_missing_endpoints() {
        let mut graph = ElementGraph::new();
        graph.add_element(ElementPath::new(["a"])).unwrap();

        assert!(matches!(graph.add_element(ElementPath::new(["a"])), Err(Error::Graph(_))));
        assert!(matches!(graph.add_edge("a", "b", EdgeKind::Reference), Err(Error::Graph(_))));
        assert!(graph.add_edge("", "a", EdgeKind::Containment).unwrap());
        assert!(!graph.add_edge("", "a", EdgeKind::Containment).unwrap());
    }

    #[test]
    fn test_root_and_nested_elements() {
        let files = files(&[r#"
            <xs:element name="Order">
              <xs:complexType><xs:sequence>
                <xs:element name="Item">
                  <xs:complexType><xs:sequence>
                    <xs:element name="Sku" type="xs:string"/>
                    <xs:element name="Qty" type="xs:int"/>
                  </xs:sequence></xs:complexType>
                </xs:element>
                <xs:element name="Note" type="xs:string"/>
              </xs:sequence></xs:complexType>
            </xs:element>
            <xs:element name="Empty"/>
        "#]);

        let graph = build_element_graph(&files).unwrap();

        assert_eq!(
            paths(&graph),
            vec!["", "Order", "Empty", "Order/Item", "Order/Item/Sku", "Order/Item/Qty", "Order/Note"]
        );
        let order = graph.node_index("Order").unwrap();
        let item = graph.node_index("Order/Item").unwrap();
        assert_eq!(graph.edge_kind(order, item), Some(EdgeKind::Containment));
        assert_eq!(
            graph.root_elements(),
            vec![order, graph.node_index("Empty").unwrap()]
        );
    }

    #[test]
    fn test_references_connect_bare_names() {
        let files = files(&[
            r#"
            <xs:element name="Cart">
              <xs:complexType><xs:sequence>
                <xs:element ref="Item"/>
                <xs:element ref="ns:Foreign"/>
                <xs:element ref="Missing"/>
                <xs:element ref="Item"/>
              </xs:sequence></xs:complexType>
            </xs:element>
            "#,
            r#"<xs:element name="Item"/><xs:element name="ns:Foreign"/>"#,
        ]);

        let graph = build_element_graph(&files).unwrap();

        let cart = graph.node_index("Cart").unwrap();
        let item = graph.node_index("Item").unwrap();
        assert_eq!(graph.edge_kind(cart, item), Some(EdgeKind::Reference));
        let foreign = graph.node_index("ns:Foreign").unwrap();
        assert_eq!(graph.edge_kind(cart, foreign), None);
        // root -> Cart, root -> Item, root -> ns:Foreign, Cart => Item
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn test_reference_owner_is_nearest_named_ancestor() {
        let files = files(&[r#"
            <xs:element name="Order">
              <xs:complexType><xs:sequence>
                <xs:element name="Line">
                  <xs:complexType><xs:sequence><xs:element ref="Product"/></xs:sequence></xs:complexType>
                </xs:element>
              </xs:sequence></xs:complexType>
            </xs:element>
            <xs:element name="Line"/>
            <xs:element name="Product"/>
        "#]);

        let graph = build_element_graph(&files).unwrap();

        let line = graph.node_index("Line").unwrap();
        let product = graph.node_index("Product").unwrap();
        let order = graph.node_index("Order").unwrap();
        assert_eq!(graph.edge_kind(line, product), Some(EdgeKind::Reference));
        assert_eq!(graph.edge_kind(order, product), None);
    }

    #[test]
    fn test_duplicate_root_element_stops_file_pass() {
        let files = files(&[
            r#"<xs:element name="A"/>"#,
            r#"<xs:element name="A"/><xs:element name="B"><xs:complexType><xs:sequence><xs:element name="C"/></xs:sequence></xs:complexType></xs:element>"#,
        ]);

        let mut builder = ElementGraphBuilder::new().with_sink(RecordingSink::new());
        let graph = builder.build(&files).unwrap();

        assert_eq!(paths(&graph), vec!["", "A"]);
        let events = builder.into_sink().events;
        assert!(events.contains(&SchemaEvent::ElementDuplicate("A".to_string())));
        assert!(!events.contains(&SchemaEvent::ElementAdded("B/C".to_string())));
    }

    #[test]
    fn test_repeated_root_declaration_merges_content() {
        let files = files(&[
            r#"<xs:element name="A"><xs:complexType><xs:sequence><xs:element name="X"/></xs:sequence></xs:complexType></xs:element>"#,
            r#"<xs:element name="A"><xs:complexType><xs:sequence><xs:element name="Y"/></xs:sequence></xs:complexType></xs:element>"#,
        ]);

        let graph = build_element_graph(&files).unwrap();
        assert_eq!(paths(&graph), vec!["", "A", "A/X", "A/Y"]);
    }

    #[test]
    fn test_events_in_order() {
        let files = files(&[r#"
            <xs:element name="R">
              <xs:complexType><xs:sequence>
                <xs:element name="S"/>
                <xs:element ref="R"/>
              </xs:sequence></xs:complexType>
            </xs:element>
        "#]);

        let mut builder = ElementGraphBuilder::new().with_sink(RecordingSink::new());
        let graph = builder.build(&files).unwrap();

        assert_eq!(
            builder.into_sink().events,
            vec![
                SchemaEvent::ElementAdded("R".to_string()),
                SchemaEvent::ElementHeadline("R".to_string()),
                SchemaEvent::LeafCount(1),
                SchemaEvent::ElementAdded("R/S".to_string()),
                SchemaEvent::EdgeAdded {
                    from: "R".to_string(),
                    to: "R/S".to_string(),
                    kind: EdgeKind::Containment,
                },
                SchemaEvent::ReferenceCount(1),
                SchemaEvent::EdgeAdded {
                    from: "R".to_string(),
                    to: "R".to_string(),
                    kind: EdgeKind::Reference,
                },
            ]
        );
        let r = graph.node_index("R").unwrap();
        assert_eq!(graph.edge_kind(r, r), Some(EdgeKind::Reference));
    }

    #[test]
    fn test_non_schema_root_is_query_error() {
        let mut graph = FileGraph::new();
        graph.add_file(SchemaFile::new("/schemas/x.xml", "<root/>"));

        let result = build_element_graph(&graph);
        assert!(matches!(result, Err(Error::Query(ref m)) if m.contains("/schemas/x.xml")));
    }

    #[test]
    fn test_malformed_content_is_fatal() {
        let mut graph = FileGraph::new();
        graph.add_file(SchemaFile::new("/schemas/x.xsd", "<xs:schema"));

        assert!(matches!(build_element_graph(&graph), Err(Error::MalformedXml(_))));
    }

    /// A generated element tree: name index plus children
    #[derive(Debug, Clone)]
    struct Tree(usize, Vec<Tree>);

    fn tree() -> impl Strategy<Value = Tree> {
        let leaf = (0..4usize).prop_map(|name| Tree(name, Vec::new()));
        leaf.prop_recursive(4, 24, 3, |inner| {
            ((0..4usize), prop::collection::vec(inner, 0..3)).prop_map(|(name, children)| Tree(name, children))
        })
    }

    fn render(tree: &Tree, out: &mut String) {
        let name = ["a", "b", "c", "d"][tree.0];
        if tree.1.is_empty() {
            out.push_str(&format!(r#"<xs:element name="{}"/>"#, name));
            return;
        }
        out.push_str(&format!(r#"<xs:element name="{}"><xs:complexType><xs:sequence>"#, name));
        for child in &tree.1 {
            render(child, out);
        }
        out.push_str(r#"<xs:element ref="a"/></xs:sequence></xs:complexType></xs:element>"#);
    }

    proptest! {
        #[test]
        fn prop_paths_unique_and_reachable(roots in prop::collection::vec(tree(), 1..4)) {
            let bodies: Vec<String> = roots
                .iter()
                .map(|root| {
                    let mut body = String::new();
                    render(root, &mut body);
                    body
                })
                .collect();
            let bodies: Vec<&str> = bodies.iter().map(String::as_str).collect();

            let graph = build_element_graph(&files(&bodies)).unwrap();

            let keys = paths(&graph);
            let unique: HashSet<_> = keys.iter().collect();
            prop_assert_eq!(unique.len(), keys.len());
            prop_assert_eq!(containment_reachable(&graph).len(), graph.vertex_count());
        }
    }
}
