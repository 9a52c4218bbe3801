//! Path queries over the element graph
//!
//! A query asks how the top-level elements reach a named element. Every
//! top-level element is a source; the targets are the element registered
//! under the literal name plus, unless the query is exact, every nested
//! element whose last path segment is that name. One shortest path is
//! kept per (source, target) pair and the results are ranked by length.

use crate::elements::{EdgeKind, ElementGraph};
use log::debug;
use petgraph::graph::NodeIndex;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

/// Default number of paths shown
pub const DEFAULT_LIMIT: usize = 5;

/// How a path step was reached from the previous step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// First step of a path, a top-level element
    Root,
    /// Reached through a containment edge
    Containment,
    /// Reached through a reference edge
    Reference,
}

impl From<EdgeKind> for StepKind {
    fn from(kind: EdgeKind) -> Self {
        match kind {
            EdgeKind::Containment => StepKind::Containment,
            EdgeKind::Reference => StepKind::Reference,
        }
    }
}

/// One element on a found path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStep {
    /// Full element path string
    pub path: String,
    /// Element name
    pub name: String,
    /// Edge taken to get here
    pub step: StepKind,
}

/// A path from a top-level element to a matching element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ElementPathRecord {
    steps: Vec<PathStep>,
}

impl ElementPathRecord {
    /// Steps from source to target
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Number of elements on the path
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the path has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Full path strings of every step
    pub fn path_strings(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.path.as_str()).collect()
    }

    /// Element names of every step
    pub fn names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathQuery {
    element: String,
    exact: bool,
    limit: usize,
}

impl PathQuery {
    /// Query for `element` with suffix matching and the default limit
    pub fn new(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            exact: false,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Match only the element registered under the literal name
    pub fn exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    /// Maximum number of paths to keep, `0` keeps all
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Run the query
    pub fn run(&self, graph: &ElementGraph) -> QueryResult {
        let paths = find_paths(graph, &self.element, self.exact);
        let total = paths.len();
        let shown = limit_paths(&paths, self.limit).len();

        QueryResult {
            element: self.element.clone(),
            total,
            paths: paths.into_iter().take(shown).collect(),
        }
    }
}

/// Ranked and limited outcome of a [`PathQuery`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    /// The searched element name
    pub element: String,
    /// Number of paths found before limiting
    pub total: usize,
    /// Shortest paths, shortest first
    pub paths: Vec<ElementPathRecord>,
}

impl QueryResult {
    /// Whether no path was found
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Whether the limit hid some paths
    pub fn is_truncated(&self) -> bool {
        self.paths.len() < self.total
    }
}

/// Vertices the query is looking for: the literal name first, then suffix matches
pub fn target_nodes(graph: &ElementGraph, element: &str, exact: bool) -> Vec<NodeIndex> {
    if element.is_empty() {
        return Vec::new();
    }

    let mut targets: Vec<NodeIndex> = graph.node_index(element).into_iter().collect();

    if !exact {
        targets.extend(
            graph
                .nodes()
                .filter(|&node| graph.element(node).ends_with_nested(element)),
        );
    }

    targets
}

/// All shortest root-to-target paths, ranked by length
///
/// Pairs without a path contribute nothing; an empty result means the
/// element is not reachable from any top-level element.
pub fn find_paths(graph: &ElementGraph, element: &str, exact: bool) -> Vec<ElementPathRecord> {
    let sources = graph.root_elements();
    let targets = target_nodes(graph, element, exact);
    debug!(element = element, sources = sources.len(), targets = targets.len(); "Searching paths");

    if targets.is_empty() {
        return Vec::new();
    }

    let trees: Vec<BfsTree> = sources.iter().map(|&source| BfsTree::build(graph, source)).collect();

    let mut results: Vec<ElementPathRecord> = targets
        .iter()
        .flat_map(|&target| trees.iter().filter_map(move |tree| tree.path_to(graph, target)))
        .collect();

    // Stable: equally long paths keep discovery order
    results.sort_by_key(ElementPathRecord::len);
    results
}

/// The first `limit` paths, or all of them when `limit` is 0
pub fn limit_paths(paths: &[ElementPathRecord], limit: usize) -> &[ElementPathRecord] {
    if limit == 0 {
        paths
    } else {
        &paths[..limit.min(paths.len())]
    }
}

/// Breadth-first predecessor tree rooted at one source
struct BfsTree {
    source: NodeIndex,
    previous: HashMap<NodeIndex, (NodeIndex, EdgeKind)>,
}

impl BfsTree {
    fn build(graph: &ElementGraph, source: NodeIndex) -> Self {
        let mut previous = HashMap::new();
        let mut queue = VecDeque::from([source]);

        while let Some(node) = queue.pop_front() {
            for (next, kind) in graph.successors(node) {
                if next == source || previous.contains_key(&next) {
                    continue;
                }
                previous.insert(next, (node, kind));
                queue.push_back(next);
            }
        }

        Self { source, previous }
    }

    fn path_to(&self, graph: &ElementGraph, target: NodeIndex) -> Option<ElementPathRecord> {
        let mut chain = vec![(target, StepKind::Root)];
        let mut current = target;

        while current != self.source {
            let &(previous, kind) = self.previous.get(&current)?;
            if let Some(last) = chain.last_mut() {
                last.1 = kind.into();
            }
            chain.push((previous, StepKind::Root));
            current = previous;
        }

        let steps = chain
            .into_iter()
            .rev()
            .map(|(node, step)| {
                let element = graph.element(node);
                PathStep {
                    path: element.path_string(),
                    name: element.name().to_string(),
                    step,
                }
            })
            .collect();

        Some(ElementPathRecord { steps })
    }
}
