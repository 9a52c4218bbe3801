//! Include resolution
//!
//! Starting from an entry schema, every `xs:include` is followed depth-first
//! and each distinct file is loaded exactly once. A file is registered
//! before its own includes are inspected, so include cycles end at the
//! first repeated path instead of recursing forever.

use crate::documents::Document;
use crate::error::Result;
use crate::events::{EventSink, NullSink, SchemaEvent};
use crate::limits::Limits;
use crate::loaders::Loader;
use crate::locations::{absolute_path, resolve_include};
use indexmap::IndexMap;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// One loaded schema document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaFile {
    path: PathBuf,
    content: Vec<u8>,
}

impl SchemaFile {
    /// Create a schema file record
    pub fn new(path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Absolute path, the file's identity
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw bytes as read from disk
    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

/// All schema files reachable from an entry file, with their include relation
#[derive(Debug, Clone, Default)]
pub struct FileGraph {
    files: IndexMap<PathBuf, SchemaFile>,
    /// `(including, included)` pairs of indices into `files`
    dependencies: Vec<(usize, usize)>,
}

impl FileGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no file is registered
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether a file with this absolute path is registered
    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    /// Look up a file by absolute path
    pub fn get(&self, path: &Path) -> Option<&SchemaFile> {
        self.files.get(path)
    }

    /// The entry file, registered first
    pub fn entry(&self) -> Option<&SchemaFile> {
        self.files.get_index(0).map(|(_, file)| file)
    }

    /// Files in registration (depth-first pre-)order
    pub fn files(&self) -> impl Iterator<Item = &SchemaFile> {
        self.files.values()
    }

    /// Include edges as `(including, included)` paths
    pub fn dependencies(&self) -> impl Iterator<Item = (&Path, &Path)> + '_ {
        self.dependencies.iter().filter_map(move |&(from, to)| {
            let (from, _) = self.files.get_index(from)?;
            let (to, _) = self.files.get_index(to)?;
            Some((from.as_path(), to.as_path()))
        })
    }

    /// Files directly included by `path` through first-visit edges
    pub fn includes_of<'a>(&'a self, path: &'a Path) -> impl Iterator<Item = &'a Path> + 'a {
        self.dependencies().filter(move |(from, _)| *from == path).map(|(_, to)| to)
    }

    /// Register a file; an already registered path keeps its first record
    pub fn add_file(&mut self, file: SchemaFile) -> usize {
        let (index, _) = self.files.insert_full(file.path.clone(), file);
        index
    }

    fn add_dependency(&mut self, from: usize, to: usize) {
        self.dependencies.push((from, to));
    }
}

/// Resolves the include closure of an entry schema
#[derive(Debug)]
pub struct IncludeResolver<S = NullSink> {
    loader: Loader,
    limits: Limits,
    sink: S,
}

impl IncludeResolver<NullSink> {
    /// Create a resolver with default limits that reports nothing
    pub fn new() -> Self {
        Self {
            loader: Loader::new(),
            limits: Limits::default(),
            sink: NullSink,
        }
    }
}

impl Default for IncludeResolver<NullSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> IncludeResolver<S> {
    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.loader = self.loader.with_limits(limits.clone());
        self.limits = limits;
        self
    }

    /// Report events to another sink
    pub fn with_sink<T: EventSink>(self, sink: T) -> IncludeResolver<T> {
        IncludeResolver {
            loader: self.loader,
            limits: self.limits,
            sink,
        }
    }

    /// Give back the event sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Load `entry` and everything it transitively includes
    pub fn resolve(&mut self, entry: impl AsRef<Path>) -> Result<FileGraph> {
        let entry = absolute_path(entry.as_ref())?;
        let mut graph = FileGraph::new();

        self.process_file(&mut graph, entry, 0)?;

        info!(files = graph.len(); "Resolved schema includes");
        Ok(graph)
    }

    fn process_file(&mut self, graph: &mut FileGraph, path: PathBuf, depth: usize) -> Result<usize> {
        self.limits.check_include_depth(depth)?;
        self.sink.emit(&SchemaEvent::FileAdded(path.clone()));
        debug!(path:? = path, depth = depth; "Loading schema file");

        let content = self.loader.load_bytes(&path)?;
        self.limits.check_files(graph.len() + 1)?;

        let document = Document::parse_with_limits(&content, &self.limits)
            .map_err(|e| e.with_location(path.display().to_string()))?;
        let index = graph.add_file(SchemaFile::new(path.clone(), content));

        let locations: Vec<&str> = match document.root() {
            Some(root) => root
                .descendants()
                .filter(|e| e.is_xsd("include"))
                .filter_map(|e| e.get_attribute("schemaLocation"))
                .collect(),
            None => Vec::new(),
        };

        for location in locations {
            let next = resolve_include(&path, location)?;

            if graph.contains(&next) {
                self.sink.emit(&SchemaEvent::FileDuplicate(next.clone()));
                debug!(path:? = next; "Skipping already loaded schema file");
                continue;
            }

            let included = self.process_file(graph, next, depth + 1)?;
            graph.add_dependency(index, included);
        }

        Ok(index)
    }
}

/// Resolve includes of `entry` with default settings
pub fn resolve_includes(entry: impl AsRef<Path>) -> Result<FileGraph> {
    IncludeResolver::new().resolve(entry)
}
