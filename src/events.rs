//! Tracing events emitted while a schema set is loaded
//!
//! The resolver and the element graph builder report what they do to an
//! [`EventSink`]. Nothing in the pipeline depends on how events are
//! consumed: the default [`NullSink`] drops them, [`LogSink`] forwards them
//! to the `log` facade, and the command line prints them in color.

use crate::elements::EdgeKind;
use log::debug;
use std::path::PathBuf;

/// A single tracing event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaEvent {
    /// A schema file was registered
    FileAdded(PathBuf),
    /// An include pointed at an already registered file
    FileDuplicate(PathBuf),
    /// Nested processing of a root element starts
    ElementHeadline(String),
    /// An element vertex was created, identified by its path string
    ElementAdded(String),
    /// A root element name was declared again
    ElementDuplicate(String),
    /// Number of leaf elements found under a root element
    LeafCount(usize),
    /// Number of element references found under a root element
    ReferenceCount(usize),
    /// An edge is being added between two element paths
    EdgeAdded {
        /// Source path
        from: String,
        /// Target path
        to: String,
        /// Containment or reference
        kind: EdgeKind,
    },
}

/// Observer for [`SchemaEvent`]s
pub trait EventSink {
    /// Receive one event
    fn emit(&mut self, event: &SchemaEvent);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: &SchemaEvent) {
        (**self).emit(event)
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: &SchemaEvent) {
        (**self).emit(event)
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &SchemaEvent) {}
}

/// Forwards events to the `log` facade at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: &SchemaEvent) {
        match event {
            SchemaEvent::FileAdded(path) => debug!(path:? = path; "Add file"),
            SchemaEvent::FileDuplicate(path) => debug!(path:? = path; "Duplicate file"),
            SchemaEvent::ElementHeadline(name) => debug!(name = name.as_str(); "Processing root element"),
            SchemaEvent::ElementAdded(path) => debug!(path = path.as_str(); "Add element"),
            SchemaEvent::ElementDuplicate(name) => debug!(name = name.as_str(); "Duplicate element"),
            SchemaEvent::LeafCount(count) => debug!(count = *count; "Leaf elements"),
            SchemaEvent::ReferenceCount(count) => debug!(count = *count; "Element refs"),
            SchemaEvent::EdgeAdded { from, to, kind } => {
                debug!(from = from.as_str(), to = to.as_str(), kind:? = kind; "Add edge")
            }
        }
    }
}

/// Collects events in order
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    /// Events received so far
    pub events: Vec<SchemaEvent>,
}

impl RecordingSink {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &SchemaEvent) {
        self.events.push(event.clone());
    }
}
