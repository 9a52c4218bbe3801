//! # xt
//!
//! XML Schema Tools: answers "by which paths can the top-level elements of a
//! schema reach element X?" for large, multi-file XML Schema sets.
//!
//! The work happens in three stages:
//!
//! - [`resolver`] follows `xs:include` from an entry file and loads every
//!   schema file once.
//! - [`elements`] turns the element declarations of all files into a graph
//!   keyed by hierarchical paths such as `Order/Item/Sku`, with extra edges
//!   for `ref` attributes.
//! - [`query`] finds the shortest paths from every top-level element to the
//!   elements matching a name and ranks them by length.
//!
//! ## Example
//!
//! ```rust,ignore
//! use xt::query::PathQuery;
//!
//! let result = xt::find_paths("schemas/order.xsd", &PathQuery::new("Sku"))?;
//! for path in &result.paths {
//!     println!("{}", path.names().join(" > "));
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;

// Utilities
pub mod locations;
pub mod namespaces;

// Resource loading
pub mod documents;
pub mod loaders;

// Pipeline
pub mod elements;
pub mod events;
pub mod query;
pub mod resolver;

// Presentation
pub mod output;

use std::path::Path;

use crate::elements::ElementGraphBuilder;
use crate::events::{EventSink, NullSink};
use crate::limits::Limits;
use crate::query::{PathQuery, QueryResult};
use crate::resolver::IncludeResolver;

// Re-exports for convenience
pub use error::{Error, Result};

/// Version of the xt library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Resolve, build and query in one go with default limits
pub fn find_paths(entry: impl AsRef<Path>, query: &PathQuery) -> Result<QueryResult> {
    find_paths_with(entry, query, &Limits::default(), NullSink)
}

/// Resolve, build and query, reporting progress to `sink`
///
/// The first fatal error of any stage aborts the run.
pub fn find_paths_with<S: EventSink>(
    entry: impl AsRef<Path>,
    query: &PathQuery,
    limits: &Limits,
    mut sink: S,
) -> Result<QueryResult> {
    let files = IncludeResolver::new()
        .with_limits(limits.clone())
        .with_sink(&mut sink)
        .resolve(entry)?;

    let graph = ElementGraphBuilder::new()
        .with_limits(limits.clone())
        .with_sink(&mut sink)
        .build(&files)?;

    Ok(query.run(&graph))
}
