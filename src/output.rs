//! Rendering of query results and verbose events
//!
//! Paths print as `<Order> / <Item> / <Sku>` where `/` marks a containment
//! step and `=>` a reference step. Colors are plain ANSI escapes and are
//! only emitted when the caller asks for them.

use crate::elements::PATH_SEPARATOR;
use crate::events::{EventSink, SchemaEvent};
use crate::query::{ElementPathRecord, QueryResult, StepKind};
use serde_json::json;
use std::io::Write;

const CYAN: &str = "36";
const WHITE: &str = "37";
const YELLOW: &str = "33";
const MAGENTA: &str = "35";
const GREEN: &str = "32";
const HI_BLACK: &str = "90";
const HI_WHITE: &str = "97";
const HI_YELLOW: &str = "93";

/// Applies ANSI colors when enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Styler {
    colored: bool,
}

impl Styler {
    /// Create a styler; `colored = false` renders plain text
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    /// Plain text styler
    pub fn plain() -> Self {
        Self::new(false)
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.colored {
            format!("\x1b[{}m{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }

    fn segment(&self, name: &str, highlight: bool) -> String {
        let color = if highlight { CYAN } else { WHITE };
        format!("<{}>", self.paint(name, color))
    }

    /// `a/b/c` as `<a>/<b>/<c>` with the last segment highlighted
    pub fn element(&self, path: &str) -> String {
        let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
        let last = segments.len() - 1;

        segments
            .iter()
            .enumerate()
            .map(|(i, name)| self.segment(name, i == last))
            .collect::<Vec<_>>()
            .join(&self.paint(PATH_SEPARATOR, HI_BLACK))
    }

    fn child_marker(&self) -> String {
        self.paint("/", YELLOW)
    }

    fn reference_marker(&self) -> String {
        self.paint("=>", MAGENTA)
    }

    fn action(&self, action: &str) -> String {
        self.paint(&format!("{}:", action), HI_WHITE)
    }
}

/// One path as a single line, without the list bullet
pub fn render_path(record: &ElementPathRecord, styler: &Styler) -> String {
    record
        .steps()
        .iter()
        .map(|step| {
            let name = styler.segment(&step.name, true);
            match step.step {
                StepKind::Root => name,
                StepKind::Containment => format!("{} {}", styler.child_marker(), name),
                StepKind::Reference => format!("{} {}", styler.reference_marker(), name),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Header line followed by one bullet line per path
pub fn render_result(result: &QueryResult, styler: &Styler) -> String {
    if result.is_empty() {
        return format!("No paths found for element \"{}\"\n", result.element);
    }

    let count_label = if result.is_truncated() {
        format!("(showing {} of {})", result.paths.len(), result.total)
    } else {
        format!("(showing all {})", result.paths.len())
    };

    let mut output = format!("Possible paths for element \"{}\" {}\n", result.element, count_label);
    for record in &result.paths {
        output.push_str(&format!("- {}\n", render_path(record, styler)));
    }
    output
}

/// Result as pretty-printed JSON
pub fn render_json(result: &QueryResult) -> serde_json::Result<String> {
    let value = json!({
        "element": result.element,
        "total": result.total,
        "shown": result.paths.len(),
        "paths": result.paths,
    });
    serde_json::to_string_pretty(&value)
}

/// Human-readable line(s) for a verbose event
pub fn render_event(event: &SchemaEvent, styler: &Styler) -> String {
    match event {
        SchemaEvent::FileAdded(path) => format!(
            "{} {}",
            styler.action("Add file"),
            styler.paint(&path.display().to_string(), GREEN)
        ),
        SchemaEvent::FileDuplicate(path) => format!(
            "{} {}",
            styler.action("Duplicate file"),
            styler.paint(&path.display().to_string(), YELLOW)
        ),
        SchemaEvent::ElementHeadline(name) => format!("\n<{}>", styler.paint(name, HI_YELLOW)),
        SchemaEvent::ElementAdded(path) => {
            format!("{} {}", styler.action("Add element"), styler.element(path))
        }
        SchemaEvent::ElementDuplicate(name) => {
            format!("{} {}", styler.action("Duplicate element"), styler.element(name))
        }
        SchemaEvent::LeafCount(count) => count_line(styler, *count, "leaf element", "leaf elements"),
        SchemaEvent::ReferenceCount(count) => count_line(styler, *count, "element ref", "element refs"),
        // Both edge kinds print under the same label
        SchemaEvent::EdgeAdded { from, to, .. } => format!(
            "{} {} {} {}",
            styler.action("Add reference"),
            styler.element(from),
            styler.reference_marker(),
            styler.element(to)
        ),
    }
}

fn count_line(styler: &Styler, count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("1 {}", styler.paint(singular, GREEN))
    } else {
        format!("{} {}", styler.paint(&count.to_string(), HI_WHITE), styler.paint(plural, GREEN))
    }
}

/// Writes every event as a line to a writer
#[derive(Debug)]
pub struct ConsoleSink<W: Write> {
    writer: W,
    styler: Styler,
}

impl<W: Write> ConsoleSink<W> {
    /// Create a sink writing to `writer`
    pub fn new(writer: W, styler: Styler) -> Self {
        Self { writer, styler }
    }

    /// Give back the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EventSink for ConsoleSink<W> {
    fn emit(&mut self, event: &SchemaEvent) {
        // Verbose output is best effort; a closed pipe must not abort the run
        if let Err(e) = writeln!(self.writer, "{}", render_event(event, &self.styler)) {
            log::debug!("Failed to write verbose output: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{EdgeKind, ElementGraph, ElementPath};
    use crate::query::PathQuery;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn result(limit: usize) -> QueryResult {
        let mut graph = ElementGraph::new();
        for path in ["Order", "Order/Item", "Cart", "Item"] {
            let path = ElementPath::parse(path);
            let parent = path.parent().unwrap().path_string();
            let key = path.path_string();
            graph.add_element(path).unwrap();
            graph.add_edge(&parent, &key, EdgeKind::Containment).unwrap();
        }
        graph.add_edge("Cart", "Item", EdgeKind::Reference).unwrap();

        PathQuery::new("Item").limit(limit).run(&graph)
    }

    #[test]
    fn test_render_result_plain() {
        let output = render_result(&result(0), &Styler::plain());

        assert_eq!(
            output,
            "Possible paths for element \"Item\" (showing all 3)\n\
             - <Item>\n\
             - <Cart> => <Item>\n\
             - <Order> / <Item>\n"
        );
    }

    #[test]
    fn test_render_result_truncated() {
        let output = render_result(&result(1), &Styler::plain());
        assert!(output.starts_with("Possible paths for element \"Item\" (showing 1 of 3)\n"));
        assert_eq!(output.lines().count(), 2);
    }

    #[test]
    fn test_render_no_paths() {
        let empty = QueryResult {
            element: "Nope".to_string(),
            total: 0,
            paths: Vec::new(),
        };
        assert_eq!(render_result(&empty, &Styler::plain()), "No paths found for element \"Nope\"\n");
    }

    #[test]
    fn test_colored_output_uses_ansi() {
        let styler = Styler::new(true);
        let line = render_path(&result(0).paths[1], &styler);

        assert!(line.contains("\x1b[35m=>\x1b[0m"));
        assert!(line.contains("<\x1b[36mCart\x1b[0m>"));
    }

    #[test]
    fn test_render_json() {
        let json: serde_json::Value = serde_json::from_str(&render_json(&result(2)).unwrap()).unwrap();

        assert_eq!(json["element"], "Item");
        assert_eq!(json["total"], 3);
        assert_eq!(json["shown"], 2);
        assert_eq!(json["paths"][1][1]["step"], "reference");
    }

    #[test]
    fn test_render_events() {
        let styler = Styler::plain();

        assert_eq!(render_event(&SchemaEvent::ElementAdded("a/b".to_string()), &styler), "Add element: <a>/<b>");
        assert_eq!(render_event(&SchemaEvent::LeafCount(1), &styler), "1 leaf element");
        assert_eq!(render_event(&SchemaEvent::ReferenceCount(3), &styler), "3 element refs");
        for kind in [EdgeKind::Containment, EdgeKind::Reference] {
            let event = SchemaEvent::EdgeAdded {
                from: "a".to_string(),
                to: "a/b".to_string(),
                kind,
            };
            assert_eq!(render_event(&event, &styler), "Add reference: <a> => <a>/<b>");
        }
        assert_eq!(
            render_event(&SchemaEvent::FileDuplicate(PathBuf::from("/s/x.xsd")), &styler),
            "Duplicate file: /s/x.xsd"
        );
    }

    #[test]
    fn test_console_sink_writes_lines() {
        let mut sink = ConsoleSink::new(Vec::new(), Styler::plain());
        sink.emit(&SchemaEvent::ElementHeadline("Order".to_string()));
        sink.emit(&SchemaEvent::ElementDuplicate("Order".to_string()));

        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(written, "\n<Order>\nDuplicate element: <Order>\n");
    }
}
