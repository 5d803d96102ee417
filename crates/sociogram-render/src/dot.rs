//! DOT output with every node pinned to its tier position.
//!
//! Positions carry a trailing `!` so `neato -n` keeps them as given.

use std::fmt::Write;

use sociogram_core::{DirectedGraph, NodeId, TierLayout};
use sociogram_error::Result;

use crate::GraphRenderer;

/// Sanitize a string to be a valid DOT identifier.
/// Replaces any non-alphanumeric character with underscore.
pub fn sanitize_id(input: &str) -> String {
    input
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Escape special characters for DOT labels.
pub fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

/// A DOT graph builder for constructing valid DOT output.
pub struct DotBuilder {
    output: String,
    indent: usize,
}

impl DotBuilder {
    /// Create a new DOT digraph with the given name.
    pub fn new(name: &str) -> Self {
        let mut output = String::with_capacity(4096);
        let _ = writeln!(output, "digraph {} {{", sanitize_id(name));
        Self { output, indent: 1 }
    }

    /// Add a graph attribute.
    pub fn attr(&mut self, key: &str, value: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "{}=\"{}\";", key, escape_label(value));
        self
    }

    /// Add a node style default.
    pub fn node_style(&mut self, attrs: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "node [{attrs}];");
        self
    }

    /// Add an edge style default.
    pub fn edge_style(&mut self, attrs: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "edge [{attrs}];");
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.output.push('\n');
        self
    }

    /// Add a node with full attributes.
    pub fn node_full(&mut self, id: &str, attrs: &[(&str, &str)]) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = write!(self.output, "{id}[");
        for (i, (key, value)) in attrs.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            let _ = write!(self.output, "{}=\"{}\"", key, escape_label(value));
        }
        self.output.push_str("];\n");
        self
    }

    pub fn edge(&mut self, from: &str, to: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "{from} -> {to};");
        self
    }

    /// Start a subgraph cluster.
    pub fn start_cluster(&mut self, id: &str, label: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "subgraph cluster_{} {{", sanitize_id(id));
        self.indent += 1;
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "label=\"{}\";", escape_label(label));
        self
    }

    /// End the current subgraph cluster.
    pub fn end_cluster(&mut self) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        write_indent(&mut self.output, self.indent);
        self.output.push_str("}\n\n");
        self
    }

    /// Finish building and return the DOT string.
    pub fn build(mut self) -> String {
        self.output.push_str("}\n");
        self.output
    }
}

fn node_id(node: NodeId) -> String {
    format!("n{}", node)
}

/// Renders the layout as DOT: one cluster per tier, then all links.
#[derive(Debug, Clone)]
pub struct DotRenderer {
    /// Graph units (inches) per layout unit.
    pub scale: f64,
}

impl Default for DotRenderer {
    fn default() -> Self {
        Self { scale: 0.25 }
    }
}

impl DotRenderer {
    pub fn render_string(&self, graph: &DirectedGraph, layout: &TierLayout) -> String {
        let mut dot = DotBuilder::new("sociogram");
        dot.attr("layout", "neato")
            .node_style(r#"shape=circle, style=filled, fillcolor="skyblue", fontsize=6"#)
            .edge_style(r#"color="black", penwidth=0.3, arrowsize=0.4"#)
            .blank();

        for ring in layout.rings() {
            if ring.nodes.is_empty() {
                continue;
            }
            dot.start_cluster(&ring.tier.to_string(), &ring.tier.to_string());
            for &node in &ring.nodes {
                let Some(point) = layout.position(node) else {
                    continue;
                };
                let pos = format!(
                    "{:.3},{:.3}!",
                    point.x * self.scale,
                    point.y * self.scale
                );
                dot.node_full(&node_id(node), &[("label", &node.to_string()), ("pos", &pos)]);
            }
            dot.end_cluster();
        }

        for edge in graph.edges() {
            dot.edge(&node_id(edge.from), &node_id(edge.to));
        }

        dot.build()
    }
}

impl GraphRenderer for DotRenderer {
    fn extension(&self) -> &'static str {
        "dot"
    }

    fn render(&self, graph: &DirectedGraph, layout: &TierLayout) -> Result<Vec<u8>> {
        Ok(self.render_string(graph, layout).into_bytes())
    }
}
