//! Graph compiler: JSON graph description → Graphviz DOT document.
//!
//! Pure transformation, no I/O. Connections whose endpoints don't resolve are
//! dropped with a warning; everything else is emitted in input order so the
//! output is deterministic for a given request.

use std::collections::HashMap;

use tracing::warn;

use crate::model::{DiagramRequest, Direction};

use super::style::{edge_style, node_style};

/// Graphviz identifier of the synthetic footer node.
pub const FOOTER_NODE_ID: &str = "footer_description";

/// Replace characters Graphviz rejects in bare identifiers.
///
/// Deterministic and idempotent: sanitizing an already-sanitized id is a
/// no-op.
pub fn sanitize_id(raw: &str) -> String {
    raw.replace([' ', '-'], "_")
}

/// Escape a string for use inside a double-quoted DOT attribute.
fn escape_dot(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Compile a diagram request into a complete DOT document.
pub fn compile(request: &DiagramRequest) -> String {
    let mut lines: Vec<String> = vec![
        "digraph G {".to_string(),
        "  charset=\"UTF-8\";".to_string(),
        "  rankdir=TB;".to_string(),
        "  node [style=filled, fontname=\"Helvetica\", fontsize=10];".to_string(),
        "  edge [fontname=\"Helvetica\", fontsize=8];".to_string(),
        "  labeljust=\"c\";".to_string(),
        "  labelloc=\"t\";".to_string(),
        format!("  label=\"{}\";", escape_dot(&request.company_name)),
        "  fontsize=20;".to_string(),
    ];

    // Raw id → sanitized Graphviz id. Distinct raw ids that collide after
    // sanitization are disambiguated with a numeric suffix so the output
    // never merges two nodes.
    let mut id_map: HashMap<&str, String> = HashMap::with_capacity(request.nodes.len());
    let mut anchor: Option<String> = None;
    for node in &request.nodes {
        let mut graphviz_id = sanitize_id(&node.id);
        if id_map.values().any(|taken| *taken == graphviz_id) {
            let mut suffix = 2;
            loop {
                let candidate = format!("{graphviz_id}_{suffix}");
                if !id_map.values().any(|taken| *taken == candidate) {
                    graphviz_id = candidate;
                    break;
                }
                suffix += 1;
            }
            warn!(
                raw = %node.id,
                resolved = %graphviz_id,
                "node id collides after sanitization; appended suffix"
            );
        }

        let style = node_style(&node.kind);
        let label = style.label_override.unwrap_or(&node.name);
        lines.push(format!(
            "  \"{graphviz_id}\" [label=\"{}\", shape=\"{}\", fillcolor=\"{}\", fontcolor=\"{}\"];",
            escape_dot(label),
            style.shape,
            style.fill,
            style.font,
        ));
        anchor = Some(graphviz_id.clone());
        id_map.insert(node.id.as_str(), graphviz_id);
    }

    for connection in &request.connections {
        let (Some(source), Some(target)) = (
            id_map.get(connection.source_id.as_str()),
            id_map.get(connection.target_id.as_str()),
        ) else {
            warn!(
                source = %connection.source_id,
                target = %connection.target_id,
                "dropping connection with unresolved endpoint"
            );
            continue;
        };

        let style = edge_style(&connection.kind);
        let label = style.label_override.unwrap_or(&connection.label);
        let dir = match connection.direction {
            Direction::Bidirectional => "both",
            Direction::Unidirectional => "forward",
        };
        lines.push(format!(
            "  \"{source}\" -> \"{target}\" [label=\"{}\", arrowhead=\"normal\", color=\"{}\", style=\"{}\", dir={dir}];",
            escape_dot(label),
            style.color,
            style.line,
        ));
    }

    // Footer block with the free-text description, wrapped via a fixed-width
    // HTML-like table cell.
    let footer_text = quick_xml::escape::escape(request.general_network_description.as_str());
    lines.push(format!(
        "  {FOOTER_NODE_ID} [shape=box, style=\"filled\", fillcolor=\"lavenderblush\", \
         color=\"purple\", fontcolor=\"black\", fontsize=10, \
         label=<<TABLE BORDER=\"0\" CELLBORDER=\"0\" CELLSPACING=\"0\">\
         <TR><TD ALIGN=\"LEFT\" WIDTH=\"500\">{footer_text}</TD></TR></TABLE>>];"
    ));

    // Pin the footer to the bottom rank, and bias the layout with an
    // invisible ordering edge from the last declared node.
    lines.push(format!("  {{ rank=sink; {FOOTER_NODE_ID}; }}"));
    if let Some(anchor) = anchor {
        lines.push(format!(
            "  \"{anchor}\" -> {FOOTER_NODE_ID} [style=invis];"
        ));
    }

    lines.push("}".to_string());
    lines.join("\n")
}
