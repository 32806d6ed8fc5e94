//! Static type-to-style lookup tables.
//!
//! Pure lookups from semantic type tags to visual attributes. The tables are
//! built once at first use and never mutated; unrecognized tags fall back to
//! the default style.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Visual attributes for a node declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeStyle {
    pub shape: &'static str,
    pub fill: &'static str,
    pub font: &'static str,
    /// Replaces the node's display name when set (e.g. databases always
    /// render as "BD").
    pub label_override: Option<&'static str>,
}

/// Visual attributes for an edge declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeStyle {
    pub color: &'static str,
    pub line: &'static str,
    /// Replaces the connection's label when set. `Some("")` blanks the label.
    pub label_override: Option<&'static str>,
}

/// Style applied to nodes with an unrecognized type tag.
pub const DEFAULT_NODE_STYLE: NodeStyle = NodeStyle {
    shape: "box",
    fill: "white",
    font: "black",
    label_override: None,
};

/// Style applied to connections with an unrecognized type tag.
pub const DEFAULT_EDGE_STYLE: EdgeStyle = EdgeStyle {
    color: "darkgreen",
    line: "solid",
    label_override: None,
};

static NODE_STYLES: Lazy<HashMap<&'static str, NodeStyle>> = Lazy::new(|| {
    HashMap::from([
        (
            "server",
            NodeStyle {
                shape: "ellipse",
                fill: "lightskyblue",
                font: "black",
                label_override: None,
            },
        ),
        (
            "branch",
            NodeStyle {
                shape: "box",
                fill: "coral",
                font: "black",
                label_override: None,
            },
        ),
        (
            "headquarters",
            NodeStyle {
                shape: "box",
                fill: "darkgray",
                font: "white",
                label_override: None,
            },
        ),
        (
            "db_management",
            NodeStyle {
                shape: "oval",
                fill: "lightsteelblue",
                font: "black",
                label_override: None,
            },
        ),
        (
            "database",
            NodeStyle {
                shape: "ellipse",
                fill: "plum",
                font: "black",
                label_override: Some("BD"),
            },
        ),
    ])
});

static EDGE_STYLES: Lazy<HashMap<&'static str, EdgeStyle>> = Lazy::new(|| {
    HashMap::from([
        (
            "sales_report",
            EdgeStyle {
                color: "darkgreen",
                line: "solid",
                label_override: Some("Ventas"),
            },
        ),
        (
            "inventory_report",
            EdgeStyle {
                color: "darkred",
                line: "solid",
                label_override: Some("Inventario"),
            },
        ),
        (
            "master_data_replication",
            EdgeStyle {
                color: "blue",
                line: "dashed",
                label_override: Some("Datos Maestros"),
            },
        ),
        (
            "network",
            EdgeStyle {
                color: "darkgreen",
                line: "solid",
                label_override: Some("IP"),
            },
        ),
        (
            "local_db_access",
            EdgeStyle {
                color: "darkgreen",
                line: "solid",
                label_override: Some(""),
            },
        ),
        (
            "management_link",
            EdgeStyle {
                color: "darkgreen",
                line: "solid",
                label_override: Some(""),
            },
        ),
    ])
});

/// Look up the style for a node type tag.
pub fn node_style(kind: &str) -> NodeStyle {
    NODE_STYLES.get(kind).copied().unwrap_or(DEFAULT_NODE_STYLE)
}

/// Look up the style for a connection type tag.
pub fn edge_style(kind: &str) -> EdgeStyle {
    EDGE_STYLES.get(kind).copied().unwrap_or(DEFAULT_EDGE_STYLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_node_types_match_table() {
        assert_eq!(node_style("server").shape, "ellipse");
        assert_eq!(node_style("server").fill, "lightskyblue");
        assert_eq!(node_style("branch").fill, "coral");
        assert_eq!(node_style("headquarters").font, "white");
        assert_eq!(node_style("db_management").shape, "oval");

        let database = node_style("database");
        assert_eq!(database.shape, "ellipse");
        assert_eq!(database.fill, "plum");
        assert_eq!(database.label_override, Some("BD"));
    }

    #[test]
    fn test_unrecognized_node_type_falls_back_to_default() {
        assert_eq!(node_style("mainframe"), DEFAULT_NODE_STYLE);
        assert_eq!(node_style(""), DEFAULT_NODE_STYLE);
    }

    #[test]
    fn test_recognized_edge_types_match_table() {
        assert_eq!(edge_style("sales_report").label_override, Some("Ventas"));
        assert_eq!(edge_style("inventory_report").color, "darkred");

        let replication = edge_style("master_data_replication");
        assert_eq!(replication.color, "blue");
        assert_eq!(replication.line, "dashed");
        assert_eq!(replication.label_override, Some("Datos Maestros"));

        assert_eq!(edge_style("network").label_override, Some("IP"));
        assert_eq!(edge_style("local_db_access").label_override, Some(""));
        assert_eq!(edge_style("management_link").label_override, Some(""));
    }

    #[test]
    fn test_unrecognized_edge_type_keeps_original_label() {
        let style = edge_style("telemetry");
        assert_eq!(style, DEFAULT_EDGE_STYLE);
        assert_eq!(style.label_override, None);
    }
}
