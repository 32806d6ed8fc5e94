//! Request payloads shared by all endpoints.
//!
//! Field names mirror the JSON wire format (snake_case). The diagram model is
//! constructed fresh per request, compiled once and discarded; nothing here is
//! persisted or mutated across requests.

use serde::{Deserialize, Serialize};

/// Title used when a diagram request omits `company_name`.
pub const DEFAULT_DIAGRAM_TITLE: &str = "Diagrama de Arquitectura";

/// A typed node in a network-architecture graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    /// Opaque identifier, unique within the graph. Doubles (after
    /// sanitization) as the Graphviz node identifier.
    pub id: String,
    /// Human-readable display label. Some node types override it.
    pub name: String,
    /// Open string domain; recognized values drive styling, anything else
    /// falls back to the default style.
    #[serde(rename = "type")]
    pub kind: String,
    /// Informational only; not consumed by rendering logic.
    #[serde(default)]
    pub has_local_db: bool,
}

/// Declared directionality of a connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Unidirectional,
    Bidirectional,
}

/// A typed directed connection between two nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConnection {
    /// Must reference an existing [`GraphNode::id`]; otherwise the connection
    /// is dropped with a warning.
    pub source_id: String,
    pub target_id: String,
    /// Default display text. Some connection types override it.
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub direction: Direction,
}

/// Top-level diagram request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagramRequest {
    /// Used verbatim as the diagram title.
    #[serde(default = "default_company_name")]
    pub company_name: String,
    pub nodes: Vec<GraphNode>,
    pub connections: Vec<GraphConnection>,
    /// Free text shown in the footer block at the bottom of the layout.
    #[serde(default)]
    pub general_network_description: String,
}

fn default_company_name() -> String {
    DEFAULT_DIAGRAM_TITLE.to_string()
}

/// Input for the docx generator: a flat outline filled into a fixed
/// section template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRequest {
    pub title: String,
    pub intro: String,
    /// Bullet list items.
    #[serde(default)]
    pub items: Vec<String>,
    /// Table body rows; the column count is taken from the first row.
    #[serde(default)]
    pub table_rows: Vec<Vec<String>>,
}

/// Input for the pptx generator: a fixed four-slide deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationRequest {
    pub title: String,
    pub subtitle: String,
    #[serde(default)]
    pub agenda_items: Vec<String>,
    #[serde(default)]
    pub features_items: Vec<String>,
}

/// The canonical example payload served by `GET /example-diagram-data`.
///
/// Ten nodes (one server, four branches, one headquarters, one database
/// manager, four databases) and nine connections, modelling a distributed
/// branch-office architecture.
pub fn example_diagram_request() -> DiagramRequest {
    let node = |id: &str, name: &str, kind: &str| GraphNode {
        id: id.to_string(),
        name: name.to_string(),
        kind: kind.to_string(),
        has_local_db: false,
    };
    let conn = |source: &str, target: &str, label: &str, kind: &str| GraphConnection {
        source_id: source.to_string(),
        target_id: target.to_string(),
        label: label.to_string(),
        kind: kind.to_string(),
        direction: Direction::Unidirectional,
    };

    DiagramRequest {
        company_name: "Arquitectura de Sucursales Distribuidas".to_string(),
        nodes: vec![
            node("Servidor_Central", "Servidor", "server"),
            node("Sinaloa_Branch", "Sinaloa", "branch"),
            node("Baja_California_Sur_Branch", "Baja California Sur", "branch"),
            node("Veracruz_Branch", "Veracruz", "branch"),
            node("Yucatan_HQ", "Yucatán", "headquarters"),
            node("Gestion_BD_Yucatan", "Gestión de las BD", "db_management"),
            node("BD_Sinaloa", "BD", "database"),
            node("BD_BCS", "BD", "database"),
            node("BD_Veracruz", "BD", "database"),
            node("BD_Yucatan", "BD", "database"),
        ],
        connections: vec![
            conn("Servidor_Central", "Sinaloa_Branch", "IP", "network"),
            conn("Servidor_Central", "Baja_California_Sur_Branch", "IP", "network"),
            conn("Servidor_Central", "Veracruz_Branch", "IP", "network"),
            conn("Servidor_Central", "Yucatan_HQ", "IP", "network"),
            conn("Sinaloa_Branch", "BD_Sinaloa", "", "local_db_access"),
            conn("Baja_California_Sur_Branch", "BD_BCS", "", "local_db_access"),
            conn("Veracruz_Branch", "BD_Veracruz", "", "local_db_access"),
            conn("Yucatan_HQ", "BD_Yucatan", "", "local_db_access"),
            conn("Yucatan_HQ", "Gestion_BD_Yucatan", "", "management_link"),
        ],
        general_network_description: "Las bases de datos son homogéneas y utilizan fragmentación \
            de datos. La sede principal (Yucatán) puede acceder a las BD de las sucursales vía IP, \
            y usuarios con permisos de vista pueden consultar la información almacenada."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagram_request_deserializes_wire_format() {
        let json = r#"{
            "company_name": "Acme",
            "nodes": [
                { "id": "a", "name": "A", "type": "server" },
                { "id": "b", "name": "B", "type": "branch", "has_local_db": true }
            ],
            "connections": [
                { "source_id": "a", "target_id": "b", "label": "IP",
                  "type": "network", "direction": "bidirectional" }
            ],
            "general_network_description": "desc"
        }"#;
        let request: DiagramRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.company_name, "Acme");
        assert_eq!(request.nodes[0].kind, "server");
        assert!(!request.nodes[0].has_local_db);
        assert!(request.nodes[1].has_local_db);
        assert_eq!(request.connections[0].direction, Direction::Bidirectional);
    }

    #[test]
    fn test_company_name_defaults_when_absent() {
        let json = r#"{ "nodes": [], "connections": [] }"#;
        let request: DiagramRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.company_name, DEFAULT_DIAGRAM_TITLE);
        assert_eq!(request.general_network_description, "");
    }

    #[test]
    fn test_direction_defaults_to_unidirectional() {
        let json = r#"{ "source_id": "a", "target_id": "b", "label": "", "type": "network" }"#;
        let connection: GraphConnection = serde_json::from_str(json).unwrap();
        assert_eq!(connection.direction, Direction::Unidirectional);
    }

    #[test]
    fn test_example_request_shape() {
        let example = example_diagram_request();
        assert_eq!(example.nodes.len(), 10);
        assert_eq!(example.connections.len(), 9);
        assert_eq!(
            example.nodes.iter().filter(|n| n.kind == "database").count(),
            4
        );
        // Every connection endpoint must resolve to a declared node.
        for connection in &example.connections {
            assert!(example.nodes.iter().any(|n| n.id == connection.source_id));
            assert!(example.nodes.iter().any(|n| n.id == connection.target_id));
        }
    }
}
