//! Record Store: the canonical node/edge lists plus project metadata.
//!
//! The `Document` is the single source of truth for one session. All
//! validation happens at the mutation boundary; once a record is in the
//! store it is assumed consistent (the graph builder re-checks endpoint
//! existence, nothing else does).

mod persist;

pub use persist::{export, import, load, save};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{RelmapError, Result};

/// Project-level metadata carried in the backing document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    /// Display name of the project; a `meta` without one reads as "Untitled".
    #[serde(default = "default_project_name")]
    pub project: String,
}

fn default_project_name() -> String {
    "Untitled".to_string()
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            project: default_project_name(),
        }
    }
}

/// Closed set of entity kinds. Fixed in the UI, so a tagged enum rather
/// than free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    Person,
    Org,
    Place,
    Concept,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Person => "person",
            NodeKind::Org => "org",
            NodeKind::Place => "place",
            NodeKind::Concept => "concept",
        }
    }
}

impl std::str::FromStr for NodeKind {
    type Err = RelmapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "person" => Ok(NodeKind::Person),
            "org" => Ok(NodeKind::Org),
            "place" => Ok(NodeKind::Place),
            "concept" => Ok(NodeKind::Concept),
            other => Err(RelmapError::Validation(format!(
                "Unknown node type: {} (expected person, org, place, or concept)",
                other
            ))),
        }
    }
}

/// An entity in the relationship graph (person/org/place/concept).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Node {
    /// Unique identifier, stable for the node's lifetime.
    pub id: String,
    /// Display name, required, non-empty after trimming.
    pub name: String,
    /// Alternate names, compared case-insensitively in search.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Entity kind, serialized as `type`.
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    /// Free-form labels.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Free-form description.
    #[serde(default)]
    pub notes: String,
}

/// A relation between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Edge {
    /// Unique identifier.
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    /// Free-text label classifying the relation; the primary filter key.
    pub relation_type: String,
    /// true = one-way relation; false = symmetric (expanded to two arcs
    /// by the graph builder).
    pub directional: bool,
    /// Relation strength in [0.0, 1.0].
    pub weight: f64,
    /// Supporting reference (book/chapter/page in the original use case).
    #[serde(default)]
    pub evidence: String,
    #[serde(default)]
    pub note: String,
}

/// The backing document: project metadata plus ordered node/edge lists.
/// List order is meaningful (first-match search, upsert position).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

fn short_id(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}_{}", prefix, &hex[..10])
}

impl Document {
    /// Fresh node id: `n_` followed by 10 hex chars.
    pub fn new_node_id() -> String {
        short_id("n")
    }

    /// Fresh edge id: `e_` followed by 10 hex chars.
    pub fn new_edge_id() -> String {
        short_id("e")
    }

    /// Lookup a node by id. Absence is a normal result, not an error.
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Lookup an edge by id.
    pub fn get_edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Insert or replace a node. An existing node with the same id is
    /// replaced in place, preserving its list position; otherwise the node
    /// is appended. The stored name is trimmed.
    pub fn upsert_node(&mut self, mut node: Node) -> Result<()> {
        let trimmed = node.name.trim();
        if trimmed.is_empty() {
            return Err(RelmapError::Validation(
                "Node name is required".to_string(),
            ));
        }
        node.name = trimmed.to_string();

        if let Some(existing) = self.nodes.iter_mut().find(|n| n.id == node.id) {
            log::debug!("Replacing node {} in place", node.id);
            *existing = node;
        } else {
            log::debug!("Appending node {}", node.id);
            self.nodes.push(node);
        }
        Ok(())
    }

    /// Append a new edge. Rejects self-loops, dangling endpoints, duplicate
    /// ids, and weights outside [0.0, 1.0]; on rejection the edge list is
    /// unchanged.
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        if edge.source_id == edge.target_id {
            return Err(RelmapError::Validation(
                "An edge cannot connect a node to itself".to_string(),
            ));
        }
        for endpoint in [&edge.source_id, &edge.target_id] {
            if self.get_node(endpoint).is_none() {
                return Err(RelmapError::Validation(format!(
                    "Edge endpoint references unknown node: {}",
                    endpoint
                )));
            }
        }
        if self.get_edge(&edge.id).is_some() {
            return Err(RelmapError::Validation(format!(
                "Duplicate edge id: {}",
                edge.id
            )));
        }
        if !(0.0..=1.0).contains(&edge.weight) {
            return Err(RelmapError::Validation(format!(
                "Edge weight must be in [0.0, 1.0], got {}",
                edge.weight
            )));
        }

        log::debug!(
            "Appending edge {} ({} -> {}, {})",
            edge.id,
            edge.source_id,
            edge.target_id,
            edge.relation_type
        );
        self.edges.push(edge);
        Ok(())
    }

    /// Deleting nodes is outside the store's contract. This is explicit
    /// rather than a silent no-op so callers cannot assume removal happened.
    pub fn delete_node(&mut self, id: &str) -> Result<()> {
        Err(RelmapError::Unsupported(format!(
            "Node deletion is not supported (node {})",
            id
        )))
    }

    /// Deleting edges is outside the store's contract. See [`Self::delete_node`].
    pub fn delete_edge(&mut self, id: &str) -> Result<()> {
        Err(RelmapError::Unsupported(format!(
            "Edge deletion is not supported (edge {})",
            id
        )))
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use super::*;

    pub fn node(id: &str, name: &str) -> Node {
        Node {
            id: id.to_string(),
            name: name.to_string(),
            aliases: Vec::new(),
            kind: NodeKind::Person,
            tags: Vec::new(),
            notes: String::new(),
        }
    }

    pub fn edge(id: &str, source: &str, target: &str, relation_type: &str) -> Edge {
        Edge {
            id: id.to_string(),
            source_id: source.to_string(),
            target_id: target.to_string(),
            relation_type: relation_type.to_string(),
            directional: true,
            weight: 0.5,
            evidence: String::new(),
            note: String::new(),
        }
    }

    /// Two people joined by one directed "mentor" edge.
    pub fn small_document() -> Document {
        let mut doc = Document::default();
        doc.upsert_node(node("n_a", "Kim Min")).unwrap();
        doc.upsert_node(node("n_b", "Kim Soo")).unwrap();
        doc.add_edge(edge("e_1", "n_a", "n_b", "mentor")).unwrap();
        doc
    }
}
