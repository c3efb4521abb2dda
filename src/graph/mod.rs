//! Built graph: a directed multigraph derived from the record store.
//!
//! Undirected edges are expanded into a forward arc plus a synthetic
//! reverse arc so adjacency is traversable in both directions. Reverse
//! arcs are internal only and never reach the presentation layer.

mod build;

pub use build::build;

use std::collections::HashMap;

use crate::store::{Edge, Node};

/// Arc identity within the multigraph. The reverse marker is structural
/// rather than an id suffix, so a reverse arc's key can never collide
/// with a real edge id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArcKey {
    /// Id of the originating edge, preserved on reverse arcs so they can
    /// be traced back to their source edge.
    pub edge_id: String,
    pub is_reverse: bool,
}

/// A directed arc carrying the full attribute set of its source edge.
#[derive(Debug, Clone)]
pub struct Arc {
    pub key: ArcKey,
    pub source_id: String,
    pub target_id: String,
    pub edge: Edge,
}

impl Arc {
    pub fn is_reverse(&self) -> bool {
        self.key.is_reverse
    }
}

/// A vertex carrying its node's full attribute set.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub node: Node,
}

/// Ephemeral directed multigraph, rebuilt from the current document
/// snapshot on every query cycle. Never persisted, never mutated after
/// construction.
#[derive(Debug, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    arcs: Vec<Arc>,
    // Vertex index by node id; arc indices by source vertex.
    by_id: HashMap<String, usize>,
    out_arcs: HashMap<String, Vec<usize>>,
}

impl Graph {
    pub(crate) fn insert_vertex(&mut self, node: Node) {
        self.by_id.insert(node.id.clone(), self.vertices.len());
        self.vertices.push(Vertex { node });
    }

    pub(crate) fn insert_arc(&mut self, arc: Arc) {
        self.out_arcs
            .entry(arc.source_id.clone())
            .or_default()
            .push(self.arcs.len());
        self.arcs.push(arc);
    }

    pub fn contains_vertex(&self, node_id: &str) -> bool {
        self.by_id.contains_key(node_id)
    }

    pub fn vertex(&self, node_id: &str) -> Option<&Vertex> {
        self.by_id.get(node_id).map(|&i| &self.vertices[i])
    }

    /// Vertices in record-store insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// All arcs, reverse arcs included, in insertion order.
    pub fn arcs(&self) -> impl Iterator<Item = &Arc> {
        self.arcs.iter()
    }

    /// Outgoing arcs of a vertex. Reverse arcs are included, which is what
    /// makes undirected adjacency traversable from either endpoint.
    pub fn arcs_from(&self, node_id: &str) -> impl Iterator<Item = &Arc> {
        self.out_arcs
            .get(node_id)
            .into_iter()
            .flatten()
            .map(|&i| &self.arcs[i])
    }

    /// Arcs fit for rendering: synthetic reverse arcs filtered out.
    pub fn renderable_arcs(&self) -> impl Iterator<Item = &Arc> {
        self.arcs.iter().filter(|a| !a.is_reverse())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }
}
