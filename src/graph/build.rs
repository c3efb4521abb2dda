//! Deterministic transform from a document snapshot to a built graph.

use crate::error::{RelmapError, Result};
use crate::graph::{Arc, ArcKey, Graph};
use crate::store::Document;

/// Build a directed multigraph from the document.
///
/// Every node becomes a vertex; every edge a forward arc keyed by its id.
/// Non-directional edges additionally get a reverse arc with `is_reverse`
/// set and the original edge id preserved. An edge referencing a missing
/// node fails the build with an integrity error rather than creating a
/// dangling vertex; the caller decides whether to drop the edge or abort.
pub fn build(doc: &Document) -> Result<Graph> {
    let mut graph = Graph::default();

    for node in &doc.nodes {
        graph.insert_vertex(node.clone());
    }

    for edge in &doc.edges {
        for endpoint in [&edge.source_id, &edge.target_id] {
            if !graph.contains_vertex(endpoint) {
                return Err(RelmapError::Integrity {
                    edge_id: edge.id.clone(),
                    node_id: endpoint.clone(),
                });
            }
        }

        graph.insert_arc(Arc {
            key: ArcKey {
                edge_id: edge.id.clone(),
                is_reverse: false,
            },
            source_id: edge.source_id.clone(),
            target_id: edge.target_id.clone(),
            edge: edge.clone(),
        });

        if !edge.directional {
            graph.insert_arc(Arc {
                key: ArcKey {
                    edge_id: edge.id.clone(),
                    is_reverse: true,
                },
                source_id: edge.target_id.clone(),
                target_id: edge.source_id.clone(),
                edge: edge.clone(),
            });
        }
    }

    log::debug!(
        "Built graph: {} vertices, {} arcs",
        graph.vertex_count(),
        graph.arc_count()
    );
    Ok(graph)
}
