//! Presentation adapter boundary.
//!
//! The core never renders anything itself: it projects the built graph
//! plus the current highlight/filter selection into a `ScenePlan`, and an
//! external layout engine implements `Renderer` over that plan. Synthetic
//! reverse arcs are filtered out here and never reach an adapter.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::Result;
use crate::graph::Graph;
use crate::query::relation_type_passes;
use crate::store::Node;

/// What the adapter needs to draw one vertex.
#[derive(Debug, Clone, Serialize)]
pub struct VertexSpec {
    pub id: String,
    /// Display label: the node name.
    pub label: String,
    /// Attribute summary for hover display.
    pub tooltip: String,
    /// At most one vertex per plan is highlighted (search hit).
    pub highlighted: bool,
}

/// What the adapter needs to draw one arc.
#[derive(Debug, Clone, Serialize)]
pub struct ArcSpec {
    pub source: String,
    pub target: String,
    /// Arc label: the relation type.
    pub label: String,
    /// Evidence/note summary for hover display.
    pub tooltip: String,
    /// Drives arrow vs no-arrow styling.
    pub directed: bool,
}

/// A complete, adapter-agnostic description of one render pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScenePlan {
    pub vertices: Vec<VertexSpec>,
    pub arcs: Vec<ArcSpec>,
}

/// Implemented by the external layout/rendering engine; consumed, not
/// provided, by this crate.
pub trait Renderer {
    /// Produce the engine's output (e.g. an HTML page) for the plan.
    fn render(&self, plan: &ScenePlan) -> Result<String>;
}

fn vertex_tooltip(node: &Node) -> String {
    format!(
        "<b>{}</b><br/>type: {}<br/>aliases: {}<br/>tags: {}<br/>notes: {}",
        node.name,
        node.kind.as_str(),
        node.aliases.join(", "),
        node.tags.join(", "),
        node.notes
    )
}

/// Project the graph onto a scene plan.
///
/// Reverse arcs are dropped, the relation-type filter uses the same
/// inclusive-empty semantics as the query layer, and the highlighted
/// vertex (if any) is marked.
pub fn scene_plan(
    graph: &Graph,
    highlight: Option<&str>,
    allowed: Option<&BTreeSet<String>>,
) -> ScenePlan {
    let vertices = graph
        .vertices()
        .map(|v| VertexSpec {
            id: v.node.id.clone(),
            label: v.node.name.clone(),
            tooltip: vertex_tooltip(&v.node),
            highlighted: highlight == Some(v.node.id.as_str()),
        })
        .collect();

    let arcs = graph
        .renderable_arcs()
        .filter(|a| relation_type_passes(allowed, &a.edge.relation_type))
        .map(|a| ArcSpec {
            source: a.source_id.clone(),
            target: a.target_id.clone(),
            label: a.edge.relation_type.clone(),
            tooltip: format!(
                "type: {}<br/>evidence: {}<br/>note: {}",
                a.edge.relation_type, a.edge.evidence, a.edge.note
            ),
            directed: a.edge.directional,
        })
        .collect();

    ScenePlan { vertices, arcs }
}
